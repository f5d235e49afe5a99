use serde::{Deserialize, Deserializer};

use super::entities::Gender;

// Create payloads keep every field optional so the handlers can answer with
// a precise validation message instead of a generic deserialization error.

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePeopleRequest {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub height: Option<i64>,
    pub mass: Option<i64>,
    pub planet_id: Option<i64>,
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanetRequest {
    pub name: Option<String>,
    pub diameter: Option<i64>,
    pub climate: Option<String>,
    pub population: Option<i64>,
    pub terrain: Option<String>,
    pub url: Option<String>,
}

// Update payloads. Nullable columns use a nested Option so a PUT can tell
// "key missing, keep the value" apart from "key set to null, clear it".
// Non-nullable columns only ever keep or replace.

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePeopleRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub gender: Option<Option<Gender>>,
    #[serde(default, deserialize_with = "double_option")]
    pub height: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub mass: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub planet_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePlanetRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub diameter: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub climate: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub population: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub terrain: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub url: Option<Option<String>>,
}

/// The outer `Option` is `None` only when the key is missing entirely; an
/// explicit `null` lands as `Some(None)`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_missing_from_null() {
        let req: UpdatePeopleRequest = serde_json::from_str(r#"{"height": null}"#).unwrap();
        assert_eq!(req.height, Some(None));
        assert_eq!(req.mass, None);

        let req: UpdatePeopleRequest = serde_json::from_str(r#"{"mass": 49}"#).unwrap();
        assert_eq!(req.mass, Some(Some(49)));
        assert_eq!(req.height, None);
    }

    #[test]
    fn gender_only_accepts_known_values() {
        let req: CreatePeopleRequest =
            serde_json::from_str(r#"{"name": "Rey", "gender": "female"}"#).unwrap();
        assert_eq!(req.gender, Some(Gender::Female));

        let err = serde_json::from_str::<CreatePeopleRequest>(r#"{"gender": "droid"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn empty_object_is_a_valid_update() {
        let req: UpdatePlanetRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none());
        assert!(req.diameter.is_none());
    }
}
