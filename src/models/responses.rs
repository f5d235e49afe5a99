use serde::Serialize;

use super::entities::{Favorite, FavoriteTarget, Gender, People, Planet, User};

/// Success envelope without a payload. Errors share the shape, built in
/// [`crate::app_error::ApiError`].
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        MessageResponse { msg: msg.into() }
    }
}

/// Success envelope with a payload.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub msg: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(msg: impl Into<String>, data: T) -> Self {
        DataResponse {
            msg: msg.into(),
            data,
        }
    }
}

/// Public view of a user. The password stays out of every response.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub user_name: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        UserSummary {
            id: user.id,
            email: user.email.clone(),
            user_name: user.user_name.clone(),
        }
    }
}

/// Wire shape for a person. The home planet reference is internal and is
/// not exposed here.
#[derive(Debug, Serialize)]
pub struct PeopleResponse {
    pub id: i64,
    pub name: String,
    pub gender: Option<Gender>,
    pub height: Option<i64>,
    pub mass: Option<i64>,
    pub url: Option<String>,
}

impl From<&People> for PeopleResponse {
    fn from(person: &People) -> Self {
        PeopleResponse {
            id: person.id,
            name: person.name.clone(),
            gender: person.gender,
            height: person.height,
            mass: person.mass,
            url: person.url.clone(),
        }
    }
}

/// Wire shape for a favorite link: exactly one of the two target ids is set.
#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub user_id: i64,
    pub planet_id: Option<i64>,
    pub people_id: Option<i64>,
}

impl From<&Favorite> for FavoriteResponse {
    fn from(favorite: &Favorite) -> Self {
        let (planet_id, people_id) = match favorite.target {
            FavoriteTarget::Planet(id) => (Some(id), None),
            FavoriteTarget::People(id) => (None, Some(id)),
        };
        FavoriteResponse {
            user_id: favorite.user_id,
            planet_id,
            people_id,
        }
    }
}

/// Element of the per-user favorites listing: the resolved target entity.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FavoriteEntry {
    Planet(Planet),
    People(PeopleResponse),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn favorite_wire_shape_sets_one_target() {
        let favorite = Favorite {
            id: 7,
            user_id: 3,
            target: FavoriteTarget::People(5),
        };
        let value = serde_json::to_value(FavoriteResponse::from(&favorite)).unwrap();
        assert_eq!(value, json!({"user_id": 3, "planet_id": null, "people_id": 5}));
    }

    #[test]
    fn user_summary_has_no_password() {
        let user = User {
            id: 1,
            user_name: "leia".to_string(),
            email: "leia@example.com".to_string(),
            password: "hunter2".to_string(),
            is_active: true,
        };
        let value = serde_json::to_value(UserSummary::from(&user)).unwrap();
        assert_eq!(
            value,
            json!({"id": 1, "email": "leia@example.com", "user_name": "leia"})
        );
    }

    #[test]
    fn people_wire_shape_omits_home_planet() {
        let person = People {
            id: 2,
            name: "Luke".to_string(),
            gender: Some(Gender::Male),
            height: Some(172),
            mass: None,
            planet_id: Some(1),
            url: None,
        };
        let value = serde_json::to_value(PeopleResponse::from(&person)).unwrap();
        assert!(value.get("planet_id").is_none());
        assert_eq!(value["gender"], "male");
        assert_eq!(value["height"], 172);
        assert_eq!(value["mass"], json!(null));
    }
}
