use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// Stored lowercase in the `gender` column and on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Account row. Deliberately not `Serialize`: responses go through
/// [`crate::models::responses::UserSummary`], which never carries the
/// password.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub diameter: Option<i64>,
    pub climate: Option<String>,
    pub population: Option<i64>,
    pub terrain: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct People {
    pub id: i64,
    pub name: String,
    pub gender: Option<Gender>,
    pub height: Option<i64>,
    pub mass: Option<i64>,
    pub planet_id: Option<i64>,
    pub url: Option<String>,
}

/// What a favorite points at. The pair (kind, target id) is the storage
/// representation; the variant keeps handlers from mixing the two id spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteTarget {
    Planet(i64),
    People(i64),
}

impl FavoriteTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            FavoriteTarget::Planet(_) => "planet",
            FavoriteTarget::People(_) => "people",
        }
    }

    pub fn target_id(&self) -> i64 {
        match *self {
            FavoriteTarget::Planet(id) | FavoriteTarget::People(id) => id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub target: FavoriteTarget,
}

impl FromRow<'_, SqliteRow> for Favorite {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        let kind: String = row.try_get("kind")?;
        let target_id: i64 = row.try_get("target_id")?;
        let target = match kind.as_str() {
            "planet" => FavoriteTarget::Planet(target_id),
            "people" => FavoriteTarget::People(target_id),
            other => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "kind".to_string(),
                    source: format!("unknown favorite kind {:?}", other).into(),
                })
            }
        };

        Ok(Favorite {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            target,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub gender: Option<Gender>,
    pub height: Option<i64>,
    pub mass: Option<i64>,
    pub planet_id: Option<i64>,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPlanet {
    pub name: String,
    pub diameter: Option<i64>,
    pub climate: Option<String>,
    pub population: Option<i64>,
    pub terrain: Option<String>,
    pub url: Option<String>,
}
