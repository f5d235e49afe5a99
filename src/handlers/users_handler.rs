use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::app_error::ApiError;
use crate::db::is_unique_violation;
use crate::handlers::utils::parse_body;
use crate::models::entities::{FavoriteTarget, NewUser};
use crate::models::requests::{CreateUserRequest, UpdateUserRequest};
use crate::models::responses::{
    DataResponse, FavoriteEntry, MessageResponse, PeopleResponse, UserSummary,
};
use crate::state::app_state::AppState;

const MISSING_BODY: &str = "you must send the user data";
const DUPLICATE_USER: &str = "user_name or email already in use";

pub async fn hello_user() -> Json<MessageResponse> {
    Json(MessageResponse::new("Hello, this is your GET /user response "))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<UserSummary>>>, ApiError> {
    let users = state.db.list_users().await?;
    let data = users.iter().map(UserSummary::from).collect();
    Ok(Json(DataResponse::new("get users ok", data)))
}

/// Every favorite of the user, resolved to the target entity. An unknown
/// user simply has no favorites and answers with an empty list.
pub async fn get_user_favorites(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<DataResponse<Vec<FavoriteEntry>>>, ApiError> {
    let favorites = state.db.list_favorites_for_user(user_id).await?;

    let mut entries = Vec::with_capacity(favorites.len());
    for favorite in favorites {
        match favorite.target {
            FavoriteTarget::Planet(id) => {
                if let Some(planet) = state.db.get_planet(id).await? {
                    entries.push(FavoriteEntry::Planet(planet));
                }
            }
            FavoriteTarget::People(id) => {
                if let Some(person) = state.db.get_person(id).await? {
                    entries.push(FavoriteEntry::People(PeopleResponse::from(&person)));
                }
            }
        }
    }

    Ok(Json(DataResponse::new("get favorites ok", entries)))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<DataResponse<UserSummary>>), ApiError> {
    let req: CreateUserRequest = parse_body(&body, MISSING_BODY)?;

    let user_name = req
        .user_name
        .ok_or_else(|| ApiError::validation("the user_name field is required"))?;
    let email = req
        .email
        .ok_or_else(|| ApiError::validation("the email field is required"))?;
    let password = req
        .password
        .ok_or_else(|| ApiError::validation("the password field is required"))?;

    let new_user = NewUser {
        user_name,
        email,
        password,
        is_active: req.is_active.unwrap_or(true),
    };

    let user = match state.db.insert_user(new_user).await {
        Ok(user) => user,
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::validation(DUPLICATE_USER))
        }
        Err(err) => return Err(err.into()),
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("user added", UserSummary::from(&user))),
    ))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<DataResponse<UserSummary>>, ApiError> {
    let user = state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user {} does not exist", user_id)))?;

    Ok(Json(DataResponse::new("get user ok", UserSummary::from(&user))))
}

/// Partial update. The existence check runs before the body is parsed, so
/// an unknown id answers 404 even when the body is missing or malformed.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    body: Bytes,
) -> Result<Json<DataResponse<UserSummary>>, ApiError> {
    let mut user = state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("user {} does not exist", user_id)))?;

    let req: UpdateUserRequest = parse_body(&body, MISSING_BODY)?;

    if let Some(user_name) = req.user_name {
        user.user_name = user_name;
    }
    if let Some(email) = req.email {
        user.email = email;
    }
    if let Some(password) = req.password {
        user.password = password;
    }
    if let Some(is_active) = req.is_active {
        user.is_active = is_active;
    }

    match state.db.update_user(&user).await {
        Ok(()) => {}
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::validation(DUPLICATE_USER))
        }
        Err(err) => return Err(err.into()),
    }

    Ok(Json(DataResponse::new("user updated", UserSummary::from(&user))))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_user(user_id).await? {
        return Err(ApiError::not_found(format!(
            "user {} does not exist",
            user_id
        )));
    }

    Ok(Json(MessageResponse::new("user deleted")))
}
