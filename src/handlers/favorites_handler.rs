use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::app_error::ApiError;
use crate::db::is_unique_violation;
use crate::models::entities::FavoriteTarget;
use crate::models::responses::{DataResponse, FavoriteResponse, MessageResponse};
use crate::state::app_state::AppState;

pub async fn add_favorite_person(
    State(state): State<Arc<AppState>>,
    Path((user_id, people_id)): Path<(i64, i64)>,
) -> Result<(StatusCode, Json<DataResponse<FavoriteResponse>>), ApiError> {
    add_favorite(&state, user_id, FavoriteTarget::People(people_id)).await
}

pub async fn remove_favorite_person(
    State(state): State<Arc<AppState>>,
    Path((user_id, people_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_favorite(&state, user_id, FavoriteTarget::People(people_id)).await
}

pub async fn add_favorite_planet(
    State(state): State<Arc<AppState>>,
    Path((user_id, planet_id)): Path<(i64, i64)>,
) -> Result<(StatusCode, Json<DataResponse<FavoriteResponse>>), ApiError> {
    add_favorite(&state, user_id, FavoriteTarget::Planet(planet_id)).await
}

pub async fn remove_favorite_planet(
    State(state): State<Arc<AppState>>,
    Path((user_id, planet_id)): Path<(i64, i64)>,
) -> Result<Json<MessageResponse>, ApiError> {
    remove_favorite(&state, user_id, FavoriteTarget::Planet(planet_id)).await
}

/// Both favorite kinds share one flow; only the target variant differs.
/// The insert itself is the duplicate check: the unique index answers
/// atomically, where a prior SELECT could race a concurrent insert.
async fn add_favorite(
    state: &AppState,
    user_id: i64,
    target: FavoriteTarget,
) -> Result<(StatusCode, Json<DataResponse<FavoriteResponse>>), ApiError> {
    ensure_user_exists(state, user_id).await?;
    ensure_target_exists(state, target).await?;

    let favorite = match state.db.insert_favorite(user_id, target).await {
        Ok(favorite) => favorite,
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::duplicate(format!(
                "user {} already favors {} {}",
                user_id,
                target_noun(target),
                target.target_id()
            )))
        }
        Err(err) => return Err(err.into()),
    };

    let msg = match target {
        FavoriteTarget::Planet(_) => "planet favorite added",
        FavoriteTarget::People(_) => "person favorite added",
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(msg, FavoriteResponse::from(&favorite))),
    ))
}

async fn remove_favorite(
    state: &AppState,
    user_id: i64,
    target: FavoriteTarget,
) -> Result<Json<MessageResponse>, ApiError> {
    ensure_user_exists(state, user_id).await?;
    ensure_target_exists(state, target).await?;

    if !state.db.delete_favorite(user_id, target).await? {
        return Err(ApiError::validation(format!(
            "user {} does not favor {} {}",
            user_id,
            target_noun(target),
            target.target_id()
        )));
    }

    Ok(Json(MessageResponse::new("favorite removed")))
}

async fn ensure_user_exists(state: &AppState, user_id: i64) -> Result<(), ApiError> {
    if state.db.get_user(user_id).await?.is_none() {
        return Err(ApiError::not_found(format!(
            "user {} does not exist",
            user_id
        )));
    }
    Ok(())
}

async fn ensure_target_exists(state: &AppState, target: FavoriteTarget) -> Result<(), ApiError> {
    match target {
        FavoriteTarget::Planet(id) => {
            if state.db.get_planet(id).await?.is_none() {
                return Err(ApiError::not_found(format!("planet {} does not exist", id)));
            }
        }
        FavoriteTarget::People(id) => {
            if state.db.get_person(id).await?.is_none() {
                return Err(ApiError::not_found(format!("person {} does not exist", id)));
            }
        }
    }
    Ok(())
}

fn target_noun(target: FavoriteTarget) -> &'static str {
    match target {
        FavoriteTarget::Planet(_) => "planet",
        FavoriteTarget::People(_) => "person",
    }
}
