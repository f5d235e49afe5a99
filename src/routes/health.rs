use axum::extract::State;
use axum::{response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app_error::ApiError;
use crate::state::app_state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
}

/// Health check endpoint; answers only after a live database round trip.
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.ping().await?;

    let response = HealthResponse {
        status: "ok".to_string(),
    };
    Ok(Json(response))
}
