use crate::models::AccessLogMeta;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Error type shared by every handler. Each variant fixes the HTTP status
/// the response carries; the body is always `{"msg": <string>}`.
#[derive(Debug)]
pub enum ApiError {
    /// Missing body, missing required field, or a name already taken (400).
    Validation(String),
    /// Body that failed JSON parsing (400). Keeps the raw body so the
    /// access log can record what was rejected.
    InvalidJson { message: String, body: String },
    /// A referenced row does not exist (404).
    NotFound(String),
    /// The favorite pair already exists (409).
    Duplicate(String),
    /// Underlying store failure (500).
    Database(sqlx::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn invalid_json(msg: impl Into<String>, body: impl Into<String>) -> Self {
        ApiError::InvalidJson {
            message: msg.into(),
            body: body.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        ApiError::Duplicate(msg.into())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::InvalidJson { message, .. } => write!(f, "{}", message),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Duplicate(msg) => write!(f, "{}", msg),
            ApiError::Database(err) => write!(f, "Database operation failed: {}", err),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, request_body) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::InvalidJson { message, body } => {
                (StatusCode::BAD_REQUEST, message, Some(body))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Duplicate(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Database(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database operation failed: {}", err),
                None,
            ),
        };

        let body = Json(json!({ "msg": message }));

        let mut response = (status, body).into_response();

        // Surface the error and the offending body to the access log middleware
        response.extensions_mut().insert(AccessLogMeta {
            error: Some(message),
            request_body,
        });

        response
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err)
    }
}
