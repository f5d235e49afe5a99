use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use prometheus::TextEncoder;

pub async fn metrics_endpoint() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    match encoder.encode_to_string(&metric_families) {
        Ok(output) => (StatusCode::OK, output).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
