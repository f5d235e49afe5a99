use axum::Json;

use super::ROUTE_TABLE;
use crate::models::responses::DataResponse;

/// Landing page: lists every registered endpoint.
pub async fn index() -> Json<DataResponse<Vec<String>>> {
    let routes = ROUTE_TABLE
        .iter()
        .map(|(method, path)| format!("{} {}", method, path))
        .collect();
    Json(DataResponse::new("available endpoints", routes))
}
