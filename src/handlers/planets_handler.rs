use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::app_error::ApiError;
use crate::db::is_unique_violation;
use crate::handlers::utils::parse_body;
use crate::models::entities::{NewPlanet, Planet};
use crate::models::requests::{CreatePlanetRequest, UpdatePlanetRequest};
use crate::models::responses::{DataResponse, MessageResponse};
use crate::state::app_state::AppState;

const MISSING_BODY: &str = "you must send the planet data";

pub async fn list_planets(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<Planet>>>, ApiError> {
    let planets = state.db.list_planets().await?;
    Ok(Json(DataResponse::new("get all planets ok", planets)))
}

pub async fn get_planet(
    State(state): State<Arc<AppState>>,
    Path(planet_id): Path<i64>,
) -> Result<Json<DataResponse<Planet>>, ApiError> {
    let planet = state
        .db
        .get_planet(planet_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("planet {} does not exist", planet_id)))?;

    Ok(Json(DataResponse::new("get planet ok", planet)))
}

pub async fn create_planet(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<DataResponse<Planet>>), ApiError> {
    let req: CreatePlanetRequest = parse_body(&body, MISSING_BODY)?;

    let name = req
        .name
        .ok_or_else(|| ApiError::validation("the planet name field is required"))?;

    let new_planet = NewPlanet {
        name,
        diameter: req.diameter,
        climate: req.climate,
        population: req.population,
        terrain: req.terrain,
        url: req.url,
    };

    let planet = match state.db.insert_planet(new_planet).await {
        Ok(planet) => planet,
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::validation("that planet already exists"))
        }
        Err(err) => return Err(err.into()),
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new("planet added", planet)),
    ))
}

/// Partial update. The existence check runs before the body is parsed, so
/// an unknown id answers 404 even when the body is missing or malformed.
pub async fn update_planet(
    State(state): State<Arc<AppState>>,
    Path(planet_id): Path<i64>,
    body: Bytes,
) -> Result<Json<DataResponse<Planet>>, ApiError> {
    let mut planet = state
        .db
        .get_planet(planet_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("planet {} does not exist", planet_id)))?;

    let req: UpdatePlanetRequest = parse_body(&body, MISSING_BODY)?;

    if let Some(name) = req.name {
        planet.name = name;
    }
    if let Some(diameter) = req.diameter {
        planet.diameter = diameter;
    }
    if let Some(climate) = req.climate {
        planet.climate = climate;
    }
    if let Some(population) = req.population {
        planet.population = population;
    }
    if let Some(terrain) = req.terrain {
        planet.terrain = terrain;
    }
    if let Some(url) = req.url {
        planet.url = url;
    }

    match state.db.update_planet(&planet).await {
        Ok(()) => {}
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::validation("that planet already exists"))
        }
        Err(err) => return Err(err.into()),
    }

    Ok(Json(DataResponse::new("planet updated", planet)))
}

pub async fn delete_planet(
    State(state): State<Arc<AppState>>,
    Path(planet_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_planet(planet_id).await? {
        return Err(ApiError::not_found(format!(
            "planet {} does not exist",
            planet_id
        )));
    }

    Ok(Json(MessageResponse::new("planet deleted")))
}
