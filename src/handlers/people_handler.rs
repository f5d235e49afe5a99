use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use std::sync::Arc;

use crate::app_error::ApiError;
use crate::db::is_unique_violation;
use crate::handlers::utils::parse_body;
use crate::models::entities::NewPerson;
use crate::models::requests::{CreatePeopleRequest, UpdatePeopleRequest};
use crate::models::responses::{DataResponse, MessageResponse, PeopleResponse};
use crate::state::app_state::AppState;

const MISSING_BODY: &str = "you must send the person data";

pub async fn list_people(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<PeopleResponse>>>, ApiError> {
    let people = state.db.list_people().await?;
    let data = people.iter().map(PeopleResponse::from).collect();
    Ok(Json(DataResponse::new("get all people ok", data)))
}

pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(people_id): Path<i64>,
) -> Result<Json<DataResponse<PeopleResponse>>, ApiError> {
    let person = state
        .db
        .get_person(people_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("person {} does not exist", people_id)))?;

    Ok(Json(DataResponse::new(
        "get person ok",
        PeopleResponse::from(&person),
    )))
}

pub async fn create_person(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<DataResponse<PeopleResponse>>), ApiError> {
    let req: CreatePeopleRequest = parse_body(&body, MISSING_BODY)?;

    let name = req
        .name
        .ok_or_else(|| ApiError::validation("the person name field is required"))?;

    if let Some(planet_id) = req.planet_id {
        ensure_planet_exists(&state, planet_id).await?;
    }

    let new_person = NewPerson {
        name,
        gender: req.gender,
        height: req.height,
        mass: req.mass,
        planet_id: req.planet_id,
        url: req.url,
    };

    let person = match state.db.insert_person(new_person).await {
        Ok(person) => person,
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::validation("that person already exists"))
        }
        Err(err) => return Err(err.into()),
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(
            "person added",
            PeopleResponse::from(&person),
        )),
    ))
}

/// Partial update. The existence check runs before the body is parsed, so
/// an unknown id answers 404 even when the body is missing or malformed.
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    Path(people_id): Path<i64>,
    body: Bytes,
) -> Result<Json<DataResponse<PeopleResponse>>, ApiError> {
    let mut person = state
        .db
        .get_person(people_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("person {} does not exist", people_id)))?;

    let req: UpdatePeopleRequest = parse_body(&body, MISSING_BODY)?;

    if let Some(name) = req.name {
        person.name = name;
    }
    if let Some(gender) = req.gender {
        person.gender = gender;
    }
    if let Some(height) = req.height {
        person.height = height;
    }
    if let Some(mass) = req.mass {
        person.mass = mass;
    }
    if let Some(planet_id) = req.planet_id {
        if let Some(id) = planet_id {
            ensure_planet_exists(&state, id).await?;
        }
        person.planet_id = planet_id;
    }
    if let Some(url) = req.url {
        person.url = url;
    }

    match state.db.update_person(&person).await {
        Ok(()) => {}
        Err(err) if is_unique_violation(&err) => {
            return Err(ApiError::validation("that person already exists"))
        }
        Err(err) => return Err(err.into()),
    }

    Ok(Json(DataResponse::new(
        "person updated",
        PeopleResponse::from(&person),
    )))
}

pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    Path(people_id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.db.delete_person(people_id).await? {
        return Err(ApiError::not_found(format!(
            "person {} does not exist",
            people_id
        )));
    }

    Ok(Json(MessageResponse::new("person deleted")))
}

async fn ensure_planet_exists(state: &AppState, planet_id: i64) -> Result<(), ApiError> {
    if state.db.get_planet(planet_id).await?.is_none() {
        return Err(ApiError::not_found(format!(
            "planet {} does not exist",
            planet_id
        )));
    }
    Ok(())
}
