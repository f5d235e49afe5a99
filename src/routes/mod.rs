use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{favorites_handler, people_handler, planets_handler, users_handler};
use crate::metrics::exporter;
use crate::state::app_state::AppState;

pub mod health;
pub mod sitemap;

/// Method/path pairs for every registered route, kept next to the router so
/// the landing page listing cannot drift from it.
pub const ROUTE_TABLE: &[(&str, &str)] = &[
    ("GET", "/"),
    ("GET", "/health"),
    ("GET", "/metrics"),
    ("GET", "/user"),
    ("GET", "/user/:user_id/favorites"),
    ("GET", "/users"),
    ("POST", "/users"),
    ("GET", "/users/:user_id"),
    ("PUT", "/users/:user_id"),
    ("DELETE", "/users/:user_id"),
    ("GET", "/people"),
    ("POST", "/people"),
    ("GET", "/people/:people_id"),
    ("PUT", "/people/:people_id"),
    ("DELETE", "/people/:people_id"),
    ("GET", "/planets"),
    ("POST", "/planets"),
    ("GET", "/planets/:planet_id"),
    ("PUT", "/planets/:planet_id"),
    ("DELETE", "/planets/:planet_id"),
    ("POST", "/favorite/:user_id/people/:people_id"),
    ("DELETE", "/favorite/:user_id/people/:people_id"),
    ("POST", "/favorite/:user_id/planet/:planet_id"),
    ("DELETE", "/favorite/:user_id/planet/:planet_id"),
];

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(sitemap::index))
        .route("/health", get(health::health_check))
        .route("/metrics", get(exporter::metrics_endpoint))
        .route("/user", get(users_handler::hello_user))
        .route(
            "/user/:user_id/favorites",
            get(users_handler::get_user_favorites),
        )
        .route(
            "/users",
            get(users_handler::list_users).post(users_handler::create_user),
        )
        .route(
            "/users/:user_id",
            get(users_handler::get_user)
                .put(users_handler::update_user)
                .delete(users_handler::delete_user),
        )
        .route(
            "/people",
            get(people_handler::list_people).post(people_handler::create_person),
        )
        .route(
            "/people/:people_id",
            get(people_handler::get_person)
                .put(people_handler::update_person)
                .delete(people_handler::delete_person),
        )
        .route(
            "/planets",
            get(planets_handler::list_planets).post(planets_handler::create_planet),
        )
        .route(
            "/planets/:planet_id",
            get(planets_handler::get_planet)
                .put(planets_handler::update_planet)
                .delete(planets_handler::delete_planet),
        )
        .route(
            "/favorite/:user_id/people/:people_id",
            post(favorites_handler::add_favorite_person)
                .delete(favorites_handler::remove_favorite_person),
        )
        .route(
            "/favorite/:user_id/planet/:planet_id",
            post(favorites_handler::add_favorite_planet)
                .delete(favorites_handler::remove_favorite_planet),
        )
        .with_state(app_state)
}
