// lib.rs
pub mod app_error;
pub mod config;
pub mod db;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
