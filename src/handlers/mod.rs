pub mod favorites_handler;
pub mod people_handler;
pub mod planets_handler;
pub mod users_handler;
pub mod utils;
