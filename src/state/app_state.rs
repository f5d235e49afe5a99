use crate::db::store::Db;

pub struct AppState {
    pub db: Db,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        AppState { db }
    }
}
