use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

pub mod store;

/// Schema DDL, applied at startup. Referential integrity rules live here:
/// a user's favorites go with the user, and a person loses its home planet
/// reference when the planet is deleted. Favorites of a deleted planet or
/// person are removed by the store inside the same transaction, since the
/// tagged `kind`/`target_id` pair cannot carry a per-kind foreign key.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_name TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS planets (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        diameter INTEGER,
        climate TEXT,
        population INTEGER,
        terrain TEXT,
        url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS people (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        gender TEXT CHECK (gender IN ('male', 'female')),
        height INTEGER,
        mass INTEGER,
        planet_id INTEGER REFERENCES planets (id) ON DELETE SET NULL,
        url TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS favorite_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        kind TEXT NOT NULL CHECK (kind IN ('planet', 'people')),
        target_id INTEGER NOT NULL,
        UNIQUE (user_id, kind, target_id)
    )
    "#,
];

/// Initialize the connection pool and apply the schema.
///
/// Accepts `sqlite:<path>` connection strings (the `sqlite:` prefix is
/// optional) and `sqlite::memory:` for tests.
pub async fn init_db_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let db_path = database_url
        .strip_prefix("sqlite:")
        .unwrap_or(database_url);

    let options = SqliteConnectOptions::from_str(db_path)?
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory database lives only as long as its connection, so the
    // pool must hold exactly one connection and never retire it.
    let pool = if db_path.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePool::connect_with(options).await?
    };

    for ddl in SCHEMA {
        sqlx::query(ddl).execute(&pool).await?;
    }

    info!("Database at '{}' initialized successfully", db_path);
    Ok(pool)
}

/// True when the error is a UNIQUE constraint violation. The store inserts
/// without checking first; callers turn this signal into the duplicate
/// response for their endpoint.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
