/// Runtime configuration, read once at startup. Everything comes from the
/// environment; every variable has a local-development default.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection string. Defaults to a file next to the binary.
    pub database_url: String,
    /// TCP port the server listens on.
    pub port: u16,
    /// Directory the rolling log files are written to.
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./starwars.db".to_string());

        let port = std::env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .expect("SERVER_PORT must be a number");

        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Config {
            database_url,
            port,
            log_dir,
        }
    }
}
