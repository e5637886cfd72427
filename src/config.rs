use std::env;

/// Runtime settings, read once at startup from the environment (a local
/// `.env` file is loaded before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub storage_root: String,
    pub session_secret: Option<String>,
    pub session_ttl_minutes: i64,
}

impl Config {
    pub fn init() -> Config {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let storage_root = env::var("STORAGE_ROOT").unwrap_or_else(|_| "wwwroot".to_string());
        let session_secret = env::var("SESSION_SECRET").ok();
        let session_ttl_minutes = env::var("SESSION_TTL_MINUTES")
            .ok()
            .and_then(|m| m.parse().ok())
            .unwrap_or(30);

        Config {
            database_url,
            port,
            storage_root,
            session_secret,
            session_ttl_minutes,
        }
    }
}
