//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Unset or unparsable values fall back
//! to the defaults below, except `LISTEN_ADDR`, which must parse if set.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// PostgreSQL connection string.
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Use PostgreSQL when `true`, the in-memory store otherwise.
    pub persistence_enabled: bool,

    /// The single origin allowed to make cross-origin requests.
    pub allowed_origin: String,

    /// Directory holding uploaded photos.
    pub uploads_dir: PathBuf,

    /// Public base address used to build photo URLs.
    pub public_base_url: String,

    /// Whether to start the nightly pop-reset task.
    pub pop_reset_enabled: bool,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            database_url: "postgres://root@localhost:5432/popin".to_string(),
            database_max_connections: 10,
            database_min_connections: 1,
            database_connect_timeout_secs: 5,
            persistence_enabled: true,
            allowed_origin: "http://localhost:8081".to_string(),
            uploads_dir: PathBuf::from("uploads"),
            public_base_url: format!("http://localhost:{DEFAULT_PORT}"),
            pop_reset_enabled: true,
            log_json: false,
        }
    }
}

const DEFAULT_PORT: u16 = 3000;

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    /// `PORT` replaces the port of the default listen address when
    /// `LISTEN_ADDR` is not set.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr = match std::env::var("LISTEN_ADDR") {
            Ok(raw) => raw.parse()?,
            Err(_) => {
                let port = parse_env("PORT", DEFAULT_PORT);
                SocketAddr::new(defaults.listen_addr.ip(), port)
            }
        };

        Ok(Self {
            listen_addr,
            database_url: std::env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_env(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            ),
            database_min_connections: parse_env(
                "DATABASE_MIN_CONNECTIONS",
                defaults.database_min_connections,
            ),
            database_connect_timeout_secs: parse_env(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                defaults.database_connect_timeout_secs,
            ),
            persistence_enabled: parse_env_bool("PERSISTENCE_ENABLED", defaults.persistence_enabled),
            allowed_origin: std::env::var("ALLOWED_ORIGIN").unwrap_or(defaults.allowed_origin),
            uploads_dir: std::env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.uploads_dir),
            public_base_url: std::env::var("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_base_url),
            pop_reset_enabled: parse_env_bool("POP_RESET_ENABLED", defaults.pop_reset_enabled),
            log_json: parse_env_bool("LOG_JSON", defaults.log_json),
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key).ok().map(|v| v.to_ascii_lowercase()).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_development_setup() {
        let config = AppConfig::default();
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.allowed_origin, "http://localhost:8081");
        assert_eq!(config.public_base_url, "http://localhost:3000");
        assert_eq!(config.uploads_dir, PathBuf::from("uploads"));
        assert!(config.persistence_enabled);
        assert!(config.pop_reset_enabled);
    }

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        assert_eq!(parse_env("POPIN_TEST_SURELY_UNSET_KEY", 42u32), 42);
        assert!(parse_env_bool("POPIN_TEST_SURELY_UNSET_KEY", true));
    }
}
