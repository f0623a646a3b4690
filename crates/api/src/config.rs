use std::path::PathBuf;

use xeno_social::rapidapi::DEFAULT_RAPIDAPI_HOST;
use xeno_social::RapidApiConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All optional fields have defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for closing the database pool after the server stops.
    pub shutdown_timeout_secs: u64,
    /// Optional persona catalog file; the built-in catalog is used when unset.
    pub persona_catalog_path: Option<PathBuf>,
    /// Bearer token validation settings.
    pub jwt: JwtConfig,
    /// Profile lookup credentials.
    pub rapidapi: RapidApiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                             |
    /// | `PERSONA_CATALOG_PATH` | unset (built-in catalog)         |
    /// | `RAPIDAPI_KEY`         | **required**                     |
    /// | `RAPIDAPI_HOST`        | `twitter-api45.p.rapidapi.com`   |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers or a missing `RAPIDAPI_KEY`, so
    /// misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let persona_catalog_path = std::env::var("PERSONA_CATALOG_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let api_key =
            std::env::var("RAPIDAPI_KEY").expect("RAPIDAPI_KEY must be set in the environment");
        let rapidapi_host =
            std::env::var("RAPIDAPI_HOST").unwrap_or_else(|_| DEFAULT_RAPIDAPI_HOST.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            persona_catalog_path,
            jwt: JwtConfig::from_env(),
            rapidapi: RapidApiConfig::new(api_key, rapidapi_host),
        }
    }
}
