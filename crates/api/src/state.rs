use std::path::Path;
use std::sync::Arc;

use xeno_core::error::CoreError;
use xeno_core::persona::PersonaCatalog;
use xeno_social::ProfileSource;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: xeno_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Persona catalog, loaded once at startup and never mutated.
    pub catalog: Arc<PersonaCatalog>,
    /// Profile metrics lookup.
    pub profiles: Arc<dyn ProfileSource>,
}

/// Load the persona catalog from `path`, or the built-in one when `None`.
pub fn load_persona_catalog(path: Option<&Path>) -> Result<PersonaCatalog, CoreError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                CoreError::Internal(format!(
                    "Failed to read persona catalog {}: {e}",
                    path.display()
                ))
            })?;
            PersonaCatalog::from_json(&raw)
        }
        None => PersonaCatalog::builtin(),
    }
}
