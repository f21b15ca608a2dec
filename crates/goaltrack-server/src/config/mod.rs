//! Server config loader (strict parsing).
//!
//! The config file is optional; database credentials never live in it and
//! are read from the environment (see `db::DbSettings`).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use goaltrack_core::error::{GoalsError, Result};

pub use schema::{DatabaseSection, GoaltrackConfig, ServerSection, SslMode, StoreBackend};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "GOALTRACK_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "goaltrack.yaml";

/// Load the config named by `GOALTRACK_CONFIG` (or `goaltrack.yaml`).
/// A missing file yields the defaults.
pub fn load() -> Result<GoaltrackConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    match fs::read_to_string(&path) {
        Ok(s) => {
            tracing::info!(%path, "loading config file");
            load_from_str(&s)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "no config file, using defaults");
            Ok(GoaltrackConfig::default())
        }
        Err(e) => Err(GoalsError::Internal(format!("read config {path} failed: {e}"))),
    }
}

pub fn load_from_str(s: &str) -> Result<GoaltrackConfig> {
    let cfg: GoaltrackConfig = serde_yaml::from_str(s)
        .map_err(|e| GoalsError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
