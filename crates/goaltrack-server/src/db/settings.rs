//! Database credentials from the process environment.
//!
//! Values are captured once at startup and never validated there; a missing
//! or malformed value only fails the connection attempt that needs it.

use std::fmt;

use sqlx::postgres::PgConnectOptions;

use goaltrack_core::error::{GoalsError, Result};

use crate::config::SslMode;

pub const DB_USERNAME: &str = "DB_USERNAME";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_NAME: &str = "DB_NAME";

#[derive(Clone, Default)]
pub struct DbSettings {
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<String>,
    pub database: Option<String>,
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

impl DbSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (env, test fixtures).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            username: lookup(DB_USERNAME),
            password: lookup(DB_PASSWORD),
            host: lookup(DB_HOST),
            port: lookup(DB_PORT),
            database: lookup(DB_NAME),
        }
    }

    /// Connection options for one session. Every value is required.
    pub fn connect_options(&self, ssl_mode: SslMode) -> Result<PgConnectOptions> {
        let username = required(&self.username, DB_USERNAME)?;
        let password = required(&self.password, DB_PASSWORD)?;
        let host = required(&self.host, DB_HOST)?;
        let port = required(&self.port, DB_PORT)?;
        let database = required(&self.database, DB_NAME)?;

        let port: u16 = port.trim().parse().map_err(|e| {
            GoalsError::Unavailable(format!("{DB_PORT} is not a valid port ({port}): {e}"))
        })?;

        Ok(PgConnectOptions::new()
            .host(host)
            .port(port)
            .username(username)
            .password(password)
            .database(database)
            .ssl_mode(ssl_mode.into()))
    }
}

fn required<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| GoalsError::Unavailable(format!("{key} is not set")))
}
