//! Shared error type across goaltrack crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed form field.
    BadRequest,
    /// The database could not be reached.
    Unavailable,
    /// A statement failed after the connection was established.
    Database,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::Unavailable => "UNAVAILABLE",
            ClientCode::Database => "DATABASE",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GoalsError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum GoalsError {
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Connection could not be opened (unset credentials, unreachable host, auth).
    #[error("database unavailable: {0}")]
    Unavailable(String),
    /// Statement execution failed on an open connection.
    #[error("database error: {0}")]
    Database(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl GoalsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GoalsError::BadRequest(_) => ClientCode::BadRequest,
            GoalsError::Unavailable(_) => ClientCode::Unavailable,
            GoalsError::Database(_) => ClientCode::Database,
            GoalsError::Internal(_) => ClientCode::Internal,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, GoalsError::Unavailable(_))
    }
}
