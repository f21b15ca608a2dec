//! HTTP handlers for the goal routes and their error mapping.

pub mod goals;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use goaltrack_core::error::GoalsError;

/// Fixed body for connection failures on the read path.
pub const DB_CONNECT_ERROR_BODY: &str = "Error connecting to the PostgreSQL database";
pub const DB_STATEMENT_ERROR_BODY: &str = "Error executing database statement";

/// `GoalsError` as an HTTP response (plain text).
#[derive(Debug)]
pub struct ApiError(pub GoalsError);

impl From<GoalsError> for ApiError {
    fn from(e: GoalsError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            GoalsError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            GoalsError::Unavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, DB_CONNECT_ERROR_BODY).into_response()
            }
            GoalsError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, DB_STATEMENT_ERROR_BODY).into_response()
            }
            GoalsError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}
