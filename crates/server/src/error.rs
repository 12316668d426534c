//! Unified error handling for the API server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Order payload failed validation. No side effects occurred.
    #[error("{0}")]
    Validation(&'static str),

    /// Request to an admin operation without an authorization header.
    #[error("Unauthorized")]
    Unauthorized,

    /// Login with a username/password pair that matched no admin.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_)) {
            tracing::error!(error = %self, "request failed");
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Login failures use the `message` key; everything else reports
        // under `error`. Both shapes are part of the external contract.
        let body = match &self {
            Self::InvalidCredentials => json!({ "message": self.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::QueryError;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::Validation("Missing required fields")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(AppError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Database(RepositoryError::DataCorruption(
                "bad row".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_error_carries_backend_message() {
        let err = AppError::Database(RepositoryError::Database(QueryError::UnsupportedColumn {
            column: "price".to_string(),
            type_name: "JSONB".to_string(),
        }));
        assert_eq!(
            err.to_string(),
            "Database error: unsupported type JSONB in column price"
        );
    }
}
