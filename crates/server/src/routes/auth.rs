//! Admin login handler.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};

use crate::{db::AdminRepository, error::AppError, middleware::auth, state::AppState};

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: &'static str,
}

/// Exchange admin credentials for the bearer token.
///
/// # Errors
///
/// Returns [`AppError::InvalidCredentials`] when no admin matches, or
/// [`AppError::Database`] if the lookup fails.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let admin = AdminRepository::new(state.store())
        .find_by_credentials(&body.username, &body.password)
        .await?;

    match admin {
        Some(_) => Ok(Json(LoginResponse {
            message: "success",
            token: auth::issue_token(),
        })),
        None => Err(AppError::InvalidCredentials),
    }
}
