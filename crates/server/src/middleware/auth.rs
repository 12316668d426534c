//! Admin authorization seam.
//!
//! The deployed contract is a single shared bearer token issued by login and
//! checked by presence on admin mutations - a known security gap carried
//! for compatibility. Issuance and verification are concentrated here so a
//! real token or session scheme can replace them without touching callers.

use axum::{
    extract::FromRequestParts,
    http::{HeaderValue, header, request::Parts},
};

use crate::error::AppError;

/// The shared bearer token returned by a successful login.
const ADMIN_TOKEN: &str = "admin-secret-token-123";

/// Token handed to a caller that presented valid credentials.
#[must_use]
pub const fn issue_token() -> &'static str {
    ADMIN_TOKEN
}

/// Check the authorization header of an admin mutation.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] when the header is absent or empty.
pub fn authorize(header: Option<&HeaderValue>) -> Result<(), AppError> {
    match header {
        Some(value) if !value.is_empty() => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// Extractor that requires an authorization header on the request.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_auth: RequireAuth) -> impl IntoResponse {
///     "only with an Authorization header"
/// }
/// ```
pub struct RequireAuth;

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts.headers.get(header::AUTHORIZATION))?;
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_requires_nonempty_header() {
        assert!(authorize(Some(&HeaderValue::from_static("Bearer x"))).is_ok());
        assert!(authorize(Some(&HeaderValue::from_static(""))).is_err());
        assert!(authorize(None).is_err());
    }

    #[test]
    fn test_issued_token_is_stable() {
        assert_eq!(issue_token(), "admin-secret-token-123");
    }
}
