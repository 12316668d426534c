//! API route handlers.

pub mod auth;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(products::router())
        .merge(auth::router())
        .merge(orders::router())
}
