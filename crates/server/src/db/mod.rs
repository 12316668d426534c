//! Typed database access on top of the unified store interface.
//!
//! # Tables
//!
//! - `products` - catalog items (admin-created, catalog-read, admin-deleted)
//! - `admins` - administrator logins (seeded once, read-only)
//! - `orders` - placed orders with an immutable serialized item snapshot
//!
//! Schema creation and seeding live in [`schema`]; the repositories wrap the
//! store's `query`/`run`/`get` operations and convert rows into the core
//! models.

pub mod admins;
pub mod orders;
pub mod products;
pub mod schema;

use thiserror::Error;

use crate::store::QueryError;

pub use admins::AdminRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store rejected a statement.
    #[error(transparent)]
    Database(#[from] QueryError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}
