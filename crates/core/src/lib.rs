//! Velvet Bean Core - Shared types library.
//!
//! This crate provides common types used across all Velvet Bean components:
//! - `server` - Catalog, admin, and order API backend
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the catalog/admin/order domain models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
