//! Core types for Velvet Bean.
//!
//! This module provides type-safe wrappers and models for the domain.

pub mod admin;
pub mod id;
pub mod order;
pub mod product;

pub use admin::Admin;
pub use id::*;
pub use order::{NewOrder, Order, OrderItem};
pub use product::{NewProduct, PLACEHOLDER_IMAGE, Product};
