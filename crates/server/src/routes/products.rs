//! Catalog product handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use velvet_bean_core::{NewProduct, PLACEHOLDER_IMAGE, Product, ProductId};

use crate::{db::ProductRepository, error::AppError, middleware::auth::RequireAuth, state::AppState};

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", delete(delete_product))
}

/// Response for the catalog listing.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub message: &'static str,
    pub data: Vec<Product>,
}

/// Request for creating a product.
///
/// The image is a filename (or absolute URL) chosen by the upload layer;
/// when absent the placeholder is used.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Response for a created product.
#[derive(Debug, Serialize)]
pub struct CreateProductResponse {
    pub message: &'static str,
    pub data: CreatedProduct,
    pub id: ProductId,
}

#[derive(Debug, Serialize)]
pub struct CreatedProduct {
    pub id: ProductId,
}

/// Response for a deleted product.
#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub message: &'static str,
    pub changes: u64,
}

/// List the whole catalog.
///
/// # Errors
///
/// Returns [`AppError::Database`] if the catalog cannot be read.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductListResponse>, AppError> {
    let data = ProductRepository::new(state.store()).list_all().await?;
    Ok(Json(ProductListResponse {
        message: "success",
        data,
    }))
}

/// Create a catalog product.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] without an authorization header,
/// [`AppError::Validation`] for a negative price, or
/// [`AppError::Database`] if the insert fails.
pub async fn create_product(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<Json<CreateProductResponse>, AppError> {
    if body.price < 0.0 {
        return Err(AppError::Validation("Price must be non-negative"));
    }

    let product = NewProduct {
        name: body.name,
        description: body.description,
        price: body.price,
        category: body.category,
        image: body.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
    };
    let id = ProductRepository::new(state.store()).create(&product).await?;
    Ok(Json(CreateProductResponse {
        message: "success",
        data: CreatedProduct { id },
        id,
    }))
}

/// Delete a catalog product, reporting how many rows matched.
///
/// # Errors
///
/// Returns [`AppError::Unauthorized`] without an authorization header or
/// [`AppError::Database`] if the delete fails.
pub async fn delete_product(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteProductResponse>, AppError> {
    let changes = ProductRepository::new(state.store())
        .delete(ProductId::new(id))
        .await?;
    Ok(Json(DeleteProductResponse {
        message: "deleted",
        changes,
    }))
}
