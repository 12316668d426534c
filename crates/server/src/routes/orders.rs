//! Order placement handler.
//!
//! A request moves through validate -> persist -> respond, with the
//! confirmation email dispatched as a background task after persistence.
//! Notification latency or failure never delays or fails the checkout
//! response.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use velvet_bean_core::{NewOrder, OrderId, OrderItem};

use crate::{
    db::OrderRepository,
    error::AppError,
    services::email::OrderConfirmation,
    state::AppState,
};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new().route("/orders", post(place_order))
}

/// Order placement request body.
///
/// All fields default so an absent field fails our validation (a 400 with
/// the contractual message) rather than body deserialization.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total: f64,
}

impl PlaceOrderRequest {
    /// Validate and convert into a persistable order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when name, email, or address is
    /// empty, or when there are no items.
    pub fn into_new_order(self) -> Result<NewOrder, AppError> {
        if self.name.is_empty()
            || self.email.is_empty()
            || self.address.is_empty()
            || self.items.is_empty()
        {
            return Err(AppError::Validation("Missing required fields"));
        }
        Ok(NewOrder {
            name: self.name,
            email: self.email,
            address: self.address,
            total: self.total,
            items: self.items,
        })
    }
}

/// Successful order placement response.
#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub message: &'static str,
    #[serde(rename = "orderId")]
    pub order_id: OrderId,
}

/// Place an order: validate, persist, respond, then notify in the
/// background.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for a malformed order (no side effects)
/// or [`AppError::Database`] if persistence fails.
pub async fn place_order(
    State(state): State<AppState>,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<Json<PlaceOrderResponse>, AppError> {
    let order = body.into_new_order()?;

    let order_id = OrderRepository::new(state.store()).create(&order).await?;
    tracing::info!(order_id = %order_id, "order saved");

    dispatch_confirmation(&state, order_id, &order);

    Ok(Json(PlaceOrderResponse {
        message: "success",
        order_id,
    }))
}

/// Launch the confirmation send without awaiting it. The outcome is only
/// logged; it never reaches the caller and never changes the order.
fn dispatch_confirmation(state: &AppState, order_id: OrderId, order: &NewOrder) {
    let Some(mailer) = state.mailer().cloned() else {
        tracing::debug!(order_id = %order_id, "no mailer configured, skipping confirmation");
        return;
    };

    let confirmation = OrderConfirmation::new(order_id, order);
    let to = order.email.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_order_confirmation(&to, &confirmation).await {
            tracing::error!(order_id = %order_id, error = %err, "order confirmation failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use velvet_bean_core::ProductId;

    use super::*;

    fn filled_request() -> PlaceOrderRequest {
        PlaceOrderRequest {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            address: "1 St".to_string(),
            items: vec![OrderItem {
                id: ProductId::new(1),
                name: "X".to_string(),
                price: 2.5,
                quantity: 2,
            }],
            total: 5.0,
        }
    }

    #[test]
    fn test_valid_request_converts() {
        let order = filled_request().into_new_order().expect("valid");
        assert_eq!(order.total, 5.0);
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let empty_name = PlaceOrderRequest {
            name: String::new(),
            ..filled_request()
        };
        assert!(empty_name.into_new_order().is_err());

        let empty_address = PlaceOrderRequest {
            address: String::new(),
            ..filled_request()
        };
        assert!(empty_address.into_new_order().is_err());

        let no_items = PlaceOrderRequest {
            items: Vec::new(),
            ..filled_request()
        };
        assert!(no_items.into_new_order().is_err());
    }
}
