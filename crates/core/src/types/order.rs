//! Order models.
//!
//! An order embeds a point-in-time snapshot of its line items. The snapshot
//! is immutable once written: later product edits or deletions never alter
//! historical orders.

use serde::{Deserialize, Serialize};

use super::{OrderId, ProductId};

/// One line of an order's item snapshot.
///
/// Field names match the serialized snapshot stored in the `orders.items`
/// column, so round-tripping a stored order reproduces the original items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The product this line was copied from.
    pub id: ProductId,
    pub name: String,
    /// Unit price at the time the order was placed.
    pub price: f64,
    pub quantity: u32,
}

/// A placed order as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub email: String,
    pub address: String,
    pub total: f64,
    /// Placement timestamp, ISO-8601.
    pub date: String,
    pub items: Vec<OrderItem>,
}

/// Input for placing an order. The placement timestamp is stamped at
/// persistence, not supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub name: String,
    pub email: String,
    pub address: String,
    pub total: f64,
    pub items: Vec<OrderItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_item_snapshot_field_names() {
        let item = OrderItem {
            id: ProductId::new(1),
            name: "X".to_string(),
            price: 2.5,
            quantity: 2,
        };

        let json = serde_json::to_value(&item).expect("serializes");
        assert_eq!(json["id"], 1);
        assert_eq!(json["price"], 2.5);
        assert_eq!(json["quantity"], 2);
    }

    #[test]
    fn test_items_snapshot_roundtrip() {
        let items = vec![
            OrderItem {
                id: ProductId::new(1),
                name: "Espresso Doppio".to_string(),
                price: 3.5,
                quantity: 1,
            },
            OrderItem {
                id: ProductId::new(7),
                name: "Matcha Scone".to_string(),
                price: 3.25,
                quantity: 3,
            },
        ];

        let text = serde_json::to_string(&items).expect("serializes");
        let back: Vec<OrderItem> = serde_json::from_str(&text).expect("deserializes");
        assert_eq!(back, items);
    }
}
