//! Order repository.
//!
//! Orders are created exactly once per checkout and never mutated or
//! deleted. The line items are serialized to JSON at persistence and stored
//! as opaque text; the snapshot is a point-in-time copy, so later product
//! edits never alter it.

use chrono::{SecondsFormat, Utc};
use velvet_bean_core::{NewOrder, Order, OrderId, OrderItem};

use super::RepositoryError;
use crate::store::{Row, Store, Value};

fn order_from_row(row: &Row) -> Result<Order, RepositoryError> {
    let id = row
        .value("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| RepositoryError::DataCorruption("order row without id".to_string()))?;
    let text_column = |column: &str| -> Result<String, RepositoryError> {
        row.value(column)
            .and_then(Value::as_str)
            .map(ToString::to_string)
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!("order row without {column}"))
            })
    };
    let total = row
        .value("total")
        .and_then(Value::as_f64)
        .ok_or_else(|| RepositoryError::DataCorruption("order row without total".to_string()))?;

    let items_text = text_column("items")?;
    let items: Vec<OrderItem> = serde_json::from_str(&items_text)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid items snapshot: {e}")))?;

    Ok(Order {
        id: OrderId::new(id),
        name: text_column("name")?,
        email: text_column("email")?,
        address: text_column("address")?,
        total,
        date: text_column("date")?,
        items,
    })
}

/// Repository for placed orders.
pub struct OrderRepository<'a> {
    store: &'a Store,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Persist one order, stamping the placement time.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the items cannot be serialized or the
    /// insert fails.
    pub async fn create(&self, order: &NewOrder) -> Result<OrderId, RepositoryError> {
        let date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let items = serde_json::to_string(&order.items)
            .map_err(|e| RepositoryError::DataCorruption(format!("unserializable items: {e}")))?;

        let result = self
            .store
            .run(
                "INSERT INTO orders (name, email, address, total, date, items) \
                 VALUES (?, ?, ?, ?, ?, ?)",
                &[
                    Value::from(order.name.clone()),
                    Value::from(order.email.clone()),
                    Value::from(order.address.clone()),
                    Value::from(order.total),
                    Value::from(date),
                    Value::from(items),
                ],
            )
            .await?;
        result.generated_id.map(OrderId::new).ok_or_else(|| {
            RepositoryError::DataCorruption("insert did not yield a generated id".to_string())
        })
    }

    /// Fetch one order by identity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the lookup fails or the row is invalid.
    pub async fn find_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = self
            .store
            .get(
                "SELECT * FROM orders WHERE id = ?",
                &[Value::from(id.as_i64())],
            )
            .await?;
        row.as_ref().map(order_from_row).transpose()
    }
}
