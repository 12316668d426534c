//! Product repository.

use velvet_bean_core::{NewProduct, PLACEHOLDER_IMAGE, Product, ProductId};

use super::RepositoryError;
use crate::store::{Row, Store, Value};

fn product_from_row(row: &Row) -> Result<Product, RepositoryError> {
    let id = row
        .value("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| RepositoryError::DataCorruption("product row without id".to_string()))?;
    let name = row
        .value("name")
        .and_then(Value::as_str)
        .ok_or_else(|| RepositoryError::DataCorruption("product row without name".to_string()))?;
    let price = row
        .value("price")
        .and_then(Value::as_f64)
        .ok_or_else(|| RepositoryError::DataCorruption("product row without price".to_string()))?;

    Ok(Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: row
            .value("description")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        price,
        category: row
            .value("category")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        image: row
            .value("image")
            .and_then(Value::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
            .to_string(),
    })
}

/// Repository for catalog products.
pub struct ProductRepository<'a> {
    store: &'a Store,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the query fails or a row is invalid.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = self.store.query("SELECT * FROM products", &[]).await?;
        rows.iter().map(product_from_row).collect()
    }

    /// Insert a product and return its generated identity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<ProductId, RepositoryError> {
        let result = self
            .store
            .run(
                "INSERT INTO products (name, description, price, category, image) \
                 VALUES (?, ?, ?, ?, ?)",
                &[
                    Value::from(product.name.clone()),
                    Value::from(product.description.clone()),
                    Value::from(product.price),
                    Value::from(product.category.clone()),
                    Value::from(product.image.clone()),
                ],
            )
            .await?;
        result
            .generated_id
            .map(ProductId::new)
            .ok_or_else(|| {
                RepositoryError::DataCorruption("insert did not yield a generated id".to_string())
            })
    }

    /// Delete a product, returning how many rows matched (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<u64, RepositoryError> {
        let result = self
            .store
            .run(
                "DELETE FROM products WHERE id = ?",
                &[Value::from(id.as_i64())],
            )
            .await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;

    #[tokio::test]
    async fn test_create_then_list_then_delete() {
        let store = Store::in_memory();
        schema::initialize(&store).await.expect("initialize");
        let repo = ProductRepository::new(&store);

        let id = repo
            .create(&NewProduct {
                name: "Single Origin Decaf".to_string(),
                description: None,
                price: 4.25,
                category: Some("coffee".to_string()),
                image: PLACEHOLDER_IMAGE.to_string(),
            })
            .await
            .expect("create");

        let catalog = repo.list_all().await.expect("list");
        assert_eq!(catalog.len(), 9);
        let created = catalog
            .iter()
            .find(|p| p.id == id)
            .expect("created product listed");
        assert_eq!(created.name, "Single Origin Decaf");
        assert_eq!(created.description, None);
        assert_eq!(created.image, PLACEHOLDER_IMAGE);

        assert_eq!(repo.delete(id).await.expect("delete"), 1);
        assert_eq!(repo.delete(id).await.expect("repeat delete"), 0);
        assert_eq!(repo.list_all().await.expect("list").len(), 8);
    }
}
