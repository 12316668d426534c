//! Schema creation and reference-data seeding.
//!
//! Runs once at process start. Table creation uses `CREATE TABLE IF NOT
//! EXISTS` with the identity-column syntax of the active backend; seeding is
//! idempotent - re-running initialization never duplicates rows.

use tracing::{info, warn};

use crate::store::{Backend, QueryError, Store, Value};

/// Username of the administrator seeded at first start.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Initial catalog: (name, description, price, category, image).
const SEED_PRODUCTS: &[(&str, &str, f64, &str, &str)] = &[
    (
        "Ethiopian Yirgacheffe",
        "Floral and citrus notes with a tea-like body.",
        4.50,
        "coffee",
        "coffee-1.jpg",
    ),
    (
        "Colombia Huila",
        "Balanced acidity with caramel and fruity undertones.",
        4.00,
        "coffee",
        "coffee-2.jpg",
    ),
    (
        "Espresso Doppio",
        "Rich, intense double shot with a golden crema.",
        3.50,
        "coffee",
        "espresso.jpg",
    ),
    (
        "Cappuccino Velvet",
        "Espresso with perfectly micro-foamed milk.",
        4.50,
        "coffee",
        "cappuccino.jpg",
    ),
    (
        "Cold Brew Gold",
        "Steeped for 24 hours for a smooth, sweet finish.",
        5.00,
        "coffee",
        "coldbrew.jpg",
    ),
    (
        "Almond Croissant",
        "Flaky nuance with a rich almond cream filling.",
        3.75,
        "pastry",
        "croissant.jpg",
    ),
    (
        "Matcha Scone",
        "Delicate green tea flavor with white chocolate chunks.",
        3.25,
        "pastry",
        "scone.jpg",
    ),
    (
        "Artisan Bagel",
        "Hand-rolled bagel with house-made cream cheese.",
        3.50,
        "pastry",
        "bagel.jpg",
    ),
];

/// Identity-column syntax for an integer primary key that auto-assigns on
/// insert. The two engines spell it differently but the semantics match.
const fn identity_column(backend: Backend) -> &'static str {
    match backend {
        Backend::Postgres => "SERIAL PRIMARY KEY",
        Backend::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT",
    }
}

/// Create the tables and seed reference data.
///
/// Safe to run against an already-initialized store: table creation is
/// conditional, product seeding is guarded on an empty table, and the
/// default admin insert ignores the duplicate-username conflict.
///
/// # Errors
///
/// Returns [`QueryError`] if table creation or product seeding fails. A
/// failed admin seed is logged and swallowed.
pub async fn initialize(store: &Store) -> Result<(), QueryError> {
    create_tables(store).await?;
    seed_products(store).await?;
    seed_default_admin(store).await;
    Ok(())
}

async fn create_tables(store: &Store) -> Result<(), QueryError> {
    let id = identity_column(store.backend());

    let products = format!(
        "CREATE TABLE IF NOT EXISTS products (
            id {id},
            name TEXT NOT NULL,
            description TEXT,
            price REAL NOT NULL,
            category TEXT,
            image TEXT
        )"
    );
    let admins = format!(
        "CREATE TABLE IF NOT EXISTS admins (
            id {id},
            username TEXT UNIQUE,
            password TEXT
        )"
    );
    let orders = format!(
        "CREATE TABLE IF NOT EXISTS orders (
            id {id},
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            address TEXT NOT NULL,
            total REAL NOT NULL,
            date TEXT NOT NULL,
            items TEXT NOT NULL
        )"
    );

    for ddl in [&products, &admins, &orders] {
        store.query(ddl, &[]).await?;
    }
    Ok(())
}

/// Insert the seed catalog if the products table is empty.
async fn seed_products(store: &Store) -> Result<(), QueryError> {
    let count = store
        .get("SELECT count(*) AS count FROM products", &[])
        .await?
        .and_then(|row| row.value("count").and_then(Value::as_i64))
        .unwrap_or(0);
    if count > 0 {
        return Ok(());
    }

    for (name, description, price, category, image) in SEED_PRODUCTS {
        store
            .run(
                "INSERT INTO products (name, description, price, category, image) \
                 VALUES (?, ?, ?, ?, ?)",
                &[
                    Value::from(*name),
                    Value::from(*description),
                    Value::from(*price),
                    Value::from(*category),
                    Value::from(*image),
                ],
            )
            .await?;
    }
    info!(products = SEED_PRODUCTS.len(), "database seeded");
    Ok(())
}

/// Insert the default administrator, ignoring the duplicate-username
/// conflict. Failures here are logged, not fatal.
async fn seed_default_admin(store: &Store) {
    let result = store
        .run(
            "INSERT INTO admins (username, password) VALUES (?, ?) ON CONFLICT DO NOTHING",
            &[
                Value::from(DEFAULT_ADMIN_USERNAME),
                Value::from(DEFAULT_ADMIN_PASSWORD),
            ],
        )
        .await;
    match result {
        Ok(outcome) if outcome.rows_affected > 0 => info!("default admin seeded"),
        Ok(_) => {}
        Err(err) => warn!(error = %err, "admin seed skipped"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_seeds_catalog_and_admin() {
        let store = Store::in_memory();
        initialize(&store).await.expect("initialize");

        let rows = store
            .query("SELECT * FROM products", &[])
            .await
            .expect("select products");
        assert_eq!(rows.len(), 8);

        let espresso = store
            .get(
                "SELECT price FROM products WHERE name = ?",
                &[Value::from("Espresso Doppio")],
            )
            .await
            .expect("select espresso")
            .expect("espresso seeded");
        assert_eq!(espresso.value("price").and_then(Value::as_f64), Some(3.5));

        let admins = store
            .get("SELECT count(*) AS count FROM admins", &[])
            .await
            .expect("count admins")
            .expect("count row");
        assert_eq!(admins.value("count").and_then(Value::as_i64), Some(1));
    }

    #[tokio::test]
    async fn test_initialize_twice_is_idempotent() {
        let store = Store::in_memory();
        initialize(&store).await.expect("first initialize");
        initialize(&store).await.expect("second initialize");

        let products = store
            .get("SELECT count(*) AS count FROM products", &[])
            .await
            .expect("count products")
            .expect("count row");
        assert_eq!(products.value("count").and_then(Value::as_i64), Some(8));

        let admins = store
            .get("SELECT count(*) AS count FROM admins", &[])
            .await
            .expect("count admins")
            .expect("count row");
        assert_eq!(admins.value("count").and_then(Value::as_i64), Some(1));
    }
}
