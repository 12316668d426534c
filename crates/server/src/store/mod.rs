//! Unified access to the two SQL backends.
//!
//! The server runs against either an embedded SQLite file (local) or a
//! networked `PostgreSQL` pool (deployed), chosen once at startup from the
//! presence of `DATABASE_URL`. [`Store`] hides the difference behind three
//! operations - [`Store::query`], [`Store::run`], [`Store::get`] - that
//! accept `?` positional placeholders and return backend-agnostic rows.
//!
//! Statements are dispatched as written to SQLite; for `PostgreSQL` the
//! placeholders are rewritten to `$1, $2, ...` and INSERTs gain a
//! `RETURNING id` clause so the generated identity comes back in one round
//! trip.

pub mod row;
mod sql;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::config::DatabaseConfig;

pub use row::{Row, Value};

/// Which engine the store talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Embedded file-based SQLite engine.
    Sqlite,
    /// Networked `PostgreSQL` server behind a connection pool.
    Postgres,
}

/// Errors surfaced by the unified query interface.
///
/// Each call is its own implicit unit of work: there are no retries and no
/// transaction wrapping, so an error always refers to exactly one statement.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The backend rejected the statement; carries the backend's message.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A result column used a type the row model cannot represent.
    #[error("unsupported type {type_name} in column {column}")]
    UnsupportedColumn { column: String, type_name: String },
}

/// Outcome of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    /// Generated identity of the inserted row. `Some` only for an INSERT
    /// that actually inserted; always `None` for UPDATE/DELETE.
    pub generated_id: Option<i64>,
    /// Number of rows the statement matched and changed.
    pub rows_affected: u64,
}

/// Handle to whichever backend was selected at startup.
///
/// Cloning is cheap; both variants wrap a shared, internally synchronized
/// pool. The pools are built lazily, so construction never blocks on the
/// backend being reachable - callers fail individually instead.
#[derive(Debug, Clone)]
pub enum Store {
    Sqlite(SqlitePool),
    Postgres(PgPool),
}

impl Store {
    /// Select and construct a backend from the database configuration.
    ///
    /// A configured connection URL selects `PostgreSQL`; otherwise the
    /// embedded SQLite engine is opened at the configured path, creating
    /// the file if absent.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the `PostgreSQL` URL cannot be parsed.
    pub fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        match &config.url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .min_connections(2)
                    .acquire_timeout(Duration::from_secs(10))
                    .connect_lazy(url.expose_secret())?;
                Ok(Self::Postgres(pool))
            }
            None => {
                let options = SqliteConnectOptions::new()
                    .filename(&config.sqlite_path)
                    .create_if_missing(true);
                let pool = SqlitePoolOptions::new().connect_lazy_with(options);
                Ok(Self::Sqlite(pool))
            }
        }
    }

    /// Single-connection in-memory SQLite store.
    ///
    /// For tests and local experiments; the database lives exactly as long
    /// as the pool's one connection.
    #[must_use]
    pub fn in_memory() -> Self {
        let options = SqliteConnectOptions::new().filename(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(options);
        Self::Sqlite(pool)
    }

    /// Which engine this store talks to.
    #[must_use]
    pub const fn backend(&self) -> Backend {
        match self {
            Self::Sqlite(_) => Backend::Sqlite,
            Self::Postgres(_) => Backend::Postgres,
        }
    }

    /// Whether the store goes over the network (and therefore uses numbered
    /// placeholders and `RETURNING` for generated identities).
    #[must_use]
    pub const fn is_networked(&self) -> bool {
        matches!(self, Self::Postgres(_))
    }

    /// Execute a read statement and collect all result rows.
    ///
    /// Statements that produce no rows (e.g. DDL) resolve to an empty
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the backend rejects the statement or a
    /// result column cannot be represented.
    pub async fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, QueryError> {
        match self {
            Self::Sqlite(pool) => {
                let rows = row::bind_sqlite(sqlx::query(sql), params)
                    .fetch_all(pool)
                    .await?;
                rows.iter().map(row::from_sqlite).collect()
            }
            Self::Postgres(pool) => {
                let sql = sql::numbered_placeholders(sql);
                let rows = row::bind_pg(sqlx::query(&sql), params)
                    .fetch_all(pool)
                    .await?;
                rows.iter().map(row::from_pg).collect()
            }
        }
    }

    /// Execute a write statement (INSERT, UPDATE, DELETE).
    ///
    /// For an INSERT the generated identity is reported in
    /// [`RunResult::generated_id`]; on `PostgreSQL` this is retrieved by
    /// appending a `RETURNING id` clause before dispatch, on SQLite from the
    /// engine's last-insert-rowid. An INSERT that inserts nothing (e.g.
    /// `ON CONFLICT DO NOTHING`) reports no identity.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the backend rejects the statement.
    pub async fn run(&self, sql: &str, params: &[Value]) -> Result<RunResult, QueryError> {
        let is_insert = sql::is_insert(sql);
        match self {
            Self::Sqlite(pool) => {
                let result = row::bind_sqlite(sqlx::query(sql), params)
                    .execute(pool)
                    .await?;
                let generated_id = (is_insert && result.rows_affected() > 0)
                    .then(|| result.last_insert_rowid());
                Ok(RunResult {
                    generated_id,
                    rows_affected: result.rows_affected(),
                })
            }
            Self::Postgres(pool) => {
                let translated = sql::numbered_placeholders(sql);
                if is_insert {
                    let with_returning = sql::append_returning_id(&translated);
                    let rows = row::bind_pg(sqlx::query(&with_returning), params)
                        .fetch_all(pool)
                        .await?;
                    let generated_id = rows
                        .first()
                        .map(row::from_pg)
                        .transpose()?
                        .and_then(|r| r.value("id").and_then(Value::as_i64));
                    Ok(RunResult {
                        generated_id,
                        rows_affected: rows.len() as u64,
                    })
                } else {
                    let result = row::bind_pg(sqlx::query(&translated), params)
                        .execute(pool)
                        .await?;
                    Ok(RunResult {
                        generated_id: None,
                        rows_affected: result.rows_affected(),
                    })
                }
            }
        }
    }

    /// Execute a read statement and return only the first row, if any.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the backend rejects the statement.
    pub async fn get(&self, sql: &str, params: &[Value]) -> Result<Option<Row>, QueryError> {
        Ok(self.query(sql, params).await?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn scratch_store() -> Store {
        let store = Store::in_memory();
        store
            .query(
                "CREATE TABLE beans (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, weight REAL)",
                &[],
            )
            .await
            .expect("create table");
        store
    }

    #[tokio::test]
    async fn test_ddl_yields_empty_row_sequence() {
        let store = Store::in_memory();
        let rows = store
            .query("CREATE TABLE t (id INTEGER PRIMARY KEY)", &[])
            .await
            .expect("ddl");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_run_insert_yields_generated_id() {
        let store = scratch_store().await;
        let first = store
            .run(
                "INSERT INTO beans (name, weight) VALUES (?, ?)",
                &[Value::from("Yirgacheffe"), Value::from(250.0)],
            )
            .await
            .expect("insert");
        assert_eq!(first.generated_id, Some(1));
        assert_eq!(first.rows_affected, 1);

        let second = store
            .run(
                "INSERT INTO beans (name) VALUES (?)",
                &[Value::from("Huila")],
            )
            .await
            .expect("insert");
        assert_eq!(second.generated_id, Some(2));
    }

    #[tokio::test]
    async fn test_run_update_and_delete_report_rows_affected() {
        let store = scratch_store().await;
        for name in ["a", "b", "c"] {
            store
                .run("INSERT INTO beans (name) VALUES (?)", &[Value::from(name)])
                .await
                .expect("insert");
        }

        let update = store
            .run(
                "UPDATE beans SET weight = ? WHERE name != ?",
                &[Value::from(125.0), Value::from("c")],
            )
            .await
            .expect("update");
        assert_eq!(update.generated_id, None);
        assert_eq!(update.rows_affected, 2);

        let miss = store
            .run(
                "DELETE FROM beans WHERE name = ?",
                &[Value::from("missing")],
            )
            .await
            .expect("delete");
        assert_eq!(miss.rows_affected, 0);
        assert_eq!(miss.generated_id, None);
    }

    #[tokio::test]
    async fn test_conflict_ignored_insert_reports_no_identity() {
        let store = Store::in_memory();
        store
            .query(
                "CREATE TABLE logins (id INTEGER PRIMARY KEY AUTOINCREMENT, username TEXT UNIQUE)",
                &[],
            )
            .await
            .expect("create table");

        let sql = "INSERT INTO logins (username) VALUES (?) ON CONFLICT DO NOTHING";
        let first = store
            .run(sql, &[Value::from("admin")])
            .await
            .expect("insert");
        assert_eq!(first.generated_id, Some(1));

        let ignored = store
            .run(sql, &[Value::from("admin")])
            .await
            .expect("conflict-ignored insert");
        assert_eq!(ignored.generated_id, None);
        assert_eq!(ignored.rows_affected, 0);
    }

    #[tokio::test]
    async fn test_get_returns_first_row_or_none() {
        let store = scratch_store().await;
        for name in ["first", "second"] {
            store
                .run("INSERT INTO beans (name) VALUES (?)", &[Value::from(name)])
                .await
                .expect("insert");
        }

        let row = store
            .get("SELECT name FROM beans ORDER BY id", &[])
            .await
            .expect("select")
            .expect("row present");
        assert_eq!(row.value("name").and_then(Value::as_str), Some("first"));

        let none = store
            .get(
                "SELECT name FROM beans WHERE name = ?",
                &[Value::from("missing")],
            )
            .await
            .expect("select");
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_malformed_statement_propagates_query_error() {
        let store = Store::in_memory();
        let err = store
            .query("SELECT FROM nothing AT ALL", &[])
            .await
            .expect_err("malformed sql");
        assert!(matches!(err, QueryError::Database(_)));
    }

    #[tokio::test]
    async fn test_null_binding_roundtrips() {
        let store = scratch_store().await;
        store
            .run(
                "INSERT INTO beans (name, weight) VALUES (?, ?)",
                &[Value::from("no-weight"), Value::Null],
            )
            .await
            .expect("insert");

        let row = store
            .get("SELECT weight FROM beans WHERE name = ?", &[Value::from("no-weight")])
            .await
            .expect("select")
            .expect("row present");
        assert!(row.value("weight").is_some_and(Value::is_null));
    }
}
