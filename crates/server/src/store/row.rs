//! Backend-agnostic bind values and result rows.
//!
//! The two engines disagree about everything below the SQL text: bind APIs,
//! column type names, integer widths. [`Value`] is the small common currency
//! both sides are converted through, and [`Row`] is a result row with its
//! columns normalized into it.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Postgres, Row as _, Sqlite, TypeInfo, ValueRef};

use super::QueryError;

/// A bind or result value in the unified interface.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// Integer content, if this value is an integer.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric content; integers promote to float.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Real(f) => Some(*f),
            Self::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Text content, if this value is text.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this value is SQL NULL.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Self::from)
    }
}

/// One result row with columns normalized to [`Value`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Look up a column by name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Column names and values in result order.
    #[must_use]
    pub fn columns(&self) -> &[(String, Value)] {
        &self.columns
    }
}

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;
type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

pub(super) fn bind_sqlite<'q>(query: SqliteQuery<'q>, params: &[Value]) -> SqliteQuery<'q> {
    params.iter().fold(query, |q, value| match value {
        Value::Null => q.bind(None::<String>),
        Value::Integer(i) => q.bind(*i),
        Value::Real(f) => q.bind(*f),
        Value::Text(s) => q.bind(s.clone()),
    })
}

pub(super) fn bind_pg<'q>(query: PgQuery<'q>, params: &[Value]) -> PgQuery<'q> {
    params.iter().fold(query, |q, value| match value {
        Value::Null => q.bind(None::<String>),
        Value::Integer(i) => q.bind(*i),
        Value::Real(f) => q.bind(*f),
        Value::Text(s) => q.bind(s.clone()),
    })
}

pub(super) fn from_sqlite(row: &SqliteRow) -> Result<Row, QueryError> {
    let mut columns = Vec::with_capacity(row.len());
    for column in row.columns() {
        let ordinal = column.ordinal();
        let raw = row.try_get_raw(ordinal)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INTEGER" | "BOOLEAN" => Value::Integer(row.try_get(ordinal)?),
                "REAL" => Value::Real(row.try_get(ordinal)?),
                "TEXT" => Value::Text(row.try_get(ordinal)?),
                _ => {
                    return Err(QueryError::UnsupportedColumn {
                        column: column.name().to_string(),
                        type_name,
                    });
                }
            }
        };
        columns.push((column.name().to_string(), value));
    }
    Ok(Row { columns })
}

pub(super) fn from_pg(row: &PgRow) -> Result<Row, QueryError> {
    let mut columns = Vec::with_capacity(row.len());
    for column in row.columns() {
        let ordinal = column.ordinal();
        let raw = row.try_get_raw(ordinal)?;
        let value = if raw.is_null() {
            Value::Null
        } else {
            let type_name = raw.type_info().name().to_string();
            match type_name.as_str() {
                "INT2" => Value::Integer(i64::from(row.try_get::<i16, _>(ordinal)?)),
                "INT4" => Value::Integer(i64::from(row.try_get::<i32, _>(ordinal)?)),
                "INT8" => Value::Integer(row.try_get(ordinal)?),
                "FLOAT4" => Value::Real(f64::from(row.try_get::<f32, _>(ordinal)?)),
                "FLOAT8" => Value::Real(row.try_get(ordinal)?),
                "BOOL" => Value::Integer(i64::from(row.try_get::<bool, _>(ordinal)?)),
                "TEXT" | "VARCHAR" | "CHAR" | "NAME" => Value::Text(row.try_get(ordinal)?),
                _ => {
                    return Err(QueryError::UnsupportedColumn {
                        column: column.name().to_string(),
                        type_name,
                    });
                }
            }
        };
        columns.push((column.name().to_string(), value));
    }
    Ok(Row { columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Integer(3).as_i64(), Some(3));
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Real(3.5).as_f64(), Some(3.5));
        assert_eq!(Value::Real(3.5).as_i64(), None);
        assert_eq!(Value::from("espresso").as_str(), Some("espresso"));
        assert!(Value::Null.is_null());
        assert!(Value::from(None::<String>).is_null());
    }

    #[test]
    fn test_row_lookup_by_name() {
        let row = Row {
            columns: vec![
                ("id".to_string(), Value::Integer(1)),
                ("name".to_string(), Value::from("Cold Brew Gold")),
            ],
        };
        assert_eq!(row.value("id").and_then(Value::as_i64), Some(1));
        assert_eq!(
            row.value("name").and_then(Value::as_str),
            Some("Cold Brew Gold")
        );
        assert!(row.value("missing").is_none());
    }
}
