//! Administrator repository.

use velvet_bean_core::{Admin, AdminId};

use super::RepositoryError;
use crate::store::{Row, Store, Value};

fn admin_from_row(row: &Row) -> Result<Admin, RepositoryError> {
    let id = row
        .value("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| RepositoryError::DataCorruption("admin row without id".to_string()))?;
    let username = row
        .value("username")
        .and_then(Value::as_str)
        .ok_or_else(|| RepositoryError::DataCorruption("admin row without username".to_string()))?;
    let password = row
        .value("password")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(Admin {
        id: AdminId::new(id),
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Repository for administrator lookups.
pub struct AdminRepository<'a> {
    store: &'a Store,
}

impl<'a> AdminRepository<'a> {
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Find the admin matching both username and password exactly.
    ///
    /// The plaintext comparison mirrors the deployed contract; swap the
    /// query here (and the token in `middleware::auth`) to change schemes.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] if the lookup fails.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Admin>, RepositoryError> {
        let row = self
            .store
            .get(
                "SELECT * FROM admins WHERE username = ? AND password = ?",
                &[Value::from(username), Value::from(password)],
            )
            .await?;
        row.as_ref().map(admin_from_row).transpose()
    }
}
