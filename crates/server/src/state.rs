//! Application state shared across handlers.

use std::sync::Arc;

use crate::services::email::EmailService;
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Cheap to clone; the store and mailer are behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Store,
    mailer: Option<EmailService>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Store, mailer: Option<EmailService>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, mailer }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// The configured mailer, absent when SMTP settings were not provided.
    #[must_use]
    pub fn mailer(&self) -> Option<&EmailService> {
        self.inner.mailer.as_ref()
    }
}
