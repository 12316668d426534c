//! Administrator account model.

use serde::{Deserialize, Serialize};

use super::AdminId;

/// An administrator account, seeded once at startup and read-only thereafter.
///
/// The password is stored and compared as plaintext. This mirrors the
/// deployed contract and is isolated behind the server's auth seam; it is
/// not a pattern to copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub username: String,
    pub password: String,
}
