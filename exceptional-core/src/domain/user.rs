//! User domain model

use serde::{Deserialize, Serialize};

/// An employee account on the day-off server
///
/// Serialized in the server's camelCase convention so the same type works
/// for wire payloads, the persisted session file and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned opaque identifier
    pub id: String,
    pub email: String,
    pub name: String,
    /// Grants approve/refuse/remove authority over other users' requests.
    /// Older servers omit the field entirely for regular users.
    #[serde(default)]
    pub super_user: bool,
}

impl User {
    /// Create a regular (non-superuser) user
    pub fn new(id: impl Into<String>, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            super_user: false,
        }
    }
}

/// Successful login payload: the bearer token plus the identity it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}
