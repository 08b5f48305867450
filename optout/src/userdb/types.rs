use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The identity anchor an unsubscribe token resolves to
///
/// Users are provisioned by the account system; this crate only reads them,
/// except for the provisioning hooks on [`UserStore`](super::UserStore).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct User {
    /// Unique user identifier
    pub id: String,
    /// Email address the notifications are sent to
    pub account: String,
    /// Display name
    pub label: String,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(id: String, account: String, label: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            account,
            label,
            created_at: now,
            updated_at: now,
        }
    }
}
