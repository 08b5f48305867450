use serde::{Deserialize, Serialize};

/// Payload carried inside an unsubscribe token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct UnsubscribeClaims {
    /// User the link was issued for
    pub(crate) sub: String,
    /// Issue time, unix seconds
    pub(crate) iat: i64,
    /// Expiry, unix seconds
    pub(crate) exp: i64,
}
