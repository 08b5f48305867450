//! Central configuration for the optout_axum crate

use std::sync::LazyLock;

/// Header carrying the user ID verified by the upstream session layer
/// Default: "X-Authenticated-User"
pub static OPTOUT_IDENTITY_HEADER: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OPTOUT_IDENTITY_HEADER")
        .ok()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "X-Authenticated-User".to_string())
});
