//! Central configuration for the optout crate

use std::sync::LazyLock;

/// Route prefix for all optout endpoints
///
/// This is the prefix under which the unsubscribe and preference endpoints are mounted.
/// Default: "/optout"
pub static OPTOUT_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("OPTOUT_ROUTE_PREFIX").unwrap_or_else(|_| "/optout".to_string())
});
