use std::env;
use std::sync::LazyLock;

/// Default token lifetime: 30 days
pub(super) const DEFAULT_TOKEN_TTL_SECS: i64 = 60 * 60 * 24 * 30;

/// Shortest HMAC key accepted for signing unsubscribe links
pub(super) const MIN_SECRET_LEN: usize = 32;

pub(super) static UNSUBSCRIBE_TOKEN_SECRET: LazyLock<Option<Vec<u8>>> = LazyLock::new(|| {
    env::var("UNSUBSCRIBE_TOKEN_SECRET")
        .ok()
        .map(|secret| secret.into_bytes())
});

pub(super) static UNSUBSCRIBE_TOKEN_TTL: LazyLock<i64> = LazyLock::new(|| {
    env::var("UNSUBSCRIBE_TOKEN_TTL")
        .ok()
        .and_then(|s| s.parse().ok())
        .filter(|ttl: &i64| *ttl > 0)
        .unwrap_or(DEFAULT_TOKEN_TTL_SECS)
});
