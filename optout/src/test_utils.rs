//! Test utilities module for shared test initialization and helpers
//!
//! Every test that touches the database calls [`init_test_environment`] first.
//! Tests share one SQLite file, so they use unique user IDs and run `#[serial]`.

use std::sync::Once;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::token::UnsubscribeTokenCodec;
use crate::userdb::{User, UserStore};

pub(crate) const TEST_TOKEN_SECRET: &str = "test-unsubscribe-secret-0123456789abcdef";

/// Centralized test initialization for all tests across the crate
///
/// 1. Loads `.env_test` (falling back to built-in defaults) - **ONCE**
/// 2. Removes the SQLite file left over from a previous run - **ONCE**
/// 3. Creates the tables
pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }

        set_default_env("GENERIC_DATA_STORE_TYPE", "sqlite");
        let default_url = format!(
            "sqlite:{}",
            std::env::temp_dir().join("optout_unit_test.db").display()
        );
        set_default_env("GENERIC_DATA_STORE_URL", &default_url);
        set_default_env("UNSUBSCRIBE_TOKEN_SECRET", TEST_TOKEN_SECRET);

        if let Some(db_path) = extract_sqlite_file_path() {
            for suffix in ["", "-wal", "-shm"] {
                // A missing file is fine
                let _ = std::fs::remove_file(format!("{db_path}{suffix}"));
            }
        }
    });

    if let Err(e) = crate::init().await {
        eprintln!("Warning: Failed to initialize stores: {e}");
    }
}

fn set_default_env(key: &str, value: &str) {
    if std::env::var(key).is_err() {
        // Only called inside `Once`, before any test reads the variable
        unsafe {
            std::env::set_var(key, value);
        }
    }
}

/// Extract the SQLite database file path from `GENERIC_DATA_STORE_URL`
///
/// Returns `None` for in-memory databases and non-SQLite stores.
fn extract_sqlite_file_path() -> Option<String> {
    let url = std::env::var("GENERIC_DATA_STORE_URL").ok()?;
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next()?;

    if path.is_empty() || path.contains(":memory:") || path.starts_with("file:") {
        return None;
    }

    Some(path.to_string())
}

/// A user ID no other test has used
pub(crate) fn unique_user_id(label: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(
        "test-{label}-{}-{n}",
        chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

/// Insert a fresh user so preference records can reference it
pub(crate) async fn create_test_user(label: &str) -> User {
    let id = unique_user_id(label);
    let user = User::new(
        id.clone(),
        format!("{id}@example.com"),
        format!("Test User {label}"),
    );

    UserStore::upsert_user(user)
        .await
        .expect("Failed to create test user")
}

/// Codec with a fixed key, independent of the environment
pub(crate) fn test_codec() -> UnsubscribeTokenCodec {
    UnsubscribeTokenCodec::new(TEST_TOKEN_SECRET, 3600).expect("valid test codec")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_user_ids_differ() {
        assert_ne!(unique_user_id("a"), unique_user_id("a"));
    }

    #[test]
    fn test_test_codec_roundtrip() {
        let codec = test_codec();
        let token = codec.issue("someone").unwrap();
        assert_eq!(codec.verify(&token).unwrap(), "someone");
    }
}
