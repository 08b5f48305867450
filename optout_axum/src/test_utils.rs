//! Test utilities module for shared test initialization and helpers
//!
//! Handler tests run against a real SQLite file through the optout crate.

use std::sync::Once;
use std::sync::atomic::{AtomicU64, Ordering};

use axum::body::Body;
use axum::response::Response;
use optout::{User, UserStore};
use serde_json::Value;

/// Load `.env_test`, point the store at a fresh SQLite file, create the tables
pub(crate) async fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        dotenvy::from_filename(".env_test").ok();

        let db_path = std::env::temp_dir().join("optout_axum_test.db");
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", db_path.display()));
        }

        // Runs before any test reads the environment
        unsafe {
            std::env::set_var("GENERIC_DATA_STORE_TYPE", "sqlite");
            std::env::set_var(
                "GENERIC_DATA_STORE_URL",
                format!("sqlite:{}", db_path.display()),
            );
            if std::env::var("UNSUBSCRIBE_TOKEN_SECRET").is_err() {
                std::env::set_var(
                    "UNSUBSCRIBE_TOKEN_SECRET",
                    "axum-test-unsubscribe-secret-0123456789",
                );
            }
        }
    });

    optout::init()
        .await
        .expect("Failed to initialize optout for tests");
}

/// Insert a user no other test uses
pub(crate) async fn create_test_user(label: &str) -> User {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let id = format!("axum-{label}-{}-{n}", chrono::Utc::now().timestamp_millis());

    UserStore::upsert_user(User::new(
        id.clone(),
        format!("{id}@example.com"),
        format!("Axum Test {label}"),
    ))
    .await
    .expect("Failed to create test user")
}

/// Collect a response body as JSON
pub(crate) async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
