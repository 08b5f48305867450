use std::sync::Once;

use optout::UnsubscribeTokenCodec;

pub const TEST_TOKEN_SECRET: &str = "integration-unsubscribe-secret-0123456789";

/// Point the library at a fresh SQLite file and create the tables
///
/// Environment setup runs once per test binary; `optout::init` is idempotent.
pub async fn init_integration_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        dotenvy::from_filename(".env_test").ok();

        let db_path = std::env::temp_dir().join("optout_integration_test.db");
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
            std::env::set_var("UNSUBSCRIBE_TOKEN_SECRET", TEST_TOKEN_SECRET);
        }
    });

    optout::init()
        .await
        .expect("Failed to initialize optout for integration tests");
}

/// Codec sharing the configured key, with a short TTL for expiry tests
pub fn test_codec() -> UnsubscribeTokenCodec {
    UnsubscribeTokenCodec::new(TEST_TOKEN_SECRET, 600).expect("valid test codec")
}
