use std::sync::atomic::{AtomicU64, Ordering};

use optout::{User, UserStore};

/// Test user fixtures for integration testing
pub struct TestUsers;

impl TestUsers {
    /// Create and store a user whose id no other test uses
    pub async fn create(label: &str) -> User {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let id = format!(
            "it-{label}-{}-{n}",
            chrono::Utc::now().timestamp_millis()
        );

        UserStore::upsert_user(User::new(
            id.clone(),
            format!("{id}@example.com"),
            format!("Integration {label}"),
        ))
        .await
        .expect("Failed to create integration test user")
    }
}
