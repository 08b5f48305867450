use optout::{PreferenceStore, issue_unsubscribe_token, unsubscribe_core};
use serial_test::serial;

use crate::common::{TestUsers, init_integration_environment};

/// Concurrent clicks on different links in the same email
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn test_concurrent_links_for_fresh_user_merge() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("concurrent-links").await;
    let token = issue_unsubscribe_token(&user.id)?;

    let mut handles = Vec::new();
    for scope in ["weekly", "alerts", "weekly", "alerts", "weekly", "alerts"] {
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            unsubscribe_core(Some(&token), Some(scope)).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    let record = PreferenceStore::get(&user.id)
        .await?
        .ok_or("record was not created")?;
    assert!(record.preferences.email_notifications);
    assert!(!record.preferences.weekly_digest);
    assert!(!record.preferences.new_skill_alerts);
    assert!(record.preferences.pack_alerts);
    Ok(())
}

/// Many users unsubscribing at once do not interfere with each other
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn test_concurrent_users_are_isolated() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;

    let mut users = Vec::new();
    for i in 0..8 {
        users.push(TestUsers::create(&format!("isolated-{i}")).await);
    }

    let mut handles = Vec::new();
    for user in &users {
        let token = issue_unsubscribe_token(&user.id)?;
        handles.push(tokio::spawn(async move {
            unsubscribe_core(Some(&token), Some("all")).await
        }));
    }
    for handle in handles {
        handle.await??;
    }

    for user in &users {
        let record = PreferenceStore::get(&user.id)
            .await?
            .ok_or("record was not created")?;
        assert_eq!(record.user_id, user.id);
        assert!(!record.preferences.email_notifications);
        assert!(record.preferences.weekly_digest);
    }
    Ok(())
}
