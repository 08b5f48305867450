use optout::{
    PreferenceSyncError, UnsubscribeError, UnsubscribeTokenCodec, unsubscribe_core,
    update_preferences_core,
};
use serde_json::json;
use serial_test::serial;

use crate::common::{TestUsers, init_integration_environment, test_codec};

/// Information disclosure prevention
///
/// - Rejected tokens all produce the same message
/// - Error messages never echo token contents or storage internals
/// - The codec never prints its key

#[tokio::test]
#[serial]
async fn test_token_rejections_are_indistinguishable() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("indistinguishable").await;
    let codec = test_codec();
    let expired = codec.issue_at(&user.id, chrono::Utc::now() - chrono::Duration::days(1))?;
    let forged = UnsubscribeTokenCodec::new("forger-forger-forger-forger-forger", 3600)?
        .issue(&user.id)?;

    let mut messages = Vec::new();
    for token in [expired.as_str(), forged.as_str(), "not-a-token", "a.b"] {
        let err = unsubscribe_core(Some(token), None)
            .await
            .expect_err("token should be rejected");
        assert!(!err.to_string().contains(token));
        messages.push(err.to_string());
    }

    messages.dedup();
    assert_eq!(messages, vec![UnsubscribeError::InvalidToken.to_string()]);
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_codec_debug_hides_secret() {
    let codec = test_codec();
    let printed = format!("{codec:?}");

    assert!(!printed.contains(crate::common::TEST_TOKEN_SECRET));
    assert!(printed.contains("redacted"));
}

#[tokio::test]
#[serial]
async fn test_store_errors_do_not_leak_details() {
    let err = UnsubscribeError::TransientStoreFailure(
        "error returned from database: database is locked".to_string(),
    );
    assert_eq!(err.to_string(), "Failed to update preferences");

    let err = PreferenceSyncError::Storage("no such table: optout_users".to_string());
    assert!(!err.to_string().contains("optout_users"));
}

#[tokio::test]
#[serial]
async fn test_unknown_user_on_settings_path() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;

    let result = update_preferences_core(
        "missing-user",
        json!({
            "emailNotifications": true,
            "weeklyDigest": true,
            "newSkillAlerts": true,
            "packAlerts": true
        }),
    )
    .await;

    assert_eq!(result, Err(PreferenceSyncError::UserNotFound));
    Ok(())
}
