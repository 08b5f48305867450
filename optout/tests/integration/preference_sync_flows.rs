use optout::{
    NotificationPreferences, PreferenceSyncError, get_preferences_core, issue_unsubscribe_token,
    unsubscribe_core, update_preferences_core,
};
use serde_json::json;
use serial_test::serial;

use crate::common::{TestUsers, init_integration_environment};

/// Authenticated settings page flows
///
/// Flow: read (creating defaults) → replace → read back

#[tokio::test]
#[serial]
async fn test_settings_page_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("settings").await;

    let initial = get_preferences_core(&user.id).await?;
    assert_eq!(initial.preferences, NotificationPreferences::default());

    update_preferences_core(
        &user.id,
        json!({
            "emailNotifications": true,
            "weeklyDigest": false,
            "newSkillAlerts": true,
            "packAlerts": false
        }),
    )
    .await?;

    let read = get_preferences_core(&user.id).await?;
    assert!(read.preferences.email_notifications);
    assert!(!read.preferences.weekly_digest);
    assert!(read.preferences.new_skill_alerts);
    assert!(!read.preferences.pack_alerts);
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_unsubscribe_then_resubscribe() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("resubscribe").await;
    let token = issue_unsubscribe_token(&user.id)?;

    unsubscribe_core(Some(&token), Some("all")).await?;
    assert!(
        !get_preferences_core(&user.id)
            .await?
            .preferences
            .email_notifications
    );

    let record =
        update_preferences_core(&user.id, json!(NotificationPreferences::default())).await?;
    assert_eq!(record.preferences, NotificationPreferences::default());
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_malformed_payloads_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("malformed").await;
    let before = get_preferences_core(&user.id).await?;

    let payloads = [
        json!({}),
        json!([true, true, true, true]),
        json!({
            "emailNotifications": "no",
            "weeklyDigest": true,
            "newSkillAlerts": true,
            "packAlerts": true
        }),
        json!({
            "emailNotifications": false,
            "weeklyDigest": true,
            "newSkillAlerts": true,
            "packAlerts": true,
            "userId": "someone-else"
        }),
    ];

    for payload in payloads {
        let result = update_preferences_core(&user.id, payload.clone()).await;
        assert!(
            matches!(result, Err(PreferenceSyncError::InvalidPayload(_))),
            "payload {payload} was accepted"
        );
    }

    let after = get_preferences_core(&user.id).await?;
    assert_eq!(before, after);
    Ok(())
}
