use chrono::{Duration, Utc};
use optout::{
    NotificationPreferences, PreferenceStore, UnsubscribeError, issue_unsubscribe_token,
    unsubscribe_core, unsubscribe_with_codec,
};
use serial_test::serial;

use crate::common::{TestUsers, init_integration_environment, test_codec};

/// Unsubscribe flows driven by a footer link
///
/// Flow: issue token → user follows link → record reflects the revocation

#[tokio::test]
#[serial]
async fn test_weekly_link_creates_record_with_single_override()
-> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("weekly-link").await;
    let token = issue_unsubscribe_token(&user.id)?;

    let record = unsubscribe_core(Some(&token), Some("weekly")).await?;

    assert_eq!(
        record.preferences,
        NotificationPreferences {
            email_notifications: true,
            weekly_digest: false,
            new_skill_alerts: true,
            pack_alerts: true,
        }
    );
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_all_link_preserves_prior_choices() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("all-link").await;
    PreferenceStore::replace(
        &user.id,
        NotificationPreferences {
            email_notifications: true,
            weekly_digest: false,
            new_skill_alerts: true,
            pack_alerts: true,
        },
    )
    .await?;
    let token = issue_unsubscribe_token(&user.id)?;

    let record = unsubscribe_core(Some(&token), Some("all")).await?;

    assert!(!record.preferences.email_notifications);
    assert!(!record.preferences.weekly_digest);
    assert!(record.preferences.new_skill_alerts);
    assert!(record.preferences.pack_alerts);
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_unrecognized_type_behaves_like_all() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("packs-link").await;
    let token = issue_unsubscribe_token(&user.id)?;

    let record = unsubscribe_core(Some(&token), Some("packs")).await?;

    assert!(!record.preferences.email_notifications);
    assert!(record.preferences.pack_alerts);
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_link_clicked_twice_changes_nothing_the_second_time()
-> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("double-click").await;
    let token = issue_unsubscribe_token(&user.id)?;

    let first = unsubscribe_core(Some(&token), Some("alerts")).await?;
    let second = unsubscribe_core(Some(&token), Some("alerts")).await?;

    assert_eq!(first, second);
    assert_eq!(first.updated_at, second.updated_at);
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_invalid_tokens_never_touch_storage() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("invalid-token").await;
    let codec = test_codec();
    let valid = codec.issue(&user.id)?;
    let (payload, _) = valid.split_once('.').ok_or("token without separator")?;

    let expired = codec.issue_at(&user.id, Utc::now() - Duration::seconds(601))?;
    let candidates = [
        "garbage".to_string(),
        format!("{payload}."),
        format!("{payload}.AAAA"),
        expired,
    ];

    for token in &candidates {
        let result = unsubscribe_core(Some(token), Some("all")).await;
        assert_eq!(result, Err(UnsubscribeError::InvalidToken), "token {token}");
    }

    assert!(PreferenceStore::get(&user.id).await?.is_none());
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_token_from_other_deployment_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("other-key").await;
    let foreign = optout::UnsubscribeTokenCodec::new(
        "a-completely-different-deployment-key!",
        3600,
    )?;
    let token = foreign.issue(&user.id)?;

    let result = unsubscribe_core(Some(&token), None).await;

    assert_eq!(result, Err(UnsubscribeError::InvalidToken));
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_token_for_deleted_user() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;
    let user = TestUsers::create("deleted").await;
    let token = issue_unsubscribe_token(&user.id)?;
    optout::UserStore::delete_user(&user.id).await?;

    let result = unsubscribe_core(Some(&token), Some("weekly")).await;

    assert_eq!(result, Err(UnsubscribeError::UserNotFound));
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_missing_token() -> Result<(), Box<dyn std::error::Error>> {
    init_integration_environment().await;

    assert_eq!(
        unsubscribe_core(None, Some("weekly")).await,
        Err(UnsubscribeError::MissingToken)
    );
    assert_eq!(
        unsubscribe_with_codec(&test_codec(), Some(""), None).await,
        Err(UnsubscribeError::MissingToken)
    );
    Ok(())
}
