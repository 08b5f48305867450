use serde_json::Value;

use crate::preference::{NotificationPreferences, PreferenceRecord, PreferenceStore};
use crate::userdb::UserStore;

use super::errors::PreferenceSyncError;

async fn ensure_user_exists(user_id: &str) -> Result<(), PreferenceSyncError> {
    UserStore::get_user(user_id)
        .await
        .map_err(|e| PreferenceSyncError::from(e).log())?
        .ok_or_else(|| PreferenceSyncError::UserNotFound.log())?;
    Ok(())
}

/// Current preferences of an authenticated user
///
/// A user without a record gets one with the default matrix.
#[tracing::instrument(fields(user_id = %user_id))]
pub async fn get_preferences_core(user_id: &str) -> Result<PreferenceRecord, PreferenceSyncError> {
    ensure_user_exists(user_id).await?;

    PreferenceStore::read_or_create(user_id)
        .await
        .map_err(|e| PreferenceSyncError::from(e).log())
}

/// Replace all four flags of an authenticated user
///
/// The payload is validated completely before anything is written.
#[tracing::instrument(skip(payload), fields(user_id = %user_id))]
pub async fn update_preferences_core(
    user_id: &str,
    payload: Value,
) -> Result<PreferenceRecord, PreferenceSyncError> {
    let preferences = NotificationPreferences::from_json(payload)
        .map_err(|e| PreferenceSyncError::from(e).log())?;

    ensure_user_exists(user_id).await?;

    PreferenceStore::replace(user_id, preferences)
        .await
        .map_err(|e| PreferenceSyncError::from(e).log())
}
