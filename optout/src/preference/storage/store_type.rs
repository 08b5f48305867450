use chrono::Utc;

use crate::preference::{
    errors::PreferenceError,
    types::{NotificationPreferences, PreferenceRecord, Scope},
};
use crate::storage::GENERIC_DATA_STORE;

use super::postgres::*;
use super::sqlite::*;

/// Per-user notification preference records
///
/// Every write is a single `INSERT ... ON CONFLICT` statement, so concurrent
/// first writes for the same user converge on one row.
pub struct PreferenceStore;

impl PreferenceStore {
    /// Initialize the preference table; the users table must already exist
    pub(crate) async fn init() -> Result<(), PreferenceError> {
        let store = &*GENERIC_DATA_STORE;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_preference_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_preference_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(PreferenceError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    /// Read a record without creating it
    #[tracing::instrument(fields(user_id = %user_id))]
    pub async fn get(user_id: &str) -> Result<Option<PreferenceRecord>, PreferenceError> {
        let store = &*GENERIC_DATA_STORE;

        if let Some(pool) = store.as_sqlite() {
            get_preferences_sqlite(pool, user_id).await
        } else if let Some(pool) = store.as_postgres() {
            get_preferences_postgres(pool, user_id).await
        } else {
            Err(PreferenceError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Read a record, creating it with the default matrix if absent
    #[tracing::instrument(fields(user_id = %user_id))]
    pub async fn read_or_create(user_id: &str) -> Result<PreferenceRecord, PreferenceError> {
        let store = &*GENERIC_DATA_STORE;
        let now = Utc::now();

        let result = if let Some(pool) = store.as_sqlite() {
            read_or_create_preferences_sqlite(pool, user_id, now).await
        } else if let Some(pool) = store.as_postgres() {
            read_or_create_preferences_postgres(pool, user_id, now).await
        } else {
            Err(PreferenceError::Storage(
                "Unsupported database type".to_string(),
            ))
        };

        if let Err(e) = &result {
            tracing::error!(error = %e, "Failed to read preferences");
        }

        result
    }

    /// Turn off the flag `scope` maps to
    ///
    /// Creates the record from the default matrix with the flag already off when
    /// none exists. Calling this again with the same scope changes nothing.
    #[tracing::instrument(fields(user_id = %user_id, scope = %scope))]
    pub async fn apply_scope(
        user_id: &str,
        scope: Scope,
    ) -> Result<PreferenceRecord, PreferenceError> {
        let store = &*GENERIC_DATA_STORE;
        let flag = scope.flag();
        let now = Utc::now();

        let result = if let Some(pool) = store.as_sqlite() {
            disable_flag_sqlite(pool, user_id, flag, now).await
        } else if let Some(pool) = store.as_postgres() {
            disable_flag_postgres(pool, user_id, flag, now).await
        } else {
            Err(PreferenceError::Storage(
                "Unsupported database type".to_string(),
            ))
        };

        match &result {
            Ok(_) => tracing::info!(flag = flag.column(), "Notification flag disabled"),
            Err(e) => tracing::error!(error = %e, "Failed to apply unsubscribe scope"),
        }

        result
    }

    /// Overwrite all four flags
    #[tracing::instrument(skip(preferences), fields(user_id = %user_id))]
    pub async fn replace(
        user_id: &str,
        preferences: NotificationPreferences,
    ) -> Result<PreferenceRecord, PreferenceError> {
        let store = &*GENERIC_DATA_STORE;
        let now = Utc::now();

        let result = if let Some(pool) = store.as_sqlite() {
            replace_preferences_sqlite(pool, user_id, preferences, now).await
        } else if let Some(pool) = store.as_postgres() {
            replace_preferences_postgres(pool, user_id, preferences, now).await
        } else {
            Err(PreferenceError::Storage(
                "Unsupported database type".to_string(),
            ))
        };

        match &result {
            Ok(_) => tracing::info!(?preferences, "Notification preferences replaced"),
            Err(e) => tracing::error!(error = %e, "Failed to replace preferences"),
        }

        result
    }
}
