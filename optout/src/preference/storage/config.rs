use std::{env, sync::LazyLock};

use crate::storage::DB_TABLE_PREFIX;

/// Notification preferences table name
pub(super) static DB_TABLE_NOTIFICATION_PREFERENCES: LazyLock<String> = LazyLock::new(|| {
    env::var("DB_TABLE_NOTIFICATION_PREFERENCES")
        .unwrap_or_else(|_| format!("{}{}", *DB_TABLE_PREFIX, "notification_preferences"))
});

/// Columns in `PreferenceRecord` order
pub(super) const PREFERENCE_COLUMNS: &str = "user_id, email_notifications, weekly_digest, \
     new_skill_alerts, pack_alerts, created_at, updated_at";
