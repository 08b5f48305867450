use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::preference::{
    errors::PreferenceError,
    types::{NotificationFlag, NotificationPreferences, PreferenceRecord},
};
use crate::storage::validate_postgres_table_schema;
use crate::userdb::DB_TABLE_USERS;

use super::config::{DB_TABLE_NOTIFICATION_PREFERENCES, PREFERENCE_COLUMNS};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), PreferenceError> {
    let table_name = DB_TABLE_NOTIFICATION_PREFERENCES.as_str();
    let users_table = DB_TABLE_USERS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            user_id TEXT PRIMARY KEY NOT NULL REFERENCES {users_table}(id) ON DELETE CASCADE,
            email_notifications BOOLEAN NOT NULL DEFAULT TRUE,
            weekly_digest BOOLEAN NOT NULL DEFAULT TRUE,
            new_skill_alerts BOOLEAN NOT NULL DEFAULT TRUE,
            pack_alerts BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    Ok(())
}

pub(super) async fn validate_preference_tables_postgres(
    pool: &Pool<Postgres>,
) -> Result<(), PreferenceError> {
    let table_name = DB_TABLE_NOTIFICATION_PREFERENCES.as_str();

    let expected_columns = [
        ("user_id", "text"),
        ("email_notifications", "boolean"),
        ("weekly_digest", "boolean"),
        ("new_skill_alerts", "boolean"),
        ("pack_alerts", "boolean"),
        ("created_at", "timestamp with time zone"),
        ("updated_at", "timestamp with time zone"),
    ];

    validate_postgres_table_schema(pool, table_name, &expected_columns, PreferenceError::Storage)
        .await
}

pub(super) async fn get_preferences_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<Option<PreferenceRecord>, PreferenceError> {
    let table_name = DB_TABLE_NOTIFICATION_PREFERENCES.as_str();

    let record = sqlx::query_as::<_, PreferenceRecord>(&format!(
        r#"
        SELECT {PREFERENCE_COLUMNS} FROM {table_name} WHERE user_id = $1
        "#
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

pub(super) async fn read_or_create_preferences_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<PreferenceRecord, PreferenceError> {
    let table_name = DB_TABLE_NOTIFICATION_PREFERENCES.as_str();
    let defaults = NotificationPreferences::default();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} ({PREFERENCE_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id) DO NOTHING
        "#
    ))
    .bind(user_id)
    .bind(defaults.email_notifications)
    .bind(defaults.weekly_digest)
    .bind(defaults.new_skill_alerts)
    .bind(defaults.pack_alerts)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    get_preferences_postgres(pool, user_id)
        .await?
        .ok_or_else(|| PreferenceError::Storage("Preference record missing after insert".to_string()))
}

/// Turn one flag off, creating the record from the default matrix if needed
///
/// The conditional `DO UPDATE ... WHERE` only writes when the flag is still on,
/// so a repeated call leaves the row (including `updated_at`) untouched and
/// returns no row; the current record is then read back.
pub(super) async fn disable_flag_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    flag: NotificationFlag,
    now: DateTime<Utc>,
) -> Result<PreferenceRecord, PreferenceError> {
    let table_name = DB_TABLE_NOTIFICATION_PREFERENCES.as_str();
    let column = flag.column();
    let initial = NotificationPreferences::default().with(flag, false);

    let written = sqlx::query_as::<_, PreferenceRecord>(&format!(
        r#"
        INSERT INTO {table_name} ({PREFERENCE_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id) DO UPDATE SET
            {column} = EXCLUDED.{column},
            updated_at = EXCLUDED.updated_at
        WHERE {table_name}.{column} <> EXCLUDED.{column}
        RETURNING {PREFERENCE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(initial.email_notifications)
    .bind(initial.weekly_digest)
    .bind(initial.new_skill_alerts)
    .bind(initial.pack_alerts)
    .bind(now)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    match written {
        Some(record) => Ok(record),
        None => get_preferences_postgres(pool, user_id).await?.ok_or_else(|| {
            PreferenceError::Storage("Preference record missing after upsert".to_string())
        }),
    }
}

pub(super) async fn replace_preferences_postgres(
    pool: &Pool<Postgres>,
    user_id: &str,
    preferences: NotificationPreferences,
    now: DateTime<Utc>,
) -> Result<PreferenceRecord, PreferenceError> {
    let table_name = DB_TABLE_NOTIFICATION_PREFERENCES.as_str();

    let record = sqlx::query_as::<_, PreferenceRecord>(&format!(
        r#"
        INSERT INTO {table_name} ({PREFERENCE_COLUMNS})
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id) DO UPDATE SET
            email_notifications = EXCLUDED.email_notifications,
            weekly_digest = EXCLUDED.weekly_digest,
            new_skill_alerts = EXCLUDED.new_skill_alerts,
            pack_alerts = EXCLUDED.pack_alerts,
            updated_at = EXCLUDED.updated_at
        RETURNING {PREFERENCE_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(preferences.email_notifications)
    .bind(preferences.weekly_digest)
    .bind(preferences.new_skill_alerts)
    .bind(preferences.pack_alerts)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(record)
}
