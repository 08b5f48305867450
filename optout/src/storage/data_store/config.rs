//! Data store configuration

use std::{env, str::FromStr, sync::LazyLock};

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};
use crate::storage::errors::StorageError;

// Configuration
static GENERIC_DATA_STORE_TYPE: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_TYPE").expect("GENERIC_DATA_STORE_TYPE must be set")
});

static GENERIC_DATA_STORE_URL: LazyLock<String> = LazyLock::new(|| {
    env::var("GENERIC_DATA_STORE_URL").expect("GENERIC_DATA_STORE_URL must be set")
});

/// Process-wide connection pool.
///
/// The pools are internally synchronized, so the store is shared without a lock and
/// concurrent requests reach the database concurrently.
pub(crate) static GENERIC_DATA_STORE: LazyLock<Box<dyn DataStore>> = LazyLock::new(|| {
    let store_type = GENERIC_DATA_STORE_TYPE.as_str();
    let store_url = GENERIC_DATA_STORE_URL.as_str();

    tracing::info!(store_type, "Initializing data store");

    let store = match store_type {
        "sqlite" => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)
                .expect("Failed to parse SQLite connection string")
                .create_if_missing(true)
                .foreign_keys(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .busy_timeout(std::time::Duration::from_secs(5));

            Box::new(SqliteDataStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            }) as Box<dyn DataStore>
        }
        "postgres" => Box::new(PostgresDataStore {
            pool: sqlx::PgPool::connect_lazy(store_url).expect("Failed to create Postgres pool"),
        }) as Box<dyn DataStore>,
        t => panic!(
            "Unsupported store type: {}. Supported types are 'sqlite' and 'postgres'",
            t
        ),
    };

    tracing::info!(store_type, "Data store pool created");

    store
});

/// Table prefix from environment variable
pub(crate) static DB_TABLE_PREFIX: LazyLock<String> =
    LazyLock::new(|| env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "optout_".to_string()));

/// Checks the data store settings so that a misconfiguration fails `init()`
/// instead of panicking inside the lazily built pool on the first request.
pub(crate) fn check_data_store_config() -> Result<(), StorageError> {
    let store_type = env::var("GENERIC_DATA_STORE_TYPE")
        .map_err(|_| StorageError::Config("GENERIC_DATA_STORE_TYPE must be set".to_string()))?;
    let store_url = env::var("GENERIC_DATA_STORE_URL")
        .map_err(|_| StorageError::Config("GENERIC_DATA_STORE_URL must be set".to_string()))?;

    match store_type.as_str() {
        "sqlite" => sqlx::sqlite::SqliteConnectOptions::from_str(&store_url)
            .map(|_| ())
            .map_err(|e| StorageError::Config(format!("Invalid SQLite URL: {e}"))),
        "postgres" => sqlx::postgres::PgConnectOptions::from_str(&store_url)
            .map(|_| ())
            .map_err(|e| StorageError::Config(format!("Invalid Postgres URL: {e}"))),
        t => Err(StorageError::Config(format!(
            "Unsupported store type: {t}. Supported types are 'sqlite' and 'postgres'"
        ))),
    }
}
