use crate::storage::GENERIC_DATA_STORE;
use crate::userdb::{errors::UserError, types::User};

use super::postgres::*;
use super::sqlite::*;

/// Access to the users table
///
/// The unsubscribe flow only ever reads users. `upsert_user` and `delete_user`
/// are the hooks the account provisioning process uses to keep the identity
/// anchor in sync; deleting a user cascades to its preference record.
pub struct UserStore;

impl UserStore {
    /// Initialize the user database tables
    pub(crate) async fn init() -> Result<(), UserError> {
        let store = &*GENERIC_DATA_STORE;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => {
                create_tables_sqlite(pool).await?;
                validate_user_tables_sqlite(pool).await?;
                Ok(())
            }
            (_, Some(pool)) => {
                create_tables_postgres(pool).await?;
                validate_user_tables_postgres(pool).await?;
                Ok(())
            }
            _ => Err(UserError::Storage("Unsupported database type".to_string())),
        }
    }

    /// Get a user by their ID
    #[tracing::instrument(fields(user_id = %id))]
    pub async fn get_user(id: &str) -> Result<Option<User>, UserError> {
        let store = &*GENERIC_DATA_STORE;

        let result = if let Some(pool) = store.as_sqlite() {
            get_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(Some(_)) => tracing::debug!(found = true, "User lookup completed"),
            Ok(None) => tracing::debug!(found = false, "User lookup completed - not found"),
            Err(e) => tracing::error!(error = %e, "User lookup failed"),
        }

        result
    }

    /// Create or update a user
    #[tracing::instrument(skip(user), fields(user_id = %user.id))]
    pub async fn upsert_user(user: User) -> Result<User, UserError> {
        if user.id.is_empty() {
            return Err(UserError::InvalidData(
                "User ID cannot be empty".to_string(),
            ));
        }

        let store = &*GENERIC_DATA_STORE;

        let result = if let Some(pool) = store.as_sqlite() {
            upsert_user_sqlite(pool, user).await
        } else if let Some(pool) = store.as_postgres() {
            upsert_user_postgres(pool, user).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        };

        match &result {
            Ok(_) => tracing::info!("User upsert completed successfully"),
            Err(e) => tracing::error!(error = %e, "User upsert failed"),
        }

        result
    }

    /// Delete a user; the preference record goes with it
    #[tracing::instrument(fields(user_id = %id))]
    pub async fn delete_user(id: &str) -> Result<(), UserError> {
        let store = &*GENERIC_DATA_STORE;

        if let Some(pool) = store.as_sqlite() {
            delete_user_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_user_postgres(pool, id).await
        } else {
            Err(UserError::Storage("Unsupported database type".to_string()))
        }
    }
}
