//! optout - Email notification consent for web applications
//!
//! This crate issues signed unsubscribe tokens for email footers, applies
//! one-click unsubscribe requests against a per-user preference record, and
//! serves the authenticated read/replace path used by settings pages.
//!
//! Call [`init`] once at startup before using any other function.

mod config;
mod coordination;
mod preference;
mod storage;
mod token;
mod userdb;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::OPTOUT_ROUTE_PREFIX;

pub use coordination::{
    PreferenceSyncError, UnsubscribeError, get_preferences_core, unsubscribe_core,
    unsubscribe_with_codec, update_preferences_core, verify_unsubscribe_token,
};

pub use preference::{
    NotificationFlag, NotificationPreferences, PreferenceError, PreferenceRecord,
    PreferenceStore, Scope,
};

pub use storage::StorageError;

pub use token::{TokenError, UnsubscribeTokenCodec, default_codec, issue_unsubscribe_token};

pub use userdb::{User, UserError, UserStore};

/// Initialize storage, the token codec and the tables
///
/// Fails when the data store or `UNSUBSCRIBE_TOKEN_SECRET` is misconfigured.
pub async fn init() -> Result<(), Box<dyn std::error::Error>> {
    storage::init().await?;
    token::init()?;
    // Preferences reference users, so the users table comes first
    userdb::init().await?;
    preference::init().await?;
    Ok(())
}
