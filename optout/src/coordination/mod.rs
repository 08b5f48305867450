//! Request-level flows built on the token codec and the stores
//!
//! - `unsubscribe`: the unauthenticated one-click path driven by a signed token
//! - `preferences`: the authenticated read and full-replace path

mod errors;
mod preferences;
mod unsubscribe;

pub use errors::{PreferenceSyncError, UnsubscribeError};
pub use preferences::{get_preferences_core, update_preferences_core};
pub use unsubscribe::{unsubscribe_core, unsubscribe_with_codec, verify_unsubscribe_token};
