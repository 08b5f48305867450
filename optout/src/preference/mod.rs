mod errors;
mod storage;
mod types;

pub use errors::PreferenceError;
pub use storage::PreferenceStore;
pub use types::{NotificationFlag, NotificationPreferences, PreferenceRecord, Scope};

pub(crate) async fn init() -> Result<(), PreferenceError> {
    PreferenceStore::init().await
}
