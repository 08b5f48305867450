use thiserror::Error;

#[derive(Clone, Error, Debug)]
pub enum PreferenceError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<sqlx::Error> for PreferenceError {
    fn from(err: sqlx::Error) -> Self {
        PreferenceError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PreferenceError {
    fn from(err: serde_json::Error) -> Self {
        PreferenceError::InvalidData(err.to_string())
    }
}
