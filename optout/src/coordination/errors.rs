//! Error types for the unsubscribe and preference flows

use thiserror::Error;

use crate::preference::PreferenceError;
use crate::token::TokenError;
use crate::userdb::UserError;

/// Failures of the unsubscribe flow
///
/// `Display` is safe to send to the caller: it never includes token contents
/// or storage details. The details travel in the variant for [`log`](Self::log).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnsubscribeError {
    #[error("Token is required")]
    MissingToken,

    /// Malformed, forged and expired tokens are deliberately indistinguishable
    #[error("Invalid or expired unsubscribe token")]
    InvalidToken,

    #[error("User not found")]
    UserNotFound,

    /// Safe to retry: every mutation is idempotent
    #[error("Failed to update preferences")]
    TransientStoreFailure(String),

    #[error("Unsubscribe service is not configured")]
    Configuration(String),
}

impl UnsubscribeError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::MissingToken => tracing::debug!("Unsubscribe request without token"),
            Self::InvalidToken => tracing::warn!("Unsubscribe token rejected"),
            Self::UserNotFound => tracing::warn!("Unsubscribe token for unknown user"),
            Self::TransientStoreFailure(detail) => {
                tracing::error!(error = %detail, "Preference store failure during unsubscribe")
            }
            Self::Configuration(detail) => {
                tracing::error!(error = %detail, "Unsubscribe token codec misconfigured")
            }
        }
        self
    }
}

impl From<PreferenceError> for UnsubscribeError {
    fn from(err: PreferenceError) -> Self {
        Self::TransientStoreFailure(err.to_string())
    }
}

impl From<UserError> for UnsubscribeError {
    fn from(err: UserError) -> Self {
        Self::TransientStoreFailure(err.to_string())
    }
}

impl From<TokenError> for UnsubscribeError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid => Self::InvalidToken,
            other => Self::Configuration(other.to_string()),
        }
    }
}

/// Failures of the authenticated preference endpoints
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreferenceSyncError {
    #[error("Invalid preferences: {0}")]
    InvalidPayload(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to access preferences")]
    Storage(String),
}

impl PreferenceSyncError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::InvalidPayload(msg) => tracing::debug!("Rejected preference payload: {}", msg),
            Self::UserNotFound => tracing::warn!("Preference request for unknown user"),
            Self::Storage(detail) => {
                tracing::error!(error = %detail, "Preference store failure")
            }
        }
        self
    }
}

impl From<PreferenceError> for PreferenceSyncError {
    fn from(err: PreferenceError) -> Self {
        match err {
            PreferenceError::InvalidData(msg) => Self::InvalidPayload(msg),
            PreferenceError::Storage(msg) => Self::Storage(msg),
        }
    }
}

impl From<UserError> for PreferenceSyncError {
    fn from(err: UserError) -> Self {
        Self::Storage(err.to_string())
    }
}
