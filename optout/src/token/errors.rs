use thiserror::Error;

/// Errors from the unsubscribe token codec
///
/// Verification failures of any kind collapse into [`TokenError::Invalid`]; the
/// remaining variants only come from issuing tokens or building the codec.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    #[error("Invalid or expired unsubscribe token")]
    Invalid,

    #[error("Token configuration error: {0}")]
    Config(String),

    #[error("Failed to issue token: {0}")]
    Issue(String),
}
