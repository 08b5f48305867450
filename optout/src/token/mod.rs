mod codec;
mod config;
mod errors;
mod types;

use std::sync::LazyLock;

pub use codec::UnsubscribeTokenCodec;
pub use errors::TokenError;

static DEFAULT_CODEC: LazyLock<Result<UnsubscribeTokenCodec, TokenError>> =
    LazyLock::new(UnsubscribeTokenCodec::from_env);

/// The codec configured from the environment
pub fn default_codec() -> Result<&'static UnsubscribeTokenCodec, TokenError> {
    DEFAULT_CODEC.as_ref().map_err(Clone::clone)
}

/// Issue an unsubscribe token for `user_id` with the configured key
///
/// Used by the email composer when building footer links.
pub fn issue_unsubscribe_token(user_id: &str) -> Result<String, TokenError> {
    default_codec()?.issue(user_id)
}

pub(crate) fn init() -> Result<(), TokenError> {
    default_codec().map(|codec| {
        tracing::debug!(ttl_secs = codec.ttl_secs(), "Unsubscribe token codec ready");
    })
}
