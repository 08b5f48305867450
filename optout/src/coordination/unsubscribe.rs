use crate::preference::{PreferenceRecord, PreferenceStore, Scope};
use crate::token::{UnsubscribeTokenCodec, default_codec};
use crate::userdb::UserStore;

use super::errors::UnsubscribeError;

/// Handle an unsubscribe request with the codec configured from the environment
///
/// `token` and `scope` are the raw request values; either may be absent.
/// On success the returned record already reflects the revocation.
pub async fn unsubscribe_core(
    token: Option<&str>,
    scope: Option<&str>,
) -> Result<PreferenceRecord, UnsubscribeError> {
    let codec = default_codec().map_err(|e| UnsubscribeError::from(e).log())?;
    unsubscribe_with_codec(codec, token, scope).await
}

/// Check an unsubscribe token without reading or writing storage
///
/// Returns the user ID the token was issued for. A footer link is confirmed
/// with this before anything changes, since mail scanners follow GET links.
pub fn verify_unsubscribe_token(token: Option<&str>) -> Result<String, UnsubscribeError> {
    let codec = default_codec().map_err(|e| UnsubscribeError::from(e).log())?;
    verify_request_token(codec, token)
}

fn verify_request_token(
    codec: &UnsubscribeTokenCodec,
    token: Option<&str>,
) -> Result<String, UnsubscribeError> {
    let token = token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| UnsubscribeError::MissingToken.log())?;

    codec
        .verify(token)
        .map_err(|e| UnsubscribeError::from(e).log())
}

/// Handle an unsubscribe request with an explicit codec
///
/// Nothing is read from or written to storage unless the token verifies.
#[tracing::instrument(skip_all, fields(scope = tracing::field::Empty, user_id = tracing::field::Empty))]
pub async fn unsubscribe_with_codec(
    codec: &UnsubscribeTokenCodec,
    token: Option<&str>,
    scope: Option<&str>,
) -> Result<PreferenceRecord, UnsubscribeError> {
    let user_id = verify_request_token(codec, token)?;

    let span = tracing::Span::current();
    span.record("user_id", user_id.as_str());

    UserStore::get_user(&user_id)
        .await
        .map_err(|e| UnsubscribeError::from(e).log())?
        .ok_or_else(|| UnsubscribeError::UserNotFound.log())?;

    let scope = Scope::from_request(scope);
    span.record("scope", scope.as_str());

    let record = PreferenceStore::apply_scope(&user_id, scope)
        .await
        .map_err(|e| UnsubscribeError::from(e).log())?;

    tracing::info!("Unsubscribe request applied");
    Ok(record)
}
