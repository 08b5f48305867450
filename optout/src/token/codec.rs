//! Signed unsubscribe tokens
//!
//! A token is `base64url(claims_json) "." base64url(hmac_sha256(secret, base64url(claims_json)))`.
//! Verification is a pure function of the token, the key and the current time, so a
//! link can be checked without touching the database.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::config::{
    MIN_SECRET_LEN, UNSUBSCRIBE_TOKEN_SECRET, UNSUBSCRIBE_TOKEN_TTL,
};
use super::errors::TokenError;
use super::types::UnsubscribeClaims;
use crate::utils::{base64url_decode, base64url_encode};

type HmacSha256 = Hmac<Sha256>;

/// Issues and verifies unsubscribe tokens with one HMAC key
#[derive(Clone)]
pub struct UnsubscribeTokenCodec {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl std::fmt::Debug for UnsubscribeTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnsubscribeTokenCodec")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

impl UnsubscribeTokenCodec {
    /// Build a codec from an explicit key and token lifetime
    pub fn new(secret: impl Into<Vec<u8>>, ttl_secs: i64) -> Result<Self, TokenError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::Config(format!(
                "Unsubscribe token secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if ttl_secs <= 0 {
            return Err(TokenError::Config(
                "Unsubscribe token lifetime must be positive".to_string(),
            ));
        }

        Ok(Self { secret, ttl_secs })
    }

    /// Build a codec from `UNSUBSCRIBE_TOKEN_SECRET` and `UNSUBSCRIBE_TOKEN_TTL`
    pub fn from_env() -> Result<Self, TokenError> {
        let secret = UNSUBSCRIBE_TOKEN_SECRET
            .clone()
            .ok_or_else(|| TokenError::Config("UNSUBSCRIBE_TOKEN_SECRET must be set".to_string()))?;

        Self::new(secret, *UNSUBSCRIBE_TOKEN_TTL)
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a token for `user_id` that expires after the configured lifetime
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        if user_id.is_empty() {
            return Err(TokenError::Issue("User ID cannot be empty".to_string()));
        }

        let iat = now.timestamp();
        let claims = UnsubscribeClaims {
            sub: user_id.to_string(),
            iat,
            exp: iat + self.ttl_secs,
        };

        let payload = serde_json::to_vec(&claims).map_err(|e| TokenError::Issue(e.to_string()))?;
        let encoded_payload = base64url_encode(&payload);
        let signature = self.mac(&encoded_payload)?.finalize().into_bytes();

        Ok(format!(
            "{encoded_payload}.{}",
            base64url_encode(&signature)
        ))
    }

    /// Verify a token against the wall clock and return the user ID it was issued for
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`
    ///
    /// Every failure, whether a bad signature, a malformed payload or an
    /// expired token, is reported as [`TokenError::Invalid`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let (encoded_payload, encoded_signature) =
            token.trim().split_once('.').ok_or(TokenError::Invalid)?;

        let signature = base64url_decode(encoded_signature).map_err(|_| TokenError::Invalid)?;

        // Constant-time comparison; the payload is not parsed until the signature holds
        self.mac(encoded_payload)
            .map_err(|_| TokenError::Invalid)?
            .verify_slice(&signature)
            .map_err(|_| TokenError::Invalid)?;

        let payload = base64url_decode(encoded_payload).map_err(|_| TokenError::Invalid)?;
        let claims: UnsubscribeClaims =
            serde_json::from_slice(&payload).map_err(|_| TokenError::Invalid)?;

        if claims.sub.is_empty() || claims.exp <= now.timestamp() {
            return Err(TokenError::Invalid);
        }

        Ok(claims.sub)
    }

    fn mac(&self, encoded_payload: &str) -> Result<HmacSha256, TokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| TokenError::Config(e.to_string()))?;
        mac.update(encoded_payload.as_bytes());
        Ok(mac)
    }
}
