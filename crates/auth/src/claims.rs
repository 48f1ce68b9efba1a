use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::{Role, TokenError};

/// Lifetime of an issued token, in seconds (30 minutes).
pub const TOKEN_TTL_SECS: i64 = 30 * 60;

/// Lifetime of an issued token.
pub fn token_ttl() -> Duration {
    Duration::seconds(TOKEN_TTL_SECS)
}

/// Claims carried inside a bearer token.
///
/// Timestamps are whole seconds since the Unix epoch on the wire (`iat`,
/// `exp`), so a claims value survives an encode/decode cycle unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Authenticated principal (the login username).
    #[serde(rename = "sub")]
    pub subject: String,

    pub role: Role,

    #[serde(rename = "iat", with = "chrono::serde::ts_seconds")]
    pub issued_at: DateTime<Utc>,

    #[serde(rename = "exp", with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Claims for a token issued at `now` that lives for `ttl`.
    ///
    /// `now` is truncated to whole seconds.
    pub fn new(subject: impl Into<String>, role: Role, now: DateTime<Utc>, ttl: Duration) -> Self {
        let issued_at = now.trunc_subsecs(0);
        Self {
            subject: subject.into(),
            role,
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at.timestamp()
    }
}

/// Check the time window of already-authenticated claims.
///
/// A token is valid only while `now < expires_at`, compared in whole seconds.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if claims.is_expired_at(now) {
        return Err(TokenError::Expired);
    }
    Ok(())
}
