//! Signed token encoding (HS256 JWT).
//!
//! Wire format: `base64url(header) "." base64url(claims) "." base64url(signature)`,
//! where the signature is HMAC-SHA256 over the first two segments.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use thiserror::Error;

use crate::claims::{TokenClaims, validate_claims};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not three segments, bad base64, bad JSON, or an unexpected algorithm.
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not verify")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    /// Signing failed while issuing (never produced by `verify`).
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

/// Issues and verifies bearer tokens.
pub trait TokenCodec: Send + Sync {
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError>;

    /// Verify signature and structure, then expiry against `now`.
    ///
    /// A token past its expiry is `Expired` even when its signature is also bad.
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError>;
}

/// HMAC-SHA256 token codec keyed by a server-held secret.
#[derive(Clone)]
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    unverified: Validation,
}

impl Hs256TokenCodec {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();

        // Expiry is checked by `validate_claims` against the caller's clock,
        // at second granularity and without leeway.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let mut unverified = validation.clone();
        unverified.insecure_disable_signature_validation();

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            unverified,
        }
    }

    /// Claims read without checking the signature. Only used to rank rejections.
    fn unverified_claims(&self, token: &str) -> Option<TokenClaims> {
        jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.unverified)
            .ok()
            .map(|data| data.claims)
    }
}

impl core::fmt::Debug for Hs256TokenCodec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hs256TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec for Hs256TokenCodec {
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(TokenError::Malformed);
        }

        // Signature is compared (constant time) before the claims are decoded.
        let data = match jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation) {
            Ok(data) => data,
            Err(err) => {
                let reason = TokenError::from(err);
                // An expired token reports `Expired` whatever its signature.
                if reason == TokenError::InvalidSignature
                    && self
                        .unverified_claims(token)
                        .is_some_and(|claims| claims.is_expired_at(now))
                {
                    return Err(TokenError::Expired);
                }
                return Err(reason);
            }
        };
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
