//! Login and per-request token gate.
//!
//! Request flow for a protected call:
//! `header present? -> "Bearer " prefix? -> signature valid? -> not expired? -> forward`.
//! The first failing step rejects the request.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::{
    Credential, CredentialVerifier, Hs256TokenCodec, Role, StaticCredentialVerifier, TokenClaims,
    TokenCodec, TokenError, token_ttl,
};

pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Credentials did not match.
    #[error("invalid credentials")]
    Unauthorized,

    /// No `Authorization` header, or it does not start with `Bearer `.
    #[error("missing or malformed authorization header")]
    MissingAuth,

    /// The bearer token failed verification.
    #[error("invalid token: {0}")]
    InvalidToken(#[source] TokenError),

    /// Signing failed while issuing a token.
    #[error("could not issue token: {0}")]
    Issue(#[source] TokenError),
}

/// Pull the token out of an `Authorization` header value.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    header
        .ok_or(AuthError::MissingAuth)?
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MissingAuth)
}

/// Issues tokens for valid credentials and authenticates bearer tokens.
///
/// Holds no mutable state; one instance is shared by every request.
#[derive(Clone)]
pub struct Authenticator {
    verifier: Arc<dyn CredentialVerifier>,
    codec: Arc<dyn TokenCodec>,
    role: Role,
    ttl: Duration,
}

impl Authenticator {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, codec: Arc<dyn TokenCodec>) -> Self {
        Self {
            verifier,
            codec,
            role: Role::USER,
            ttl: token_ttl(),
        }
    }

    /// One accepted username/password pair, HS256 tokens keyed by `secret`.
    pub fn with_static_credentials(
        username: impl Into<String>,
        password: impl Into<String>,
        secret: impl AsRef<[u8]>,
    ) -> Self {
        Self::new(
            Arc::new(StaticCredentialVerifier::new(username, password)),
            Arc::new(Hs256TokenCodec::new(secret)),
        )
    }

    pub fn codec(&self) -> &Arc<dyn TokenCodec> {
        &self.codec
    }

    /// Verify a credential and issue a token valid for 30 minutes from `now`.
    pub fn login(&self, credential: &Credential, now: DateTime<Utc>) -> Result<String, AuthError> {
        let subject = match self.verifier.verify(credential) {
            Ok(subject) => subject,
            Err(e) => {
                tracing::warn!(username = %credential.username, "login rejected");
                return Err(e);
            }
        };

        let claims = TokenClaims::new(subject, self.role.clone(), now, self.ttl);
        let token = self.codec.issue(&claims).map_err(AuthError::Issue)?;

        tracing::info!(subject = %claims.subject, expires_at = %claims.expires_at, "token issued");
        Ok(token)
    }

    /// Verify a raw token string.
    pub fn authenticate(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AuthError> {
        self.codec.verify(token, now).map_err(|reason| {
            tracing::warn!(%reason, "bearer token rejected");
            AuthError::InvalidToken(reason)
        })
    }

    /// Run the full gate over an `Authorization` header value.
    pub fn authorize_header(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<TokenClaims, AuthError> {
        let token = extract_bearer(header).inspect_err(|_| {
            tracing::warn!("request without bearer token");
        })?;
        self.authenticate(token, now)
    }
}

impl core::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Authenticator")
            .field("role", &self.role)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
