use serde::{Deserialize, Serialize};

use crate::AuthError;

/// Username/password pair presented at login. Never persisted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Checks a credential and yields the subject to put in the token.
///
/// A real user directory can replace the static implementation without
/// touching the token codec or the request gate.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, credential: &Credential) -> Result<String, AuthError>;
}

/// Accepts exactly one configured username/password pair.
///
/// Comparison is plain string equality, not constant-time.
// TODO: switch to a constant-time comparison once a hardening pass is agreed on.
#[derive(Clone)]
pub struct StaticCredentialVerifier {
    username: String,
    password: String,
}

impl StaticCredentialVerifier {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for StaticCredentialVerifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StaticCredentialVerifier")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl CredentialVerifier for StaticCredentialVerifier {
    fn verify(&self, credential: &Credential) -> Result<String, AuthError> {
        if credential.username == self.username && credential.password == self.password {
            Ok(credential.username.clone())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}
