//! `usergate-auth`: stateless bearer-token authentication.
//!
//! This crate is intentionally decoupled from HTTP and storage: callers hand
//! it header values, credentials and the current time.

pub mod claims;
pub mod credentials;
pub mod gate;
pub mod roles;
pub mod token;

pub use claims::{TOKEN_TTL_SECS, TokenClaims, token_ttl, validate_claims};
pub use credentials::{Credential, CredentialVerifier, StaticCredentialVerifier};
pub use gate::{AuthError, Authenticator, BEARER_PREFIX, extract_bearer};
pub use roles::Role;
pub use token::{Hs256TokenCodec, TokenCodec, TokenError};
