use usergate_auth::{Role, TokenClaims};

/// Authenticated principal for a request, placed in request extensions by
/// the auth middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    subject: String,
    role: Role,
}

impl PrincipalContext {
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            role,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role(&self) -> &Role {
        &self.role
    }
}

impl From<TokenClaims> for PrincipalContext {
    fn from(claims: TokenClaims) -> Self {
        Self::new(claims.subject, claims.role)
    }
}
