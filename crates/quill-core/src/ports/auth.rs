//! Authentication ports.

use crate::error::DomainError;

/// Identity extracted from a verified token, scoped to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
}

impl Principal {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The subject interpreted as a numeric author id.
    pub fn author_id(&self) -> Result<i32, DomainError> {
        self.subject
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidPrincipal(self.subject.clone()))
    }
}

/// Token service trait for JWT operations.
pub trait TokenService: Send + Sync {
    /// Issue a signed token for the given subject.
    fn generate_token(&self, subject: &str) -> Result<String, AuthError>;

    /// Verify a token and extract its principal.
    fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}
