//! Authentication ports.

use chrono::{DateTime, Utc};

use crate::domain::{AggregateRoot, EmailAddress, Identifier, User, UserRole};

/// The user an access token speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Identifier,
    pub email: EmailAddress,
    pub role: UserRole,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id(),
            email: user.email().clone(),
            role: user.role(),
        }
    }
}

/// A signed token and its lifetime in seconds.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: i64,
}

/// Claims recovered from a verified token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub principal: Principal,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies access tokens.
pub trait TokenService: Send + Sync {
    fn issue(&self, principal: &Principal) -> Result<AccessToken, AuthError>;

    /// Verify signature, issuer and expiry. A token whose subject, email or
    /// role does not parse is rejected as invalid.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
