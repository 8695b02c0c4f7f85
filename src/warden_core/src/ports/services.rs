use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use crate::domain::{email::Email, password::Password, user_id::UserId};

// PasswordHasher port trait and errors
#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("Password does not match")]
    Mismatch,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Slow one-way hashing for credentials.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<Secret<String>, PasswordHasherError>;

    /// Checks a plaintext `candidate` against a stored `hash` in constant
    /// time. A mismatch is reported as [`PasswordHasherError::Mismatch`].
    async fn compare(
        &self,
        hash: &Password,
        candidate: &Secret<String>,
    ) -> Result<(), PasswordHasherError>;
}

// TokenIssuer port trait and errors
#[derive(Debug, Error)]
pub enum TokenIssuerError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Claims recovered from a token whose signature, issuer and validity window
/// all checked out. The user id is left as the raw string found in the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedClaims {
    pub user_id: String,
    pub email: Option<String>,
}

/// Mints and verifies signed bearer tokens.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Short-lived token carrying the user id and email.
    async fn generate_access_token(
        &self,
        user_id: &UserId,
        email: &Email,
    ) -> Result<String, TokenIssuerError>;

    /// Long-lived token carrying only the user id.
    async fn generate_refresh_token(&self, user_id: &UserId) -> Result<String, TokenIssuerError>;

    async fn validate_token(&self, token: &str) -> Result<IssuedClaims, TokenIssuerError>;
}
