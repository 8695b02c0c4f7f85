use std::fmt;

use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Number of character classes (upper, lower, digit, symbol) a plaintext
/// password has to draw from.
pub const REQUIRED_CHARACTER_CLASSES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("password must be at least 8 characters")]
    TooShort,
    #[error("password must be at most 72 characters")]
    TooLong,
    #[error(
        "password must contain at least 3 of: uppercase letter, lowercase letter, digit, special character"
    )]
    TooWeak,
}

/// Either a plaintext candidate that passed the strength rules or an opaque
/// hash produced by a `PasswordHasher`. The value never shows up in `Debug`.
#[derive(Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Wraps a stored hash without validation.
    pub fn from_hash(hash: Secret<String>) -> Self {
        Self(hash)
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        validate_strength(value.expose_secret())?;
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for Password {}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

fn validate_strength(candidate: &str) -> Result<(), PasswordError> {
    let length = candidate.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }

    let (mut upper, mut lower, mut digit, mut symbol) = (false, false, false, false);
    for c in candidate.chars() {
        if c.is_uppercase() {
            upper = true;
        } else if c.is_lowercase() {
            lower = true;
        } else if c.is_numeric() {
            digit = true;
        } else if !c.is_whitespace() && !c.is_control() && !c.is_alphabetic() {
            symbol = true;
        }
    }

    let classes = [upper, lower, digit, symbol]
        .into_iter()
        .filter(|present| *present)
        .count();

    if classes < REQUIRED_CHARACTER_CLASSES {
        return Err(PasswordError::TooWeak);
    }

    Ok(())
}
