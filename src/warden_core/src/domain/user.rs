use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use super::{email::Email, password::Password, user_id::UserId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("email cannot be empty")]
    EmptyEmail,
    #[error("password hash cannot be empty")]
    EmptyPassword,
    #[error("updated_at cannot precede created_at")]
    InvalidTimestamps,
}

/// A registered account. The password is always the stored hash, never the
/// plaintext.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    email: Email,
    password: Password,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    is_active: bool,
}

impl User {
    /// Creates a new active user with a fresh id.
    ///
    /// # Arguments
    /// * `email` - Normalized email address
    /// * `password` - Hash produced by a `PasswordHasher`
    pub fn new(email: Email, password: Password) -> Result<Self, UserError> {
        if email.is_empty() {
            return Err(UserError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(UserError::EmptyPassword);
        }

        let now = Utc::now();
        Ok(Self {
            id: UserId::new(),
            email,
            password,
            created_at: now,
            updated_at: now,
            is_active: true,
        })
    }

    /// Rebuilds a user from persisted fields without re-validating them.
    pub fn reconstruct(
        id: UserId,
        email: Email,
        password: Password,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        is_active: bool,
    ) -> Self {
        Self {
            id,
            email,
            password,
            created_at,
            updated_at,
            is_active,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn can_login(&self) -> bool {
        self.is_active
    }

    pub fn update_email(&mut self, email: Email) -> Result<(), UserError> {
        if email.is_empty() {
            return Err(UserError::EmptyEmail);
        }
        self.email = email;
        self.touch();
        Ok(())
    }

    pub fn update_password(&mut self, password: Password) -> Result<(), UserError> {
        if password.is_empty() {
            return Err(UserError::EmptyPassword);
        }
        self.password = password;
        self.touch();
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.touch();
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }

    pub fn validate(&self) -> Result<(), UserError> {
        if self.email.is_empty() {
            return Err(UserError::EmptyEmail);
        }
        if self.password.is_empty() {
            return Err(UserError::EmptyPassword);
        }
        if self.updated_at < self.created_at {
            return Err(UserError::InvalidTimestamps);
        }
        Ok(())
    }

    // Stores round timestamps to microseconds, so each bump moves at least 1µs.
    fn touch(&mut self) {
        let floor = self.updated_at + TimeDelta::microseconds(1);
        self.updated_at = Utc::now().max(floor);
    }
}
