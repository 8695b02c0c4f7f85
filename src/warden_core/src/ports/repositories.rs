use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, user::User, user_id::UserId};

pub const DEFAULT_PAGE_LIMIT: i64 = 20;
pub const MAX_PAGE_LIMIT: i64 = 100;

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Offset/limit window for [`UserStore::list`], clamped on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: i64,
    limit: i64,
}

impl PageRequest {
    /// A non-positive limit falls back to 20, anything above 100 is capped,
    /// and a negative offset becomes 0.
    pub fn new(offset: i64, limit: i64) -> Self {
        let limit = match limit {
            l if l <= 0 => DEFAULT_PAGE_LIMIT,
            l => l.min(MAX_PAGE_LIMIT),
        };
        Self {
            offset: offset.max(0),
            limit,
        }
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_LIMIT)
    }
}

/// Persistence for [`User`] records. Implementations must enforce email
/// uniqueness themselves; callers' existence checks are only advisory.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: &User) -> Result<(), UserStoreError>;
    async fn find_by_id(&self, id: &UserId) -> Result<User, UserStoreError>;
    async fn find_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn update(&self, user: &User) -> Result<(), UserStoreError>;
    async fn delete(&self, id: &UserId) -> Result<(), UserStoreError>;
    async fn exists_by_email(&self, email: &Email) -> Result<bool, UserStoreError>;
    /// Newest accounts first.
    async fn list(&self, page: PageRequest) -> Result<Vec<User>, UserStoreError>;
    async fn count(&self) -> Result<i64, UserStoreError>;
}
