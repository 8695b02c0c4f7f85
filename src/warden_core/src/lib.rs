//! Domain model and ports of the Warden authentication service.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  domain: Email, Password, UserId, User,       │
//! │          DomainError / ErrorKind              │
//! └──────────────┬────────────────────────────────┘
//!                │ used by
//!                ▼
//! ┌───────────────────────────────────────────────┐
//! │  ports: UserStore, PasswordHasher,            │
//! │         TokenIssuer                           │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this crate performs I/O; adapters implement the ports.

pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    error::{DomainError, ErrorKind},
    password::{
        MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, Password, PasswordError,
        REQUIRED_CHARACTER_CLASSES,
    },
    user::{User, UserError},
    user_id::{UserId, UserIdError},
};

pub use ports::{
    repositories::{
        DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, PageRequest, UserStore, UserStoreError,
    },
    services::{IssuedClaims, PasswordHasher, PasswordHasherError, TokenIssuer, TokenIssuerError},
};
