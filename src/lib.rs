//! # Warden - token-based authentication service
//!
//! This is a facade crate that re-exports all public APIs from the service components.
//! Use this crate to get access to all authentication functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! warden = { path = "../warden" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `UserId`, `User`, `DomainError`
//! - **Ports**: `UserStore`, `PasswordHasher`, `TokenIssuer`
//! - **Use cases**: `SignupUseCase`, `LoginUseCase`, `ValidateTokenUseCase`, `RefreshTokenUseCase`
//! - **Adapters**: `PostgresUserStore`, `HashMapUserStore`, `Argon2PasswordHasher`, `JwtTokenIssuer`
//! - **Service**: `AuthService` - The main entry point for the auth service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use warden_core::*;
}

// Re-export most commonly used core types at the root level
pub use warden_core::{
    DomainError, Email, EmailError, ErrorKind, Password, PasswordError, User, UserError, UserId,
    UserIdError,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository and service trait definitions
pub mod ports {
    pub use warden_core::{
        IssuedClaims, PageRequest, PasswordHasher, PasswordHasherError, TokenIssuer,
        TokenIssuerError, UserStore, UserStoreError,
    };
}

pub use ports::{
    PasswordHasher, PasswordHasherError, TokenIssuer, TokenIssuerError, UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use warden_application::*;
}

// Re-export use cases at root level
pub use warden_application::{
    AuthError, AuthResponse, AuthUseCases, LoginUseCase, RefreshTokenUseCase, SignupUseCase,
    TokenClaims, TokenPair, ValidateTokenUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP routes, errors and middleware
    pub mod http {
        pub use warden_axum::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use warden_adapters::persistence::*;
    }

    /// Password hashing and token issuing
    pub mod security {
        pub use warden_adapters::security::*;
    }

    /// Configuration
    pub mod config {
        pub use warden_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use warden_adapters::{
    persistence::{HashMapUserStore, PostgresUserStore},
    security::{Argon2PasswordHasher, JwtAuthConfig, JwtTokenIssuer},
};

// ============================================================================
// Auth Service (Main Entry Point)
// ============================================================================

/// Main auth service
pub use warden_auth_service::{
    AuthService, DatabaseSetupError, configure_postgresql, get_postgres_pool, shutdown_signal,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
