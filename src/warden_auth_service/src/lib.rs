//! Runnable Warden authentication service.
//!
//! Wires the ports from `warden_adapters` into the axum routes, adds the
//! tracing, CORS and panic layers, and serves the result.

mod auth_service;
mod helpers;
mod tracing;

pub use auth_service::AuthService;
pub use helpers::{DatabaseSetupError, configure_postgresql, get_postgres_pool, shutdown_signal};

// Re-export commonly used types
pub use warden_adapters::{
    config::{AllowedOrigins, AuthServiceSetting},
    persistence::{HashMapUserStore, PostgresUserStore},
    security::{Argon2PasswordHasher, JwtAuthConfig, JwtTokenIssuer},
};
pub use warden_core::{PasswordHasher, TokenIssuer, UserStore};
