//! Authentication workflows: signup, login, token validation and refresh.
//!
//! Each use case receives its ports at construction and is safe to share
//! across tasks. [`AuthUseCases`] bundles all four for transport adapters.

pub mod auth_use_cases;
pub mod error;
pub mod use_cases;

#[cfg(test)]
mod test_doubles;

pub use auth_use_cases::AuthUseCases;
pub use error::AuthError;
pub use use_cases::{
    AuthResponse, LoginRequest, LoginUseCase, RefreshTokenRequest, RefreshTokenUseCase,
    SignupRequest, SignupUseCase, TokenClaims, TokenPair, ValidateTokenRequest,
    ValidateTokenUseCase,
};
