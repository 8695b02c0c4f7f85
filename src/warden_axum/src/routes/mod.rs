//! Route handlers and the routers that mount them.

pub mod health;
pub mod login;
pub mod refresh_token;
pub mod signup;
pub mod validate_token;

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};
use secrecy::{ExposeSecret, Secret};
use warden_application::AuthUseCases;
use warden_core::{PasswordHasher, TokenIssuer, UserStore};

use crate::error::ApiError;

pub use health::{HealthResponse, HealthState, health, ready};
pub use login::login;
pub use refresh_token::refresh_token;
pub use signup::signup;
pub use validate_token::{ValidateTokenResponse, validate_token};

/// `/auth/*` routes, meant to be nested under an API version prefix.
pub fn auth_router<U, H, T>(use_cases: AuthUseCases<U, H, T>) -> Router
where
    U: UserStore + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    Router::new()
        .route("/auth/signup", post(signup::<U, H, T>))
        .route("/auth/login", post(login::<U, H, T>))
        .route("/auth/refresh", post(refresh_token::<U, H, T>))
        .route("/auth/validate", get(validate_token::<U, H, T>))
        .with_state(use_cases)
}

/// `/health` and `/ready`.
pub fn health_router<U>(state: HealthState<U>) -> Router
where
    U: UserStore + Clone + 'static,
{
    Router::new()
        .route("/health", get(health::<U>))
        .route("/ready", get(ready::<U>))
        .with_state(state)
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(ApiError::from)
}

/// Trimmed `value`, or a validation error when nothing is left.
fn required(value: &str, error: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::validation(error));
    }
    Ok(value.to_owned())
}

fn required_secret(value: Option<Secret<String>>, error: &str) -> Result<Secret<String>, ApiError> {
    let value = value.ok_or_else(|| ApiError::validation(error))?;
    required(value.expose_secret(), error).map(Secret::new)
}
