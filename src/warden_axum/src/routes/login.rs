use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use secrecy::Secret;
use serde::Deserialize;
use warden_application::{AuthResponse, AuthUseCases};
use warden_core::{PasswordHasher, TokenIssuer, UserStore};

use super::{json_body, required, required_secret};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U, H, T>(
    State(use_cases): State<AuthUseCases<U, H, T>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    let request = json_body(payload)?;
    let email = required(&request.email, "email is required")?;
    let password = required_secret(request.password, "password is required")?;

    let response = use_cases
        .login(warden_application::LoginRequest { email, password })
        .await
        .map_err(|e| ApiError::from_auth(e, "login failed"))?;

    Ok(Json(response))
}
