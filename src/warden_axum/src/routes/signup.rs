use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use secrecy::Secret;
use serde::Deserialize;
use warden_application::{AuthResponse, AuthUseCases};
use warden_core::{PasswordHasher, TokenIssuer, UserStore};

use super::{json_body, required, required_secret};
use crate::error::ApiError;

/// Request body for signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Signup", skip_all)]
pub async fn signup<U, H, T>(
    State(use_cases): State<AuthUseCases<U, H, T>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    let request = json_body(payload)?;
    let email = required(&request.email, "email is required")?;
    let password = required_secret(request.password, "password is required")?;

    let response = use_cases
        .signup(warden_application::SignupRequest { email, password })
        .await
        .map_err(|e| ApiError::from_auth(e, "signup failed"))?;

    Ok((StatusCode::CREATED, Json(response)))
}
