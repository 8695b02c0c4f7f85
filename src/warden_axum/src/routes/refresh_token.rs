use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use warden_application::{AuthUseCases, TokenPair};
use warden_core::{PasswordHasher, TokenIssuer, UserStore};

use super::{json_body, required};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    pub refresh_token: String,
}

/// Exchanges a refresh token for a new pair. The response carries no email.
#[tracing::instrument(name = "Refresh token", skip_all)]
pub async fn refresh_token<U, H, T>(
    State(use_cases): State<AuthUseCases<U, H, T>>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<Json<TokenPair>, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    let request = json_body(payload)?;
    let refresh_token = required(&request.refresh_token, "refresh_token is required")?;

    let tokens = use_cases
        .refresh_token(warden_application::RefreshTokenRequest { refresh_token })
        .await
        .map_err(|e| ApiError::from_auth(e, "token refresh failed"))?;

    Ok(Json(tokens))
}
