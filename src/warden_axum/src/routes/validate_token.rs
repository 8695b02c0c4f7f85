use axum::{Json, extract::State};
use serde::Serialize;
use warden_application::{AuthUseCases, ValidateTokenRequest};
use warden_core::{Email, PasswordHasher, TokenIssuer, UserId, UserStore};

use crate::{error::ApiError, extract::BearerToken};

#[derive(Debug, Serialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    pub user_id: UserId,
    pub email: Email,
}

#[tracing::instrument(name = "Validate token", skip_all)]
pub async fn validate_token<U, H, T>(
    State(use_cases): State<AuthUseCases<U, H, T>>,
    BearerToken(token): BearerToken,
) -> Result<Json<ValidateTokenResponse>, ApiError>
where
    U: UserStore,
    H: PasswordHasher,
    T: TokenIssuer,
{
    let claims = use_cases
        .validate_token(ValidateTokenRequest { token })
        .await
        .map_err(|e| ApiError::from_auth(e, "token validation failed"))?;

    Ok(Json(ValidateTokenResponse {
        valid: true,
        user_id: claims.user_id,
        email: claims.email,
    }))
}
