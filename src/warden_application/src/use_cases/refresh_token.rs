use warden_core::{DomainError, TokenIssuer, UserStore};

use super::{INVALID_REFRESH_TOKEN, TokenPair, issue_token_pair, validate_token::load_active_user};
use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Refresh token use case - exchanges a refresh token for a new pair
pub struct RefreshTokenUseCase<U, T>
where
    U: UserStore,
    T: TokenIssuer,
{
    user_store: U,
    token_issuer: T,
}

impl<U, T> RefreshTokenUseCase<U, T>
where
    U: UserStore,
    T: TokenIssuer,
{
    pub fn new(user_store: U, token_issuer: T) -> Self {
        Self {
            user_store,
            token_issuer,
        }
    }

    /// Execute the refresh token use case
    ///
    /// Both tokens are reissued, so callers should discard the refresh token
    /// they presented.
    #[tracing::instrument(name = "RefreshTokenUseCase::execute", skip(self, request))]
    pub async fn execute(&self, request: RefreshTokenRequest) -> Result<TokenPair, AuthError> {
        let claims = self
            .token_issuer
            .validate_token(&request.refresh_token)
            .await
            .map_err(|e| DomainError::unauthorized(INVALID_REFRESH_TOKEN).with_source(e))?;

        let user = load_active_user(&self.user_store, &claims).await?;

        let tokens = issue_token_pair(&self.token_issuer, &user).await?;

        tracing::debug!(user_id = %user.id(), "token pair refreshed");

        Ok(tokens)
    }
}
