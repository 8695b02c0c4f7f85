use serde::Serialize;
use warden_core::{
    DomainError, Email, IssuedClaims, TokenIssuer, User, UserId, UserStore, UserStoreError,
};

use super::{ACCOUNT_INACTIVE, INVALID_TOKEN, INVALID_USER_ID_IN_TOKEN, USER_NOT_FOUND};
use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct ValidateTokenRequest {
    pub token: String,
}

/// Identity behind a valid access token, read from the user store rather
/// than from the token itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenClaims {
    pub user_id: UserId,
    pub email: Email,
}

/// Validate token use case - resolves a bearer token to a live account
pub struct ValidateTokenUseCase<U, T>
where
    U: UserStore,
    T: TokenIssuer,
{
    user_store: U,
    token_issuer: T,
}

impl<U, T> ValidateTokenUseCase<U, T>
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

    #[tracing::instrument(name = "ValidateTokenUseCase::execute", skip(self, request))]
    pub async fn execute(&self, request: ValidateTokenRequest) -> Result<TokenClaims, AuthError> {
        let claims = self
            .token_issuer
            .validate_token(&request.token)
            .await
            .map_err(|e| DomainError::unauthorized(INVALID_TOKEN).with_source(e))?;

        let user = load_active_user(&self.user_store, &claims).await?;

        Ok(TokenClaims {
            user_id: *user.id(),
            email: user.email().clone(),
        })
    }
}

/// Resolves the subject of verified claims to an account that may still log in.
pub(crate) async fn load_active_user<U>(
    user_store: &U,
    claims: &IssuedClaims,
) -> Result<User, AuthError>
where
    U: UserStore,
{
    let user_id = UserId::parse(&claims.user_id)
        .map_err(|e| DomainError::unauthorized(INVALID_USER_ID_IN_TOKEN).with_source(e))?;

    let user = match user_store.find_by_id(&user_id).await {
        Ok(user) => user,
        Err(UserStoreError::UserNotFound) => {
            return Err(DomainError::unauthorized(USER_NOT_FOUND).into());
        }
        Err(e) => return Err(e.into()),
    };

    if !user.can_login() {
        return Err(DomainError::forbidden(ACCOUNT_INACTIVE).into());
    }

    Ok(user)
}
