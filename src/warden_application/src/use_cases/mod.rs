pub mod login;
pub mod refresh_token;
pub mod signup;
pub mod validate_token;

use serde::Serialize;
use warden_core::{Email, TokenIssuer, TokenIssuerError, User, UserId};

pub use login::{LoginRequest, LoginUseCase};
pub use refresh_token::{RefreshTokenRequest, RefreshTokenUseCase};
pub use signup::{SignupRequest, SignupUseCase};
pub use validate_token::{TokenClaims, ValidateTokenRequest, ValidateTokenUseCase};

pub(crate) const INVALID_EMAIL_FORMAT: &str = "invalid email format";
pub(crate) const EMAIL_IN_USE: &str = "email already in use";
pub(crate) const INVALID_CREDENTIALS: &str = "invalid credentials";
pub(crate) const ACCOUNT_INACTIVE: &str = "account is inactive";
pub(crate) const INVALID_TOKEN: &str = "invalid token";
pub(crate) const INVALID_REFRESH_TOKEN: &str = "invalid refresh token";
pub(crate) const INVALID_USER_ID_IN_TOKEN: &str = "invalid user ID in token";
pub(crate) const USER_NOT_FOUND: &str = "user not found";

/// Result of a successful signup or login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponse {
    pub user_id: UserId,
    pub email: Email,
    pub access_token: String,
    pub refresh_token: String,
}

/// Freshly minted access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthResponse {
    fn new(user: &User, tokens: TokenPair) -> Self {
        Self {
            user_id: *user.id(),
            email: user.email().clone(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

async fn issue_token_pair<T>(token_issuer: &T, user: &User) -> Result<TokenPair, TokenIssuerError>
where
    T: TokenIssuer,
{
    let access_token = token_issuer
        .generate_access_token(user.id(), user.email())
        .await?;
    let refresh_token = token_issuer.generate_refresh_token(user.id()).await?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}
