use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warden_core::{Email, IssuedClaims, TokenIssuer, TokenIssuerError, UserId};

use crate::config::JwtSettings;

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub issuer: String,
    pub access_token_ttl_in_seconds: i64,
    pub refresh_token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

impl From<&JwtSettings> for JwtAuthConfig {
    fn from(settings: &JwtSettings) -> Self {
        Self {
            jwt_secret: settings.secret.clone(),
            issuer: settings.issuer.clone(),
            access_token_ttl_in_seconds: settings.access_token_ttl_secs,
            refresh_token_ttl_in_seconds: settings.refresh_token_ttl_secs,
        }
    }
}

/// Registered claims plus `user_id`, and `email` on access tokens only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
}

/// HS256 tokens signed with a shared secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    config: JwtAuthConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: JwtAuthConfig) -> Self {
        Self { config }
    }

    fn create_token(
        &self,
        user_id: &UserId,
        email: Option<&Email>,
        ttl_in_seconds: i64,
    ) -> Result<String, TokenIssuerError> {
        let delta = chrono::Duration::try_seconds(ttl_in_seconds).ok_or(
            TokenIssuerError::UnexpectedError("Failed to create token duration".to_string()),
        )?;

        let now = Utc::now();
        let exp = now
            .checked_add_signed(delta)
            .ok_or(TokenIssuerError::UnexpectedError(
                "Duration out of range".to_string(),
            ))?
            .timestamp();

        let claims = Claims {
            user_id: user_id.to_string(),
            email: email.map(|e| e.as_str().to_owned()),
            iss: self.config.issuer.clone(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.as_bytes()),
        )
        .map_err(|e| TokenIssuerError::UnexpectedError(e.to_string()))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iat", "iss", "sub"]);
        validation.validate_nbf = true;
        validation
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenIssuer {
    async fn generate_access_token(
        &self,
        user_id: &UserId,
        email: &Email,
    ) -> Result<String, TokenIssuerError> {
        self.create_token(
            user_id,
            Some(email),
            self.config.access_token_ttl_in_seconds,
        )
    }

    async fn generate_refresh_token(&self, user_id: &UserId) -> Result<String, TokenIssuerError> {
        self.create_token(user_id, None, self.config.refresh_token_ttl_in_seconds)
    }

    #[tracing::instrument(name = "Validating token", skip_all)]
    async fn validate_token(&self, token: &str) -> Result<IssuedClaims, TokenIssuerError> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.as_bytes()),
            &self.validation(),
        )
        .map_err(|e| TokenIssuerError::InvalidToken(e.to_string()))?
        .claims;

        if claims.sub != claims.user_id {
            return Err(TokenIssuerError::InvalidToken(
                "subject does not match user_id".to_string(),
            ));
        }

        Ok(IssuedClaims {
            user_id: claims.user_id,
            email: claims.email,
        })
    }
}
