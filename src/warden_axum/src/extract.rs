//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use thiserror::Error;

use crate::error::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Token carried in an `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BearerTokenError {
    #[error("missing authorization header")]
    Missing,
    #[error("invalid authorization header format")]
    InvalidFormat,
    #[error("missing token")]
    EmptyToken,
}

impl BearerToken {
    pub fn parse(header: Option<&str>) -> Result<Self, BearerTokenError> {
        let header = header
            .filter(|value| !value.is_empty())
            .ok_or(BearerTokenError::Missing)?;

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(BearerTokenError::InvalidFormat)?
            .trim();

        if token.is_empty() {
            return Err(BearerTokenError::EmptyToken);
        }

        Ok(Self(token.to_owned()))
    }
}

impl From<BearerTokenError> for ApiError {
    fn from(err: BearerTokenError) -> Self {
        ApiError::unauthorized(err.to_string())
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| BearerTokenError::InvalidFormat)?,
            ),
            None => None,
        };

        Ok(Self::parse(header)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_the_token() {
        assert_eq!(
            BearerToken::parse(Some("Bearer abc.def.ghi")),
            Ok(BearerToken("abc.def.ghi".to_owned()))
        );
    }

    #[test]
    fn missing_or_blank_header() {
        assert_eq!(BearerToken::parse(None), Err(BearerTokenError::Missing));
        assert_eq!(BearerToken::parse(Some("")), Err(BearerTokenError::Missing));
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert_eq!(
            BearerToken::parse(Some("Basic dXNlcjpwYXNz")),
            Err(BearerTokenError::InvalidFormat)
        );
        assert_eq!(
            BearerToken::parse(Some("bearer abc")),
            Err(BearerTokenError::InvalidFormat)
        );
    }

    #[test]
    fn prefix_without_token() {
        assert_eq!(
            BearerToken::parse(Some("Bearer ")),
            Err(BearerTokenError::EmptyToken)
        );
        assert_eq!(
            BearerToken::parse(Some("Bearer    ")),
            Err(BearerTokenError::EmptyToken)
        );
    }
}
