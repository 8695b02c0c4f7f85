//! JSON error responses shared by every route.

use std::any::Any;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use warden_application::AuthError;
use warden_core::ErrorKind;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong.
    pub error: String,
    /// Which operation failed.
    pub message: String,
    /// HTTP status code, repeated for clients that only read the body.
    pub code: u16,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error: String,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    pub fn validation(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error, "validation failed")
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized", message)
    }

    /// Maps a workflow failure onto a status code. Domain errors keep their
    /// client-safe text; infrastructure faults are logged and hidden.
    pub fn from_auth(err: AuthError, message: &str) -> Self {
        if let AuthError::DeadlineExceeded(deadline) = err {
            tracing::warn!(?deadline, "{message}: deadline exceeded");
            return Self::new(StatusCode::GATEWAY_TIMEOUT, "request timed out", message);
        }

        match err.kind() {
            Some(kind) => Self::new(status_for(kind), err.to_string(), message),
            None => {
                tracing::error!(error = %err, "{message}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error",
                    message,
                )
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Forbidden => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            rejection.body_text(),
            "invalid request body",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error,
            message: self.message,
            code: self.status.as_u16(),
        };

        (self.status, Json(body)).into_response()
    }
}

/// Turns a panic caught at the edge into the usual JSON 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!(panic = detail, "request handler panicked");

    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error",
        "request failed",
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::to_bytes;
    use warden_core::{DomainError, UserStoreError};

    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorResponse) {
        response_body(err.into_response()).await
    }

    async fn response_body(response: Response) -> (StatusCode, ErrorResponse) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn every_kind_has_a_status() {
        assert_eq!(status_for(ErrorKind::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(ErrorKind::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::Conflict), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn domain_error_keeps_its_message() {
        let err = AuthError::from(DomainError::conflict("email already in use"));

        let (status, body) = body_of(ApiError::from_auth(err, "signup failed")).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body,
            ErrorResponse {
                error: "email already in use".to_owned(),
                message: "signup failed".to_owned(),
                code: 409,
            }
        );
    }

    #[tokio::test]
    async fn infrastructure_errors_are_opaque() {
        let err = AuthError::from(UserStoreError::UnexpectedError(
            "password authentication failed for user postgres".to_owned(),
        ));

        let (status, body) = body_of(ApiError::from_auth(err, "login failed")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "internal server error");
        assert_eq!(body.code, 500);
    }

    #[tokio::test]
    async fn deadline_is_a_gateway_timeout() {
        let err = AuthError::DeadlineExceeded(Duration::from_secs(10));

        let (status, body) = body_of(ApiError::from_auth(err, "login failed")).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body.code, 504);
    }

    #[tokio::test]
    async fn panics_become_json_500() {
        let response = panic_response(Box::new("index out of bounds"));

        let (status, body) = response_body(response).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            ErrorResponse {
                error: "internal server error".to_owned(),
                message: "request failed".to_owned(),
                code: 500,
            }
        );
    }
}
