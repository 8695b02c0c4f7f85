use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use warden_core::UserStore;

#[derive(Clone)]
pub struct HealthState<U> {
    user_store: U,
    service: Arc<str>,
    version: Arc<str>,
}

impl<U> HealthState<U> {
    pub fn new(user_store: U, service: &str, version: &str) -> Self {
        Self {
            user_store,
            service: Arc::from(service),
            version: Arc::from(version),
        }
    }

    fn response(&self, status: &str) -> HealthResponse {
        HealthResponse {
            status: status.to_owned(),
            service: self.service.to_string(),
            version: self.version.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Liveness: answers as long as the process serves requests.
pub async fn health<U>(State(state): State<HealthState<U>>) -> Json<HealthResponse> {
    Json(state.response("healthy"))
}

/// Readiness: the user store must answer a trivial query.
#[tracing::instrument(name = "Readiness check", skip_all)]
pub async fn ready<U>(State(state): State<HealthState<U>>) -> (StatusCode, Json<HealthResponse>)
where
    U: UserStore,
{
    match state.user_store.count().await {
        Ok(_) => (StatusCode::OK, Json(state.response("ready"))),
        Err(e) => {
            tracing::warn!(error = %e, "user store is not reachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(state.response("unavailable")),
            )
        }
    }
}
