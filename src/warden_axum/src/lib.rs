//! Axum transport for the Warden authentication workflows.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  warden_application: AuthUseCases        │
//! └──────────────┬───────────────────────────┘
//!                │
//!                ▼
//! ┌──────────────────────────────────────────┐
//! │  warden_axum: HTTP edge                  │
//! │  - route handlers and routers            │
//! │  - JSON error responses                  │
//! │  - Bearer token extractor                │
//! │  - per client rate limiting              │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use warden_axum::routes::{HealthState, auth_router, health_router};
//!
//! let app = Router::new()
//!     .nest("/api/v1", auth_router(use_cases))
//!     .merge(health_router(HealthState::new(user_store, "warden", "1.0.0")));
//! ```

pub mod error;
pub mod extract;
pub mod rate_limit;
pub mod routes;

pub use error::{ApiError, ErrorResponse, panic_response};
pub use extract::{BearerToken, BearerTokenError};
pub use rate_limit::{RateLimitConfig, RateLimiter, rate_limit};
pub use routes::{HealthState, auth_router, health_router};
