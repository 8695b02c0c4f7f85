use std::{
    future::{Future, IntoFuture},
    net::SocketAddr,
    time::Duration,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
    middleware::from_fn_with_state,
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use warden_adapters::config::{AllowedOrigins, AuthServiceSetting};
use warden_application::AuthUseCases;
use warden_axum::{
    HealthState, RateLimitConfig, RateLimiter, auth_router, health_router, panic_response,
    rate_limit,
};
use warden_core::{PasswordHasher, TokenIssuer, UserStore};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

const API_PREFIX: &str = "/api/v1";

/// Authentication service exposing every auth route plus health probes
pub struct AuthService {
    router: Router,
    rate_limiter: Option<(RateLimiter, Duration)>,
    shutdown_grace: Duration,
}

impl AuthService {
    /// Create a new AuthService from its ports and settings
    ///
    /// # Arguments
    /// * `user_store` - Store for user data (must be Clone)
    /// * `password_hasher` - One-way password hashing
    /// * `token_issuer` - Mints and verifies access and refresh tokens
    /// * `settings` - Timeouts, rate limits and service identity
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal Arc, so the auth routes and the
    /// readiness probe share the same backing state.
    pub fn new<U, H, T>(
        user_store: U,
        password_hasher: H,
        token_issuer: T,
        settings: &AuthServiceSetting,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        T: TokenIssuer + Clone + 'static,
    {
        let use_cases = AuthUseCases::new(user_store.clone(), password_hasher, token_issuer)
            .with_deadline(settings.server.request_timeout());
        spawn_warm_up(use_cases.clone());
        let health = HealthState::new(user_store, &settings.app.name, &settings.app.version);

        let mut router = Router::new()
            .nest(API_PREFIX, auth_router(use_cases))
            .merge(health_router(health));

        let rate_limiter = settings.rate_limit.enabled.then(|| {
            let limiter = RateLimiter::new(RateLimitConfig::from(&settings.rate_limit));
            let interval = Duration::from_secs(settings.rate_limit.eviction_interval_secs);
            (limiter, interval)
        });

        if let Some((limiter, _)) = &rate_limiter {
            router = router.layer(from_fn_with_state(limiter.clone(), rate_limit));
        }

        Self {
            router,
            rate_limiter,
            shutdown_grace: settings.server.graceful_shutdown_timeout(),
        }
    }

    /// Per client limiter, when rate limiting is enabled. Embedders running
    /// the router themselves should start its eviction task.
    pub fn rate_limiter(&self) -> Option<&RateLimiter> {
        self.rate_limiter.as_ref().map(|(limiter, _)| limiter)
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AuthService into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|o| !o.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer()
            .router
            .layer(CatchPanicLayer::custom(panic_response))
    }

    /// Run the auth service as a standalone server
    ///
    /// Stops accepting connections once `shutdown` resolves and gives
    /// in-flight requests the configured grace period to finish.
    ///
    /// # Arguments
    /// * `listener` - TCP listener to bind the server to
    /// * `allowed_origins` - Optional list of allowed CORS origins
    /// * `shutdown` - Resolves when the server should stop
    pub async fn run_standalone<F>(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
        shutdown: F,
    ) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let grace = self.shutdown_grace;
        let eviction = self
            .rate_limiter
            .as_ref()
            .map(|(limiter, interval)| limiter.spawn_eviction(*interval));
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Auth service listening on {}", listener.local_addr()?);

        let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
        let signal = async move {
            shutdown.await;
            tracing::info!("Shutdown requested, draining in-flight requests");
            let _ = signalled_tx.send(());
        };

        let server = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(signal)
        .into_future();
        tokio::pin!(server);

        let result = tokio::select! {
            biased;
            result = &mut server => result,
            _ = async {
                if signalled_rx.await.is_ok() {
                    tokio::time::sleep(grace).await;
                } else {
                    std::future::pending::<()>().await;
                }
            } => {
                tracing::warn!(?grace, "Graceful shutdown timed out, dropping open connections");
                Ok(())
            }
        };

        if let Some(task) = eviction {
            task.abort();
        }
        result
    }
}

/// Hashes login's dummy password in the background when a runtime is
/// available, so unknown emails never pay for it on the request path.
fn spawn_warm_up<U, H, T>(use_cases: AuthUseCases<U, H, T>)
where
    U: UserStore + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        tracing::debug!("no runtime at startup, dummy hash is computed on first use");
        return;
    };

    runtime.spawn(async move {
        if let Err(e) = use_cases.warm_up().await {
            tracing::warn!(error = %e, "failed to precompute dummy password hash");
        }
    });
}
