//! Per client IP rate limiting on top of `governor`.
//!
//! Each client gets its own direct limiter allowing `burst` requests at once
//! and replenishing at `requests_per_minute`. At most `max_clients` limiters
//! are tracked: when the map is full, idle clients are dropped first, then the
//! least recently seen.

use std::{
    net::{IpAddr, SocketAddr},
    num::NonZeroU32,
    sync::{Arc, Weak},
    time::Duration,
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use governor::{
    Quota,
    clock::{Clock, DefaultClock, Reference},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
};
use parking_lot::Mutex;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use warden_adapters::config::RateLimitSettings;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
    pub burst: u32,
    pub max_clients: usize,
    pub idle_timeout: Duration,
}

impl RateLimitConfig {
    fn quota(&self) -> Quota {
        let per_minute = NonZeroU32::new(self.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst).unwrap_or(NonZeroU32::MIN);
        Quota::per_minute(per_minute).allow_burst(burst)
    }
}

impl From<&RateLimitSettings> for RateLimitConfig {
    fn from(settings: &RateLimitSettings) -> Self {
        Self {
            requests_per_minute: settings.requests_per_minute,
            burst: settings.burst,
            max_clients: settings.max_clients,
            idle_timeout: Duration::from_secs(settings.idle_timeout_secs),
        }
    }
}

type DirectLimiter<C> =
    governor::RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<<C as Clock>::Instant>>;

struct Client<C: Clock> {
    limiter: DirectLimiter<C>,
    last_seen: C::Instant,
}

impl<C: Clock> Client<C> {
    fn new(quota: Quota, clock: &C, now: C::Instant) -> Self {
        Self {
            limiter: DirectLimiter::direct_with_clock(quota, clock),
            last_seen: now,
        }
    }

    fn check(&mut self, now: C::Instant) -> bool {
        self.last_seen = now;
        self.limiter.check().is_ok()
    }

    fn idle_for(&self, now: C::Instant) -> Duration {
        Duration::from(now.duration_since(self.last_seen))
    }
}

type Clients<C> = DashMap<IpAddr, Client<C>>;

pub struct RateLimiter<C: Clock = DefaultClock> {
    clients: Arc<Clients<C>>,
    // Serialises admission of new clients so the bound holds under contention.
    admission: Arc<Mutex<()>>,
    quota: Quota,
    config: RateLimitConfig,
    clock: C,
}

impl<C: Clock> Clone for RateLimiter<C> {
    fn clone(&self) -> Self {
        Self {
            clients: Arc::clone(&self.clients),
            admission: Arc::clone(&self.admission),
            quota: self.quota,
            config: self.config,
            clock: self.clock.clone(),
        }
    }
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, DefaultClock::default())
    }
}

impl<C> RateLimiter<C>
where
    C: Clock + Send + Sync + 'static,
    C::Instant: Send + Sync,
{
    pub fn with_clock(config: RateLimitConfig, clock: C) -> Self {
        Self {
            clients: Arc::new(DashMap::new()),
            admission: Arc::new(Mutex::new(())),
            quota: config.quota(),
            config,
            clock,
        }
    }

    /// Records a request from `ip`, returning whether it may proceed.
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = self.clock.now();
        if let Some(mut client) = self.clients.get_mut(&ip) {
            return client.check(now);
        }

        let _admission = self.admission.lock();
        if !self.clients.contains_key(&ip)
            && self.clients.len() >= self.config.max_clients.max(1)
        {
            self.make_room(now);
        }

        self.clients
            .entry(ip)
            .or_insert_with(|| Client::new(self.quota, &self.clock, now))
            .check(now)
    }

    /// Drops clients unseen for longer than the idle timeout.
    pub fn evict_idle(&self) -> usize {
        evict_idle(&self.clients, self.config.idle_timeout, self.clock.now())
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    /// Runs [`RateLimiter::evict_idle`] every `interval` until the limiter is
    /// dropped.
    pub fn spawn_eviction(&self, interval: Duration) -> JoinHandle<()> {
        let clients: Weak<Clients<C>> = Arc::downgrade(&self.clients);
        let idle_timeout = self.config.idle_timeout;
        let clock = self.clock.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(clients) = clients.upgrade() else {
                    break;
                };
                evict_idle(&clients, idle_timeout, clock.now());
            }
        })
    }

    fn make_room(&self, now: C::Instant) {
        if evict_idle(&self.clients, self.config.idle_timeout, now) > 0 {
            return;
        }

        let oldest = self
            .clients
            .iter()
            .max_by_key(|entry| entry.value().idle_for(now))
            .map(|entry| *entry.key());

        if let Some(ip) = oldest {
            self.clients.remove(&ip);
            tracing::debug!(%ip, "evicted least recently seen client from rate limiter");
        }
    }
}

fn evict_idle<C: Clock>(clients: &Clients<C>, idle_timeout: Duration, now: C::Instant) -> usize {
    let before = clients.len();
    clients.retain(|_, client| client.idle_for(now) < idle_timeout);
    let evicted = before.saturating_sub(clients.len());

    if evicted > 0 {
        tracing::debug!(evicted, "evicted idle clients from rate limiter");
    }
    evicted
}

/// Middleware rejecting clients that ran out of tokens with `429`.
///
/// The client address comes from `ConnectInfo`; requests without one pass
/// through untouched.
pub async fn rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if let Some(ip) = client {
        if !limiter.check(ip) {
            tracing::warn!(%ip, "rate limit exceeded");
            return ApiError::new(
                StatusCode::TOO_MANY_REQUESTS,
                "rate limit exceeded",
                "too many requests",
            )
            .into_response();
        }
    }

    next.run(request).await
}
