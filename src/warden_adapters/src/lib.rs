//! Infrastructure adapters for the ports defined in `warden_core`.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  warden_core ports                           │
//! │  UserStore · PasswordHasher · TokenIssuer    │
//! └──────────────┬───────────────────────────────┘
//!                │ implemented by
//!                ▼
//! ┌──────────────────────────────────────────────┐
//! │  persistence: HashMapUserStore,              │
//! │               PostgresUserStore              │
//! │  security:    Argon2PasswordHasher,          │
//! │               JwtTokenIssuer                 │
//! │  config:      AuthServiceSetting             │
//! └──────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod persistence;
pub mod security;
