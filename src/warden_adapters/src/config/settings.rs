use std::time::Duration;

use ::config::{
    Config as ConfigLoader, ConfigBuilder, ConfigError, Environment, File, FileFormat,
    builder::DefaultState,
};
use http::HeaderValue;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    BASE_CONFIG_FILE, CONFIG_DIR, DEFAULT_ENVIRONMENT, MIN_JWT_SECRET_LENGTH,
    PLACEHOLDER_JWT_SECRET, VALID_ENVIRONMENTS, VALID_LOG_FORMATS, VALID_LOG_LEVELS,
    env::{APP_ENVIRONMENT_ENV_VAR, SETTINGS_ENV_PREFIX, SETTINGS_ENV_SEPARATOR},
};

const DEFAULTS: &str = r#"{
    "app": { "name": "warden", "environment": "development", "version": "1.0.0" },
    "server": {
        "host": "0.0.0.0",
        "port": 8001,
        "request_timeout_secs": 10,
        "graceful_shutdown_timeout_secs": 30
    },
    "auth": {
        "jwt": {
            "secret": "change-me-in-production",
            "issuer": "warden",
            "access_token_ttl_secs": 900,
            "refresh_token_ttl_secs": 604800
        },
        "allowed_origins": []
    },
    "hashing": { "memory_cost_kib": 15000, "iterations": 2, "parallelism": 1 },
    "rate_limit": {
        "enabled": true,
        "requests_per_minute": 100,
        "burst": 20,
        "max_clients": 10000,
        "idle_timeout_secs": 600,
        "eviction_interval_secs": 300
    },
    "logger": { "level": "debug", "format": "text" }
}"#;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] ConfigError),
    #[error("Invalid settings: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthServiceSetting {
    pub app: AppSettings,
    pub server: ServerSettings,
    /// Absent means the service runs on the in-memory user store.
    #[serde(default)]
    pub postgres: Option<PostgresSettings>,
    pub auth: AuthSettings,
    pub hashing: HashingSettings,
    pub rate_limit: RateLimitSettings,
    pub logger: LoggerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub graceful_shutdown_timeout_secs: u64,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn graceful_shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.graceful_shutdown_timeout_secs)
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub issuer: String,
    pub access_token_ttl_secs: i64,
    pub refresh_token_ttl_secs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HashingSettings {
    pub memory_cost_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    pub enabled: bool,
    pub requests_per_minute: u32,
    pub burst: u32,
    pub max_clients: usize,
    pub idle_timeout_secs: u64,
    pub eviction_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggerSettings {
    pub level: String,
    pub format: String,
}

/// CORS origins allowed to call the service. `*` admits every origin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0
            .iter()
            .any(|allowed| allowed == "*" || allowed.as_bytes() == origin.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for AllowedOrigins {
    fn from(origins: Vec<String>) -> Self {
        Self(
            origins
                .into_iter()
                .map(|o| o.trim().to_owned())
                .filter(|o| !o.is_empty())
                .collect(),
        )
    }
}

impl AuthServiceSetting {
    /// Load settings from defaults, optional config files and the environment
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. built-in defaults
    /// 2. `config/base.json` (optional)
    /// 3. `config/{APP_ENVIRONMENT}.json` (optional)
    /// 4. `WARDEN__SECTION__KEY` environment variables, `.env` included
    ///
    /// # Errors
    /// Returns `SettingsError::Invalid` listing every rule the result breaks.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());

        let builder = Self::defaults()
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{BASE_CONFIG_FILE}")).required(false))
            .add_source(File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false))
            .add_source(
                Environment::with_prefix(SETTINGS_ENV_PREFIX)
                    .separator(SETTINGS_ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("auth.allowed_origins")
                    .try_parsing(true),
            );

        Self::finish(builder)
    }

    /// Defaults overlaid with a JSON document, validated like [`Self::load`].
    pub fn from_json(overrides: &str) -> Result<Self, SettingsError> {
        let builder = Self::defaults().add_source(File::from_str(overrides, FileFormat::Json));
        Self::finish(builder)
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        ConfigLoader::builder().add_source(File::from_str(DEFAULTS, FileFormat::Json))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, SettingsError> {
        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks every rule and reports all violations at once.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut problems = Vec::new();

        if self.app.name.trim().is_empty() {
            problems.push("app.name is required".to_owned());
        }
        if !VALID_ENVIRONMENTS.contains(&self.app.environment.as_str()) {
            problems.push(format!(
                "app.environment must be one of {VALID_ENVIRONMENTS:?}, got {:?}",
                self.app.environment
            ));
        }

        if self.server.host.trim().is_empty() {
            problems.push("server.host is required".to_owned());
        }
        if self.server.request_timeout_secs == 0 {
            problems.push("server.request_timeout_secs must be positive".to_owned());
        }
        if self.server.graceful_shutdown_timeout_secs == 0 {
            problems.push("server.graceful_shutdown_timeout_secs must be positive".to_owned());
        }

        if let Some(postgres) = &self.postgres {
            if postgres.url.expose_secret().trim().is_empty() {
                problems.push("postgres.url is required when postgres is configured".to_owned());
            }
            if postgres.max_connections == 0 {
                problems.push("postgres.max_connections must be positive".to_owned());
            }
        }

        self.validate_jwt(&mut problems);

        if let Err(e) = argon2::Params::new(
            self.hashing.memory_cost_kib,
            self.hashing.iterations,
            self.hashing.parallelism,
            None,
        ) {
            problems.push(format!("hashing parameters are invalid: {e}"));
        }

        let limits = &self.rate_limit;
        if limits.enabled
            && (limits.requests_per_minute == 0
                || limits.burst == 0
                || limits.max_clients == 0
                || limits.idle_timeout_secs == 0
                || limits.eviction_interval_secs == 0)
        {
            problems.push("rate_limit values must all be positive when enabled".to_owned());
        }

        if !VALID_LOG_LEVELS.contains(&self.logger.level.to_lowercase().as_str()) {
            problems.push(format!(
                "logger.level must be one of {VALID_LOG_LEVELS:?}, got {:?}",
                self.logger.level
            ));
        }
        if !VALID_LOG_FORMATS.contains(&self.logger.format.as_str()) {
            problems.push(format!(
                "logger.format must be one of {VALID_LOG_FORMATS:?}, got {:?}",
                self.logger.format
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Invalid(problems))
        }
    }

    fn validate_jwt(&self, problems: &mut Vec<String>) {
        let jwt = &self.auth.jwt;
        let secret = jwt.secret.expose_secret();

        if secret.is_empty() {
            problems.push("auth.jwt.secret is required".to_owned());
        } else if secret == PLACEHOLDER_JWT_SECRET {
            problems.push("auth.jwt.secret must be changed from the default value".to_owned());
        } else if secret.chars().count() < MIN_JWT_SECRET_LENGTH {
            problems.push(format!(
                "auth.jwt.secret must be at least {MIN_JWT_SECRET_LENGTH} characters"
            ));
        }

        if jwt.issuer.trim().is_empty() {
            problems.push("auth.jwt.issuer is required".to_owned());
        }
        if jwt.access_token_ttl_secs <= 0 {
            problems.push("auth.jwt.access_token_ttl_secs must be positive".to_owned());
        }
        if jwt.refresh_token_ttl_secs <= 0 {
            problems.push("auth.jwt.refresh_token_ttl_secs must be positive".to_owned());
        }
        if jwt.refresh_token_ttl_secs <= jwt.access_token_ttl_secs {
            problems.push(
                "auth.jwt.refresh_token_ttl_secs must be greater than access_token_ttl_secs"
                    .to_owned(),
            );
        }
    }
}
