pub mod env {
    /// Selects the optional `config/{environment}.json` overlay.
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    /// Prefix of overriding variables, e.g. `WARDEN__AUTH__JWT__SECRET`.
    pub const SETTINGS_ENV_PREFIX: &str = "WARDEN";
    pub const SETTINGS_ENV_SEPARATOR: &str = "__";
}

pub const CONFIG_DIR: &str = "config";
pub const BASE_CONFIG_FILE: &str = "base";
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Placeholder shipped in the defaults. Validation refuses to start with it.
pub const PLACEHOLDER_JWT_SECRET: &str = "change-me-in-production";
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

pub const VALID_ENVIRONMENTS: &[&str] =
    &["development", "dev", "staging", "production", "prod", "test"];
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
pub const VALID_LOG_FORMATS: &[&str] = &["json", "text"];

pub mod prod {
    pub const APP_HOST: &str = "0.0.0.0";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const JWT_SECRET: &str = "test-secret-that-is-at-least-32-characters-long";
}
