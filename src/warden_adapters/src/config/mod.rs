pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    AllowedOrigins, AppSettings, AuthServiceSetting, AuthSettings, HashingSettings, JwtSettings,
    LoggerSettings, PostgresSettings, RateLimitSettings, ServerSettings, SettingsError,
};
