use color_eyre::eyre::Result;
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use warden_adapters::config::LoggerSettings;
use warden_auth_service::{
    Argon2PasswordHasher, AuthService, AuthServiceSetting, HashMapUserStore, JwtAuthConfig,
    JwtTokenIssuer, PostgresUserStore, configure_postgresql, shutdown_signal,
};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    // Load configuration
    let settings = AuthServiceSetting::load()?;
    init_tracing(&settings.logger)?;

    let password_hasher = Argon2PasswordHasher::from_settings(&settings.hashing)?;
    let token_issuer = JwtTokenIssuer::new(JwtAuthConfig::from(&settings.auth.jwt));
    let allowed_origins = Some(settings.auth.allowed_origins.clone());

    let listener = TcpListener::bind(settings.server.address()).await?;
    tracing::info!(
        environment = %settings.app.environment,
        version = %settings.app.version,
        "Starting {}",
        settings.app.name
    );

    match &settings.postgres {
        Some(postgres) => {
            let pg_pool = configure_postgresql(postgres).await?;
            let user_store = PostgresUserStore::new(pg_pool);

            AuthService::new(user_store, password_hasher, token_issuer, &settings)
                .run_standalone(listener, allowed_origins, shutdown_signal())
                .await?;
        }
        None => {
            tracing::warn!("No postgres section configured, users are kept in memory");
            let user_store = HashMapUserStore::new();

            AuthService::new(user_store, password_hasher, token_issuer, &settings)
                .run_standalone(listener, allowed_origins, shutdown_signal())
                .await?;
        }
    }

    tracing::info!("Auth service stopped");
    Ok(())
}

pub fn init_tracing(settings: &LoggerSettings) -> Result<()> {
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;

    let (json_layer, compact_layer) = if settings.format == "json" {
        (Some(fmt::layer().json()), None)
    } else {
        (None, Some(fmt::layer().compact()))
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(json_layer)
        .with(compact_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
