use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};
use thiserror::Error;
use warden_adapters::{config::PostgresSettings, persistence::MIGRATOR};

#[derive(Debug, Error)]
pub enum DatabaseSetupError {
    #[error("Failed to connect to PostgreSQL: {0}")]
    Connect(#[from] sqlx::Error),
    #[error("Failed to run migrations: {0}")]
    Migrate(#[from] MigrateError),
}

/// Connect to PostgreSQL and apply pending migrations
///
/// # Arguments
/// * `settings` - Connection URL and pool sizing
///
/// # Returns
/// A configured PgPool ready for use
pub async fn configure_postgresql(settings: &PostgresSettings) -> Result<PgPool, DatabaseSetupError> {
    let pg_pool = get_postgres_pool(settings).await?;

    MIGRATOR.run(&pg_pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pg_pool)
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(settings: &PostgresSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .connect(settings.url.expose_secret())
        .await
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
