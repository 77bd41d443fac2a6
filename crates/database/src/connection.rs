use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::time::Duration;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is built from the typed settings rather than a process-wide
/// connection string, so callers decide where configuration comes from. An
/// empty password is treated as "no password" (trust/peer auth).
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let mut options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .database(&settings.name);

    if !settings.password.is_empty() {
        options = options.password(&settings.password);
    }

    tracing::info!(
        host = %settings.host,
        port = settings.port,
        database = %settings.name,
        "connecting to postgres"
    );

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// A utility function to run database migrations automatically.
///
/// This is useful for ensuring the database schema is up-to-date when the
/// application starts, which is especially important in production deployments.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    // Use a relative path from the crate root
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
