//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::{ConfigError, DbConfig};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Pool creation error
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to connect: {0}")]
    Connect(#[from] sqlx::Error),
}

/// Create a PostgreSQL connection pool from the database configuration.
///
/// # Errors
///
/// Returns an error if the configured URL is malformed or the connection fails.
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::from_env()?;
/// let pool = create_pool(&config.db).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, PoolError> {
    let options = config.connect_options()?;
    let pool = PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Create a PostgreSQL connection pool from a connection string.
pub async fn create_pool_from_url(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}
