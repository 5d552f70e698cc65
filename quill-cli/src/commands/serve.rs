//! HTTP server command
//!
//! Loads configuration from the environment, applies command-line overrides,
//! connects to PostgreSQL and runs the API until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use quill_server::db::{create_pool, MAX_PER_PAGE};
use quill_server::{run_server, AppConfig, Environment};

/// Arguments for the serve command
#[derive(Parser, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind to (default: HOST:PORT from the environment, else 0.0.0.0:3000)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Database URL (overrides DB_* / HEROKU_* settings)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Default page size for list endpoints (1-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PER_PAGE)))]
    pub list_per_page: Option<u32>,

    /// Only allow localhost origins instead of every origin
    #[arg(long)]
    pub no_cors_permissive: bool,

    /// Development mode: database errors are returned in detail
    #[arg(long)]
    pub dev: bool,
}

impl ServeArgs {
    /// Layer command-line overrides over the environment configuration.
    pub fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(url) = self.database_url {
            config.db.url = Some(url);
        }
        if let Some(per_page) = self.list_per_page {
            config.list_per_page = per_page;
        }
        if self.no_cors_permissive {
            config.cors_permissive = false;
        }
        if self.dev {
            config.environment = Environment::Development;
        }
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    let config = args.apply(config);
    tracing::debug!(?config, "resolved configuration");

    tracing::info!("Starting quill server on {}", config.bind_addr);

    // Create database pool
    let pool = create_pool(&config.db)
        .await
        .context("Failed to create database pool")?;

    // Run server (blocks until shutdown)
    run_server(pool, &config).await.context("Server error")?;

    Ok(())
}
