//! Console logging for the quill binary
//!
//! `RUST_LOG` always wins. Without it the server and HTTP layers log at info,
//! or at debug (sqlx included) with `--debug`.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "quill=info,quill_server=info,tower_http=info";

/// Filter used with `--debug` when `RUST_LOG` is unset
const DEBUG_FILTER: &str = "quill=debug,quill_server=debug,tower_http=debug,sqlx=debug";

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
}

impl TracingConfig {
    fn fallback_filter(&self) -> &'static str {
        if self.debug {
            DEBUG_FILTER
        } else {
            DEFAULT_FILTER
        }
    }
}

pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.fallback_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
