//! quill-server: REST backend for articles, authors, likes and comments
//!
//! Request handlers build SQL statements through the repositories in
//! [`db::repos`], and every statement goes through the [`db::Bridge`],
//! the single chokepoint between HTTP and the database driver.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{AppConfig, ConfigError, DbConfig, Environment};
pub use db::{Bridge, DbError, Driver, PgDriver};
pub use http::{build_router, run_server, AppState, ServeError};
