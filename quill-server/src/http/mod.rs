//! HTTP server layer
//!
//! Axum server with:
//! - CORS (permissive by default)
//! - Request tracing
//! - Graceful shutdown
//! - JSON error responses
//! - JSON or urlencoded request bodies

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use extractors::FormOrJson;
pub use server::{build_router, run_server, AppState, ServeError};
