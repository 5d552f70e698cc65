//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS by default, localhost-only on request
//! - Tracing middleware
//! - Driver error detail on 500s in development mode only
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ErrorDetail;
use super::routes;
use crate::config::AppConfig;
use crate::db::{Bridge, PgDriver};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub bridge: Bridge,
}

/// Build the application router with all routes.
pub fn build_router(bridge: Bridge, config: &AppConfig) -> Router {
    let cors = if config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let mut app = Router::new()
        .merge(routes::health::router())
        .merge(routes::articles::router())
        .merge(routes::authors::router())
        .merge(routes::comments::router());

    if config.environment.is_development() {
        app = app.layer(middleware::map_response(expose_error_detail));
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState { bridge }))
}

/// Replace the generic 500 body with the driver error text.
async fn expose_error_detail(mut response: Response) -> Response {
    match response.extensions_mut().remove::<ErrorDetail>() {
        Some(ErrorDetail(detail)) => (
            response.status(),
            Json(json!({
                "error": "internal_error",
                "message": detail
            })),
        )
            .into_response(),
        None => response,
    }
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::from_env()?;
/// let pool = create_pool(&config.db).await?;
/// run_server(pool, &config).await?;
/// ```
pub async fn run_server(pool: PgPool, config: &AppConfig) -> Result<(), ServeError> {
    let bridge = Bridge::new(Arc::new(PgDriver::new(pool)), config);

    if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
    }
    let app = build_router(bridge, config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        environment = ?config.environment,
        list_per_page = config.list_per_page,
        "Server listening on {}",
        config.bind_addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbError;
    use crate::http::ApiError;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;

    async fn failing() -> Result<(), ApiError> {
        Err(DbError::Sqlx(sqlx::Error::PoolTimedOut).into())
    }

    fn app(development: bool) -> Router {
        let mut app = Router::new().route("/boom", get(failing));
        if development {
            app = app.layer(middleware::map_response(expose_error_detail));
        }
        app
    }

    async fn body(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn production_hides_detail() {
        let response = app(false)
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body(response).await, "Server Error");
    }

    #[tokio::test]
    async fn development_shows_detail() {
        let response = app(true)
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = body(response).await;
        assert!(text.contains("internal_error"));
        assert!(text.contains("pool timed out"));
    }
}
