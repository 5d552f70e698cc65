//! Shared helpers for router tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use quill_server::db::{DbError, Driver, QueryOutput, Row, Statement};
use quill_server::{build_router, AppConfig, Bridge};

type Responder = dyn Fn(&Statement) -> Result<QueryOutput, DbError> + Send + Sync;

/// Answers each statement through a closure and records what it ran
pub struct ScriptedDriver {
    respond: Box<Responder>,
    seen: Mutex<Vec<Statement>>,
}

impl ScriptedDriver {
    pub fn new<F>(respond: F) -> Arc<Self>
    where
        F: Fn(&Statement) -> Result<QueryOutput, DbError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            respond: Box::new(respond),
            seen: Mutex::new(Vec::new()),
        })
    }

    /// Every statement answers with the same output.
    pub fn always(output: QueryOutput) -> Arc<Self> {
        Self::new(move |_| Ok(output.clone()))
    }

    pub fn seen(&self) -> Vec<Statement> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Driver for ScriptedDriver {
    async fn run(&self, statement: &Statement) -> Result<QueryOutput, DbError> {
        self.seen.lock().unwrap().push(statement.clone());
        (self.respond)(statement)
    }
}

pub fn app_with(driver: Arc<ScriptedDriver>) -> Router {
    let config = AppConfig::default();
    build_router(Bridge::new(driver, &config), &config)
}

pub fn row(pairs: &[(&str, Value)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

pub fn inserted() -> QueryOutput {
    QueryOutput::Command {
        rows_affected: Some(1),
    }
}

/// Send a request and return the status with the body parsed as JSON
/// (non-JSON bodies come back as a JSON string).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    match body {
        Some(json) => send_raw(app, method, uri, Some("application/json"), json.to_string()).await,
        None => send_raw(app, method, uri, None, String::new()).await,
    }
}

/// Send a raw body with an optional content type.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let request = builder.body(Body::from(body)).unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

pub fn keys(value: &Value) -> Vec<String> {
    let mut keys: Vec<String> = value
        .as_object()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();
    keys.sort();
    keys
}
