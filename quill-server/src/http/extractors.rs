//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ApiError;

/// Request body from either a JSON or a urlencoded form submission.
///
/// Never rejects on content: a missing body, an unknown content type or
/// unparseable JSON yields `T::default()`, so the request's own validation
/// reports every missing field. Scalar JSON values are taken as text;
/// arrays, objects and nulls count as missing.
pub struct FormOrJson<T>(pub T);

impl<S, T> FromRequest<S> for FormOrJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let fields = if has_content_type(&req, "application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::Body {
                    status: rejection.status(),
                    reason: rejection.body_text(),
                })?;
            pairs
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect()
        } else if has_content_type(&req, "application/json") {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::Body {
                    status: rejection.status(),
                    reason: rejection.body_text(),
                })?;
            json_fields(&bytes)
        } else {
            Map::new()
        };

        let value = serde_json::from_value(Value::Object(fields)).unwrap_or_default();
        Ok(Self(value))
    }
}

fn has_content_type(req: &Request, expected: &str) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().to_ascii_lowercase().starts_with(expected))
}

fn json_fields(bytes: &[u8]) -> Map<String, Value> {
    let Ok(Value::Object(object)) = serde_json::from_slice::<Value>(bytes) else {
        return Map::new();
    };

    object
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null | Value::Array(_) | Value::Object(_) => return None,
            };
            Some((key, Value::String(text)))
        })
        .collect()
}
