//! Author endpoints, mounted under `/user`

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use super::found;
use crate::db::repos::AuthorRepo;
use crate::db::{InsertOutcome, Listing, PaginationParams};
use crate::http::error::ApiError;
use crate::http::extractors::FormOrJson;
use crate::http::server::AppState;
use crate::models::{require_param, AuthorRequest};

/// GET /user/all
async fn list_authors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Listing>, ApiError> {
    let page = state.bridge.page(params);
    found(AuthorRepo::new(&state.bridge).list(page).await?)
}

/// POST /user/add
async fn add_author(
    State(state): State<Arc<AppState>>,
    FormOrJson(req): FormOrJson<AuthorRequest>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let author = req.validate()?;
    let outcome = AuthorRepo::new(&state.bridge).create(author).await?;
    Ok(Json(outcome))
}

/// GET /user/getbyid/{id}
async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, ApiError> {
    require_param("id", &id)?;
    found(AuthorRepo::new(&state.bridge).get(&id).await?)
}

/// Author routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/user/all", get(list_authors))
        .route("/user/add", post(add_author))
        .route("/user/getbyid/{id}", get(get_author))
}
