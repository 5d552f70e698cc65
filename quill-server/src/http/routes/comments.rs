//! Comment endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use super::found;
use crate::db::repos::CommentRepo;
use crate::db::{InsertOutcome, Listing, PaginationParams};
use crate::http::error::ApiError;
use crate::http::extractors::FormOrJson;
use crate::http::server::AppState;
use crate::models::{require_param, CommentRequest};

/// POST /comment/add - no existence check on article or user
async fn add_comment(
    State(state): State<Arc<AppState>>,
    FormOrJson(req): FormOrJson<CommentRequest>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let comment = req.validate()?;
    let outcome = CommentRepo::new(&state.bridge).create(comment).await?;
    Ok(Json(outcome))
}

/// GET /comment/all/{id} - comments on one article
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Listing>, ApiError> {
    require_param("id", &article_id)?;
    let page = state.bridge.page(params);
    found(
        CommentRepo::new(&state.bridge)
            .list_for_article(&article_id, page)
            .await?,
    )
}

/// Comment routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/comment/add", post(add_comment))
        .route("/comment/all/{id}", get(list_comments))
}
