//! Article endpoints, including likes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use super::found;
use crate::db::repos::{ArticleRepo, AuthorRepo, LikeRepo};
use crate::db::{InsertOutcome, Listing, PaginationParams};
use crate::http::error::ApiError;
use crate::http::extractors::FormOrJson;
use crate::http::server::AppState;
use crate::models::{require_param, ArticleRequest, LikeRequest};

/// GET /article/all - articles with author and like count, most liked first
async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Listing>, ApiError> {
    let page = state.bridge.page(params);
    found(ArticleRepo::new(&state.bridge).list(page).await?)
}

/// POST /article/add
async fn add_article(
    State(state): State<Arc<AppState>>,
    FormOrJson(req): FormOrJson<ArticleRequest>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let article = req.validate()?;
    let outcome = ArticleRepo::new(&state.bridge).create(article).await?;
    Ok(Json(outcome))
}

/// GET /article/search/{searchquery} - full-text search with a `score` per row
async fn search_articles(
    State(state): State<Arc<AppState>>,
    Path(text): Path<String>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Listing>, ApiError> {
    require_param("searchquery", &text)?;
    let page = state.bridge.page(params);
    found(ArticleRepo::new(&state.bridge).search(&text, page).await?)
}

/// GET /article/getbyid/{id}
async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Listing>, ApiError> {
    require_param("id", &id)?;
    found(ArticleRepo::new(&state.bridge).get(&id).await?)
}

/// POST /article/like - both the article and the author must exist
async fn like_article(
    State(state): State<Arc<AppState>>,
    FormOrJson(req): FormOrJson<LikeRequest>,
) -> Result<Json<InsertOutcome>, ApiError> {
    let like = req.validate()?;

    let articles = ArticleRepo::new(&state.bridge);
    let authors = AuthorRepo::new(&state.bridge);
    let (article, author) = tokio::try_join!(
        articles.lookup(&like.article_id),
        authors.get(&like.user_id)
    )?;

    if article.is_empty() || author.is_empty() {
        tracing::debug!(
            article_id = %like.article_id,
            user_id = %like.user_id,
            "like rejected, missing reference"
        );
        return Err(ApiError::MissingReference);
    }

    let outcome = LikeRepo::new(&state.bridge).create(like).await?;
    Ok(Json(outcome))
}

/// Article routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/article/all", get(list_articles))
        .route("/article/add", post(add_article))
        .route("/article/search/{searchquery}", get(search_articles))
        .route("/article/getbyid/{id}", get(get_article))
        .route("/article/like", post(like_article))
}
