//! Comment repository
//!
//! Comments are inserted without checking that the article or user exist.

use uuid::Uuid;

use crate::db::{Bridge, DbError, InsertOutcome, Listing, Pagination, Statement};
use crate::models::NewComment;

/// Comment repository
pub struct CommentRepo<'a> {
    bridge: &'a Bridge,
}

impl<'a> CommentRepo<'a> {
    pub fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    /// Comments on one article.
    pub async fn list_for_article(
        &self,
        article_id: &str,
        page: Pagination,
    ) -> Result<Listing, DbError> {
        let stmt = Statement::read(
            "SELECT comment_id, article_id, user_id, body FROM comments \
             WHERE article_id = $1 ORDER BY comment_id",
        )
        .bind(article_id);
        self.bridge.fetch_many(stmt, Some(page)).await
    }

    pub async fn create(&self, comment: NewComment) -> Result<InsertOutcome, DbError> {
        let id = Uuid::new_v4().to_string();
        let stmt = Statement::write(
            "INSERT INTO comments (comment_id, article_id, user_id, body) VALUES ($1, $2, $3, $4)",
        )
        .bind(id.as_str())
        .bind(comment.article_id)
        .bind(comment.user_id)
        .bind(comment.body);

        self.bridge.insert_one(stmt, id).await
    }
}
