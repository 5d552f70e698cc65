//! Like repository
//!
//! Likes have no identifier of their own; a successful insert reports the
//! liked article's id.

use crate::db::{Bridge, DbError, InsertOutcome, Statement};
use crate::models::NewLike;

/// Like repository
pub struct LikeRepo<'a> {
    bridge: &'a Bridge,
}

impl<'a> LikeRepo<'a> {
    pub fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub async fn create(&self, like: NewLike) -> Result<InsertOutcome, DbError> {
        let stmt = Statement::write("INSERT INTO likes (article_id, user_id) VALUES ($1, $2)")
            .bind(like.article_id.as_str())
            .bind(like.user_id);

        self.bridge.insert_one(stmt, like.article_id).await
    }
}
