//! Article and like request bodies

use serde::Deserialize;

use super::validation::{Checker, ValidationErrors};

/// Maximum title length in characters
pub const MAX_TITLE_LEN: usize = 50;

/// Maximum article body length in characters
pub const MAX_BODY_LEN: usize = 8000;

/// POST /article/add body
#[derive(Debug, Default, Deserialize)]
pub struct ArticleRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub author_id: Option<String>,
}

/// A validated article ready for insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub body: String,
    pub author_id: String,
}

impl ArticleRequest {
    pub fn validate(self) -> Result<NewArticle, ValidationErrors> {
        let mut check = Checker::body();
        check
            .not_empty("title", self.title.as_deref())
            .max_len("title", self.title.as_deref(), MAX_TITLE_LEN)
            .not_empty("body", self.body.as_deref())
            .max_len("body", self.body.as_deref(), MAX_BODY_LEN)
            .not_empty("author_id", self.author_id.as_deref());
        check.finish()?;

        Ok(NewArticle {
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            author_id: self.author_id.unwrap_or_default(),
        })
    }
}

/// POST /article/like body
#[derive(Debug, Default, Deserialize)]
pub struct LikeRequest {
    pub article_id: Option<String>,
    pub user_id: Option<String>,
}

/// A validated like
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLike {
    pub article_id: String,
    pub user_id: String,
}

impl LikeRequest {
    pub fn validate(self) -> Result<NewLike, ValidationErrors> {
        let mut check = Checker::body();
        check
            .not_empty("user_id", self.user_id.as_deref())
            .not_empty("article_id", self.article_id.as_deref());
        check.finish()?;

        Ok(NewLike {
            article_id: self.article_id.unwrap_or_default(),
            user_id: self.user_id.unwrap_or_default(),
        })
    }
}
