//! Comment request body

use serde::Deserialize;

use super::validation::{Checker, ValidationErrors};

/// Maximum comment length in characters
pub const MAX_COMMENT_LEN: usize = 200;

/// POST /comment/add body
#[derive(Debug, Default, Deserialize)]
pub struct CommentRequest {
    pub article_id: Option<String>,
    pub user_id: Option<String>,
    pub body: Option<String>,
}

/// A validated comment ready for insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub article_id: String,
    pub user_id: String,
    pub body: String,
}

impl CommentRequest {
    pub fn validate(self) -> Result<NewComment, ValidationErrors> {
        let mut check = Checker::body();
        check
            .not_empty("user_id", self.user_id.as_deref())
            .not_empty("article_id", self.article_id.as_deref())
            .not_empty("body", self.body.as_deref())
            .max_len("body", self.body.as_deref(), MAX_COMMENT_LEN);
        check.finish()?;

        Ok(NewComment {
            article_id: self.article_id.unwrap_or_default(),
            user_id: self.user_id.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
        })
    }
}
