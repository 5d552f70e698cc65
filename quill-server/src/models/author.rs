//! Author request body

use serde::Deserialize;

use super::validation::{Checker, ValidationErrors};

/// Maximum length for name and job title
pub const MAX_AUTHOR_FIELD_LEN: usize = 50;

/// POST /user/add body
#[derive(Debug, Default, Deserialize)]
pub struct AuthorRequest {
    pub name: Option<String>,
    pub job_title: Option<String>,
}

/// A validated author ready for insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub job_title: String,
}

impl AuthorRequest {
    pub fn validate(self) -> Result<NewAuthor, ValidationErrors> {
        let mut check = Checker::body();
        check
            .not_empty("name", self.name.as_deref())
            .max_len("name", self.name.as_deref(), MAX_AUTHOR_FIELD_LEN)
            .not_empty("job_title", self.job_title.as_deref())
            .max_len("job_title", self.job_title.as_deref(), MAX_AUTHOR_FIELD_LEN);
        check.finish()?;

        Ok(NewAuthor {
            name: self.name.unwrap_or_default(),
            job_title: self.job_title.unwrap_or_default(),
        })
    }
}
