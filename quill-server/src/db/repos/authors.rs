//! Author repository

use uuid::Uuid;

use crate::db::{Bridge, DbError, InsertOutcome, Listing, Pagination, Statement};
use crate::models::NewAuthor;

/// Author repository
pub struct AuthorRepo<'a> {
    bridge: &'a Bridge,
}

impl<'a> AuthorRepo<'a> {
    pub fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    pub async fn list(&self, page: Pagination) -> Result<Listing, DbError> {
        let stmt = Statement::read(
            "SELECT author_id, name, job_title FROM authors ORDER BY name, author_id",
        );
        self.bridge.fetch_many(stmt, Some(page)).await
    }

    pub async fn get(&self, id: &str) -> Result<Listing, DbError> {
        let stmt = Statement::read(
            "SELECT author_id, name, job_title FROM authors WHERE author_id = $1",
        )
        .bind(id);
        self.bridge.fetch_many(stmt, None).await
    }

    pub async fn create(&self, author: NewAuthor) -> Result<InsertOutcome, DbError> {
        let id = Uuid::new_v4().to_string();
        let stmt =
            Statement::write("INSERT INTO authors (author_id, name, job_title) VALUES ($1, $2, $3)")
                .bind(id.as_str())
                .bind(author.name)
                .bind(author.job_title);

        self.bridge.insert_one(stmt, id).await
    }
}
