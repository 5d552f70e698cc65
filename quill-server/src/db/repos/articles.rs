//! Article repository
//!
//! Reads join the author and count likes in one statement. The likes join is
//! a LEFT JOIN so articles nobody liked yet still show up with `likes = 0`.

use uuid::Uuid;

use crate::db::{Bridge, DbError, InsertOutcome, Listing, Pagination, Statement};
use crate::models::NewArticle;

const ARTICLE_COLUMNS: &str = r#"
    a.article_id, a.title, a.body, a.author_id, auth.name, auth.job_title,
    COUNT(l.article_id) AS likes"#;

const ARTICLE_JOINS: &str = r#"
    FROM articles AS a
    JOIN authors AS auth ON auth.author_id = a.author_id
    LEFT JOIN likes AS l ON l.article_id = a.article_id"#;

const ARTICLE_GROUP: &str = "GROUP BY a.article_id, auth.author_id";

const DOCUMENT: &str = "to_tsvector('english', a.title || ' ' || a.body)";

/// Article repository
pub struct ArticleRepo<'a> {
    bridge: &'a Bridge,
}

impl<'a> ArticleRepo<'a> {
    pub fn new(bridge: &'a Bridge) -> Self {
        Self { bridge }
    }

    /// List articles with author details, most liked first.
    pub async fn list(&self, page: Pagination) -> Result<Listing, DbError> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} {ARTICLE_JOINS} {ARTICLE_GROUP} \
             ORDER BY likes DESC, a.article_id"
        );
        self.bridge.fetch_many(Statement::read(sql), Some(page)).await
    }

    /// Full-text search over title and body, best match first.
    ///
    /// Every row carries a `score` from `ts_rank`.
    pub async fn search(&self, text: &str, page: Pagination) -> Result<Listing, DbError> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS}, \
                 ts_rank({DOCUMENT}, plainto_tsquery('english', $1)) AS score \
             {ARTICLE_JOINS} \
             WHERE {DOCUMENT} @@ plainto_tsquery('english', $1) \
             {ARTICLE_GROUP} \
             ORDER BY score DESC, likes DESC, a.article_id"
        );
        let stmt = Statement::read(sql).bind(text);
        self.bridge.fetch_many(stmt, Some(page)).await
    }

    /// One article with author details and like count.
    pub async fn get(&self, id: &str) -> Result<Listing, DbError> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} {ARTICLE_JOINS} \
             WHERE a.article_id = $1 {ARTICLE_GROUP}"
        );
        self.bridge
            .fetch_many(Statement::read(sql).bind(id), None)
            .await
    }

    /// The bare article row, used for existence checks.
    pub async fn lookup(&self, id: &str) -> Result<Listing, DbError> {
        let stmt = Statement::read("SELECT * FROM articles WHERE article_id = $1").bind(id);
        self.bridge.fetch_many(stmt, None).await
    }

    pub async fn create(&self, article: NewArticle) -> Result<InsertOutcome, DbError> {
        let id = Uuid::new_v4().to_string();
        let stmt = Statement::write(
            "INSERT INTO articles (article_id, title, body, author_id) VALUES ($1, $2, $3, $4)",
        )
        .bind(id.as_str())
        .bind(article.title)
        .bind(article.body)
        .bind(article.author_id);

        self.bridge.insert_one(stmt, id).await
    }
}
