//! Data access bridge
//!
//! The single chokepoint between request handlers and the database driver.
//! Reads come back wrapped as `{"data": [...]}`; writes are interpreted from
//! the driver's affected-row count into a uniform message.

use std::sync::Arc;

use serde::Serialize;

use super::driver::{DbError, Driver, QueryOutput, Row, Statement};
use super::pagination::{normalize_rows, Pagination, PaginationParams};
use crate::config::AppConfig;

/// Message reported when a write changed at least one row
pub const INSERT_OK: &str = "Added successfully";

/// Message reported when a write changed nothing
pub const INSERT_FAILED: &str = "Error in insert query";

/// Rows returned by a read, serialized as `{"data": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Listing {
    pub data: Vec<Row>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Result of an insert, serialized as `{"message": ..., "id": ...}`
///
/// `id` is omitted entirely when the insert changed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertOutcome {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl InsertOutcome {
    pub fn added(id: impl Into<String>) -> Self {
        Self {
            message: INSERT_OK,
            id: Some(id.into()),
        }
    }

    pub fn failed() -> Self {
        Self {
            message: INSERT_FAILED,
            id: None,
        }
    }

    pub fn is_added(&self) -> bool {
        self.id.is_some()
    }
}

/// Shared handle to the driver, cheap to clone
#[derive(Clone)]
pub struct Bridge {
    driver: Arc<dyn Driver>,
    list_per_page: u32,
}

impl Bridge {
    pub fn new(driver: Arc<dyn Driver>, config: &AppConfig) -> Self {
        Self {
            driver,
            list_per_page: config.list_per_page,
        }
    }

    /// Pagination for a list request, using the configured page size when
    /// the request does not carry one.
    pub fn page(&self, params: PaginationParams) -> Pagination {
        Pagination::from_params(params, self.list_per_page)
    }

    /// Run a read and wrap its rows.
    ///
    /// With `Some(page)` the statement gets bound LIMIT/OFFSET appended.
    /// Driver failures are returned as-is; nothing is retried.
    pub async fn fetch_many(
        &self,
        statement: Statement,
        page: Option<Pagination>,
    ) -> Result<Listing, DbError> {
        let statement = match page {
            Some(page) => statement.paginate(page),
            None => statement,
        };
        tracing::debug!(
            sql = statement.sql(),
            params = statement.params().len(),
            "fetch_many"
        );

        let output = self.driver.run(&statement).await?;
        Ok(Listing {
            data: normalize_rows(output),
        })
    }

    /// Run a parameterized write and report whether it landed.
    ///
    /// `id` is echoed back only when the driver reports at least one
    /// affected row.
    pub async fn insert_one(
        &self,
        statement: Statement,
        id: impl Into<String>,
    ) -> Result<InsertOutcome, DbError> {
        tracing::debug!(
            sql = statement.sql(),
            params = statement.params().len(),
            "insert_one"
        );

        let output = self.driver.run(&statement).await?;
        let outcome = match output {
            QueryOutput::Command {
                rows_affected: Some(n),
            } if n > 0 => InsertOutcome::added(id),
            _ => InsertOutcome::failed(),
        };

        if !outcome.is_added() {
            tracing::warn!(sql = statement.sql(), "insert affected no rows");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::driver::Param;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Replays one canned output and records every statement it sees
    struct CannedDriver {
        output: Mutex<Option<Result<QueryOutput, DbError>>>,
        seen: Mutex<Vec<Statement>>,
    }

    impl CannedDriver {
        fn new(output: Result<QueryOutput, DbError>) -> Arc<Self> {
            Arc::new(Self {
                output: Mutex::new(Some(output)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Driver for CannedDriver {
        async fn run(&self, statement: &Statement) -> Result<QueryOutput, DbError> {
            self.seen.lock().unwrap().push(statement.clone());
            self.output
                .lock()
                .unwrap()
                .take()
                .expect("driver called more than once")
        }
    }

    fn bridge(driver: Arc<CannedDriver>) -> Bridge {
        Bridge::new(driver, &AppConfig::default())
    }

    fn author_row(id: &str) -> Row {
        let mut row = Row::new();
        row.insert("author_id".into(), json!(id));
        row.insert("name".into(), json!("ahmed"));
        row
    }

    #[tokio::test]
    async fn insert_with_affected_rows_reports_id() {
        let driver = CannedDriver::new(Ok(QueryOutput::Command {
            rows_affected: Some(1),
        }));
        let outcome = bridge(driver)
            .insert_one(Statement::write("INSERT INTO authors VALUES ($1)").bind("x"), "x")
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::added("x"));
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"message": "Added successfully", "id": "x"})
        );
    }

    #[tokio::test]
    async fn insert_without_affected_rows_omits_id() {
        for output in [
            QueryOutput::Command {
                rows_affected: Some(0),
            },
            QueryOutput::Command {
                rows_affected: None,
            },
            QueryOutput::Rows(vec![]),
        ] {
            let driver = CannedDriver::new(Ok(output));
            let outcome = bridge(driver)
                .insert_one(Statement::write("INSERT INTO likes VALUES ($1, $2)"), "a")
                .await
                .unwrap();

            assert_eq!(
                serde_json::to_value(&outcome).unwrap(),
                json!({"message": "Error in insert query"})
            );
        }
    }

    #[tokio::test]
    async fn fetch_many_wraps_rows_unchanged() {
        let rows = vec![author_row("b"), author_row("a")];
        let driver = CannedDriver::new(Ok(QueryOutput::Rows(rows.clone())));
        let listing = bridge(driver)
            .fetch_many(Statement::read("SELECT * FROM authors"), None)
            .await
            .unwrap();

        assert_eq!(listing.data, rows);
        assert_eq!(serde_json::to_value(&listing).unwrap()["data"][0]["author_id"], "b");
    }

    #[tokio::test]
    async fn fetch_many_normalizes_acknowledgement_to_empty() {
        let driver = CannedDriver::new(Ok(QueryOutput::Command {
            rows_affected: Some(0),
        }));
        let listing = bridge(driver)
            .fetch_many(Statement::read("CREATE TABLE t (x int)"), None)
            .await
            .unwrap();

        assert!(listing.is_empty());
        assert_eq!(serde_json::to_value(&listing).unwrap(), json!({"data": []}));
    }

    #[tokio::test]
    async fn fetch_many_applies_page() {
        let driver = CannedDriver::new(Ok(QueryOutput::Rows(vec![])));
        let bridge = bridge(driver.clone());
        let page = bridge.page(PaginationParams {
            page: Some(3),
            per_page: None,
        });
        bridge
            .fetch_many(Statement::read("SELECT * FROM authors"), Some(page))
            .await
            .unwrap();

        let seen = driver.seen.lock().unwrap();
        assert_eq!(seen[0].sql(), "SELECT * FROM authors LIMIT $1 OFFSET $2");
        assert_eq!(seen[0].params(), &[Param::Int(10), Param::Int(20)]);
    }

    #[tokio::test]
    async fn fetch_many_without_page_runs_statement_verbatim() {
        let driver = CannedDriver::new(Ok(QueryOutput::Rows(vec![])));
        let stmt = Statement::read("SELECT * FROM authors WHERE author_id = $1").bind("a");
        bridge(driver.clone())
            .fetch_many(stmt.clone(), None)
            .await
            .unwrap();

        assert_eq!(driver.seen.lock().unwrap()[0], stmt);
    }

    #[tokio::test]
    async fn driver_errors_propagate() {
        let driver = CannedDriver::new(Err(DbError::Sqlx(sqlx::Error::PoolTimedOut)));
        let err = bridge(driver)
            .fetch_many(Statement::read("SELECT 1"), None)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Sqlx(sqlx::Error::PoolTimedOut)));
    }
}
