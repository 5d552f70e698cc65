//! Driver seam
//!
//! [`Driver`] runs one [`Statement`] and reports either a row set or a
//! command acknowledgement. [`PgDriver`] is the PostgreSQL implementation;
//! tests substitute their own.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row as _, TypeInfo};

use super::pagination::Pagination;

/// A result row: column name -> value
pub type Row = Map<String, Value>;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("cannot decode column '{column}' of type {type_name}")]
    Decode {
        column: String,
        type_name: String,
        #[source]
        source: sqlx::Error,
    },
}

/// A bound statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Text(String),
    Int(i64),
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<i64> for Param {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// Whether a statement yields rows or only an acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Write,
}

/// SQL text plus positional parameters (`$1`, `$2`, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<Param>,
    kind: StatementKind,
}

impl Statement {
    /// A statement that returns rows.
    pub fn read(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            kind: StatementKind::Read,
        }
    }

    /// A statement that changes rows and returns an affected-row count.
    pub fn write(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            kind: StatementKind::Write,
        }
    }

    /// Bind the next positional parameter.
    pub fn bind(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }

    /// Append `LIMIT $n OFFSET $n+1` bound to the given page.
    pub fn paginate(mut self, page: Pagination) -> Self {
        let limit_idx = self.params.len() + 1;
        self.sql = format!(
            "{} LIMIT ${} OFFSET ${}",
            self.sql.trim_end().trim_end_matches(';'),
            limit_idx,
            limit_idx + 1
        );
        // Postgres compares LIMIT/OFFSET as BIGINT
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        self.bind(i64::from(page.limit())).bind(offset)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn kind(&self) -> StatementKind {
        self.kind
    }
}

/// What the driver hands back for one statement
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    /// Row set from a read
    Rows(Vec<Row>),
    /// Acknowledgement from a write; `None` when the driver reports no count
    Command { rows_affected: Option<u64> },
}

/// Executes statements against a database
#[async_trait]
pub trait Driver: Send + Sync {
    async fn run(&self, statement: &Statement) -> Result<QueryOutput, DbError>;
}

/// PostgreSQL driver over a sqlx pool
#[derive(Debug, Clone)]
pub struct PgDriver {
    pool: PgPool,
}

impl PgDriver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Driver for PgDriver {
    async fn run(&self, statement: &Statement) -> Result<QueryOutput, DbError> {
        let query = bind_params(sqlx::query(statement.sql()), statement.params());

        match statement.kind() {
            StatementKind::Read => {
                let rows = query.fetch_all(&self.pool).await?;
                let rows = rows.iter().map(row_to_json).collect::<Result<Vec<_>, _>>()?;
                Ok(QueryOutput::Rows(rows))
            }
            StatementKind::Write => {
                let done = query.execute(&self.pool).await?;
                Ok(QueryOutput::Command {
                    rows_affected: Some(done.rows_affected()),
                })
            }
        }
    }
}

fn bind_params<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    params: &'q [Param],
) -> Query<'q, Postgres, PgArguments> {
    for param in params {
        query = match param {
            Param::Text(s) => query.bind(s.as_str()),
            Param::Int(n) => query.bind(*n),
        };
    }
    query
}

/// Decode a Postgres row into a JSON object keyed by column name.
fn row_to_json(row: &PgRow) -> Result<Row, DbError> {
    let mut out = Row::new();
    for column in row.columns() {
        let idx = column.ordinal();
        let type_name = column.type_info().name();

        let decoded: Result<Option<Value>, sqlx::Error> = match type_name {
            "BOOL" => row.try_get::<Option<bool>, _>(idx).map(|v| v.map(Value::from)),
            "INT2" => row.try_get::<Option<i16>, _>(idx).map(|v| v.map(Value::from)),
            "INT4" => row.try_get::<Option<i32>, _>(idx).map(|v| v.map(Value::from)),
            "INT8" => row.try_get::<Option<i64>, _>(idx).map(|v| v.map(Value::from)),
            "FLOAT4" => row.try_get::<Option<f32>, _>(idx).map(|v| v.map(Value::from)),
            "FLOAT8" => row.try_get::<Option<f64>, _>(idx).map(|v| v.map(Value::from)),
            "UUID" => row
                .try_get::<Option<uuid::Uuid>, _>(idx)
                .map(|v| v.map(|u| Value::String(u.to_string()))),
            "TIMESTAMPTZ" => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(idx)
                .map(|v| v.map(|t| Value::String(t.to_rfc3339()))),
            "TIMESTAMP" => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(idx)
                .map(|v| v.map(|t| Value::String(t.to_string()))),
            "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(idx),
            _ => row.try_get::<Option<String>, _>(idx).map(|v| v.map(Value::String)),
        };

        let value = decoded.map_err(|source| DbError::Decode {
            column: column.name().to_string(),
            type_name: type_name.to_string(),
            source,
        })?;
        out.insert(column.name().to_string(), value.unwrap_or(Value::Null));
    }
    Ok(out)
}
