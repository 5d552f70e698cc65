//! Database layer - driver seam, bridge and repositories
//!
//! # Design Principles
//!
//! - Every statement goes through [`Bridge`]; nothing else talks to the driver
//! - Every dynamic value is a bound parameter, never spliced into SQL text
//! - List statements are paginated with bound LIMIT/OFFSET
//! - Rows are opaque JSON objects (column name -> value)

pub mod bridge;
pub mod driver;
pub mod pagination;
pub mod pool;
pub mod repos;

pub use bridge::{Bridge, InsertOutcome, Listing};
pub use driver::{DbError, Driver, Param, PgDriver, QueryOutput, Row, Statement, StatementKind};
pub use pagination::{normalize_rows, Pagination, PaginationParams, MAX_PER_PAGE};
pub use pool::{create_pool, create_pool_from_url, PoolError};
