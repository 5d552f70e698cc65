//! Pagination helper
//!
//! Offset arithmetic for list statements and normalization of whatever the
//! driver hands back into a plain list of rows.

use serde::Deserialize;

use super::driver::{QueryOutput, Row};

/// Maximum items per page
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (max 100)
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Per page is clamped to 1..=100
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Build from query parameters, defaulting to page 1 and `default_per_page`.
    pub fn from_params(params: PaginationParams, default_per_page: u32) -> Self {
        Self::new(
            params.page.unwrap_or(1),
            params.per_page.unwrap_or(default_per_page),
        )
    }

    /// Calculate SQL OFFSET value: `(page - 1) * per_page`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Get LIMIT value.
    pub fn limit(&self) -> u32 {
        self.per_page
    }
}

/// Query parameters for pagination
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// Flatten a driver result into rows.
///
/// A row set is returned as-is, order preserved. Anything else (the
/// acknowledgement of a statement that produces no rows) becomes an empty list.
pub fn normalize_rows(output: QueryOutput) -> Vec<Row> {
    match output {
        QueryOutput::Rows(rows) => rows,
        QueryOutput::Command { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str) -> Row {
        let mut row = Row::new();
        row.insert("id".to_string(), json!(id));
        row
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(1, 37).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }

    #[test]
    fn offset_does_not_overflow_u32() {
        let p = Pagination::new(u32::MAX, 100);
        assert_eq!(p.offset(), (u64::from(u32::MAX) - 1) * 100);
    }

    #[test]
    fn clamps_page() {
        let p = Pagination::new(0, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn hand_built_page_zero_starts_at_offset_zero() {
        let p = Pagination { page: 0, per_page: 10 };
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn clamps_per_page() {
        assert_eq!(Pagination::new(1, 0).per_page, 1);
        assert_eq!(Pagination::new(1, 999).per_page, 100);
    }

    #[test]
    fn from_params_uses_defaults() {
        let p = Pagination::from_params(PaginationParams::default(), 10);
        assert_eq!(p, Pagination::new(1, 10));

        let p = Pagination::from_params(
            PaginationParams {
                page: Some(4),
                per_page: None,
            },
            15,
        );
        assert_eq!(p.offset(), 45);
        assert_eq!(p.limit(), 15);
    }

    #[test]
    fn normalize_keeps_rows_in_order() {
        let rows = vec![row("b"), row("a"), row("b")];
        let normalized = normalize_rows(QueryOutput::Rows(rows.clone()));
        assert_eq!(normalized, rows);
    }

    #[test]
    fn normalize_turns_acknowledgements_into_empty_list() {
        assert!(normalize_rows(QueryOutput::Command {
            rows_affected: Some(3)
        })
        .is_empty());
        assert!(normalize_rows(QueryOutput::Command { rows_affected: None }).is_empty());
    }
}
