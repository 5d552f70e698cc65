//! Validation error types
//!
//! Request checks collect every failure instead of stopping at the first one;
//! the whole list is reported to the client.

use std::fmt;

use serde::Serialize;

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or blank
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Where the offending value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Params,
}

/// One entry of the error list sent to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub location: Location,
    pub param: &'static str,
    pub message: String,
}

/// Every failure found in one request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Accumulates rule failures for one location
#[derive(Debug)]
pub struct Checker {
    location: Location,
    errors: Vec<FieldError>,
}

impl Checker {
    pub fn body() -> Self {
        Self {
            location: Location::Body,
            errors: Vec::new(),
        }
    }

    pub fn params() -> Self {
        Self {
            location: Location::Params,
            errors: Vec::new(),
        }
    }

    fn fail(&mut self, param: &'static str, error: ValidationError) {
        self.errors.push(FieldError {
            location: self.location,
            param,
            message: error.to_string(),
        });
    }

    /// Missing values and whitespace-only values both fail.
    pub fn not_empty(&mut self, param: &'static str, value: Option<&str>) -> &mut Self {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.fail(param, ValidationError::Empty { field: param });
        }
        self
    }

    /// Counts characters, not bytes. A missing value passes.
    pub fn max_len(&mut self, param: &'static str, value: Option<&str>, max: usize) -> &mut Self {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.fail(param, ValidationError::TooLong { field: param, max });
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Validate a required path parameter.
pub fn require_param(param: &'static str, value: &str) -> Result<(), ValidationErrors> {
    let mut check = Checker::params();
    check.not_empty(param, Some(value));
    check.finish()
}
