//! Attribute Path Module
//!
//! Document paths addressing a (possibly nested) attribute of a record.

use std::fmt;

use crate::error::{StoreError, StoreResult};

// == Attribute Path ==
/// A dot-separated document path such as `stock.size42`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePath {
    segments: Vec<String>,
}

impl AttributePath {
    /// Parses a dot-separated path. Every segment must be non-empty.
    ///
    /// Segments are taken literally; they are never interpreted as
    /// expression syntax.
    pub fn parse(raw: &str) -> StoreResult<Self> {
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();

        if segments.iter().any(String::is_empty) {
            return Err(StoreError::Validation(format!(
                "Invalid attribute path '{}': empty path segment",
                raw
            )));
        }

        Ok(Self { segments })
    }

    /// Path segments, outermost first. Never empty.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Top-level attribute name.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Returns true if the path addresses a top-level attribute.
    pub fn is_top_level(&self) -> bool {
        self.segments.len() == 1
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
