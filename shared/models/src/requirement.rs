//! Requirement entries extracted from a technical specification.

use serde::{Deserialize, Serialize};

/// One requirement line of a technical specification.
///
/// `requirement` is always trimmed and non-empty when produced by the
/// requirement extractor. `details` is carried for structured extractors and
/// stays empty for line-based extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RequirementEntry {
    pub requirement: String,
    pub details: String,
}

impl RequirementEntry {
    /// Creates an entry with empty details
    pub fn new(requirement: impl Into<String>) -> Self {
        Self {
            requirement: requirement.into(),
            details: String::new(),
        }
    }
}
