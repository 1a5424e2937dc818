//! Vendor offers read from the vendor table.

use serde::{Deserialize, Serialize};

/// A vendor and the free text of its offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VendorRecord {
    pub name: String,
    pub offer_text: String,
}

impl VendorRecord {
    pub fn new(name: impl Into<String>, offer_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offer_text: offer_text.into(),
        }
    }

    /// Name used when a table row carries no vendor name (`row_number` is 1-based)
    pub fn default_name(row_number: usize) -> String {
        format!("Vendor {}", row_number)
    }
}
