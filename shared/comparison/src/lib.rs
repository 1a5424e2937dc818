//! # Specmatch Comparison
//! 
//! Turns a technical specification and a set of vendor offers into a
//! per-requirement, per-vendor verdict matrix and a spreadsheet report.
//! 
//! - [`requirements`]: one requirement per non-blank specification line
//! - [`engine`]: case-insensitive substring matching and overall status
//! - [`report`]: row-per-vendor flattening, column sizing, XLSX output
//! 
//! All functions are synchronous and free of shared state, so independent
//! runs can execute concurrently.

pub mod requirements;
pub mod engine;
pub mod report;

#[cfg(test)]
mod property_tests;

pub use requirements::extract_requirements;
pub use engine::{compare_vendor, compare_vendors, run_comparison};
pub use report::{build_report_table, generate_report, REPORT_MIME_TYPE, SHEET_NAME};
