//! Vendor offer table reader.
//! 
//! One vendor per data row, taken from the `Vendor Name` and `Offer Details`
//! columns of the first sheet (Excel) or of the file (CSV).

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

use specmatch_models::VendorRecord;

use super::{processing_error, spreadsheet, TableFormat};
use crate::error::{SpecMatchError, SpecMatchResult};

pub const VENDOR_NAME_COLUMN: &str = "Vendor Name";
pub const OFFER_DETAILS_COLUMN: &str = "Offer Details";

/// Reads vendor records from an Excel or CSV table.
///
/// Fails with `EmptyVendorTable` when the table has no data rows.
pub fn read_vendor_table(path: &Path) -> SpecMatchResult<Vec<VendorRecord>> {
    let format = TableFormat::from_path(path)?;
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))
        .map_err(processing_error)?;
    
    let rows = match format {
        TableFormat::Excel => spreadsheet::first_sheet_cells(data),
        TableFormat::Csv => csv_cells(&data),
    }
    .map_err(processing_error)?;
    
    let vendors = vendors_from_rows(&rows);
    if vendors.is_empty() {
        return Err(SpecMatchError::EmptyVendorTable);
    }
    
    debug!(vendors = vendors.len(), "Read vendor table");
    Ok(vendors)
}

/// Maps a header row plus data rows onto vendor records.
///
/// Missing columns and blank cells fall back to `Vendor {n}` and an empty
/// offer. Rows with no content at all are skipped but still counted for `n`.
pub fn vendors_from_rows(rows: &[Vec<String>]) -> Vec<VendorRecord> {
    let Some((headers, data_rows)) = rows.split_first() else {
        return Vec::new();
    };
    
    let name_col = headers.iter().position(|h| h == VENDOR_NAME_COLUMN);
    let offer_col = headers.iter().position(|h| h == OFFER_DETAILS_COLUMN);
    if name_col.is_none() && offer_col.is_none() {
        warn!(
            headers = ?headers,
            "Vendor table has neither '{}' nor '{}' column", VENDOR_NAME_COLUMN, OFFER_DETAILS_COLUMN
        );
    }
    
    data_rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|value| !value.trim().is_empty()))
        .map(|(idx, row)| VendorRecord {
            name: non_blank_cell(row, name_col)
                .unwrap_or_else(|| VendorRecord::default_name(idx + 1)),
            offer_text: non_blank_cell(row, offer_col).unwrap_or_default(),
        })
        .collect()
}

fn non_blank_cell(row: &[String], col: Option<usize>) -> Option<String> {
    col.and_then(|i| row.get(i))
        .filter(|value| !value.trim().is_empty())
        .cloned()
}

fn csv_cells(data: &[u8]) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(data);
    
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Row {}: CSV parse error", idx + 1))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    
    Ok(rows)
}
