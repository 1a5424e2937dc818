//! Report Builder
//! 
//! Flattens vendor comparisons into one row per vendor with a
//! Status / Explanation / Evidence column triple per requirement, computes
//! column widths, then hands the finished model to the XLSX writer.

use specmatch_models::VendorComparison;
use specmatch_utils::{write_workbook, SheetModel, SpecMatchResult};
use std::collections::BTreeSet;
use tracing::info;

pub const SHEET_NAME: &str = "Technical Comparison";
pub const REPORT_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const PROJECT_NAME_COLUMN: &str = "Project Name";
pub const VENDOR_COLUMN: &str = "Vendor";
pub const OVERALL_STATUS_COLUMN: &str = "Overall Status";
pub const ADDITIONAL_FEATURES_COLUMN: &str = "Additional Features";

const NOT_AVAILABLE: &str = "N/A";

/// Extra characters added to the widest value of each column
pub const COLUMN_PADDING: usize = 2;

/// One vendor's report line as (column, value) pairs in column order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    cells: Vec<(String, String)>,
}

impl ReportRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
    
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }
    
    pub fn into_values(self) -> Vec<String> {
        self.cells.into_iter().map(|(_, value)| value).collect()
    }
}

/// Distinct requirement texts across all vendors, sorted ascending
pub fn sorted_requirements(results: &[VendorComparison]) -> Vec<String> {
    results
        .iter()
        .flat_map(|result| result.detailed_comparison.iter())
        .map(|verdict| verdict.requirement.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Column headers: the fixed columns, then a triple per requirement
pub fn report_headers(sorted_requirements: &[String]) -> Vec<String> {
    let mut headers = vec![
        PROJECT_NAME_COLUMN.to_string(),
        VENDOR_COLUMN.to_string(),
        OVERALL_STATUS_COLUMN.to_string(),
        ADDITIONAL_FEATURES_COLUMN.to_string(),
    ];
    for requirement in sorted_requirements {
        headers.push(format!("{} - Status", requirement));
        headers.push(format!("{} - Explanation", requirement));
        headers.push(format!("{} - Evidence", requirement));
    }
    headers
}

pub fn build_report_rows(project_name: &str, results: &[VendorComparison]) -> Vec<ReportRow> {
    let requirements = sorted_requirements(results);
    let headers = report_headers(&requirements);
    flatten_rows(project_name, results, &requirements, &headers)
}

fn flatten_rows(
    project_name: &str,
    results: &[VendorComparison],
    requirements: &[String],
    headers: &[String],
) -> Vec<ReportRow> {
    results
        .iter()
        .map(|result| {
            let mut values = vec![
                project_name.to_string(),
                result.vendor_name.clone(),
                result.overall_status.to_string(),
                result.additional_features.join(", "),
            ];
            for requirement in requirements {
                match result.verdict_for(requirement) {
                    Some(verdict) => {
                        values.push(verdict.status.to_string());
                        values.push(verdict.explanation.clone());
                        values.push(verdict.evidence.clone());
                    }
                    None => {
                        values.extend(std::iter::repeat(NOT_AVAILABLE.to_string()).take(3));
                    }
                }
            }
            
            ReportRow {
                cells: headers.iter().cloned().zip(values).collect(),
            }
        })
        .collect()
}

/// Builds the complete sheet model, widths included, without writing anything.
pub fn build_report_table(project_name: &str, results: &[VendorComparison]) -> SheetModel {
    let report_rows = build_report_rows(project_name, results);
    // Every row carries the full column set; with no vendors only the fixed columns remain
    let headers: Vec<String> = match report_rows.first() {
        Some(row) => row.columns().map(str::to_string).collect(),
        None => report_headers(&[]),
    };
    let rows: Vec<Vec<String>> = report_rows.into_iter().map(ReportRow::into_values).collect();
    let column_widths = column_widths(&headers, &rows);
    
    SheetModel {
        name: SHEET_NAME.to_string(),
        headers,
        rows,
        column_widths,
    }
}

/// Widest rendered value per column (header included) plus padding
fn column_widths(headers: &[String], rows: &[Vec<String>]) -> Vec<f64> {
    headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let widest = rows
                .iter()
                .filter_map(|row| row.get(col))
                .chain(std::iter::once(header))
                .map(|value| value.chars().count())
                .max()
                .unwrap_or(0);
            (widest + COLUMN_PADDING) as f64
        })
        .collect()
}

/// Serializes the comparison report to XLSX bytes.
pub fn generate_report(project_name: &str, results: &[VendorComparison]) -> SpecMatchResult<Vec<u8>> {
    let table = build_report_table(project_name, results);
    let bytes = write_workbook(&table)?;
    
    info!(
        project = %project_name,
        rows = table.rows.len(),
        columns = table.column_count(),
        bytes = bytes.len(),
        "Generated comparison report"
    );
    Ok(bytes)
}
