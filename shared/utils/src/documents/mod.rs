//! Document I/O
//! 
//! Readers that turn uploaded files into plain text or vendor records,
//! request-scoped scratch storage for uploads, and the XLSX report writer.
//! Supports plain text, Excel (XLSX/XLS), CSV, PDF and DOCX inputs.

pub mod spreadsheet;
pub mod text;
pub mod vendors;
pub mod scratch;
pub mod xlsx;

pub use text::{extract_text, read_file_content};
pub use vendors::read_vendor_table;
pub use scratch::ScratchSpace;
pub use xlsx::{write_workbook, SheetModel};

use std::path::Path;

use crate::error::{SpecMatchError, SpecMatchResult};

/// Formats accepted for the technical specification document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Spreadsheet,  // XLSX/XLS
    Pdf,
    WordDocument, // DOCX
}

impl DocumentKind {
    /// Detect kind from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = extension_of(path)?;
        match ext.as_str() {
            "txt" => Some(Self::PlainText),
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::WordDocument),
            _ => None,
        }
    }
    
    pub fn from_path(path: &Path) -> SpecMatchResult<Self> {
        Self::from_extension(path).ok_or_else(|| {
            SpecMatchError::unsupported_format(
                "technical specification",
                ".txt, .pdf, .docx, .xls, or .xlsx",
            )
        })
    }
}

/// Formats accepted for the vendor offer table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Excel, // XLSX/XLS
    Csv,
}

impl TableFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = extension_of(path)?;
        match ext.as_str() {
            "xlsx" | "xls" => Some(Self::Excel),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
    
    pub fn from_path(path: &Path) -> SpecMatchResult<Self> {
        Self::from_extension(path).ok_or_else(|| {
            SpecMatchError::unsupported_format("vendor offers", ".xlsx, .xls, or .csv")
        })
    }
}

fn extension_of(path: &Path) -> Option<String> {
    Some(path.extension()?.to_str()?.to_lowercase())
}

/// Reader failures on a file of a supported kind
pub(crate) fn processing_error(error: anyhow::Error) -> SpecMatchError {
    SpecMatchError::document_processing(format!("{:#}", error))
}
