//! First-sheet access for Excel workbooks via calamine.

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_from_rs, DataType, Range, Reader, Xls, Xlsx};
use std::io::Cursor;

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Container flavour of an Excel file, detected from its leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    Xlsx,
    Xls,
}

impl WorkbookFormat {
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(ZIP_MAGIC) {
            Some(Self::Xlsx)
        } else if data.starts_with(CFB_MAGIC) {
            Some(Self::Xls)
        } else {
            None
        }
    }
}

/// Reads every cell of the first worksheet as display strings, row-major.
/// Blank cells become empty strings.
pub fn first_sheet_cells(data: Vec<u8>) -> Result<Vec<Vec<String>>> {
    let range = match WorkbookFormat::sniff(&data) {
        Some(WorkbookFormat::Xlsx) => first_sheet::<Xlsx<_>>(data)?,
        Some(WorkbookFormat::Xls) => first_sheet::<Xls<_>>(data)?,
        None => bail!("File content is not an Excel workbook"),
    };
    
    Ok(range
        .rows()
        .map(|row| row.iter().map(|cell: &DataType| cell.to_string()).collect())
        .collect())
}

fn first_sheet<R>(data: Vec<u8>) -> Result<Range<DataType>>
where
    R: Reader<Cursor<Vec<u8>>>,
    R::Error: std::error::Error + Send + Sync + 'static,
{
    let mut workbook: R = open_workbook_from_rs(Cursor::new(data))
        .context("Failed to open Excel workbook")?;
    
    let sheet_name = workbook.sheet_names()
        .first()
        .cloned()
        .context("No sheets found in workbook")?;
    
    let range = workbook.worksheet_range(&sheet_name)
        .context("Failed to read worksheet")??;
    
    Ok(range)
}

/// Renders a grid as aligned text: each cell right-aligned to its column
/// width, cells separated by one space, one line per row.
pub fn render_grid(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }
    
    rows.iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(i, cell)| format!("{:>width$}", cell, width = widths[i]))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
