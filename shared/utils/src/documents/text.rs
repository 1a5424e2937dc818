//! Plain-text extraction for technical specification documents.

use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::debug;

use super::{processing_error, spreadsheet, DocumentKind};
use crate::error::SpecMatchResult;

/// Detects the document kind from the file extension and extracts its text.
pub fn read_file_content(path: &Path) -> SpecMatchResult<String> {
    let kind = DocumentKind::from_path(path)?;
    extract_text(path, kind)
}

/// Extracts the full text of a document as a single string.
///
/// Spreadsheets contribute their first sheet only, rendered as aligned rows.
pub fn extract_text(path: &Path, kind: DocumentKind) -> SpecMatchResult<String> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))
        .map_err(processing_error)?;
    
    let text = match kind {
        DocumentKind::PlainText => decode_plain_text(data),
        DocumentKind::Spreadsheet => spreadsheet::first_sheet_cells(data)
            .map(|rows| spreadsheet::render_grid(&rows)),
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(&data)
            .context("Failed to extract text from PDF"),
        DocumentKind::WordDocument => extract_docx_text(data),
    }
    .map_err(processing_error)?;
    
    debug!(kind = ?kind, chars = text.len(), "Extracted document text");
    Ok(text)
}

/// UTF-8 decode with universal newlines
fn decode_plain_text(data: Vec<u8>) -> Result<String> {
    let text = String::from_utf8(data).context("Text file is not valid UTF-8")?;
    Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Collects body paragraph text from `word/document.xml`, one paragraph per line.
/// Paragraphs nested in tables are not part of the body paragraph sequence.
fn extract_docx_text(data: Vec<u8>) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))
        .context("Failed to open DOCX archive")?;
    
    let mut xml = String::new();
    archive.by_name("word/document.xml")
        .context("DOCX archive has no word/document.xml")?
        .read_to_string(&mut xml)
        .context("Failed to read word/document.xml")?;
    
    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_text_run = false;
    let mut table_depth = 0usize;
    
    loop {
        match reader.read_event().context("Malformed word/document.xml")? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = true,
                b"w:tbl" => table_depth += 1,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:tbl" => table_depth = table_depth.saturating_sub(1),
                b"w:p" if table_depth == 0 => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) if table_depth == 0 => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text_run && table_depth == 0 => {
                text.push_str(&e.unescape().context("Bad text escape in DOCX")?);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    
    Ok(text)
}
