//! XLSX writer
//! 
//! Serializes a fully computed single-sheet table model in one pass. Cell
//! strings go through a shared string table; the header row is bold and
//! every column carries an explicit width.

use quick_xml::escape::escape;
use std::collections::HashMap;
use std::io::{Cursor, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::{SpecMatchError, SpecMatchResult};

/// Excel refuses wider columns
const MAX_COLUMN_WIDTH: f64 = 255.0;
const MAX_SHEET_NAME_CHARS: usize = 31;

/// Cell style index of the bold header format in `styles.xml`
const HEADER_STYLE: usize = 1;

/// One worksheet: header row, data rows, and per-column widths in characters.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetModel {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub column_widths: Vec<f64>,
}

impl SheetModel {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Writes a workbook containing the single sheet and returns the file bytes.
pub fn write_workbook(sheet: &SheetModel) -> SpecMatchResult<Vec<u8>> {
    validate_sheet_name(&sheet.name)?;
    
    let strings = SharedStrings::collect(sheet);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    
    write_part(&mut zip, "[Content_Types].xml", CONTENT_TYPES_XML)?;
    write_part(&mut zip, "_rels/.rels", ROOT_RELS_XML)?;
    write_part(&mut zip, "xl/workbook.xml", &workbook_xml(&sheet.name))?;
    write_part(&mut zip, "xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML)?;
    write_part(&mut zip, "xl/styles.xml", STYLES_XML)?;
    write_part(&mut zip, "xl/sharedStrings.xml", &strings.to_xml())?;
    write_part(&mut zip, "xl/worksheets/sheet1.xml", &worksheet_xml(sheet, &strings))?;
    
    Ok(zip.finish()?.into_inner())
}

fn write_part<W: Write + Seek>(zip: &mut ZipWriter<W>, name: &str, content: &str) -> SpecMatchResult<()> {
    zip.start_file(name, SimpleFileOptions::default())?;
    zip.write_all(content.as_bytes())
        .map_err(|e| SpecMatchError::serialization(format!("Failed to write {}: {}", name, e)))?;
    Ok(())
}

fn validate_sheet_name(name: &str) -> SpecMatchResult<()> {
    let length = name.chars().count();
    if length == 0 || length > MAX_SHEET_NAME_CHARS {
        return Err(SpecMatchError::serialization(format!(
            "Sheet name must be 1-{} characters: {:?}", MAX_SHEET_NAME_CHARS, name
        )));
    }
    if name.contains(['[', ']', ':', '*', '?', '/', '\\']) {
        return Err(SpecMatchError::serialization(format!(
            "Sheet name contains a forbidden character: {:?}", name
        )));
    }
    Ok(())
}

/// Index of every distinct cell string, in first-seen order
struct SharedStrings {
    order: Vec<String>,
    index: HashMap<String, usize>,
    references: usize,
}

impl SharedStrings {
    fn collect(sheet: &SheetModel) -> Self {
        let mut strings = Self {
            order: Vec::new(),
            index: HashMap::new(),
            references: 0,
        };
        
        for value in sheet.headers.iter().chain(sheet.rows.iter().flatten()) {
            if value.is_empty() {
                continue;
            }
            strings.references += 1;
            if !strings.index.contains_key(value) {
                strings.index.insert(value.clone(), strings.order.len());
                strings.order.push(value.clone());
            }
        }
        
        strings
    }
    
    fn get(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }
    
    fn to_xml(&self) -> String {
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            self.references,
            self.order.len()
        );
        
        for value in &self.order {
            content.push_str(&format!(
                "<si><t xml:space=\"preserve\">{}</t></si>",
                xml_text(value)
            ));
        }
        
        content.push_str("</sst>");
        content
    }
}

fn worksheet_xml(sheet: &SheetModel, strings: &SharedStrings) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    
    if !sheet.column_widths.is_empty() {
        content.push_str("\n    <cols>");
        for (i, width) in sheet.column_widths.iter().enumerate() {
            content.push_str(&format!(
                "\n        <col min=\"{0}\" max=\"{0}\" width=\"{1}\" customWidth=\"1\"/>",
                i + 1,
                width.clamp(0.0, MAX_COLUMN_WIDTH)
            ));
        }
        content.push_str("\n    </cols>");
    }
    
    content.push_str("\n    <sheetData>");
    write_row(&mut content, 0, &sheet.headers, Some(HEADER_STYLE), strings);
    for (i, row) in sheet.rows.iter().enumerate() {
        write_row(&mut content, i + 1, row, None, strings);
    }
    content.push_str("\n    </sheetData>\n</worksheet>");
    
    content
}

fn write_row(
    content: &mut String,
    row_index: usize,
    values: &[String],
    style: Option<usize>,
    strings: &SharedStrings,
) {
    let style_attr = style.map_or(String::new(), |s| format!(" s=\"{}\"", s));
    
    content.push_str(&format!("\n        <row r=\"{}\">", row_index + 1));
    for (col, value) in values.iter().enumerate() {
        if let Some(idx) = strings.get(value) {
            content.push_str(&format!(
                "<c r=\"{}{}\"{} t=\"s\"><v>{}</v></c>",
                column_letter(col),
                row_index + 1,
                style_attr,
                idx
            ));
        }
    }
    content.push_str("</row>");
}

/// Zero-based column index to its A1 letters (0 → A, 26 → AA)
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Escapes markup and drops characters XML 1.0 cannot carry (e.g. form feeds from PDF text)
fn xml_text(value: &str) -> String {
    let cleaned: String = value
        .chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || c >= ' ')
        .filter(|&c| c != '\u{FFFE}' && c != '\u{FFFF}')
        .collect();
    escape(&cleaned).into_owned()
}

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="{}" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#,
        xml_text(sheet_name)
    )
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
    <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
    <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>
</Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="2">
        <font><sz val="11"/><name val="Calibri"/><family val="2"/></font>
        <font><b/><sz val="11"/><name val="Calibri"/><family val="2"/></font>
    </fonts>
    <fills count="2">
        <fill><patternFill patternType="none"/></fill>
        <fill><patternFill patternType="gray125"/></fill>
    </fills>
    <borders count="1">
        <border><left/><right/><top/><bottom/><diagonal/></border>
    </borders>
    <cellStyleXfs count="1">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
    </cellStyleXfs>
    <cellXfs count="2">
        <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
        <xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>
    </cellXfs>
    <cellStyles count="1">
        <cellStyle name="Normal" xfId="0" builtinId="0"/>
    </cellStyles>
</styleSheet>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_from_rs, DataType, Reader, Xlsx};
    use std::io::Read;

    fn sample_sheet() -> SheetModel {
        SheetModel {
            name: "Technical Comparison".to_string(),
            headers: vec!["Vendor".to_string(), "RAM & <ECC> - Status".to_string()],
            rows: vec![
                vec!["Acme".to_string(), "Met".to_string()],
                vec!["Globex".to_string(), String::new()],
                vec!["Initech".to_string(), "Met".to_string()],
            ],
            column_widths: vec![9.0, 22.0],
        }
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut content = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_written_workbook_reads_back() {
        let bytes = write_workbook(&sample_sheet()).unwrap();
        
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Technical Comparison".to_string()]);
        
        let range = workbook.worksheet_range("Technical Comparison").unwrap().unwrap();
        assert_eq!(range.get_value((0, 1)), Some(&DataType::String("RAM & <ECC> - Status".to_string())));
        assert_eq!(range.get_value((1, 0)), Some(&DataType::String("Acme".to_string())));
        assert_eq!(range.get_value((3, 1)), Some(&DataType::String("Met".to_string())));
        assert_eq!(range.get_value((2, 1)), Some(&DataType::Empty));
    }

    #[test]
    fn test_widths_and_header_style() {
        let bytes = write_workbook(&sample_sheet()).unwrap();
        let sheet_xml = read_part(&bytes, "xl/worksheets/sheet1.xml");
        
        assert!(sheet_xml.contains(r#"<col min="1" max="1" width="9" customWidth="1"/>"#));
        assert!(sheet_xml.contains(r#"<col min="2" max="2" width="22" customWidth="1"/>"#));
        assert!(sheet_xml.contains(r#"<c r="A1" s="1" t="s">"#));
        assert!(!sheet_xml.contains(r#"r="B3""#));
    }

    #[test]
    fn test_shared_strings_are_deduplicated() {
        let bytes = write_workbook(&sample_sheet()).unwrap();
        let sst = read_part(&bytes, "xl/sharedStrings.xml");
        
        assert!(sst.contains(r#"count="7" uniqueCount="6""#));
        assert!(sst.contains("RAM &amp; &lt;ECC&gt; - Status"));
    }

    #[test]
    fn test_control_characters_dropped() {
        assert_eq!(xml_text("page\u{c}break\tok"), "pagebreak\tok");
    }

    #[test]
    fn test_invalid_sheet_name() {
        let mut sheet = sample_sheet();
        sheet.name = "Q1/Q2".to_string();
        let err = write_workbook(&sheet).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        
        sheet.name = "x".repeat(32);
        assert!(write_workbook(&sheet).is_err());
    }
}
