//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::escape::decode_excel_escapes;
use calcbook_core::{CellAddress, CellValue, Sheet, Workbook};

/// XLSX file reader
pub struct XlsxReader;

/// Attributes and content of the `<c>` element being read
#[derive(Default)]
struct PendingCell {
    reference: Option<String>,
    cell_type: Option<String>,
    value: Option<String>,
}

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        // Read shared strings (if present)
        let shared_strings = Self::read_shared_strings(&mut archive)?;

        // Read workbook.xml to get sheet info
        let sheet_info = Self::read_workbook_xml(&mut archive)?;

        // Read workbook.xml.rels to get sheet paths
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::new();

        // Read each worksheet
        for (name, r_id) in &sheet_info {
            let Some(path) = sheet_paths.get(r_id) else {
                log::warn!("sheet '{}' has no worksheet relationship {}; skipped", name, r_id);
                continue;
            };
            let mut sheet = Sheet::new(name.as_str())?;
            Self::read_worksheet(&mut archive, path, &mut sheet, &shared_strings)?;
            workbook.add_sheet(sheet)?;
        }

        // Ensure at least one sheet exists
        if workbook.is_empty() {
            workbook.add_sheet_with_name("Sheet1")?;
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        // Whitespace inside <t> is significant
        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs (<rPh>) carry readings, not cell text
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" if in_si => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    let text = e.unescape()?;
                    current_string.push_str(&text);
                }
                Ok(Event::CData(e)) if in_t => {
                    current_string.push_str(&String::from_utf8_lossy(&e));
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let name = Self::attribute(&e, b"name");
                    let r_id = Self::attribute(&e, b"r:id");

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = Self::attribute(&e, b"Id");
                    let target = Self::attribute(&e, b"Target");
                    let rel_type = Self::attribute(&e, b"Type");

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        sheet: &mut Sheet,
        shared_strings: &[String],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        // Whitespace inside <v> and <t> is significant; text between
        // structural elements is ignored below
        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();

        // Position fallbacks for producers that omit r attributes
        let mut current_row: u32 = 0;
        let mut next_col: u16 = 0;

        let mut cell: Option<PendingCell> = None;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = Self::row_index(&e).unwrap_or(current_row);
                        next_col = 0;
                    }
                    b"c" => {
                        cell = Some(PendingCell {
                            reference: Self::attribute(&e, b"r"),
                            cell_type: Self::attribute(&e, b"t"),
                            value: None,
                        });
                    }
                    b"v" if cell.is_some() => in_value = true,
                    b"is" if cell.is_some() => in_inline_str = true,
                    b"rPh" if in_inline_str => in_phonetic = true,
                    b"t" if in_inline_str && !in_phonetic => {
                        in_inline_text = true;
                        // An inline string is present even if its text is empty
                        if let Some(c) = cell.as_mut() {
                            c.value.get_or_insert_with(String::new);
                        }
                    }
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => {
                        current_row = Self::row_index(&e).unwrap_or(current_row) + 1;
                        next_col = 0;
                    }
                    // Value-less cell: only advances the column
                    b"c" => {
                        let reference = Self::attribute(&e, b"r");
                        next_col = Self::locate(reference.as_deref(), current_row, next_col)?
                            .col
                            .saturating_add(1);
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(pending) = cell.take() {
                            let addr =
                                Self::locate(pending.reference.as_deref(), current_row, next_col)?;
                            Self::process_cell(sheet, addr, &pending, shared_strings)?;
                            next_col = addr.col.saturating_add(1);
                        }
                        in_value = false;
                        in_inline_str = false;
                        in_inline_text = false;
                        in_phonetic = false;
                    }
                    b"row" => {
                        current_row += 1;
                        next_col = 0;
                    }
                    b"v" => in_value = false,
                    b"is" => in_inline_str = false,
                    b"rPh" => in_phonetic = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    let text = e.unescape()?;
                    if let Some(c) = cell.as_mut() {
                        c.value.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Ok(Event::CData(e)) if in_value || in_inline_text => {
                    if let Some(c) = cell.as_mut() {
                        c.value
                            .get_or_insert_with(String::new)
                            .push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Process a cell and add it to the sheet
    fn process_cell(
        sheet: &mut Sheet,
        addr: CellAddress,
        cell: &PendingCell,
        shared_strings: &[String],
    ) -> XlsxResult<()> {
        let Some(value) = cell.value.as_deref() else {
            return Ok(());
        };

        // Process value based on type
        let cell_value = match cell.cell_type.as_deref() {
            // Shared string
            Some("s") => {
                let idx: usize = value.trim().parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", value))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?;
                CellValue::String(s.clone())
            }

            // Boolean
            Some("b") => {
                let v = value.trim();
                CellValue::Boolean(v == "1" || v.eq_ignore_ascii_case("true"))
            }

            // Inline string and formula string results - decode Excel escape sequences
            Some("inlineStr") | Some("str") => CellValue::String(decode_excel_escapes(value)),

            // Number (default type or explicit "n")
            None | Some("n") => match value.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::String(value.to_string()),
            },

            // Errors, ISO dates and unknown types - keep the raw text
            Some(_) => CellValue::String(value.to_string()),
        };

        // Empty text reads back as an empty cell
        if matches!(&cell_value, CellValue::String(s) if s.is_empty()) {
            return Ok(());
        }

        sheet.set_value_at(addr.row, addr.col, cell_value)?;
        Ok(())
    }

    /// Resolve a cell position from its `r` attribute, or from the running
    /// row/column when the attribute is missing
    fn locate(reference: Option<&str>, row: u32, col: u16) -> XlsxResult<CellAddress> {
        match reference {
            Some(r) => CellAddress::parse(r).map_err(|e| {
                XlsxError::Parse(format!("Invalid cell reference '{}': {}", r, e))
            }),
            None => Ok(CellAddress::new(row, col)),
        }
    }

    /// 0-based row index from a `<row r="…">` attribute
    fn row_index(e: &BytesStart) -> Option<u32> {
        Self::attribute(e, b"r")
            .and_then(|s| s.parse::<u32>().ok())
            .map(|r| r.saturating_sub(1))
    }

    fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
        e.attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == key)
            .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
    }
}
