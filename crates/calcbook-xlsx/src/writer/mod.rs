//! XLSX writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::XlsxResult;
use crate::escape::{encode_excel_escapes, escape_xml};
use calcbook_core::{CellAddress, CellValue, Sheet, Workbook};

/// Name of the placeholder sheet written for a workbook with no sheets
const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook to a writer
    ///
    /// A workbook with no sheets is written with a single empty sheet, since
    /// spreadsheet applications refuse packages without one.
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        let placeholder;
        let sheets: Vec<&Sheet> = if workbook.is_empty() {
            placeholder = Sheet::new(DEFAULT_SHEET_NAME)?;
            vec![&placeholder]
        } else {
            workbook.sheets().collect()
        };

        let mut zip = zip::ZipWriter::new(writer);

        // Write [Content_Types].xml
        Self::write_content_types(&mut zip, sheets.len())?;

        // Write _rels/.rels
        Self::write_root_rels(&mut zip)?;

        // Write xl/workbook.xml
        Self::write_workbook_xml(&mut zip, &sheets)?;

        // Write xl/_rels/workbook.xml.rels
        Self::write_workbook_rels(&mut zip, sheets.len())?;

        // Write xl/styles.xml
        Self::write_styles_xml(&mut zip)?;

        // Write worksheets
        for (i, sheet) in sheets.iter().enumerate() {
            Self::write_worksheet(&mut zip, i, sheet)?;
        }

        zip.finish()?;
        log::debug!("wrote xlsx package with {} sheet(s)", sheets.len());
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet_count: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        // Add an override for each worksheet
        for i in 0..sheet_count {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheets: &[&Sheet],
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in sheets.iter().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet_count: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..sheet_count {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        // Styles relationship
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            sheet_count + 1
        ));

        content.push_str(
            r#"
</Relationships>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Minimal stylesheet: one font, the two mandatory fills, one border, one format
    fn write_styles_xml<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        index: usize,
        sheet: &Sheet,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !sheet.is_empty() {
            let last = CellAddress::new(
                sheet.row_count().saturating_sub(1),
                sheet.column_count().saturating_sub(1),
            );
            content.push_str(&format!("\n    <dimension ref=\"A1:{}\"/>", last));
        }

        content.push_str("\n    <sheetData>");

        // Write cell data (sparse, row-major)
        let mut current_row: Option<u32> = None;
        for (row, col, value) in sheet.iter_cells() {
            if current_row != Some(row) {
                // Close previous row
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                // Open new row
                content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                current_row = Some(row);
            }

            let cell_ref = CellAddress::new(row, col).to_a1_string();

            match value {
                CellValue::Number(n) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"><v>{}</v></c>",
                        cell_ref, n
                    ));
                }
                CellValue::String(s) => {
                    // Leading or trailing whitespace is only kept when flagged
                    let space = if s.trim() != s.as_str() {
                        " xml:space=\"preserve\""
                    } else {
                        ""
                    };
                    content.push_str(&format!(
                        "\n            <c r=\"{}\" t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                        cell_ref,
                        space,
                        escape_xml(&encode_excel_escapes(s))
                    ));
                }
                CellValue::Boolean(b) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\" t=\"b\"><v>{}</v></c>",
                        cell_ref,
                        if *b { 1 } else { 0 }
                    ));
                }
                // iter_cells skips empty cells
                CellValue::Empty => {}
            }
        }

        if current_row.is_some() {
            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn part(buf: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(buf)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut s = String::new();
        file.read_to_string(&mut s).unwrap();
        s
    }

    #[test]
    fn test_write_cells() {
        let mut wb = Workbook::new();
        let idx = wb.add_sheet_with_name("Sheet1").unwrap();
        let sheet = wb.sheet_mut(idx).unwrap();
        sheet.set_value("A1", "speed").unwrap();
        sheet.set_value("A2", 5.0).unwrap();
        sheet.set_value("B2", true).unwrap();

        let mut buf = Vec::new();
        XlsxWriter::write(&wb, Cursor::new(&mut buf)).unwrap();

        let xml = part(&buf, "xl/worksheets/sheet1.xml");
        assert!(xml.contains(r#"<dimension ref="A1:B2"/>"#));
        assert!(xml.contains(r#"<c r="A1" t="inlineStr"><is><t>speed</t></is></c>"#));
        assert!(xml.contains(r#"<c r="A2"><v>5</v></c>"#));
        assert!(xml.contains(r#"<c r="B2" t="b"><v>1</v></c>"#));
    }

    #[test]
    fn test_write_escapes_text() {
        let mut wb = Workbook::new();
        wb.add_sheet_with_name("Metadata").unwrap();
        wb.sheet_mut(0)
            .unwrap()
            .set_value("A1", r#" {"a": 1} & <b> "#)
            .unwrap();

        let mut buf = Vec::new();
        XlsxWriter::write(&wb, Cursor::new(&mut buf)).unwrap();

        let xml = part(&buf, "xl/worksheets/sheet1.xml");
        assert!(xml.contains(
            r#"<t xml:space="preserve"> {&quot;a&quot;: 1} &amp; &lt;b&gt; </t>"#
        ));
        let workbook = part(&buf, "xl/workbook.xml");
        assert!(workbook.contains(r#"<sheet name="Metadata" sheetId="1" r:id="rId1"/>"#));
    }

    #[test]
    fn test_write_empty_workbook_has_a_sheet() {
        let mut buf = Vec::new();
        XlsxWriter::write(&Workbook::new(), Cursor::new(&mut buf)).unwrap();

        let workbook = part(&buf, "xl/workbook.xml");
        assert!(workbook.contains(r#"name="Sheet1""#));
        let xml = part(&buf, "xl/worksheets/sheet1.xml");
        assert!(!xml.contains("<dimension"));
    }
}
