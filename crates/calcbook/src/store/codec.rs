//! Session ↔ workbook layout
//!
//! Sheet `Sheet1` holds the table: a header row of column names, then one
//! row per table row, oldest first, with the insertion order in a trailing
//! `Insertion Order` column. Sheet `Metadata`, present once a calculation
//! has succeeded, holds a `LastFormula`/`LastInputs` header and one row.

use calcbook_core::{CellValue, Error as CoreError, Row, Sheet, Table, Workbook};

use crate::error::Result;
use crate::store::session::{Session, SessionMetadata};

/// Name of the sheet holding the table
pub const DATA_SHEET: &str = "Sheet1";
/// Name of the sheet holding the last formula and inputs
pub const METADATA_SHEET: &str = "Metadata";
/// Trailing column recording each row's insertion order
pub const ORDER_COLUMN: &str = "Insertion Order";
/// Metadata column holding the last formula
pub const LAST_FORMULA_COLUMN: &str = "LastFormula";
/// Metadata column holding the last inputs
pub const LAST_INPUTS_COLUMN: &str = "LastInputs";

/// Lay a session out as a workbook
pub fn session_to_workbook(session: &Session) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    workbook.add_sheet(table_to_sheet(&session.table)?)?;

    if let Some(metadata) = &session.metadata {
        let mut sheet = Sheet::new(METADATA_SHEET)?;
        sheet.push_row(vec![
            LAST_FORMULA_COLUMN.into(),
            LAST_INPUTS_COLUMN.into(),
        ])?;
        sheet.push_row(vec![
            text_cell(&metadata.last_formula),
            text_cell(&metadata.last_inputs),
        ])?;
        workbook.add_sheet(sheet)?;
    }

    Ok(workbook)
}

/// Rebuild a session from a workbook read from disk
///
/// The table comes from the first sheet that is not `Metadata`. Rows
/// without a usable insertion order, including every row of a file that
/// has no order column, are numbered after the highest known order in
/// file order.
pub fn workbook_to_session(name: &str, workbook: &Workbook) -> Session {
    let table = workbook
        .sheets()
        .find(|s| !s.name().eq_ignore_ascii_case(METADATA_SHEET))
        .map(sheet_to_table)
        .unwrap_or_default();

    let metadata = workbook
        .sheet_by_name(METADATA_SHEET)
        .map(sheet_to_metadata);

    Session {
        name: name.to_string(),
        table,
        metadata,
    }
}

fn table_to_sheet(table: &Table) -> Result<Sheet> {
    let mut sheet = Sheet::new(DATA_SHEET)?;

    if let Some(column) = table.columns().iter().find(|c| *c == ORDER_COLUMN) {
        return Err(CoreError::InvalidColumnName(format!("'{}' is reserved", column)).into());
    }

    let mut header: Vec<CellValue> = table.columns().iter().map(|c| c.as_str().into()).collect();
    header.push(ORDER_COLUMN.into());
    sheet.push_row(header)?;

    for row in table.rows() {
        let mut cells: Vec<CellValue> = table.row_values(row).into_iter().cloned().collect();
        cells.push(CellValue::Number(row.order() as f64));
        sheet.push_row(cells)?;
    }

    Ok(sheet)
}

fn sheet_to_table(sheet: &Sheet) -> Table {
    let header = sheet.row(0);

    let mut columns: Vec<(usize, String)> = Vec::new();
    let mut order_index = None;
    for (idx, cell) in header.iter().enumerate() {
        let name = cell.to_string();
        if name.is_empty() {
            continue;
        }
        if name == ORDER_COLUMN {
            order_index = Some(idx);
        } else if columns.iter().any(|(_, c)| *c == name) {
            log::warn!("sheet '{}': duplicate column '{}' ignored", sheet.name(), name);
        } else {
            columns.push((idx, name));
        }
    }

    let mut rows = Vec::new();
    for r in 1..sheet.row_count() {
        let cells = sheet.row(r);
        let mut row = Row::new();
        for (idx, name) in &columns {
            if let Some(value) = cells.get(*idx) {
                row.set(name.as_str(), value.clone());
            }
        }
        if row.is_empty() {
            continue;
        }

        let order = order_index
            .and_then(|idx| cells.get(idx))
            .and_then(CellValue::as_number)
            .filter(|n| n.fract() == 0.0 && *n >= 1.0)
            .map_or(0, |n| n as u64);
        rows.push(row.with_order(order));
    }

    // Explicit orders first so rows without one are numbered past all of them
    let (ordered, unordered): (Vec<Row>, Vec<Row>) =
        rows.into_iter().partition(|row| row.order() != 0);
    let columns = columns.into_iter().map(|(_, name)| name).collect();
    Table::from_rows(columns, ordered.into_iter().chain(unordered).collect())
}

fn sheet_to_metadata(sheet: &Sheet) -> SessionMetadata {
    let header = sheet.row(0);
    let column = |name: &str, fallback: usize| {
        header
            .iter()
            .position(|cell| cell.to_string() == name)
            .unwrap_or(fallback)
    };
    let values = sheet.row(1);
    let text = |idx: usize| values.get(idx).map(CellValue::to_string).unwrap_or_default();

    SessionMetadata {
        last_formula: text(column(LAST_FORMULA_COLUMN, 0)),
        last_inputs: text(column(LAST_INPUTS_COLUMN, 1)),
    }
}

/// Empty text is stored as an empty cell
fn text_cell(text: &str) -> CellValue {
    if text.is_empty() {
        CellValue::Empty
    } else {
        CellValue::String(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_table() -> Table {
        let mut table = Table::new();
        table.push_row(
            Row::new()
                .with("distance", 10.0)
                .with("time", 2.0)
                .with("speed", 5.0),
        );
        table.push_row(Row::new().with("r", 2.0).with("area", 12.5));
        table
    }

    #[test]
    fn test_layout() {
        let session = Session::new("trip")
            .with_table(sample_table())
            .with_metadata(SessionMetadata::new("area = pi * r**2", ""));
        let wb = session_to_workbook(&session).unwrap();

        assert_eq!(wb.sheet_names(), vec![DATA_SHEET, METADATA_SHEET]);

        let data = wb.sheet(0).unwrap();
        assert_eq!(
            data.row(0),
            &[
                CellValue::from("distance"),
                CellValue::from("time"),
                CellValue::from("speed"),
                CellValue::from("r"),
                CellValue::from("area"),
                CellValue::from("Insertion Order"),
            ]
        );
        assert_eq!(data.get_value("F2").unwrap(), &CellValue::Number(1.0));
        assert_eq!(data.get_value("A3").unwrap(), &CellValue::Empty);
        assert_eq!(data.get_value("F3").unwrap(), &CellValue::Number(2.0));

        let meta = wb.sheet(1).unwrap();
        assert_eq!(meta.get_value("A2").unwrap(), &CellValue::from("area = pi * r**2"));
        assert_eq!(meta.get_value("B2").unwrap(), &CellValue::Empty);
    }

    #[test]
    fn test_no_metadata_sheet_until_set() {
        let wb = session_to_workbook(&Session::new("trip")).unwrap();
        assert_eq!(wb.sheet_names(), vec![DATA_SHEET]);
        assert_eq!(wb.sheet(0).unwrap().row(0), &[CellValue::from(ORDER_COLUMN)]);
    }

    #[test]
    fn test_workbook_roundtrip() {
        let session = Session::new("trip")
            .with_table(sample_table())
            .with_metadata(SessionMetadata::new("area = pi * r**2", "{'r': 2}"));
        let wb = session_to_workbook(&session).unwrap();

        assert_eq!(workbook_to_session("trip", &wb), session);
    }

    #[test]
    fn test_legacy_sheet_without_order_column() {
        let mut wb = Workbook::new();
        let idx = wb.add_sheet_with_name(DATA_SHEET).unwrap();
        let sheet = wb.sheet_mut(idx).unwrap();
        sheet.push_row(vec!["x".into(), "y".into()]).unwrap();
        sheet.push_row(vec![CellValue::Number(1.0), CellValue::Number(2.0)]).unwrap();
        sheet.push_row(vec![CellValue::Number(3.0), CellValue::Number(6.0)]).unwrap();

        let session = workbook_to_session("old", &wb);

        let orders: Vec<u64> = session.table.rows().iter().map(Row::order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert_eq!(session.table.rows()[1].get("y"), Some(&CellValue::Number(6.0)));
        assert_eq!(session.metadata, None);
    }

    #[test]
    fn test_rows_missing_an_order_go_after_ordered_rows() {
        let mut wb = Workbook::new();
        let idx = wb.add_sheet_with_name(DATA_SHEET).unwrap();
        let sheet = wb.sheet_mut(idx).unwrap();
        sheet
            .push_row(vec!["x".into(), ORDER_COLUMN.into()])
            .unwrap();
        sheet.push_row(vec![CellValue::Number(1.0), CellValue::Empty]).unwrap();
        sheet
            .push_row(vec![CellValue::Number(2.0), CellValue::Number(4.0)])
            .unwrap();

        let table = workbook_to_session("mixed", &wb).table;

        let orders: Vec<u64> = table.rows().iter().map(Row::order).collect();
        assert_eq!(orders, vec![4, 5]);
        assert_eq!(table.rows()[1].get("x"), Some(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_reserved_column_rejected() {
        let mut table = Table::new();
        table.push_row(Row::new().with(ORDER_COLUMN, 1.0));
        assert!(session_to_workbook(&Session::new("bad").with_table(table)).is_err());
    }
}
