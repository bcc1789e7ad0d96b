//! Sheet type - a named grid of cells

use crate::cell::{CellAddress, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN};

static EMPTY: CellValue = CellValue::Empty;

/// A single sheet in a workbook
///
/// Cells are stored row-major. Rows grow on demand and may be ragged;
/// reading past the end of a row yields [`CellValue::Empty`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create an empty sheet, validating the name
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        validate_sheet_name(&name)?;
        Ok(Self {
            name,
            rows: Vec::new(),
        })
    }

    /// The sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows (including trailing rows that only hold empty cells)
    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    /// Width of the widest row
    pub fn column_count(&self) -> u16 {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0) as u16
    }

    /// Check if the sheet holds no values at all
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|r| r.iter().all(CellValue::is_empty))
    }

    /// Get a cell value by 0-based indices
    pub fn get_value_at(&self, row: u32, col: u16) -> &CellValue {
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .unwrap_or(&EMPTY)
    }

    /// Get a cell value by A1 address
    pub fn get_value(&self, address: &str) -> Result<&CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    /// Set a cell value by 0-based indices
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }

        let (row, col) = (row as usize, col as usize);
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize_with(col + 1, CellValue::default);
        }
        cells[col] = value.into();
        Ok(())
    }

    /// Set a cell value by A1 address
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_value_at(addr.row, addr.col, value)
    }

    /// Append a full row after the last existing row
    pub fn push_row(&mut self, cells: Vec<CellValue>) -> Result<()> {
        if self.rows.len() as u32 >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(self.rows.len() as u32, MAX_ROWS - 1));
        }
        if cells.len() > MAX_COLS as usize {
            return Err(Error::ColumnOutOfBounds(cells.len() as u16, MAX_COLS - 1));
        }
        self.rows.push(cells);
        Ok(())
    }

    /// The cells of one row, or an empty slice past the end
    pub fn row(&self, row: u32) -> &[CellValue] {
        self.rows.get(row as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over all non-empty cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellValue)> {
        self.rows.iter().enumerate().flat_map(|(r, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, v)| !v.is_empty())
                .map(move |(c, v)| (r as u32, c as u16, v))
        })
    }
}

/// Validate a sheet name the way spreadsheet applications do
pub(crate) fn validate_sheet_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(Error::InvalidSheetName(format!(
            "Sheet name too long (max {} characters)",
            MAX_SHEET_NAME_LEN
        )));
    }

    const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
    for c in INVALID_CHARS {
        if name.contains(*c) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut sheet = Sheet::new("Sheet1").unwrap();
        sheet.set_value("B2", 42.0).unwrap();
        sheet.set_value_at(0, 0, "header").unwrap();

        assert_eq!(sheet.get_value("B2").unwrap(), &CellValue::Number(42.0));
        assert_eq!(sheet.get_value_at(0, 0), &CellValue::string("header"));
        assert_eq!(sheet.get_value_at(5, 5), &CellValue::Empty);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.column_count(), 2);
    }

    #[test]
    fn test_iter_cells_skips_empty() {
        let mut sheet = Sheet::new("Data").unwrap();
        sheet
            .push_row(vec![CellValue::Number(1.0), CellValue::Empty, CellValue::Number(3.0)])
            .unwrap();

        let cells: Vec<_> = sheet.iter_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 2)]);
    }

    #[test]
    fn test_invalid_names() {
        assert!(Sheet::new("").is_err());
        assert!(Sheet::new("a/b").is_err());
        assert!(Sheet::new("x".repeat(32)).is_err());
        assert!(Sheet::new("Metadata").is_ok());
    }
}
