//! Workbook type - the document structure persisted to disk

use crate::error::{Error, Result};
use crate::sheet::Sheet;

/// A workbook (spreadsheet document)
///
/// A workbook is an ordered list of uniquely named sheets. Sheet names are
/// compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a workbook with no sheets
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Add a sheet, returning its index
    pub fn add_sheet(&mut self, sheet: Sheet) -> Result<usize> {
        let lower = sheet.name().to_lowercase();
        if self.sheets.iter().any(|s| s.name().to_lowercase() == lower) {
            return Err(Error::DuplicateSheetName(sheet.name().into()));
        }
        self.sheets.push(sheet);
        Ok(self.sheets.len() - 1)
    }

    /// Create and add an empty sheet with the given name
    pub fn add_sheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.add_sheet(Sheet::new(name)?)
    }

    /// Get a sheet by index
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Get a mutable sheet by index
    pub fn sheet_mut(&mut self, index: usize) -> Option<&mut Sheet> {
        self.sheets.get_mut(index)
    }

    /// Find a sheet by name (case-insensitive)
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        let lower = name.to_lowercase();
        self.sheets.iter().find(|s| s.name().to_lowercase() == lower)
    }

    /// Iterate over sheets in order
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Sheet names in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut wb = Workbook::new();
        assert!(wb.is_empty());

        let idx = wb.add_sheet_with_name("Sheet1").unwrap();
        assert_eq!(idx, 0);
        wb.add_sheet_with_name("Metadata").unwrap();

        assert_eq!(wb.sheet_names(), vec!["Sheet1", "Metadata"]);
        assert!(wb.sheet_by_name("metadata").is_some());
        assert!(wb.sheet_by_name("Other").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut wb = Workbook::new();
        wb.add_sheet_with_name("Sheet1").unwrap();
        assert!(matches!(
            wb.add_sheet_with_name("SHEET1"),
            Err(Error::DuplicateSheetName(_))
        ));
    }
}
