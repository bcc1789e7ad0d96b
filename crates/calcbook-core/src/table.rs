//! Session tables
//!
//! A [`Table`] is the calculation history of a session: an ordered list of
//! [`Row`]s whose columns are the union of every row's columns, in the order
//! they first appeared. Each row carries an insertion order; rows are kept
//! sorted by it ascending, and [`Table::display_rows`] yields them most recent
//! first.

use crate::cell::CellValue;

/// One row of a session table
///
/// Cells keep the order in which they were set, which decides where new
/// columns land when the row is added to a table. Absent columns are simply
/// not stored; setting a cell to [`CellValue::Empty`] or to an empty string
/// removes it.
#[derive(Debug, Clone, Default)]
pub struct Row {
    order: u64,
    cells: Vec<(String, CellValue)>,
}

impl Row {
    /// Create an empty row with no insertion order assigned
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Row::set`]
    pub fn with<S: Into<String>, V: Into<CellValue>>(mut self, column: S, value: V) -> Self {
        self.set(column, value);
        self
    }

    /// Builder-style insertion order
    pub fn with_order(mut self, order: u64) -> Self {
        self.order = order;
        self
    }

    /// Set a cell, replacing any previous value for the column
    ///
    /// An empty value or empty string clears the cell instead.
    pub fn set<S: Into<String>, V: Into<CellValue>>(&mut self, column: S, value: V) {
        let column = column.into();
        let value = value.into();
        let absent = value.is_empty() || matches!(&value, CellValue::String(s) if s.is_empty());
        let existing = self.cells.iter().position(|(c, _)| *c == column);
        match (existing, absent) {
            (Some(idx), true) => {
                self.cells.remove(idx);
            }
            (Some(idx), false) => self.cells[idx].1 = value,
            (None, true) => {}
            (None, false) => self.cells.push((column, value)),
        }
    }

    /// Get a cell value, `None` if the row has no entry for the column
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    /// Insertion order (0 until the row is added to a table)
    pub fn order(&self) -> u64 {
        self.order
    }

    /// Column names in the order they were set
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    /// Cells in the order they were set
    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// Equality ignores the order in which cells were set.
impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
            && self.cells.len() == other.cells.len()
            && self.cells.iter().all(|(c, v)| other.get(c) == Some(v))
    }
}

/// The calculation history of a session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a column list and rows in any order
    ///
    /// Columns used by rows but missing from `columns` are appended in
    /// first-appearance order. Rows without an insertion order are numbered
    /// after the highest existing one, in the order given.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut table = Self::new();
        for column in columns {
            table.add_column(column);
        }
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Column names in first-appearance order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows sorted by insertion order, oldest first
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Rows sorted by insertion order, most recent first
    pub fn display_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().rev()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Register a column; returns `false` if it already existed
    pub fn add_column<S: Into<String>>(&mut self, column: S) -> bool {
        let column = column.into();
        if self.columns.contains(&column) {
            return false;
        }
        self.columns.push(column);
        true
    }

    /// Highest insertion order in the table, 0 when empty
    pub fn max_order(&self) -> u64 {
        self.rows.last().map_or(0, Row::order)
    }

    /// Insertion order the next appended row receives
    pub fn next_order(&self) -> u64 {
        self.max_order() + 1
    }

    /// Add a row, registering any new columns
    ///
    /// A row whose order is 0 receives [`Table::next_order`]. Rows are kept
    /// sorted by order; rows sharing an order keep their arrival sequence.
    pub fn push_row(&mut self, mut row: Row) {
        for column in row.columns() {
            if !self.columns.iter().any(|c| c == column) {
                self.columns.push(column.to_string());
            }
        }
        if row.order == 0 {
            row.order = self.next_order();
        }
        let idx = self.rows.partition_point(|r| r.order <= row.order);
        self.rows.insert(idx, row);
    }

    /// Values of a row aligned with [`Table::columns`], `Empty` where absent
    pub fn row_values<'a>(&'a self, row: &'a Row) -> Vec<&'a CellValue> {
        static EMPTY: CellValue = CellValue::Empty;
        self.columns
            .iter()
            .map(|c| row.get(c).unwrap_or(&EMPTY))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_row_set_replaces_and_removes() {
        let mut row = Row::new().with("x", 1.0).with("y", 2.0);
        row.set("x", 5.0);
        row.set("y", CellValue::Empty);

        assert_eq!(row.get("x"), Some(&CellValue::Number(5.0)));
        assert_eq!(row.get("y"), None);
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn test_row_empty_string_is_absent() {
        let mut row = Row::new().with("x", 1.0).with("note", "");
        assert_eq!(row.get("note"), None);
        assert_eq!(row, Row::new().with("x", 1.0));

        row.set("x", "");
        assert!(row.is_empty());
    }

    #[test]
    fn test_row_equality_ignores_cell_order() {
        let a = Row::new().with("x", 1.0).with("y", 2.0);
        let b = Row::new().with("y", 2.0).with("x", 1.0);
        assert_eq!(a, b);
        assert_ne!(a.clone().with_order(1), b.with_order(2));
    }

    #[test]
    fn test_push_row_assigns_orders_and_columns() {
        let mut table = Table::new();
        table.push_row(Row::new().with("a", 1.0).with("b", 2.0));
        table.push_row(Row::new().with("c", 3.0).with("a", 4.0));

        assert_eq!(table.columns(), &["a", "b", "c"]);
        let orders: Vec<u64> = table.rows().iter().map(Row::order).collect();
        assert_eq!(orders, vec![1, 2]);
        assert_eq!(table.next_order(), 3);
    }

    #[test]
    fn test_from_rows_sorts_by_order() {
        let table = Table::from_rows(
            vec!["x".into()],
            vec![
                Row::new().with("x", 30.0).with_order(3),
                Row::new().with("x", 10.0).with_order(1),
                Row::new().with("x", 20.0).with_order(2),
            ],
        );

        let display: Vec<u64> = table.display_rows().map(Row::order).collect();
        assert_eq!(display, vec![3, 2, 1]);
    }

    #[test]
    fn test_row_values_aligned() {
        let mut table = Table::new();
        table.push_row(Row::new().with("x", 1.0));
        table.push_row(Row::new().with("y", 2.0));

        let last = &table.rows()[1];
        assert_eq!(
            table.row_values(last),
            vec![&CellValue::Empty, &CellValue::Number(2.0)]
        );
    }
}
