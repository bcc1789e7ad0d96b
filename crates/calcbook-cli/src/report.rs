//! Rendering sessions for the terminal

use calcbook::{CellValue, Session};
use serde::Serialize;

/// Column heading for the insertion order
const ORDER_HEADING: &str = "#";

/// JSON view of a session
#[derive(Debug, Serialize)]
pub struct SessionReport<'a> {
    pub name: &'a str,
    pub last_formula: Option<&'a str>,
    pub last_inputs: Option<&'a str>,
    pub columns: &'a [String],
    /// Most recent first
    pub rows: Vec<RowReport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct RowReport<'a> {
    pub order: u64,
    /// Aligned with `columns`; `null` where the row has no value
    pub values: Vec<&'a CellValue>,
}

impl<'a> SessionReport<'a> {
    pub fn new(session: &'a Session) -> Self {
        let table = &session.table;
        Self {
            name: &session.name,
            last_formula: session.metadata.as_ref().map(|m| m.last_formula.as_str()),
            last_inputs: session.metadata.as_ref().map(|m| m.last_inputs.as_str()),
            columns: table.columns(),
            rows: table
                .display_rows()
                .map(|row| RowReport {
                    order: row.order(),
                    values: table.row_values(row),
                })
                .collect(),
        }
    }
}

/// Plain-text view: header lines, then an aligned table
pub fn render_text(session: &Session) -> String {
    let mut out = format!("Session: {}\n", session.name);
    if let Some(metadata) = &session.metadata {
        out.push_str(&format!("Last formula: {}\n", metadata.last_formula));
        out.push_str(&format!("Last inputs: {}\n", metadata.last_inputs));
    }

    let table = &session.table;
    if table.is_empty() {
        out.push_str("(no calculations yet)\n");
        return out;
    }

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(table.len() + 1);
    grid.push(
        std::iter::once(ORDER_HEADING.to_string())
            .chain(table.columns().iter().cloned())
            .collect(),
    );
    for row in table.display_rows() {
        grid.push(
            std::iter::once(row.order().to_string())
                .chain(table.row_values(row).into_iter().map(CellValue::to_string))
                .collect(),
        );
    }

    let mut widths = vec![0; grid[0].len()];
    for line in &grid {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    out.push('\n');
    for line in &grid {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}
