//! Appending calculation rows to a session table

use calcbook_core::{Row, Table};

/// Append `row` to a copy of `existing`
///
/// Columns are aligned by name: columns the row lacks stay absent in it, and
/// columns new to the table are added after the existing ones. The row's
/// insertion order is replaced with one past the highest in the table;
/// existing orders are left untouched.
pub fn merge_row(existing: &Table, row: Row) -> Table {
    let mut table = existing.clone();
    let order = table.next_order();
    table.push_row(row.with_order(order));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcbook_core::CellValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_merge_into_empty() {
        let table = merge_row(&Table::new(), Row::new().with("x", 1.0).with("y", 2.0));

        assert_eq!(table.columns(), &["x", "y"]);
        assert_eq!(table.rows()[0].order(), 1);
    }

    #[test]
    fn test_merge_is_pure() {
        let mut existing = Table::new();
        existing.push_row(Row::new().with("x", 1.0));
        let before = existing.clone();

        let merged = merge_row(&existing, Row::new().with("y", 2.0));

        assert_eq!(existing, before);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_disjoint_columns() {
        let mut table = Table::new();
        table = merge_row(&table, Row::new().with("distance", 10.0).with("time", 2.0).with("speed", 5.0));
        table = merge_row(&table, Row::new().with("r", 2.0).with("area", 12.5));

        assert_eq!(table.columns(), &["distance", "time", "speed", "r", "area"]);

        let newest = table.display_rows().next().unwrap();
        assert_eq!(newest.order(), 2);
        assert_eq!(
            table.row_values(newest),
            vec![
                &CellValue::Empty,
                &CellValue::Empty,
                &CellValue::Empty,
                &CellValue::Number(2.0),
                &CellValue::Number(12.5),
            ]
        );
    }

    #[test]
    fn test_order_follows_maximum_not_count() {
        // Gaps in stored orders are kept; the new row goes past the highest
        let table = Table::from_rows(
            vec!["x".into()],
            vec![
                Row::new().with("x", 1.0).with_order(3),
                Row::new().with("x", 2.0).with_order(7),
            ],
        );

        let merged = merge_row(&table, Row::new().with("x", 3.0).with_order(1));

        let orders: Vec<u64> = merged.rows().iter().map(Row::order).collect();
        assert_eq!(orders, vec![3, 7, 8]);
    }
}
