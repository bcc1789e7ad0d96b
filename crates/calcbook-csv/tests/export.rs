//! Export to files on disk

use calcbook_core::{Row, Table};
use calcbook_csv::{CsvWriteOptions, CsvWriter};
use pretty_assertions::assert_eq;

#[test]
fn test_write_file_with_text_and_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trip.csv");

    let table = Table::from_rows(
        vec!["distance".into(), "time".into(), "speed".into()],
        vec![
            Row::new()
                .with("distance", 10.0)
                .with("time", 2.0)
                .with("speed", 5.0)
                .with_order(1),
            Row::new()
                .with("r", 2.0)
                .with("area", 12.566370614359172)
                .with_order(2),
        ],
    );

    CsvWriter::write_file(&table, &path, &CsvWriteOptions::default()).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "distance,time,speed,r,area\n\
         ,,,2,12.566370614359172\n\
         10,2,5,,\n"
    );
}
