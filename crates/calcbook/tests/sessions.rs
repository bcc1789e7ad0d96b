//! Session file handling: persistence, listing, renaming, locking, export

use std::fs;
use std::time::Duration;

use calcbook::prelude::*;
use calcbook::{LineTerminator, Workbook, XlsxWriter};
use pretty_assertions::assert_eq;

fn scratch() -> (tempfile::TempDir, SessionStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::open(dir.path().join("sessions"));
    (dir, store)
}

fn names(store: &SessionStore) -> Vec<String> {
    store.list_sessions().unwrap().into_iter().collect()
}

#[test]
fn test_save_load_roundtrip() {
    let (_dir, store) = scratch();

    let mut table = Table::new();
    table.push_row(Row::new().with("x", 1.5).with("y", 3.0));
    table.push_row(Row::new().with("note", "  padded  ").with("flag", true));
    table.push_row(Row::new().with("x", -2.0).with("note", ""));
    let session = Session::new("roundtrip")
        .with_table(table)
        .with_metadata(SessionMetadata::new("y = 2 * x", "{'x': 1.5}"));

    store.save(&session).unwrap();

    assert_eq!(store.try_load("roundtrip").unwrap(), session);
}

#[test]
fn test_metadata_written_even_when_inputs_empty() {
    let (_dir, store) = scratch();
    store.create("consts").unwrap();

    store.calculate("consts", "tau = 2 * pi", "").unwrap();

    let session = store.load("consts");
    assert_eq!(session.last_formula(), "tau = 2 * pi");
    assert_eq!(session.last_inputs(), "");
    assert!(session.metadata.is_some());
}

#[test]
fn test_load_missing_session_is_empty() {
    let (_dir, store) = scratch();

    let session = store.load("nothing");

    assert_eq!(session, Session::new("nothing"));
    assert!(!store.exists("nothing"));
}

#[test]
fn test_unreadable_file() {
    let (_dir, store) = scratch();
    store.create("broken").unwrap();
    fs::write(store.session_path("broken"), b"not a zip archive").unwrap();

    assert!(matches!(store.try_load("broken"), Err(Error::Storage(_))));
    assert!(store.load("broken").table.is_empty());
    assert!(matches!(
        store.calculate("broken", "y = 1", ""),
        Err(Error::Storage(_))
    ));
    assert_eq!(
        fs::read(store.session_path("broken")).unwrap(),
        b"not a zip archive"
    );
}

#[test]
fn test_listing_after_create_and_rename() {
    let (_dir, store) = scratch();
    assert!(names(&store).is_empty());

    store.create("beta").unwrap();
    store.create("alpha").unwrap();
    assert_eq!(names(&store), vec!["alpha", "beta"]);

    store.rename("beta", "gamma").unwrap();
    assert_eq!(names(&store), vec!["alpha", "gamma"]);
}

#[test]
fn test_listing_skips_other_files() {
    let (_dir, store) = scratch();
    store.create("real").unwrap();
    let dir = &store.options().sessions_dir;
    fs::write(dir.join("notes.txt"), "x").unwrap();
    fs::write(dir.join(".half-written.tmp"), "x").unwrap();
    fs::write(dir.join("real.xlsx.lock"), "1").unwrap();
    fs::create_dir(dir.join("folder.xlsx")).unwrap();

    assert_eq!(names(&store), vec!["real"]);
}

#[test]
fn test_rename_keeps_contents() {
    let (_dir, store) = scratch();
    store.create("trip").unwrap();
    store.calculate("trip", "y = x + 1", "{x: 1}").unwrap();
    let before = store.load("trip");

    store.rename("trip", "journey").unwrap();

    let after = store.load("journey");
    assert_eq!(after.table, before.table);
    assert_eq!(after.metadata, before.metadata);
    assert!(!store.exists("trip"));
}

#[test]
fn test_rename_errors() {
    let (_dir, store) = scratch();
    store.create("a").unwrap();
    store.create("b").unwrap();

    assert!(matches!(store.rename("a", "b"), Err(Error::DuplicateSession(n)) if n == "b"));
    assert!(matches!(store.rename("zzz", "c"), Err(Error::NoSuchSession(n)) if n == "zzz"));
    assert!(matches!(
        store.rename("a", "sub/dir"),
        Err(Error::InvalidSessionName { .. })
    ));
    assert_eq!(names(&store), vec!["a", "b"]);
}

#[test]
fn test_busy_session() {
    let (_dir, store) = scratch();
    store.create("trip").unwrap();
    let lock = store.options().sessions_dir.join("trip.xlsx.lock");
    fs::write(&lock, "99999\n").unwrap();
    let before = fs::read(store.session_path("trip")).unwrap();

    let outcome = store.submit("trip", "y = 1", "");

    assert!(!outcome.success);
    assert!(outcome.message.contains("busy"));
    assert_eq!(fs::read(store.session_path("trip")).unwrap(), before);
    assert!(lock.exists());
}

#[test]
fn test_stale_lock_reclaimed() {
    let dir = tempfile::tempdir().unwrap();
    let options = StoreOptions::default()
        .with_sessions_dir(dir.path())
        .with_lock_stale_after(Duration::ZERO);
    let store = SessionStore::new(options);
    store.create("trip").unwrap();
    fs::write(dir.path().join("trip.xlsx.lock"), "99999\n").unwrap();

    store.calculate("trip", "y = 1", "").unwrap();

    assert!(!dir.path().join("trip.xlsx.lock").exists());
    assert_eq!(store.load("trip").table.len(), 1);
}

/// Files written before insertion orders were recorded
#[test]
fn test_legacy_file() {
    let (_dir, store) = scratch();
    fs::create_dir_all(&store.options().sessions_dir).unwrap();

    let mut wb = Workbook::new();
    let idx = wb.add_sheet_with_name("Sheet1").unwrap();
    let sheet = wb.sheet_mut(idx).unwrap();
    sheet.push_row(vec!["a".into(), "b".into()]).unwrap();
    sheet.push_row(vec![CellValue::Number(1.0), CellValue::Number(2.0)]).unwrap();
    sheet.push_row(vec![CellValue::Number(3.0), CellValue::Number(4.0)]).unwrap();
    XlsxWriter::write_file(&wb, store.session_path("legacy")).unwrap();

    let eval = store.calculate("legacy", "c = a * b", "{a: 5, b: 6}").unwrap();

    let orders: Vec<u64> = eval.table.rows().iter().map(Row::order).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert_eq!(eval.table.columns(), &["a", "b", "c"]);
    assert_eq!(store.load("legacy").table, eval.table);
}

#[test]
fn test_export_csv() {
    let (dir, store) = scratch();
    store.create("trip").unwrap();
    store
        .calculate("trip", "speed = distance / time", "{distance: 10, time: 2}")
        .unwrap();
    store.calculate("trip", "area = r * r", "{r: 3}").unwrap();

    let out = dir.path().join("trip.csv");
    let options = CsvWriteOptions {
        line_terminator: LineTerminator::LF,
        ..Default::default()
    };
    store.export_csv("trip", &out, &options).unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "distance,time,speed,r,area\n,,,3,9\n10,2,5,,\n"
    );
    assert!(matches!(
        store.export_csv("nope", &out, &options),
        Err(Error::NoSuchSession(_))
    ));
}
