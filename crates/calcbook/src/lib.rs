//! # calcbook
//!
//! A session-scoped formula calculator.
//!
//! Formulas are `name = expression` equations over named variables. Each
//! successful calculation appends a row (the variables' inputs and the
//! result) to the session's history table, which lives in an XLSX file per
//! session together with the last formula and inputs submitted.
//!
//! ## Features
//!
//! - Safe expression parsing: arithmetic, powers, constants and elementary
//!   functions, never general code evaluation
//! - Strict `{name: number}` input bindings
//! - Per-session history with stable insertion order, shown most recent first
//! - Single-writer locking and atomic saves for session files
//! - CSV export
//!
//! ## Example
//!
//! ```rust
//! use calcbook::prelude::*;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let store = SessionStore::open(dir.path());
//!
//! store.create("trip").unwrap();
//! let eval = store
//!     .calculate("trip", "Speed = Distance / Time", r#"{"distance": 10, "time": 2}"#)
//!     .unwrap();
//! assert_eq!(eval.result, 5.0);
//!
//! let session = store.load("trip");
//! assert_eq!(session.table.len(), 1);
//! assert_eq!(session.last_formula(), "Speed = Distance / Time");
//! ```

pub mod bindings;
pub mod error;
pub mod evaluation;
pub mod merge;
pub mod outcome;
pub mod prelude;
pub mod store;

pub use bindings::{parse_bindings, Bindings};
pub use error::{Error, Result};
pub use evaluation::{evaluate, Evaluation};
pub use merge::merge_row;
pub use outcome::{Outcome, SUCCESS_MESSAGE};
pub use store::{
    validate_session_name, Session, SessionMetadata, SessionStore, StoreOptions,
    DEFAULT_LOCK_STALE_AFTER, DEFAULT_SESSIONS_DIR,
};

// Re-export core types
pub use calcbook_core::{CellAddress, CellValue, Row, Sheet, Table, Workbook};

// Re-export formula types
pub use calcbook_formula::{
    free_variables, parse_equation, parse_expression, Equation, EvaluationContext, FormulaError,
    FormulaExpr,
};

// Re-export I/O types
pub use calcbook_csv::{CsvError, CsvWriteOptions, CsvWriter, LineTerminator};
pub use calcbook_xlsx::{XlsxError, XlsxReader, XlsxWriter};
