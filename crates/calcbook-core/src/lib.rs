//! # calcbook-core
//!
//! Core data structures for calcbook.
//!
//! This crate provides the fundamental types used throughout calcbook:
//! - [`CellValue`] - Represents cell values (numbers, strings, booleans)
//! - [`CellAddress`] - A1-style cell addressing
//! - [`Sheet`], [`Workbook`] - The cell-level document structures persisted to disk
//! - [`Table`], [`Row`] - The column-oriented calculation history of a session
//!
//! ## Example
//!
//! ```rust
//! use calcbook_core::{CellValue, Row, Table};
//!
//! let mut table = Table::new();
//! let row = Row::new()
//!     .with("distance", 10.0)
//!     .with("time", 2.0)
//!     .with("speed", 5.0);
//! table.push_row(row);
//!
//! assert_eq!(table.columns(), &["distance", "time", "speed"]);
//! assert_eq!(table.rows()[0].get("speed"), Some(&CellValue::Number(5.0)));
//! ```

pub mod cell;
pub mod error;
pub mod sheet;
pub mod table;
pub mod workbook;

// Re-exports for convenience
pub use cell::{CellAddress, CellValue};
pub use error::{Error, Result};
pub use sheet::Sheet;
pub use table::{Row, Table};
pub use workbook::Workbook;

/// Maximum number of rows in a sheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a sheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
