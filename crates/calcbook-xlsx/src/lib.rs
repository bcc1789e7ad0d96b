//! # calcbook-xlsx
//!
//! XLSX (Office Open XML) reader and writer for calcbook workbooks.
//!
//! Only cell values are carried: numbers, booleans and text. Text is written
//! as inline strings; the reader also accepts the shared-string table that
//! other producers use.

pub mod error;
pub mod reader;
pub mod writer;

mod escape;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
