//! Prelude module - common imports for calcbook users
//!
//! ```rust
//! use calcbook::prelude::*;
//! ```

pub use crate::{
    // Calculation
    evaluate,
    merge_row,
    parse_bindings,
    // Cell and table types
    CellValue,
    // I/O
    CsvWriteOptions,
    // Error types
    Error,
    Evaluation,
    Outcome,
    Result,
    Row,
    // Sessions
    Session,
    SessionMetadata,
    SessionStore,
    StoreOptions,
    Table,
};
