//! Front-end result of a submitted calculation

use calcbook_core::Table;

use crate::error::{Error, Result};
use crate::evaluation::Evaluation;

/// Status message shown after a successful calculation
pub const SUCCESS_MESSAGE: &str = "Calculation successful!";

/// What a front end shows after a submission: a message, a flag, and the
/// updated table when there is one
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    pub table: Option<Table>,
}

impl Outcome {
    /// A successful submission showing `table`
    pub fn success(table: Table) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            table: Some(table),
        }
    }

    /// A failed submission; the message is the error's display text
    pub fn failure(error: &Error) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            table: None,
        }
    }
}

impl From<Result<Evaluation>> for Outcome {
    fn from(result: Result<Evaluation>) -> Self {
        match result {
            Ok(evaluation) => Outcome::success(evaluation.table),
            Err(e) => Outcome::failure(&e),
        }
    }
}
