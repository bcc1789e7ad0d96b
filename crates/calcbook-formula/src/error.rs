//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// The `name = expression` shape is wrong
    #[error("Malformed formula: {0}")]
    Malformed(String),

    /// Expression parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric evaluation error (division by zero, domain errors, overflow)
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Unknown function
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Variable with no value in the evaluation context
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),
}
