//! Error types for calcbook

use calcbook_formula::FormulaError;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Everything a calculation or a session operation can fail with
#[derive(Debug, Error)]
pub enum Error {
    /// The formula is not `<name> = <expression>`
    #[error("Malformed formula: {0}")]
    MalformedFormula(String),

    /// The right-hand side does not parse
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The input bindings text is not a `{name: number, ...}` literal
    #[error("Invalid input format: {0}")]
    InvalidInputFormat(String),

    /// Free variables with no input value, in first-appearance order
    #[error("Missing values for: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    /// Numeric failure: division by zero, domain error, non-finite result,
    /// unknown function or wrong argument count
    #[error("Evaluation error: {0}")]
    EvaluationError(String),

    /// A session with this name already exists
    #[error("Session '{0}' already exists")]
    DuplicateSession(String),

    /// Rename to the current name
    #[error("The new name is the same as the current name: '{0}'")]
    SameName(String),

    /// No session with this name exists
    #[error("Session '{0}' does not exist")]
    NoSuchSession(String),

    /// The name cannot be used as a session file stem
    #[error("Invalid session name '{name}': {reason}")]
    InvalidSessionName { name: String, reason: String },

    /// Another writer holds the session lock
    #[error("Session '{0}' is busy: another calculation is in progress")]
    SessionBusy(String),

    /// Reading or writing the session file failed
    #[error("Storage error: {0}")]
    Storage(#[from] calcbook_xlsx::XlsxError),

    /// CSV export failed
    #[error("Export error: {0}")]
    Export(#[from] calcbook_csv::CsvError),

    /// Table/sheet structure error
    #[error("Core error: {0}")]
    Core(#[from] calcbook_core::Error),

    /// Filesystem error outside the file format layer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_session_name<S: Into<String>>(name: &str, reason: S) -> Self {
        Error::InvalidSessionName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<FormulaError> for Error {
    fn from(err: FormulaError) -> Self {
        match err {
            FormulaError::Malformed(msg) => Error::MalformedFormula(msg),
            FormulaError::Parse(msg) => Error::ParseError(msg),
            FormulaError::UnboundVariable(name) => Error::MissingVariables(vec![name]),
            FormulaError::Evaluation(msg) => Error::EvaluationError(msg),
            other @ (FormulaError::UnknownFunction(_) | FormulaError::ArgumentCount { .. }) => {
                Error::EvaluationError(other.to_string())
            }
        }
    }
}
