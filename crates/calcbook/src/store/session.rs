//! Session entity

use calcbook_core::Table;

/// The last formula and inputs submitted to a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionMetadata {
    /// Formula text exactly as submitted
    pub last_formula: String,
    /// Input bindings text exactly as submitted
    pub last_inputs: String,
}

impl SessionMetadata {
    /// Create a metadata record
    pub fn new<F: Into<String>, I: Into<String>>(last_formula: F, last_inputs: I) -> Self {
        Self {
            last_formula: last_formula.into(),
            last_inputs: last_inputs.into(),
        }
    }
}

/// A named session: its calculation history and last submission
///
/// `metadata` is `None` until the session has had a successful calculation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// Session name (the file stem)
    pub name: String,
    /// Calculation history
    pub table: Table,
    /// Last formula and inputs
    pub metadata: Option<SessionMetadata>,
}

impl Session {
    /// An empty session with no metadata
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style table
    pub fn with_table(mut self, table: Table) -> Self {
        self.table = table;
        self
    }

    /// Builder-style metadata
    pub fn with_metadata(mut self, metadata: SessionMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Last formula, empty when none was recorded
    pub fn last_formula(&self) -> &str {
        self.metadata.as_ref().map_or("", |m| m.last_formula.as_str())
    }

    /// Last inputs, empty when none were recorded
    pub fn last_inputs(&self) -> &str {
        self.metadata.as_ref().map_or("", |m| m.last_inputs.as_str())
    }
}
