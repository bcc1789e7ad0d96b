//! Session persistence
//!
//! Each session is one XLSX file, `<sessions_dir>/<name>.xlsx`. Nothing is
//! cached between calls: every operation reads the directory or the file it
//! needs. Writes go to a temporary file in the same directory that is then
//! renamed over the target, and calculations hold a per-session lock file for
//! their whole load-modify-save cycle.

mod codec;
mod lock;
mod names;
mod options;
mod session;

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use calcbook_core::Table;
use calcbook_csv::{CsvWriteOptions, CsvWriter};
use calcbook_xlsx::{XlsxReader, XlsxWriter};

use crate::error::{Error, Result};
use crate::evaluation::{evaluate, Evaluation};
use crate::outcome::Outcome;

pub use codec::{
    DATA_SHEET, LAST_FORMULA_COLUMN, LAST_INPUTS_COLUMN, METADATA_SHEET, ORDER_COLUMN,
};
pub use lock::SessionLock;
pub use names::validate_session_name;
pub use options::{StoreOptions, DEFAULT_LOCK_STALE_AFTER, DEFAULT_SESSIONS_DIR};
pub use session::{Session, SessionMetadata};

/// Session file extension
const EXTENSION: &str = "xlsx";

/// Directory-backed session store
#[derive(Debug, Clone)]
pub struct SessionStore {
    options: StoreOptions,
}

impl SessionStore {
    /// Create a store; the directory is created on first write
    pub fn new(options: StoreOptions) -> Self {
        Self { options }
    }

    /// Create a store over `dir` with default options otherwise
    pub fn open<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(StoreOptions::default().with_sessions_dir(dir))
    }

    /// The store's options
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Path of the file backing session `name`
    pub fn session_path(&self, name: &str) -> PathBuf {
        self.options
            .sessions_dir
            .join(format!("{}.{}", name, EXTENSION))
    }

    fn lock_path(&self, name: &str) -> PathBuf {
        self.options
            .sessions_dir
            .join(format!("{}.{}.lock", name, EXTENSION))
    }

    /// Check whether session `name` exists
    pub fn exists(&self, name: &str) -> bool {
        validate_session_name(name).is_ok() && self.session_path(name).is_file()
    }

    /// Names of all sessions in the directory, sorted
    ///
    /// A missing directory has no sessions. Temporary files, lock files and
    /// files whose stem is not a valid session name are skipped.
    pub fn list_sessions(&self) -> Result<BTreeSet<String>> {
        let entries = match fs::read_dir(&self.options.sessions_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_session_name(stem).is_ok() {
                    names.insert(stem.to_string());
                }
            }
        }
        Ok(names)
    }

    /// Load a session for display
    ///
    /// Never fails: a missing file gives an empty session, and an unreadable
    /// one is logged and treated as empty too.
    pub fn load(&self, name: &str) -> Session {
        match self.try_load(name) {
            Ok(session) => session,
            Err(e) => {
                log::warn!("could not load session '{}': {}", name, e);
                Session::new(name)
            }
        }
    }

    /// Load a session, reporting unreadable files
    ///
    /// A missing file still gives an empty session.
    pub fn try_load(&self, name: &str) -> Result<Session> {
        validate_session_name(name)?;
        let path = self.session_path(name);
        if !path.exists() {
            return Ok(Session::new(name));
        }

        let workbook = XlsxReader::read_file(&path)?;
        let session = codec::workbook_to_session(name, &workbook);
        log::debug!(
            "loaded session '{}' ({} rows)",
            name,
            session.table.len()
        );
        Ok(session)
    }

    /// Persist a session, replacing its file atomically
    ///
    /// Fails with [`Error::SessionBusy`] while a calculation on the same
    /// session is in progress.
    pub fn save(&self, session: &Session) -> Result<()> {
        validate_session_name(&session.name)?;
        let _lock = self.lock(&session.name)?;
        self.write_session(session)
    }

    /// Create an empty session
    pub fn create(&self, name: &str) -> Result<Session> {
        validate_session_name(name)?;
        let _lock = self.lock(name)?;

        if self.session_path(name).exists() {
            return Err(Error::DuplicateSession(name.to_string()));
        }

        let session = Session::new(name);
        self.write_session(&session)?;
        log::info!("created session '{}'", name);
        Ok(session)
    }

    /// Rename a session by moving its file
    ///
    /// Checks run in order: same name, target exists, source missing.
    pub fn rename(&self, old: &str, new: &str) -> Result<()> {
        validate_session_name(old)?;
        validate_session_name(new)?;
        if old == new {
            return Err(Error::SameName(new.to_string()));
        }
        if self.session_path(new).exists() {
            return Err(Error::DuplicateSession(new.to_string()));
        }
        if !self.session_path(old).exists() {
            return Err(Error::NoSuchSession(old.to_string()));
        }

        let _old_lock = self.lock(old)?;
        let _new_lock = self.lock(new)?;

        // Re-check under the locks; rename would silently replace the target
        if self.session_path(new).exists() {
            return Err(Error::DuplicateSession(new.to_string()));
        }
        fs::rename(self.session_path(old), self.session_path(new)).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::NoSuchSession(old.to_string())
            } else {
                e.into()
            }
        })?;

        log::info!("renamed session '{}' to '{}'", old, new);
        Ok(())
    }

    /// Evaluate a formula in session `name` and persist the new row
    ///
    /// The session must exist. Its table and metadata are only rewritten
    /// when the calculation succeeds.
    pub fn calculate(&self, name: &str, formula: &str, inputs: &str) -> Result<Evaluation> {
        validate_session_name(name)?;
        let _lock = self.lock(name)?;

        if !self.session_path(name).exists() {
            return Err(Error::NoSuchSession(name.to_string()));
        }

        let session = self.try_load(name)?;
        let evaluation = evaluate(formula, inputs, &session.table)?;

        let updated = Session {
            name: session.name,
            table: evaluation.table.clone(),
            metadata: Some(SessionMetadata::new(formula, inputs)),
        };
        self.write_session(&updated)?;

        log::info!(
            "session '{}': {} = {}",
            name,
            evaluation.result_name,
            evaluation.result
        );
        Ok(evaluation)
    }

    /// Write a session's table, most recent row first, to a CSV file
    pub fn export_csv<P: AsRef<Path>>(
        &self,
        name: &str,
        path: P,
        options: &CsvWriteOptions,
    ) -> Result<Table> {
        validate_session_name(name)?;
        if !self.session_path(name).exists() {
            return Err(Error::NoSuchSession(name.to_string()));
        }

        let session = self.try_load(name)?;
        CsvWriter::write_file(&session.table, path.as_ref(), options)?;
        log::info!(
            "exported session '{}' to {}",
            name,
            path.as_ref().display()
        );
        Ok(session.table)
    }

    /// Run [`calculate`](Self::calculate) and report the result the way a
    /// front end shows it
    pub fn submit(&self, name: &str, formula: &str, inputs: &str) -> Outcome {
        let result = self.calculate(name, formula, inputs);
        if let Err(e) = &result {
            log::debug!("session '{}': calculation failed: {}", name, e);
        }
        Outcome::from(result)
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.options.sessions_dir)?;
        Ok(())
    }

    fn lock(&self, name: &str) -> Result<SessionLock> {
        self.ensure_dir()?;
        SessionLock::acquire(&self.lock_path(name), name, self.options.lock_stale_after)
    }

    /// Atomic replace: temp file in the same directory, then rename
    fn write_session(&self, session: &Session) -> Result<()> {
        let workbook = codec::session_to_workbook(session)?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&self.options.sessions_dir)?;
        XlsxWriter::write(&workbook, tmp.as_file_mut())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.session_path(&session.name))
            .map_err(|e| e.error)?;

        log::debug!(
            "saved session '{}' ({} rows)",
            session.name,
            session.table.len()
        );
        Ok(())
    }
}
