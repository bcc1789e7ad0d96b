//! Single-writer session locks
//!
//! A writer creates `<name>.xlsx.lock` next to the session file with
//! create-new semantics and removes it when done. A lock whose file is older
//! than the staleness threshold belonged to a writer that died and is taken
//! over.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::error::{Error, Result};

/// Exclusive lock on one session, released on drop
#[derive(Debug)]
pub struct SessionLock {
    path: PathBuf,
}

impl SessionLock {
    /// Take the lock at `path` for session `name`
    ///
    /// Fails with [`Error::SessionBusy`] while another live writer holds it.
    pub fn acquire(path: &Path, name: &str, stale_after: Duration) -> Result<Self> {
        match Self::create(path) {
            Ok(lock) => Ok(lock),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                if !Self::is_stale(path, stale_after) {
                    return Err(Error::SessionBusy(name.to_string()));
                }
                log::warn!(
                    "reclaiming stale lock for session '{}' ({})",
                    name,
                    path.display()
                );
                match fs::remove_file(path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                }
                // Another writer may win the race for the freed lock
                Self::create(path).map_err(|e| match e.kind() {
                    ErrorKind::AlreadyExists => Error::SessionBusy(name.to_string()),
                    _ => e.into(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn create(path: &Path) -> std::io::Result<Self> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)?;
        // The holder's pid, for whoever finds a leftover lock
        writeln!(file, "{}", std::process::id())?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn is_stale(path: &Path, stale_after: Duration) -> bool {
        let modified = match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            // Vanished between the failed create and now: free to take
            Err(_) => return true,
        };
        SystemTime::now()
            .duration_since(modified)
            .map_or(false, |age| age >= stale_after)
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!("failed to release lock {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_is_exclusive_and_released_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.xlsx.lock");
        let stale = Duration::from_secs(60);

        let lock = SessionLock::acquire(&path, "trip", stale).unwrap();
        assert!(path.exists());
        assert!(matches!(
            SessionLock::acquire(&path, "trip", stale),
            Err(Error::SessionBusy(name)) if name == "trip"
        ));

        drop(lock);
        assert!(!path.exists());
        assert!(SessionLock::acquire(&path, "trip", stale).is_ok());
    }

    #[test]
    fn test_stale_lock_is_reclaimed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trip.xlsx.lock");
        fs::write(&path, "12345\n").unwrap();

        // Zero threshold: any existing lock counts as abandoned
        let lock = SessionLock::acquire(&path, "trip", Duration::ZERO).unwrap();
        assert_eq!(lock.path(), path.as_path());
        let pid = fs::read_to_string(&path).unwrap();
        assert_eq!(pid.trim(), std::process::id().to_string());
    }
}
