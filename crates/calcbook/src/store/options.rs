//! Session store configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default directory holding session files
pub const DEFAULT_SESSIONS_DIR: &str = "sessions";

/// Default age after which a leftover lock file is considered abandoned
pub const DEFAULT_LOCK_STALE_AFTER: Duration = Duration::from_secs(30);

/// Options for a [`SessionStore`](super::SessionStore)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Directory holding `<name>.xlsx` files (default: `sessions`)
    pub sessions_dir: PathBuf,
    /// Lock files older than this are reclaimed (default: 30 s)
    pub lock_stale_after: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            sessions_dir: PathBuf::from(DEFAULT_SESSIONS_DIR),
            lock_stale_after: DEFAULT_LOCK_STALE_AFTER,
        }
    }
}

impl StoreOptions {
    /// Options with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sessions directory
    pub fn with_sessions_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.sessions_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the lock staleness threshold
    pub fn with_lock_stale_after(mut self, after: Duration) -> Self {
        self.lock_stale_after = after;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let options = StoreOptions::default();
        assert_eq!(options.sessions_dir, PathBuf::from("sessions"));
        assert_eq!(options.lock_stale_after, Duration::from_secs(30));

        let options = StoreOptions::new()
            .with_sessions_dir("/tmp/books")
            .with_lock_stale_after(Duration::from_secs(5));
        assert_eq!(options.sessions_dir, PathBuf::from("/tmp/books"));
        assert_eq!(options.lock_stale_after, Duration::from_secs(5));
    }
}
