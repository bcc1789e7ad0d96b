//! Session name rules
//!
//! A session name becomes a file stem inside the sessions directory, so it
//! must not be able to escape that directory or collide with temporary and
//! lock files.

use crate::error::{Error, Result};

/// Check that `name` can be used as a session name
pub fn validate_session_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_session_name(name, "name is empty"));
    }
    if name.starts_with('.') {
        return Err(Error::invalid_session_name(name, "name starts with '.'"));
    }
    if let Some(c) = name.chars().find(|c| matches!(c, '/' | '\\')) {
        return Err(Error::invalid_session_name(
            name,
            format!("name contains path separator '{}'", c),
        ));
    }
    if name.chars().any(char::is_control) {
        return Err(Error::invalid_session_name(
            name,
            "name contains control characters",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["trip", "Trip 2", "físico", "a.b", "x_y-z"] {
            assert!(validate_session_name(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["", "  ", ".hidden", "..", "a/b", "a\\b", "tab\there"] {
            assert!(
                matches!(
                    validate_session_name(name),
                    Err(Error::InvalidSessionName { .. })
                ),
                "{:?}",
                name
            );
        }
    }
}
