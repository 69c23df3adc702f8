//! Project name validation.
//!
//! A project name becomes a single directory under the caller's location and
//! is substituted verbatim into the master document title.

use crate::error::{NotesError, NotesResult};

/// Validated, filesystem-safe project name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validates `raw` as a single path component.
    ///
    /// # Errors
    /// - `InvalidProjectName` for empty names, `.`/`..`, path separators and
    ///   control characters (NUL included).
    pub fn parse(raw: &str) -> NotesResult<Self> {
        let reason = if raw.trim().is_empty() {
            Some("name cannot be empty")
        } else if raw == "." || raw == ".." {
            Some("name cannot be `.` or `..`")
        } else if raw.contains(['/', '\\']) {
            Some("name cannot contain path separators")
        } else if raw.chars().any(char::is_control) {
            Some("name cannot contain control characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(NotesError::InvalidProjectName {
                name: raw.to_string(),
                reason,
            }),
            None => Ok(Self(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectName;

    #[test]
    fn plain_names_are_accepted() {
        assert_eq!(ProjectName::parse("research").unwrap().as_str(), "research");
        assert!(ProjectName::parse("lab notes 2024").is_ok());
    }

    #[test]
    fn unsafe_names_are_rejected() {
        for raw in ["", "  ", ".", "..", "a/b", "a\\b", "bad\0name", "tab\tname"] {
            let err = ProjectName::parse(raw).unwrap_err();
            assert_eq!(err.exit_code(), 1, "`{raw:?}` should be a usage failure");
        }
    }
}
