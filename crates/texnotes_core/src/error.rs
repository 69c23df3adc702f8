//! Error taxonomy shared by the Initializer and the Entry Creator.
//!
//! # Responsibility
//! - Give every terminal failure a named variant carrying the offending path.
//! - Map each variant to the process exit status the CLIs report.
//!
//! # Invariants
//! - `exit_code()` never returns 0.
//! - `Io` is reserved for failures with no more specific meaning.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type NotesResult<T> = Result<T, NotesError>;

#[derive(Debug)]
pub enum NotesError {
    /// Bad or missing invocation arguments.
    Usage(String),
    /// Project name is not usable as a single directory name.
    InvalidProjectName { name: String, reason: &'static str },
    /// Target project directory (or a file with its name) already exists.
    AlreadyExists(PathBuf),
    /// Entry Creator executable to deposit could not be read.
    EntryCreatorUnavailable { path: PathBuf, source: io::Error },
    /// Today's entry file is already present.
    DuplicateEntry(PathBuf),
    /// Directory has no master document.
    MissingMaster(PathBuf),
    /// Master document lacks the end-marker line.
    MissingMarker { path: PathBuf, marker: String },
    /// Another run holds the master document lock.
    Locked(PathBuf),
    Io { path: PathBuf, source: io::Error },
}

impl NotesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::InvalidProjectName { .. } | Self::DuplicateEntry(_) => 1,
            Self::AlreadyExists(_) => 2,
            Self::MissingMaster(_) | Self::MissingMarker { .. } => 3,
            Self::EntryCreatorUnavailable { .. } | Self::Io { .. } => 4,
            Self::Locked(_) => 5,
        }
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::InvalidProjectName { .. } => "invalid_project_name",
            Self::AlreadyExists(_) => "already_exists",
            Self::EntryCreatorUnavailable { .. } => "entry_creator_unavailable",
            Self::DuplicateEntry(_) => "duplicate_entry",
            Self::MissingMaster(_) => "missing_master",
            Self::MissingMarker { .. } => "missing_marker",
            Self::Locked(_) => "locked",
            Self::Io { .. } => "io",
        }
    }
}

impl Display for NotesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(message) => write!(f, "{message}"),
            Self::InvalidProjectName { name, reason } => {
                write!(f, "invalid project name `{name}`: {reason}")
            }
            Self::AlreadyExists(path) => {
                write!(f, "Directory \"{}\" already exists.", path.display())
            }
            Self::EntryCreatorUnavailable { path, source } => write!(
                f,
                "cannot read entry creator `{}`: {source}",
                path.display()
            ),
            Self::DuplicateEntry(path) => {
                write!(f, "File already exists: {}", path.display())
            }
            Self::MissingMaster(path) => write!(
                f,
                "no master document at `{}`; run inside a notes directory",
                path.display()
            ),
            Self::MissingMarker { path, marker } => write!(
                f,
                "`{}` has no `{marker}` line; cannot register entry",
                path.display()
            ),
            Self::Locked(path) => write!(
                f,
                "master document is locked by another run; remove `{}` if no run is active",
                path.display()
            ),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
        }
    }
}

impl Error for NotesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EntryCreatorUnavailable { source, .. } | Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
