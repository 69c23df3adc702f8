//! Reading the master document from disk.

use crate::error::{NotesError, NotesResult};
use crate::model::master::MasterDocument;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Loads the master document at `path`.
///
/// # Errors
/// - `MissingMaster` when `path` does not exist.
/// - `Io` for unreadable or non-UTF-8 files.
pub fn read_master(path: &Path) -> NotesResult<MasterDocument> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(MasterDocument::parse(&content)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(NotesError::MissingMaster(path.to_path_buf()))
        }
        Err(err) => Err(NotesError::io(path, err)),
    }
}
