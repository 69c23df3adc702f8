//! Exclusive lock file guarding master document updates.

use crate::error::{NotesError, NotesResult};
use log::{info, warn};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

/// Scoped ownership of the master document lock.
///
/// The lock file is created with create-new semantics and removed on drop.
#[derive(Debug)]
pub struct MasterLock {
    path: PathBuf,
}

impl MasterLock {
    /// Acquires the lock at `path`.
    ///
    /// # Errors
    /// - `Locked` when the lock file already exists.
    /// - `Io` for any other creation failure.
    pub fn acquire(path: impl Into<PathBuf>) -> NotesResult<Self> {
        let path = path.into();
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                warn!(
                    "event=lock_acquire module=store status=error error_code=locked path={}",
                    path.display()
                );
                return Err(NotesError::Locked(path));
            }
            Err(err) => return Err(NotesError::io(path, err)),
        };

        // Owner pid helps when a stale lock has to be removed by hand.
        if let Err(err) = writeln!(file, "{}", std::process::id()) {
            let _ = fs::remove_file(&path);
            return Err(NotesError::io(path, err));
        }

        info!(
            "event=lock_acquire module=store status=ok path={}",
            path.display()
        );
        Ok(Self { path })
    }

    #[cfg(test)]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl Drop for MasterLock {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(&self.path) {
            warn!(
                "event=lock_release module=store status=error path={} error={}",
                self.path.display(),
                err
            );
        }
    }
}
