//! Rename-based atomic file replacement.

use crate::error::{NotesError, NotesResult};
use log::error;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Replaces the contents of `target` with `content`.
///
/// `target` is resolved through symlinks first; content is written to a
/// uniquely named hidden file next to the resolved file, given the old file's
/// permissions, flushed to disk, then renamed over it.
///
/// # Errors
/// - `Io` (permission denied) when the existing file is read-only.
/// - `Io` when the temporary file cannot be written or the rename fails; the
///   temporary file is removed and `target` keeps its previous contents.
pub fn write_atomic(target: &Path, content: &str) -> NotesResult<()> {
    // Why: renaming over a symlink would replace the link itself and leave the
    // linked file without the update.
    let resolved = resolve_target(target)?;
    let permissions = match fs::metadata(&resolved) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => return Err(NotesError::io(target, err)),
    };
    if permissions.as_ref().is_some_and(|perms| perms.readonly()) {
        return Err(NotesError::io(
            target,
            io::Error::new(ErrorKind::PermissionDenied, "file is read-only"),
        ));
    }

    // Why: write-then-rename keeps readers from ever seeing a partial master
    // document, even if the run is interrupted mid-write.
    let tmp_path = temp_path_for(&resolved);
    let written = File::create(&tmp_path)
        .and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        })
        .and_then(|()| match &permissions {
            Some(perms) => fs::set_permissions(&tmp_path, perms.clone()),
            None => Ok(()),
        })
        .and_then(|()| fs::rename(&tmp_path, &resolved));

    if let Err(err) = written {
        let _ = fs::remove_file(&tmp_path);
        error!(
            "event=atomic_write module=store status=error path={} error={}",
            target.display(),
            err
        );
        return Err(NotesError::io(target, err));
    }
    Ok(())
}

fn resolve_target(target: &Path) -> NotesResult<PathBuf> {
    match fs::canonicalize(target) {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(target.to_path_buf()),
        Err(err) => Err(NotesError::io(target, err)),
    }
}

fn temp_path_for(target: &Path) -> PathBuf {
    let file_name = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()))
}

#[cfg(test)]
mod tests {
    use super::write_atomic;
    use std::fs;

    #[test]
    fn replaces_contents_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("master.tex");
        fs::write(&target, "old").unwrap();

        write_atomic(&target, "new contents").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new contents");
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("master.tex")]);
    }

    #[test]
    fn read_only_target_is_refused_and_kept() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let target = dir.path().join("master.tex");
        fs::write(&target, "old").expect("seed file should be written");
        let mut perms = fs::metadata(&target).expect("metadata should load").permissions();
        perms.set_readonly(true);
        fs::set_permissions(&target, perms).expect("read-only flag should apply");

        let err = write_atomic(&target, "new").expect_err("read-only target should be refused");

        assert_eq!(err.exit_code(), 4);
        assert_eq!(fs::read_to_string(&target).expect("target should stay readable"), "old");
        assert_eq!(fs::read_dir(dir.path()).expect("dir should list").count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn existing_permissions_survive_replacement() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("temp dir should be created");
        let target = dir.path().join("master.tex");
        fs::write(&target, "old").expect("seed file should be written");
        fs::set_permissions(&target, fs::Permissions::from_mode(0o640))
            .expect("mode should apply");

        write_atomic(&target, "new").expect("write should succeed");

        let mode = fs::metadata(&target).expect("metadata should load").permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn failed_write_keeps_nothing_behind() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("master.tex");

        let err = write_atomic(&target, "data").unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(!target.exists());
    }
}
