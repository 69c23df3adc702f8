//! Project layout configuration.
//!
//! # Responsibility
//! - Name every file and marker line a notes project relies on.
//! - Keep the on-disk contract in one place so services never hardcode it.
//!
//! # Invariants
//! - `end_marker` is matched verbatim against whole lines of the master file.
//! - Entry file names are `<entry_prefix><YYYYMMDD><entry_extension>`.

use std::path::{Path, PathBuf};

const MASTER_FILE_NAME: &str = "master.tex";
const BEGIN_MARKER: &str = "%BEGIN NOTES";
const END_MARKER: &str = "%END NOTES";
const ENTRY_PREFIX: &str = "entry-";
const ENTRY_EXTENSION: &str = ".tex";
const LOCK_SUFFIX: &str = ".lock";
const ENTRY_CREATOR_STEM: &str = "new_note";

/// File names and sentinel lines that make up a notes project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Master document file name inside the project directory.
    pub master_file_name: String,
    /// Line opening the notes region of the master document.
    pub begin_marker: String,
    /// Line closing the notes region; new references go right above it.
    pub end_marker: String,
    /// Leading part of every entry file name.
    pub entry_prefix: String,
    /// Trailing part of every entry file name, dot included.
    pub entry_extension: String,
    /// Suffix appended to the master file name to form the lock file name.
    pub lock_suffix: String,
    /// File name of the Entry Creator copy deposited into new projects.
    pub entry_creator_file_name: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            master_file_name: MASTER_FILE_NAME.to_string(),
            begin_marker: BEGIN_MARKER.to_string(),
            end_marker: END_MARKER.to_string(),
            entry_prefix: ENTRY_PREFIX.to_string(),
            entry_extension: ENTRY_EXTENSION.to_string(),
            lock_suffix: LOCK_SUFFIX.to_string(),
            entry_creator_file_name: format!(
                "{ENTRY_CREATOR_STEM}{}",
                std::env::consts::EXE_SUFFIX
            ),
        }
    }
}

impl ProjectLayout {
    pub fn master_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.master_file_name)
    }

    pub fn lock_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(format!("{}{}", self.master_file_name, self.lock_suffix))
    }

    pub fn entry_creator_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.entry_creator_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::ProjectLayout;
    use std::path::Path;

    #[test]
    fn default_layout_matches_on_disk_contract() {
        let layout = ProjectLayout::default();
        assert_eq!(layout.master_file_name, "master.tex");
        assert_eq!(layout.end_marker, "%END NOTES");
        assert!(layout.entry_creator_file_name.starts_with("new_note"));
    }

    #[test]
    fn lock_path_sits_next_to_master() {
        let layout = ProjectLayout::default();
        let lock = layout.lock_path(Path::new("research"));
        assert_eq!(lock, Path::new("research").join("master.tex.lock"));
    }
}
