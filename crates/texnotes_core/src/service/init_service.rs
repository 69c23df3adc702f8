//! Project initialization use case.
//!
//! # Responsibility
//! - Create a project directory with its master document skeleton.
//! - Deposit a byte-for-byte copy of the Entry Creator into it.
//!
//! # Invariants
//! - An existing directory (or file) with the project name is never touched.
//! - The Entry Creator source is checked before the directory is created.

use crate::config::ProjectLayout;
use crate::error::{NotesError, NotesResult};
use crate::model::master::MasterDocument;
use crate::model::project_name::ProjectName;
use log::{error, info, warn};
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Progress notification emitted before each initialization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStep {
    CreatingDirectory { name: String },
    CreatingMaster { file_name: String },
    CopyingEntryCreator { file_name: String, project: String },
}

impl Display for InitStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreatingDirectory { name } => write!(f, "Creating \"{name}\" directory."),
            Self::CreatingMaster { file_name } => write!(f, "Creating {file_name} file."),
            Self::CopyingEntryCreator { file_name, project } => {
                write!(f, "Copying {file_name} into {project}")
            }
        }
    }
}

/// Paths produced by a successful initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializedProject {
    pub project_dir: PathBuf,
    pub master_path: PathBuf,
    pub entry_creator_path: PathBuf,
}

/// Creates project `raw_name` under `parent_dir`.
///
/// `entry_creator` is the file copied into the project as the Entry Creator.
///
/// # Errors
/// - `InvalidProjectName` when `raw_name` is not a single safe path component.
/// - `AlreadyExists` when `parent_dir/raw_name` exists in any form.
/// - `EntryCreatorUnavailable` when `entry_creator` is not a readable file.
/// - `Io` for failures after the directory has been created.
pub fn init_project(
    parent_dir: &Path,
    raw_name: &str,
    entry_creator: &Path,
    layout: &ProjectLayout,
    mut on_step: impl FnMut(&InitStep),
) -> NotesResult<InitializedProject> {
    let name = ProjectName::parse(raw_name)?;
    let project_dir = parent_dir.join(name.as_str());

    if fs::symlink_metadata(&project_dir).is_ok() {
        warn!("event=project_init module=service status=error error_code=already_exists");
        return Err(NotesError::AlreadyExists(project_dir));
    }
    check_entry_creator(entry_creator)?;

    on_step(&InitStep::CreatingDirectory {
        name: name.as_str().to_string(),
    });
    fs::create_dir(&project_dir).map_err(|err| match err.kind() {
        ErrorKind::AlreadyExists => NotesError::AlreadyExists(project_dir.clone()),
        _ => NotesError::io(&project_dir, err),
    })?;

    let master_path = layout.master_path(&project_dir);
    on_step(&InitStep::CreatingMaster {
        file_name: layout.master_file_name.clone(),
    });
    write_new_file(&master_path, &MasterDocument::skeleton(name.as_str(), layout))?;

    let entry_creator_path = layout.entry_creator_path(&project_dir);
    on_step(&InitStep::CopyingEntryCreator {
        file_name: layout.entry_creator_file_name.clone(),
        project: name.as_str().to_string(),
    });
    if let Err(err) = fs::copy(entry_creator, &entry_creator_path) {
        error!(
            "event=project_init module=service status=error error_code=copy_failed error={}",
            err
        );
        return Err(NotesError::io(&entry_creator_path, err));
    }

    info!(
        "event=project_init module=service status=ok project_dir={}",
        project_dir.display()
    );
    Ok(InitializedProject {
        project_dir,
        master_path,
        entry_creator_path,
    })
}

fn check_entry_creator(path: &Path) -> NotesResult<()> {
    let unavailable = |source: io::Error| NotesError::EntryCreatorUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(path).map_err(unavailable)?;
    if !metadata.is_file() {
        return Err(unavailable(io::Error::new(
            ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    Ok(())
}

fn write_new_file(path: &Path, content: &str) -> NotesResult<()> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .and_then(|mut file| file.write_all(content.as_bytes()))
        .map_err(|err| NotesError::io(path, err))
}
