//! Daily entry creation use case.
//!
//! # Responsibility
//! - Create the entry file for one calendar day.
//! - Register it in the master document right above the end marker.
//!
//! # Invariants
//! - At most one entry file per date per project directory.
//! - The master document is rewritten only while `MasterLock` is held, and
//!   only through `write_atomic`.
//! - A missing master document or end marker aborts before any file is
//!   created.
//!
//! # Known gap
//! - When the entry file is created but the master rewrite fails, the entry
//!   stays on disk unregistered. `status_service` reports such files.

use crate::config::ProjectLayout;
use crate::error::{NotesError, NotesResult};
use crate::model::entry::EntryName;
use crate::store::{read_master, write_atomic, MasterLock};
use chrono::{Local, NaiveDate};
use log::{error, info, warn};
use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Progress notification emitted during entry creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStep {
    Created { file_name: String },
    Registering { master_file_name: String },
    AlreadyRegistered { file_name: String, master_file_name: String },
}

impl Display for EntryStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created { file_name } => write!(f, "Created {file_name}"),
            Self::Registering { master_file_name } => {
                write!(f, "Inserting entry into {master_file_name}")
            }
            Self::AlreadyRegistered {
                file_name,
                master_file_name,
            } => write!(f, "{file_name} is already listed in {master_file_name}"),
        }
    }
}

/// Result of a successful entry creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEntry {
    pub entry: EntryName,
    pub entry_path: PathBuf,
    /// 1-based master line holding the new reference; `None` when an existing
    /// reference was kept.
    pub master_line: Option<usize>,
}

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Creates the entry for `date` in `project_dir` and registers it.
///
/// # Errors
/// - `DuplicateEntry` when the entry file for `date` already exists.
/// - `Locked` when another run holds the master document lock.
/// - `MissingMaster` / `MissingMarker` when `project_dir` is not a usable
///   project; nothing is created in that case.
/// - `Io` for any other filesystem failure.
pub fn create_entry(
    project_dir: &Path,
    date: NaiveDate,
    layout: &ProjectLayout,
    mut on_step: impl FnMut(&EntryStep),
) -> NotesResult<CreatedEntry> {
    let entry = EntryName::for_date(date, layout);
    let entry_path = project_dir.join(entry.file_name());
    info!(
        "event=entry_create module=service status=start entry={}",
        entry.file_name()
    );

    if entry_path.exists() {
        warn!(
            "event=entry_create module=service status=error error_code=duplicate_entry entry={}",
            entry.file_name()
        );
        return Err(NotesError::DuplicateEntry(entry_path));
    }

    let master_path = layout.master_path(project_dir);
    if !master_path.is_file() {
        return Err(NotesError::MissingMaster(master_path));
    }

    let _lock = MasterLock::acquire(layout.lock_path(project_dir))?;
    let mut master = read_master(&master_path)?;
    if master.end_marker_index(layout).is_none() {
        error!(
            "event=entry_create module=service status=error error_code=missing_marker path={}",
            master_path.display()
        );
        return Err(NotesError::MissingMarker {
            path: master_path,
            marker: layout.end_marker.clone(),
        });
    }

    create_entry_file(&entry_path, &entry.initial_content())?;
    on_step(&EntryStep::Created {
        file_name: entry.file_name().to_string(),
    });

    if master.has_reference(entry.file_name(), layout) {
        on_step(&EntryStep::AlreadyRegistered {
            file_name: entry.file_name().to_string(),
            master_file_name: layout.master_file_name.clone(),
        });
        info!(
            "event=entry_create module=service status=ok entry={} registered=existing",
            entry.file_name()
        );
        return Ok(CreatedEntry {
            entry,
            entry_path,
            master_line: None,
        });
    }

    on_step(&EntryStep::Registering {
        master_file_name: layout.master_file_name.clone(),
    });
    let index = master
        .insert_reference(entry.file_name(), layout)
        .ok_or_else(|| NotesError::MissingMarker {
            path: master_path.clone(),
            marker: layout.end_marker.clone(),
        })?;
    if let Err(err) = write_atomic(&master_path, &master.render()) {
        error!(
            "event=entry_create module=service status=error error_code=unregistered_entry entry={}",
            entry.file_name()
        );
        return Err(err);
    }

    info!(
        "event=entry_create module=service status=ok entry={} master_line={}",
        entry.file_name(),
        index + 1
    );
    Ok(CreatedEntry {
        entry,
        entry_path,
        master_line: Some(index + 1),
    })
}

fn create_entry_file(path: &Path, content: &str) -> NotesResult<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| match err.kind() {
            ErrorKind::AlreadyExists => NotesError::DuplicateEntry(path.to_path_buf()),
            _ => NotesError::io(path, err),
        })?;
    file.write_all(content.as_bytes())
        .map_err(|err| NotesError::io(path, err))
}
