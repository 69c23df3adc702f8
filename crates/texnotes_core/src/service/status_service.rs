//! Project status listing.
//!
//! # Responsibility
//! - Report entry references registered in the master document.
//! - Surface dated entry files that no reference includes.

use crate::config::ProjectLayout;
use crate::error::{NotesError, NotesResult};
use crate::model::entry::EntryName;
use crate::store::read_master;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One reference line inside the notes region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisteredEntry {
    pub file_name: String,
    /// Present when `file_name` is a dated entry name.
    pub date: Option<NaiveDate>,
    /// 1-based line number in the master document.
    pub line_number: usize,
    /// Whether the referenced file exists in the project directory.
    pub exists: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStatus {
    /// References in master document order.
    pub registered: Vec<RegisteredEntry>,
    /// Dated entry files with no reference, sorted by name.
    pub unregistered: Vec<String>,
}

/// Reads the registration state of `project_dir`.
///
/// # Errors
/// - `MissingMaster` / `MissingMarker` as for entry creation.
/// - `Io` when the directory cannot be listed.
pub fn project_status(project_dir: &Path, layout: &ProjectLayout) -> NotesResult<ProjectStatus> {
    let master_path = layout.master_path(project_dir);
    let master = read_master(&master_path)?;
    if master.end_marker_index(layout).is_none() {
        return Err(NotesError::MissingMarker {
            path: master_path,
            marker: layout.end_marker.clone(),
        });
    }

    let registered: Vec<RegisteredEntry> = master
        .references(layout)
        .into_iter()
        .map(|reference| RegisteredEntry {
            date: EntryName::parse(&reference.file_name, layout).map(|entry| entry.date()),
            exists: project_dir.join(&reference.file_name).is_file(),
            file_name: reference.file_name,
            line_number: reference.line_number,
        })
        .collect();

    let known: HashSet<&str> = registered
        .iter()
        .map(|entry| entry.file_name.as_str())
        .collect();
    let mut unregistered = Vec::new();
    let dir_entries = fs::read_dir(project_dir).map_err(|err| NotesError::io(project_dir, err))?;
    for dir_entry in dir_entries {
        let dir_entry = dir_entry.map_err(|err| NotesError::io(project_dir, err))?;
        let file_name = dir_entry.file_name().to_string_lossy().into_owned();
        if EntryName::parse(&file_name, layout).is_some() && !known.contains(file_name.as_str()) {
            unregistered.push(file_name);
        }
    }
    unregistered.sort();

    Ok(ProjectStatus {
        registered,
        unregistered,
    })
}
