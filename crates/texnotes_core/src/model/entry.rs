//! Dated entry naming.
//!
//! # Responsibility
//! - Derive the entry file name, section heading and inclusion line from a
//!   calendar date.
//! - Recognize entry file names found on disk.
//!
//! # Invariants
//! - One date maps to exactly one file name, so a directory holds at most one
//!   entry per calendar day.
//! - The date stamp is always eight ASCII digits (`YYYYMMDD`).

use crate::config::ProjectLayout;
use chrono::NaiveDate;

const STAMP_FORMAT: &str = "%Y%m%d";
const STAMP_LEN: usize = 8;

/// Name of the entry file for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    date: NaiveDate,
    file_name: String,
}

impl EntryName {
    /// Builds the entry name for `date` under `layout`.
    pub fn for_date(date: NaiveDate, layout: &ProjectLayout) -> Self {
        let file_name = format!(
            "{}{}{}",
            layout.entry_prefix,
            format_stamp(date),
            layout.entry_extension
        );
        Self { date, file_name }
    }

    /// Recognizes `file_name` as an entry file name.
    ///
    /// Returns `None` for anything that is not exactly
    /// `<prefix><YYYYMMDD><extension>` with a valid calendar date.
    pub fn parse(file_name: &str, layout: &ProjectLayout) -> Option<Self> {
        let stamp = file_name
            .strip_prefix(layout.entry_prefix.as_str())?
            .strip_suffix(layout.entry_extension.as_str())?;
        let date = parse_stamp(stamp)?;
        Some(Self {
            date,
            file_name: file_name.to_string(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn stamp(&self) -> String {
        format_stamp(self.date)
    }

    /// Section heading written at the top of a fresh entry.
    pub fn heading(&self) -> String {
        format!("\\section{}", self.stamp())
    }

    /// Full content of a freshly created entry file.
    pub fn initial_content(&self) -> String {
        format!("{}\n\n", self.heading())
    }
}

/// Formats `date` as an eight-digit stamp.
pub fn format_stamp(date: NaiveDate) -> String {
    date.format(STAMP_FORMAT).to_string()
}

/// Parses an eight-digit `YYYYMMDD` stamp.
pub fn parse_stamp(stamp: &str) -> Option<NaiveDate> {
    if stamp.len() != STAMP_LEN || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(stamp, STAMP_FORMAT).ok()
}
