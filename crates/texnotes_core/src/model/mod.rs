//! Domain model for a notes project.
//!
//! # Responsibility
//! - Describe project names, dated entries and the master document as plain
//!   values with no filesystem access.
//!
//! # Invariants
//! - Every entry file name is derived from exactly one calendar date.
//! - Entry references live between the begin and end markers of the master
//!   document, most recent last.

pub mod entry;
pub mod master;
pub mod project_name;
