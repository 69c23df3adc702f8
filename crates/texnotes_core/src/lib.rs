//! Core logic for texnotes, a LaTeX notes scaffold.
//! Both CLIs are thin shells over the services exported here.

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::ProjectLayout;
pub use error::{NotesError, NotesResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::EntryName;
pub use model::master::MasterDocument;
pub use model::project_name::ProjectName;
pub use service::entry_service::{create_entry, today, CreatedEntry, EntryStep};
pub use service::init_service::{init_project, InitStep, InitializedProject};
pub use service::status_service::{project_status, ProjectStatus, RegisteredEntry};
