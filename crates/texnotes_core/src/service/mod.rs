//! Core use-case services.
//!
//! # Responsibility
//! - Implement the Initializer, the Entry Creator and the status listing on
//!   top of the model and store layers.
//! - Report progress through caller-supplied callbacks; never print.
//!
//! # Invariants
//! - Every operation takes its target directory explicitly.
//! - Existence and marker checks run before the first file is created.

pub mod entry_service;
pub mod init_service;
pub mod status_service;
