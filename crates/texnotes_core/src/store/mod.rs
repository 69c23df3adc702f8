//! Filesystem primitives for the master document.
//!
//! # Responsibility
//! - Serialize master document updates through an exclusive lock file.
//! - Replace file contents atomically so readers never see a partial write.
//!
//! # Invariants
//! - A held `MasterLock` means no other run may rewrite the master document.
//! - `write_atomic` either fully replaces the target or leaves it untouched.

mod atomic;
mod lock;
mod master_file;

pub use atomic::write_atomic;
pub use lock::MasterLock;
pub use master_file::read_master;
