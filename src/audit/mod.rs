//! Audit trail for Finboard
//!
//! Every successful create, update and delete made through an entity service
//! is recorded with before/after snapshots.
//!
//! - `AuditEntry`: one mutation, with timestamp, operation, entity
//!   information and optional before/after values.
//! - `AuditLogger`: holds the entries of a session, optionally mirrored to a
//!   line-delimited JSON file.
//! - `generate_diff`: one-line summary of the fields an update changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::{read_log_file, AuditLogger};
