//! Audit trail for faculty, bill and rate changes
//!
//! Every create, update and delete is appended to `audit.log` as one JSON
//! line holding the before/after snapshots. Credential hashes are stripped
//! from snapshots before they are written.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
