//! Audit trail for fintrack
//!
//! Entry creates, edits and removals and every plan replacement are
//! appended to `audit.log` as JSON lines, with before/after snapshots and a
//! short field-level change summary.

mod diff;
mod entry;
mod logger;

pub use diff::{generate_detailed_diff, generate_diff};
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
