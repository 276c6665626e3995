//! Service layer for fintrack
//!
//! Business operations on top of the storage layer: validation, audit
//! logging and flush handling for entries, the plan and notifications.

pub mod entry;
pub mod notification;
pub mod plan;

pub use entry::EntryService;
pub use notification::NotificationService;
pub use plan::{CheckedEntry, PlanService};
