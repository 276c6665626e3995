//! Core data models for fintrack
//!
//! Entries, the budget plan, notifications and report periods, plus the
//! category and money helpers they share.

pub mod category;
pub mod entry;
pub mod money;
pub mod notification;
pub mod period;
pub mod plan;

pub use category::{normalize_category, CategorySet};
pub use entry::{Entry, EntryDraft, EntryFilter, EntryId, EntryKind};
pub use money::{format_money, parse_amount, round_cents};
pub use notification::Notification;
pub use period::ReportPeriod;
pub use plan::Plan;
