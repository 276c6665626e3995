//! Display formatting for terminal output
//!
//! Provides utilities for formatting entries, the plan and notifications
//! for terminal display, plus helpers shared with the reports.

pub mod entry;
pub mod notification;
pub mod plan;
pub mod report;

pub use entry::{format_entry_details, format_entry_table};
pub use notification::format_notification_list;
pub use plan::format_plan;
