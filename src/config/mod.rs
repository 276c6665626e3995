//! Configuration module for fintrack
//!
//! - Path resolution for settings, data files and the audit log
//! - Persisted user settings (categories, plan percentages, flush policy,
//!   notification delivery)

pub mod paths;
pub mod settings;

pub use paths::FinancePaths;
pub use settings::{FlushPolicy, NotificationSettings, Settings};
