//! fintrack - terminal personal finance tracker
//!
//! Records income and expense entries, keeps a budget plan derived from a
//! salary, raises alerts when a category overspends its share, and builds
//! period reports and year-over-year comparisons.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (entries, plan, notifications, periods)
//! - `storage`: JSON file storage layer
//! - `services`: Entry, plan and notification operations
//! - `notify`: Notification delivery
//! - `reports`: Period report and year comparison
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `export`: JSON, CSV and report export
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::{FinancePaths, Settings};
//! use fintrack::storage::Storage;
//!
//! let paths = FinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths, &settings);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod notify;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
