//! Custom error types for fintrack
//!
//! A single error enum is shared by every layer. The four domain kinds
//! (validation, not found, invalid period, delivery) are what callers branch
//! on; the remaining variants cover configuration and persistence plumbing.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::notify::DeliveryError;

/// The main error type for fintrack operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Malformed or out-of-domain input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Referenced record, id or period has no match
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Period whose start lies after its end
    #[error("Invalid period: start {start} is after end {end}")]
    InvalidPeriod {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    /// External notification delivery failed
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl FinanceError {
    /// Create a "not found" error for entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for the budget plan
    pub fn plan_not_found() -> Self {
        Self::NotFound {
            entity_type: "Plan",
            identifier: "current".into(),
        }
    }

    /// Create a "not found" error for notifications
    pub fn notification_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Notification",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an invalid period error
    pub fn is_invalid_period(&self) -> bool {
        matches!(self, Self::InvalidPeriod { .. })
    }

    /// Check if this is a delivery error
    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery(_))
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for fintrack operations
pub type FinanceResult<T> = Result<T, FinanceError>;
