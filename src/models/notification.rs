//! Notification model
//!
//! Notifications are append-only: they are recorded, listed and cleared
//! wholesale, never edited.

use std::fmt;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

/// A recorded alert message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub timestamp: NaiveDateTime,
    pub content: String,
}

impl Notification {
    /// Stamp a message with the current local time, to the second
    pub fn new(content: impl Into<String>) -> FinanceResult<Self> {
        let now = Local::now().naive_local();
        Self::at(now.with_nanosecond(0).unwrap_or(now), content)
    }

    pub fn at(timestamp: NaiveDateTime, content: impl Into<String>) -> FinanceResult<Self> {
        let content = content.into().trim().to_string();
        if content.is_empty() {
            return Err(FinanceError::Validation(
                "Notification content must not be empty".into(),
            ));
        }
        Ok(Self { timestamp, content })
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp.format("%Y-%m-%d %H:%M:%S"), self.content)
    }
}
