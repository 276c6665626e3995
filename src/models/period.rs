//! Report period representation
//!
//! A period is the half-open range `[start, end)`: an entry dated exactly at
//! `end` belongs to the next period.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};

/// Date-time range used to scope report aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ReportPeriod {
    /// Create a period, rejecting a start that lies after the end
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> FinanceResult<Self> {
        if start > end {
            return Err(FinanceError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// `[Jan 1 year, Jan 1 year+1)`
    pub fn full_year(year: i32) -> FinanceResult<Self> {
        let start = first_day(year, 1)?;
        let end = first_day(year + 1, 1)?;
        Self::new(midnight(start), midnight(end))
    }

    /// `[first of month, first of next month)`
    pub fn month(year: i32, month: u32) -> FinanceResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(FinanceError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        let start = first_day(year, month)?;
        let end = if month == 12 {
            first_day(year + 1, 1)?
        } else {
            first_day(year, month + 1)?
        };
        Self::new(midnight(start), midnight(end))
    }

    /// Half-open membership test
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }

    /// True for entries dated strictly before the period
    pub fn is_before(&self, at: NaiveDateTime) -> bool {
        at < self.start
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {})",
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

fn first_day(year: i32, month: u32) -> FinanceResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        FinanceError::Validation(format!("Date {:04}-{:02}-01 is out of range", year, month))
    })
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}
