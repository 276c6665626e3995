//! Reports module for fintrack
//!
//! Provides the period balance report and the year-over-year comparison.

pub mod comparison;
pub mod financial;

pub use comparison::{CategoryPosition, ExpenseChange, TotalsDelta, YearComparison, YearSummary};
pub use financial::{CategoryShare, CategoryTotals, FinancialReport};
