//! Year-over-year comparison
//!
//! Compares two calendar years: total income, expenses and closing balance,
//! how each category's position moved, and which expense categories grew
//! or shrank.
//!
//! A category's position in a year is `-expense` when it spent more than
//! it earned and `+income` otherwise; a category with no entries that year
//! sits at zero. The category whose position fell the most is the most
//! concerning one; the one that rose the most is the most improved.
//! Categories are visited in name order and only a strictly better value
//! replaces the current pick, so ties go to the alphabetically first name.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::financial::{CategoryTotals, FinancialReport};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{format_money, round_cents, ReportPeriod};
use crate::storage::Storage;

/// Totals for one compared year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub income: CategoryTotals,
    pub expense: CategoryTotals,
    pub closing_balance: f64,
}

/// Year 2 minus year 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsDelta {
    pub income: f64,
    pub expense: f64,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPosition {
    pub category: String,
    pub year1: f64,
    pub year2: f64,
    pub change: f64,
}

/// Expense movement for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseChange {
    pub category: String,
    pub year1: f64,
    pub year2: f64,
    pub difference: f64,
}

/// Year-over-year comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearComparison {
    pub year1: YearSummary,
    pub year2: YearSummary,
    pub differences: TotalsDelta,
    /// Every category seen in either year, by name
    pub positions: Vec<CategoryPosition>,
    pub most_concerning: Option<CategoryPosition>,
    pub most_improved: Option<CategoryPosition>,
    pub expense_changes: Vec<ExpenseChange>,
    pub narrative: String,
}

impl YearComparison {
    /// Compare two full calendar years
    ///
    /// Negative years are a validation error. When a year has no entries
    /// the comparison fails with `NotFound`; an invalid period in either
    /// year takes precedence over a missing one.
    pub fn generate(storage: &Storage, year1: i32, year2: i32) -> FinanceResult<Self> {
        if year1 < 0 || year2 < 0 {
            return Err(FinanceError::Validation(format!(
                "Years must not be negative, got {} and {}",
                year1, year2
            )));
        }

        let first = ReportPeriod::full_year(year1)
            .and_then(|period| FinancialReport::generate(storage, &period));
        let second = ReportPeriod::full_year(year2)
            .and_then(|period| FinancialReport::generate(storage, &period));

        let (first, second) = match (first, second) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(a), Err(b)) => {
                return Err(if !a.is_invalid_period() && b.is_invalid_period() {
                    b
                } else {
                    a
                })
            }
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => return Err(e),
        };

        Ok(Self::from_reports(
            year1,
            &first,
            year2,
            &second,
            &storage.settings().currency_symbol,
        ))
    }

    /// Build the comparison from two already generated yearly reports
    pub fn from_reports(
        year1: i32,
        first: &FinancialReport,
        year2: i32,
        second: &FinancialReport,
        currency: &str,
    ) -> Self {
        let differences = TotalsDelta {
            income: round_cents(second.income.total - first.income.total),
            expense: round_cents(second.expense.total - first.expense.total),
            closing_balance: round_cents(second.closing_balance - first.closing_balance),
        };

        let categories: BTreeSet<&String> = [first, second]
            .iter()
            .flat_map(|r| r.income.by_category.keys().chain(r.expense.by_category.keys()))
            .collect();

        let positions: Vec<CategoryPosition> = categories
            .iter()
            .map(|category| {
                let p1 = position(first, category);
                let p2 = position(second, category);
                CategoryPosition {
                    category: category.to_string(),
                    year1: p1,
                    year2: p2,
                    change: round_cents(p2 - p1),
                }
            })
            .collect();

        let most_concerning = pick(&positions, |candidate, best| candidate < best);
        let most_improved = pick(&positions, |candidate, best| candidate > best);

        let expense_categories: BTreeSet<&String> = first
            .expense
            .by_category
            .keys()
            .chain(second.expense.by_category.keys())
            .collect();

        let expense_changes: Vec<ExpenseChange> = expense_categories
            .iter()
            .map(|category| {
                let v1 = first.expense.get(category);
                let v2 = second.expense.get(category);
                ExpenseChange {
                    category: category.to_string(),
                    year1: v1,
                    year2: v2,
                    difference: round_cents(v2 - v1),
                }
            })
            .collect();

        let mut comparison = Self {
            year1: summary(year1, first),
            year2: summary(year2, second),
            differences,
            positions,
            most_concerning,
            most_improved,
            expense_changes,
            narrative: String::new(),
        };
        comparison.narrative = comparison.build_narrative(currency);
        comparison
    }

    fn build_narrative(&self, currency: &str) -> String {
        let y1 = self.year1.year;
        let y2 = self.year2.year;
        let mut text = format!(
            "In {} compared to {}, income changed by {}, expenses by {} and the closing balance by {}.\n",
            y2,
            y1,
            format_money(self.differences.income, currency),
            format_money(self.differences.expense, currency),
            format_money(self.differences.closing_balance, currency)
        );

        match &self.most_concerning {
            Some(p) if p.change < 0.0 => text.push_str(&format!(
                "Watch '{}': its position went from {} in {} to {} in {} ({}).\n",
                p.category,
                format_money(p.year1, currency),
                y1,
                format_money(p.year2, currency),
                y2,
                format_money(p.change, currency)
            )),
            _ => text.push_str("No category moved toward spending.\n"),
        }

        match &self.most_improved {
            Some(p) if p.change > 0.0 => text.push_str(&format!(
                "Best improvement: '{}' ({}).\n",
                p.category,
                format_money(p.change, currency)
            )),
            _ => text.push_str("No category improved.\n"),
        }

        text.push_str("\nExpense increases:\n");
        let increases: Vec<_> = self
            .expense_changes
            .iter()
            .filter(|c| c.difference > 0.0)
            .collect();
        if increases.is_empty() {
            text.push_str("  none\n");
        }
        for change in increases {
            text.push_str(&format!(
                "  - {}: +{}\n",
                change.category,
                format_money(change.difference, currency)
            ));
        }

        text.push_str("\nExpense reductions:\n");
        let reductions: Vec<_> = self
            .expense_changes
            .iter()
            .filter(|c| c.difference < 0.0)
            .collect();
        if reductions.is_empty() {
            text.push_str("  none\n");
        }
        for change in reductions {
            text.push_str(&format!(
                "  - {}: {}\n",
                change.category,
                format_money(change.difference, currency)
            ));
        }

        text
    }

    /// Format the comparison for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();
        let y1 = self.year1.year.to_string();
        let y2 = self.year2.year.to_string();

        output.push_str(&format!("Year Comparison: {} vs {}\n", y1, y2));
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<18} {:>16} {:>16} {:>16}\n",
            "", y1, y2, "Difference"
        ));

        let rows = [
            (
                "Income",
                self.year1.income.total,
                self.year2.income.total,
                self.differences.income,
            ),
            (
                "Expenses",
                self.year1.expense.total,
                self.year2.expense.total,
                self.differences.expense,
            ),
            (
                "Closing balance",
                self.year1.closing_balance,
                self.year2.closing_balance,
                self.differences.closing_balance,
            ),
        ];
        for (label, a, b, diff) in rows {
            output.push_str(&format!(
                "{:<18} {:>16} {:>16} {:>16}\n",
                label,
                format_money(a, currency),
                format_money(b, currency),
                format_money(diff, currency)
            ));
        }

        output.push_str(&format!(
            "\n{:<18} {:>16} {:>16} {:>16}\n",
            "Category position", y1, y2, "Change"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');
        for p in &self.positions {
            output.push_str(&format!(
                "{:<18} {:>16} {:>16} {:>16}\n",
                p.category,
                format_money(p.year1, currency),
                format_money(p.year2, currency),
                format_money(p.change, currency)
            ));
        }

        output.push('\n');
        output.push_str(&self.narrative);
        output
    }
}

fn position(report: &FinancialReport, category: &str) -> f64 {
    let income = report.income.get(category);
    let expense = report.expense.get(category);
    if expense > income {
        -expense
    } else {
        income
    }
}

fn pick<F>(positions: &[CategoryPosition], better: F) -> Option<CategoryPosition>
where
    F: Fn(f64, f64) -> bool,
{
    let mut best: Option<&CategoryPosition> = None;
    for candidate in positions {
        match best {
            Some(current) if !better(candidate.change, current.change) => {}
            _ => best = Some(candidate),
        }
    }
    best.cloned()
}

fn summary(year: i32, report: &FinancialReport) -> YearSummary {
    YearSummary {
        year,
        income: report.income.clone(),
        expense: report.expense.clone(),
        closing_balance: report.closing_balance,
    }
}
