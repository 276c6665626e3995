//! Financial Report
//!
//! Balance report for a half-open period: opening balance carried forward
//! from every earlier entry, income and expense totals per category, and
//! the closing balance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::display::report::{format_bar, separator};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{format_money, round_cents, CategorySet, Entry, EntryKind, ReportPeriod};
use crate::storage::Storage;

/// Total and per-category breakdown for one entry kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
}

impl CategoryTotals {
    /// Amount for a category, zero when absent
    pub fn get(&self, category: &str) -> f64 {
        self.by_category.get(category).copied().unwrap_or(0.0)
    }
}

/// One slice of the expense breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Share of total expenses, 0-100
    pub percentage: f64,
}

/// Financial Report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub period: ReportPeriod,
    pub opening_balance: f64,
    pub income: CategoryTotals,
    pub expense: CategoryTotals,
    pub closing_balance: f64,
    pub delta: f64,
    /// Entries that fell inside the period
    pub entry_count: usize,
}

impl FinancialReport {
    /// Generate a report over the current contents of storage
    pub fn generate(storage: &Storage, period: &ReportPeriod) -> FinanceResult<Self> {
        let entries = storage.entries.get_all()?;
        Self::from_entries(&entries, storage.categories(), period)
    }

    /// Build a report from a snapshot of entries
    ///
    /// Entries failing validation are skipped everywhere, including the
    /// opening balance. A period with no valid entries is `NotFound`.
    pub fn from_entries(
        entries: &[Entry],
        categories: &CategorySet,
        period: &ReportPeriod,
    ) -> FinanceResult<Self> {
        if period.start > period.end {
            return Err(FinanceError::InvalidPeriod {
                start: period.start,
                end: period.end,
            });
        }

        let valid: Vec<&Entry> = entries.iter().filter(|e| e.is_valid(categories)).collect();

        let in_period: Vec<&Entry> = valid
            .iter()
            .copied()
            .filter(|e| period.contains(e.date))
            .collect();

        if in_period.is_empty() {
            return Err(FinanceError::NotFound {
                entity_type: "Entries",
                identifier: format!("in period {}", period),
            });
        }

        let opening: f64 = valid
            .iter()
            .filter(|e| period.is_before(e.date))
            .map(|e| e.signed_amount())
            .sum();

        let (income_total, income_by_cat) = aggregate(&in_period, EntryKind::Income);
        let (expense_total, expense_by_cat) = aggregate(&in_period, EntryKind::Expense);

        let closing = opening + income_total - expense_total;

        Ok(Self {
            period: *period,
            opening_balance: round_cents(opening),
            income: rounded(income_total, income_by_cat),
            expense: rounded(expense_total, expense_by_cat),
            closing_balance: round_cents(closing),
            delta: round_cents(closing - opening),
            entry_count: in_period.len(),
        })
    }

    /// Expense breakdown for pie-style rendering, largest first
    pub fn expense_shares(&self) -> Vec<CategoryShare> {
        let total = self.expense.total;
        let mut shares: Vec<CategoryShare> = self
            .expense
            .by_category
            .iter()
            .map(|(category, amount)| CategoryShare {
                category: category.clone(),
                amount: *amount,
                percentage: if total > 0.0 {
                    round_cents(amount / total * 100.0)
                } else {
                    0.0
                },
            })
            .collect();

        shares.sort_by(|a, b| {
            b.amount
                .total_cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });
        shares
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Financial Report: {} to {}\n",
            self.period.start.format("%Y-%m-%d"),
            self.period.end.format("%Y-%m-%d")
        ));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Opening balance",
            format_money(self.opening_balance, currency)
        ));

        output.push_str(&format!(
            "\n{:<20} {:>16}\n",
            "INCOME",
            format_money(self.income.total, currency)
        ));
        for (category, amount) in &self.income.by_category {
            output.push_str(&format!(
                "  {:<18} {:>16}\n",
                category,
                format_money(*amount, currency)
            ));
        }

        output.push_str(&format!(
            "\n{:<20} {:>16}\n",
            "EXPENSES",
            format_money(self.expense.total, currency)
        ));
        let shares = self.expense_shares();
        let largest = shares.first().map(|s| s.amount).unwrap_or(0.0);
        for share in &shares {
            output.push_str(&format!(
                "  {:<18} {:>16} {:>6.1}% {}\n",
                share.category,
                format_money(share.amount, currency),
                share.percentage,
                format_bar(share.amount, largest, 20)
            ));
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Closing balance",
            format_money(self.closing_balance, currency)
        ));
        output.push_str(&format!(
            "{:<20} {:>16}\n",
            "Change",
            format_money(self.delta, currency)
        ));

        output
    }
}

fn aggregate(entries: &[&Entry], kind: EntryKind) -> (f64, BTreeMap<String, f64>) {
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut total = 0.0;
    for entry in entries.iter().filter(|e| e.kind == kind) {
        *by_category.entry(entry.category.clone()).or_insert(0.0) += entry.amount;
        total += entry.amount;
    }
    (total, by_category)
}

fn rounded(total: f64, by_category: BTreeMap<String, f64>) -> CategoryTotals {
    CategoryTotals {
        total: round_cents(total),
        by_category: by_category
            .into_iter()
            .map(|(category, amount)| (category, round_cents(amount)))
            .collect(),
    }
}
