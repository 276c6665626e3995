//! Entry model
//!
//! A financial entry is a single income or expense, dated, described and
//! filed under one configured category. Ids are assigned by the entry
//! repository and never reused.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::category::CategorySet;
use crate::error::{FinanceError, FinanceResult};

/// Unique, sequential entry identifier
pub type EntryId = u64;

/// Whether an entry brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[serde(alias = "receita")]
    Income,
    #[serde(alias = "despesa")]
    Expense,
}

impl EntryKind {
    /// +1 for income, -1 for expense
    pub fn sign(&self) -> f64 {
        match self {
            Self::Income => 1.0,
            Self::Expense => -1.0,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" => Ok(Self::Income),
            "expense" | "despesa" => Ok(Self::Expense),
            other => Err(FinanceError::Validation(format!(
                "Unknown entry kind '{}'. Use income or expense",
                other
            ))),
        }
    }
}

/// The five user-supplied fields of an entry, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub description: String,
    pub amount: f64,
    pub date: NaiveDateTime,
    pub kind: EntryKind,
    pub category: String,
}

impl EntryDraft {
    pub fn new(
        description: impl Into<String>,
        amount: f64,
        date: NaiveDateTime,
        kind: EntryKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
            kind,
            category: category.into(),
        }
    }

    /// Check every field and return the draft with its description trimmed
    pub fn validated(self, categories: &CategorySet) -> FinanceResult<Self> {
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(FinanceError::Validation(
                "Description must not be empty".into(),
            ));
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(FinanceError::Validation(format!(
                "Amount must be a positive number, got {}",
                self.amount
            )));
        }

        if !categories.contains(&self.category) {
            return Err(FinanceError::Validation(format!(
                "Unknown category '{}'. Allowed: {}",
                self.category,
                categories.names().join(", ")
            )));
        }

        Ok(Self {
            description,
            ..self
        })
    }
}

/// A stored financial entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub description: String,
    pub amount: f64,
    /// Serialized as an ISO-8601 date-time string
    pub date: NaiveDateTime,
    pub kind: EntryKind,
    pub category: String,
}

impl Entry {
    /// Build an entry from an already validated draft
    pub fn from_draft(id: EntryId, draft: EntryDraft) -> Self {
        Self {
            id,
            description: draft.description,
            amount: draft.amount,
            date: draft.date,
            kind: draft.kind,
            category: draft.category,
        }
    }

    /// Replace every field except the id
    pub fn apply(&mut self, draft: EntryDraft) {
        self.description = draft.description;
        self.amount = draft.amount;
        self.date = draft.date;
        self.kind = draft.kind;
        self.category = draft.category;
    }

    /// +amount for income, -amount for expense
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    /// Re-check a stored entry, e.g. one read back from a hand-edited file
    pub fn is_valid(&self, categories: &CategorySet) -> bool {
        !self.description.trim().is_empty()
            && self.amount.is_finite()
            && self.amount > 0.0
            && categories.contains(&self.category)
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {:.2} {} ({})",
            self.id,
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.amount,
            self.description,
            self.category
        )
    }
}

/// Optional exact-match criteria for listing entries
///
/// `date` matches by calendar day only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
    pub kind: Option<EntryKind>,
    pub category: Option<String>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Build a filter from `key=value` pairs
    ///
    /// Only `amount`, `date`, `kind` and `category` are accepted; any other
    /// key is rejected whatever the other pairs contain.
    pub fn from_pairs<I, S>(pairs: I) -> FinanceResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();

        for pair in pairs {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                FinanceError::Validation(format!("Filter '{}' must look like key=value", pair))
            })?;
            let value = value.trim();

            match key.trim() {
                "amount" => {
                    let amount = super::money::parse_amount(value)
                        .map_err(|e| FinanceError::Validation(e.to_string()))?;
                    filter.amount = Some(amount);
                }
                "date" => {
                    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                        FinanceError::Validation(format!(
                            "Invalid date '{}'. Use YYYY-MM-DD",
                            value
                        ))
                    })?;
                    filter.date = Some(date);
                }
                "kind" => filter.kind = Some(value.parse()?),
                "category" => filter.category = Some(value.to_string()),
                other => {
                    return Err(FinanceError::Validation(format!(
                        "Unknown filter '{}'. Allowed filters: amount, date, kind, category",
                        other
                    )))
                }
            }
        }

        Ok(filter)
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(amount) = self.amount {
            if entry.amount != amount {
                return false;
            }
        }
        if let Some(date) = self.date {
            if entry.day() != date {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if entry.kind != kind {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &entry.category != category {
                return false;
            }
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> CategorySet {
        CategorySet::new(["Salario", "Moradia"])
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_validated_trims_description() {
        let draft = EntryDraft::new("  Aluguel  ", 900.0, at(2025, 5, 5), EntryKind::Expense, "Moradia");
        let draft = draft.validated(&categories()).unwrap();
        assert_eq!(draft.description, "Aluguel");
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        let cats = categories();
        let blank = EntryDraft::new("   ", 10.0, at(2025, 1, 1), EntryKind::Expense, "Moradia");
        assert!(blank.validated(&cats).unwrap_err().is_validation());

        let zero = EntryDraft::new("x", 0.0, at(2025, 1, 1), EntryKind::Expense, "Moradia");
        assert!(zero.validated(&cats).unwrap_err().is_validation());

        let nan = EntryDraft::new("x", f64::NAN, at(2025, 1, 1), EntryKind::Expense, "Moradia");
        assert!(nan.validated(&cats).unwrap_err().is_validation());

        let unknown = EntryDraft::new("x", 5.0, at(2025, 1, 1), EntryKind::Expense, "Viagem");
        assert!(unknown.validated(&cats).unwrap_err().is_validation());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("income".parse::<EntryKind>().unwrap(), EntryKind::Income);
        assert_eq!("Despesa".parse::<EntryKind>().unwrap(), EntryKind::Expense);
        assert!("transfer".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_kind_accepts_legacy_names() {
        let kind: EntryKind = serde_json::from_str("\"receita\"").unwrap();
        assert_eq!(kind, EntryKind::Income);
        assert_eq!(serde_json::to_string(&EntryKind::Expense).unwrap(), "\"expense\"");
    }

    #[test]
    fn test_signed_amount() {
        let income = Entry::from_draft(
            1,
            EntryDraft::new("Pay", 3000.0, at(2025, 5, 1), EntryKind::Income, "Salario"),
        );
        let expense = Entry::from_draft(
            2,
            EntryDraft::new("Rent", 200.0, at(2025, 5, 10), EntryKind::Expense, "Moradia"),
        );
        assert_eq!(income.signed_amount(), 3000.0);
        assert_eq!(expense.signed_amount(), -200.0);
    }

    #[test]
    fn test_date_serializes_as_iso_string() {
        let entry = Entry::from_draft(
            1,
            EntryDraft::new("Pay", 3000.0, at(2025, 5, 1), EntryKind::Income, "Salario"),
        );
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2025-05-01T12:00:00");
    }

    #[test]
    fn test_filter_date_matches_calendar_day() {
        let entry = Entry::from_draft(
            1,
            EntryDraft::new("Rent", 200.0, at(2025, 5, 10), EntryKind::Expense, "Moradia"),
        );
        let same_day = EntryFilter::new().date(NaiveDate::from_ymd_opt(2025, 5, 10).unwrap());
        let other_day = EntryFilter::new().date(NaiveDate::from_ymd_opt(2025, 5, 11).unwrap());
        assert!(same_day.matches(&entry));
        assert!(!other_day.matches(&entry));
        assert!(EntryFilter::new().matches(&entry));
    }

    #[test]
    fn test_filter_from_pairs() {
        let filter =
            EntryFilter::from_pairs(["kind=expense", "category=Moradia", "amount=200"]).unwrap();
        assert_eq!(filter.kind, Some(EntryKind::Expense));
        assert_eq!(filter.category.as_deref(), Some("Moradia"));
        assert_eq!(filter.amount, Some(200.0));
    }

    #[test]
    fn test_filter_rejects_unknown_key() {
        let err = EntryFilter::from_pairs(["kind=expense", "payee=Bob"]).unwrap_err();
        assert!(err.is_validation());

        let err = EntryFilter::from_pairs(["description=Rent"]).unwrap_err();
        assert!(err.is_validation());
    }
}
