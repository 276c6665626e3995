//! Entry service
//!
//! The Entry Store: create, edit, remove and query financial entries, plus
//! the monthly balance and per-category expense sums used elsewhere.

use chrono::Datelike;
use tracing::debug;

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{
    normalize_category, round_cents, Entry, EntryDraft, EntryFilter, EntryId, EntryKind,
};
use crate::storage::{Document, Storage};

/// Service for entry management
pub struct EntryService<'a> {
    storage: &'a Storage,
}

impl<'a> EntryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate a draft and store it under the next id
    pub fn create(&self, draft: EntryDraft) -> FinanceResult<Entry> {
        let draft = draft.validated(self.storage.categories())?;
        let entry = self.storage.entries.insert(draft)?;

        self.storage.log_create(
            EntityType::Entry,
            entry.id.to_string(),
            Some(entry.description.clone()),
            &entry,
        );
        self.storage.after_mutation(Document::Entries);
        debug!(id = entry.id, kind = %entry.kind, "entry created");

        Ok(entry)
    }

    /// Replace every field of an entry except its id
    ///
    /// An unknown id is reported before the payload is looked at.
    pub fn edit(&self, id: EntryId, draft: EntryDraft) -> FinanceResult<Entry> {
        if self.storage.entries.get(id)?.is_none() {
            return Err(FinanceError::entry_not_found(id.to_string()));
        }

        let draft = draft.validated(self.storage.categories())?;
        let (before, after) = self
            .storage
            .entries
            .update(id, draft)?
            .ok_or_else(|| FinanceError::entry_not_found(id.to_string()))?;

        self.storage.log_update(
            EntityType::Entry,
            id.to_string(),
            Some(after.description.clone()),
            &before,
            &after,
        );
        self.storage.after_mutation(Document::Entries);
        debug!(id, "entry edited");

        Ok(after)
    }

    pub fn remove(&self, id: EntryId) -> FinanceResult<Entry> {
        let removed = self
            .storage
            .entries
            .remove(id)?
            .ok_or_else(|| FinanceError::entry_not_found(id.to_string()))?;

        self.storage.log_delete(
            EntityType::Entry,
            id.to_string(),
            Some(removed.description.clone()),
            &removed,
        );
        self.storage.after_mutation(Document::Entries);
        debug!(id, "entry removed");

        Ok(removed)
    }

    pub fn get(&self, id: EntryId) -> FinanceResult<Entry> {
        self.storage
            .entries
            .get(id)?
            .ok_or_else(|| FinanceError::entry_not_found(id.to_string()))
    }

    /// Entries matching every set filter field, newest first
    ///
    /// No match is a `NotFound` error rather than an empty list.
    pub fn list(&self, filter: &EntryFilter) -> FinanceResult<Vec<Entry>> {
        let mut entries: Vec<Entry> = self
            .storage
            .entries
            .get_all()?
            .into_iter()
            .filter(|e| filter.matches(e))
            .collect();

        if entries.is_empty() {
            return Err(FinanceError::entry_not_found(if filter.is_empty() {
                "no entries recorded"
            } else {
                "no entries match the filter"
            }));
        }

        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    /// Net income minus expenses for one calendar month
    ///
    /// A month without entries balances to zero.
    pub fn balance(&self, month: u32, year: i32) -> FinanceResult<f64> {
        if !(1..=12).contains(&month) {
            return Err(FinanceError::Validation(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(1900..=2100).contains(&year) {
            return Err(FinanceError::Validation(format!(
                "Year must be between 1900 and 2100, got {}",
                year
            )));
        }

        let total: f64 = self
            .storage
            .entries
            .get_all()?
            .iter()
            .filter(|e| e.date.month() == month && e.date.year() == year)
            .map(Entry::signed_amount)
            .sum();

        Ok(round_cents(total))
    }

    /// Total spent in a category over all time
    ///
    /// Categories are compared in normalized form, the same way plan limits
    /// are looked up.
    pub fn sum_expenses_by_category(&self, category: &str) -> FinanceResult<f64> {
        let wanted = normalize_category(category);
        Ok(self
            .storage
            .entries
            .get_all()?
            .iter()
            .filter(|e| e.is_expense() && normalize_category(&e.category) == wanted)
            .map(|e| e.amount)
            .sum())
    }

    /// Most recent entry of a kind in a category
    pub fn latest(&self, kind: EntryKind, category: &str) -> FinanceResult<Entry> {
        let filter = EntryFilter::new().kind(kind).category(category);
        self.list(&filter)?
            .into_iter()
            .next()
            .ok_or_else(|| FinanceError::entry_not_found(format!("latest {} in {}", kind, category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FinancePaths, Settings};
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &Settings::default());
        (temp_dir, storage)
    }

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn expense(description: &str, amount: f64, date: NaiveDateTime, category: &str) -> EntryDraft {
        EntryDraft::new(description, amount, date, EntryKind::Expense, category)
    }

    fn income(amount: f64, date: NaiveDateTime) -> EntryDraft {
        EntryDraft::new("Salário", amount, date, EntryKind::Income, "Salario")
    }

    #[test]
    fn test_create_then_list_contains_entry() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let created = service
            .create(expense("Aluguel", 900.0, at(2025, 5, 5), "Moradia"))
            .unwrap();
        let listed = service.list(&EntryFilter::new()).unwrap();

        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(service.get(created.id).unwrap(), created);
    }

    #[test]
    fn test_create_rejects_invalid_and_stores_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let err = service
            .create(expense("Aluguel", -1.0, at(2025, 5, 5), "Moradia"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.entries.count().unwrap(), 0);
        assert_eq!(storage.entries.next_id().unwrap(), 1);
    }

    #[test]
    fn test_ids_increase_and_survive_removal() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let a = service.create(income(3000.0, at(2025, 5, 1))).unwrap();
        let b = service.create(income(3000.0, at(2025, 6, 1))).unwrap();
        service.remove(b.id).unwrap();
        let c = service.create(income(3000.0, at(2025, 7, 1))).unwrap();

        assert!(a.id < b.id && b.id < c.id);
    }

    #[test]
    fn test_edit_unknown_id_is_not_found_even_with_bad_payload() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let err = service
            .edit(42, expense("", -5.0, at(2025, 1, 1), "Nope"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_edit_replaces_fields_and_keeps_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let entry = service
            .create(expense("Mercado", 150.0, at(2025, 5, 5), "Alimentação"))
            .unwrap();
        let edited = service
            .edit(entry.id, expense("Feira", 80.0, at(2025, 5, 6), "Alimentação"))
            .unwrap();

        assert_eq!(edited.id, entry.id);
        assert_eq!(edited.description, "Feira");
        assert_eq!(service.get(entry.id).unwrap().amount, 80.0);

        let invalid = service.edit(entry.id, expense("Feira", 0.0, at(2025, 5, 6), "Alimentação"));
        assert!(invalid.unwrap_err().is_validation());
        assert_eq!(service.get(entry.id).unwrap().amount, 80.0);
    }

    #[test]
    fn test_remove_twice_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let entry = service.create(income(100.0, at(2025, 5, 1))).unwrap();
        service.remove(entry.id).unwrap();
        assert!(service.remove(entry.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_sorted_newest_first_and_empty_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        assert!(service.list(&EntryFilter::new()).unwrap_err().is_not_found());

        service.create(income(100.0, at(2025, 3, 1))).unwrap();
        service.create(income(200.0, at(2025, 5, 1))).unwrap();
        service.create(income(300.0, at(2025, 4, 1))).unwrap();

        let amounts: Vec<f64> = service
            .list(&EntryFilter::new())
            .unwrap()
            .iter()
            .map(|e| e.amount)
            .collect();
        assert_eq!(amounts, vec![200.0, 300.0, 100.0]);

        let none = service.list(&EntryFilter::new().kind(EntryKind::Expense));
        assert!(none.unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_filters_by_day() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        service
            .create(expense("Café", 8.0, at(2025, 5, 10), "Alimentação"))
            .unwrap();
        service
            .create(expense("Jantar", 60.0, at(2025, 5, 11), "Alimentação"))
            .unwrap();

        let filter = EntryFilter::new().date(NaiveDate::from_ymd_opt(2025, 5, 10).unwrap());
        let found = service.list(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].description, "Café");
    }

    #[test]
    fn test_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        service.create(income(3000.0, at(2025, 5, 1))).unwrap();
        service
            .create(expense("Aluguel", 200.0, at(2025, 5, 10), "Moradia"))
            .unwrap();
        service
            .create(expense("Aluguel", 999.0, at(2025, 6, 10), "Moradia"))
            .unwrap();

        assert_eq!(service.balance(5, 2025).unwrap(), 2800.0);
        assert_eq!(service.balance(1, 2020).unwrap(), 0.0);
        assert!(service.balance(13, 2025).unwrap_err().is_validation());
        assert!(service.balance(0, 2025).unwrap_err().is_validation());
        assert!(service.balance(5, 1899).unwrap_err().is_validation());
        assert!(service.balance(5, 2101).unwrap_err().is_validation());
    }

    #[test]
    fn test_sum_expenses_and_latest() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        service
            .create(expense("Mercado", 100.0, at(2025, 5, 1), "Alimentação"))
            .unwrap();
        service
            .create(expense("Feira", 50.5, at(2025, 6, 1), "Alimentação"))
            .unwrap();
        service.create(income(2000.0, at(2025, 4, 1))).unwrap();
        service.create(income(2500.0, at(2025, 6, 1))).unwrap();

        assert_eq!(service.sum_expenses_by_category("alimentacao").unwrap(), 150.5);
        assert_eq!(service.sum_expenses_by_category("Lazer").unwrap(), 0.0);

        let latest = service.latest(EntryKind::Income, "Salario").unwrap();
        assert_eq!(latest.amount, 2500.0);
        assert!(service.latest(EntryKind::Income, "Outros").unwrap_err().is_not_found());
    }
}
