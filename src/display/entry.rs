//! Entry display formatting
//!
//! Entry lists render as a table; a single entry renders as a labelled
//! detail block.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::{format_money, Entry};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format entries as a table, in the order given
pub fn format_entry_table(entries: &[Entry], currency: &str, date_format: &str) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let rows = entries.iter().map(|entry| EntryRow {
        id: entry.id,
        date: entry.date.format(date_format).to_string(),
        kind: entry.kind.to_string(),
        category: entry.category.clone(),
        description: truncate(&entry.description, 32),
        amount: format_money(entry.signed_amount(), currency),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    format!("{}\n{} entries\n", table, entries.len())
}

/// Format entry details for display
pub fn format_entry_details(entry: &Entry, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:       #{}\n", entry.id));
    output.push_str(&format!("Date:        {}\n", entry.date.format("%Y-%m-%d %H:%M")));
    output.push_str(&format!("Kind:        {}\n", entry.kind));
    output.push_str(&format!("Amount:      {}\n", format_money(entry.amount, currency)));
    output.push_str(&format!("Category:    {}\n", entry.category));
    output.push_str(&format!("Description: {}\n", entry.description));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryDraft, EntryKind};
    use chrono::NaiveDate;

    fn entry(id: u64, kind: EntryKind, amount: f64) -> Entry {
        let date = NaiveDate::from_ymd_opt(2025, 5, 10)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();
        Entry::from_draft(id, EntryDraft::new("Mercado", amount, date, kind, "Alimentação"))
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_entry_table(&[], "R$", "%Y-%m-%d"), "No entries found.\n");
    }

    #[test]
    fn test_table_shows_signed_amounts() {
        let entries = vec![
            entry(1, EntryKind::Expense, 120.5),
            entry(2, EntryKind::Income, 3000.0),
        ];
        let table = format_entry_table(&entries, "R$", "%d/%m/%Y");
        assert!(table.contains("-R$ 120.50"));
        assert!(table.contains("R$ 3000.00"));
        assert!(table.contains("10/05/2025"));
        assert!(table.contains("2 entries"));
    }

    #[test]
    fn test_details() {
        let details = format_entry_details(&entry(7, EntryKind::Expense, 42.0), "R$");
        assert!(details.contains("#7"));
        assert!(details.contains("2025-05-10 08:30"));
        assert!(details.contains("R$ 42.00"));
        assert!(details.contains("Alimentação"));
    }
}
