//! Entry CLI commands
//!
//! Implements CLI commands for recording and querying entries.

use clap::Subcommand;

use super::{parse_amount_arg, parse_date_time};
use crate::display::{format_entry_details, format_entry_table};
use crate::error::FinanceResult;
use crate::models::{format_money, EntryDraft, EntryFilter, EntryKind};
use crate::notify::NotificationSink;
use crate::services::{EntryService, PlanService};
use crate::storage::Storage;

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record a new income or expense
    Add {
        /// income or expense
        kind: EntryKind,
        /// Amount (e.g. "120.50" or "120,50")
        amount: String,
        /// Category name
        category: String,
        /// Description
        description: String,
        /// Date (YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]), defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Edit an entry; omitted fields keep their current value
    Edit {
        /// Entry ID
        id: u64,
        #[arg(short, long)]
        kind: Option<EntryKind>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove an entry
    Remove {
        /// Entry ID
        id: u64,
    },
    /// Show entry details
    Show {
        /// Entry ID
        id: u64,
    },
    /// List entries, newest first
    List {
        #[arg(short, long)]
        kind: Option<EntryKind>,
        #[arg(short, long)]
        category: Option<String>,
        /// Calendar day (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        /// Extra criteria as key=value (amount, date, kind, category)
        #[arg(short, long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
        /// Number of entries to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Net balance of a month
    Balance {
        /// Month (1-12)
        month: u32,
        year: i32,
    },
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &Storage,
    sink: Option<&dyn NotificationSink>,
    cmd: EntryCommands,
) -> FinanceResult<()> {
    let service = EntryService::new(storage);
    let settings = storage.settings();
    let currency = settings.currency_symbol.as_str();

    match cmd {
        EntryCommands::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let date = match date {
                Some(d) => parse_date_time(&d)?,
                None => chrono::Local::now().naive_local(),
            };
            let category = resolve_category(storage, &category);
            let draft = EntryDraft::new(description, parse_amount_arg(&amount)?, date, kind, category);

            let plan_service = match sink {
                Some(sink) => PlanService::with_sink(storage, sink),
                None => PlanService::new(storage),
            };
            let checked = plan_service.create_entry_with_budget_check(draft)?;

            println!("Recorded entry #{}", checked.entry.id);
            print!("{}", format_entry_details(&checked.entry, currency));
            if let Some(alert) = checked.alert {
                println!();
                println!("⚠ {}", alert.content);
            }
        }

        EntryCommands::Edit {
            id,
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let current = service.get(id)?;
            let draft = EntryDraft::new(
                description.unwrap_or(current.description),
                match amount {
                    Some(a) => parse_amount_arg(&a)?,
                    None => current.amount,
                },
                match date {
                    Some(d) => parse_date_time(&d)?,
                    None => current.date,
                },
                kind.unwrap_or(current.kind),
                category
                    .map(|c| resolve_category(storage, &c))
                    .unwrap_or(current.category),
            );

            let updated = service.edit(id, draft)?;
            println!("Updated entry #{}", updated.id);
            print!("{}", format_entry_details(&updated, currency));
        }

        EntryCommands::Remove { id } => {
            let removed = service.remove(id)?;
            println!("Removed entry #{}: {}", removed.id, removed.description);
        }

        EntryCommands::Show { id } => {
            let entry = service.get(id)?;
            print!("{}", format_entry_details(&entry, currency));
        }

        EntryCommands::List {
            kind,
            category,
            date,
            amount,
            filters,
            limit,
        } => {
            let mut filter = EntryFilter::from_pairs(&filters)?;
            if let Some(kind) = kind {
                filter = filter.kind(kind);
            }
            if let Some(category) = category {
                filter = filter.category(resolve_category(storage, &category));
            }
            if let Some(date) = date {
                filter = filter.date(parse_date_time(&date)?.date());
            }
            if let Some(amount) = amount {
                filter = filter.amount(parse_amount_arg(&amount)?);
            }

            let mut entries = service.list(&filter)?;
            if let Some(limit) = limit {
                entries.truncate(limit);
            }
            print!(
                "{}",
                format_entry_table(&entries, currency, &settings.date_format)
            );
        }

        EntryCommands::Balance { month, year } => {
            let balance = service.balance(month, year)?;
            println!(
                "Balance for {:02}/{}: {}",
                month,
                year,
                format_money(balance, currency)
            );
        }
    }

    Ok(())
}

/// Configured spelling of a category, or the input unchanged
fn resolve_category(storage: &Storage, name: &str) -> String {
    storage
        .categories()
        .resolve(name)
        .map(str::to_string)
        .unwrap_or_else(|| name.to_string())
}
