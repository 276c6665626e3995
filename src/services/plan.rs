//! Plan service
//!
//! The Plan Store: keeps the single current budget plan, derives it from a
//! salary, and checks new expenses against their category limit.

use tracing::{debug, warn};

use crate::audit::EntityType;
use crate::error::{FinanceError, FinanceResult};
use crate::models::plan::check_salary;
use crate::models::{format_money, Entry, EntryDraft, EntryKind, Notification, Plan};
use crate::notify::NotificationSink;
use crate::storage::{Document, Storage};

use super::entry::EntryService;
use super::notification::NotificationService;

/// A created entry and the overspend alert it raised, if any
#[derive(Debug, Clone)]
pub struct CheckedEntry {
    pub entry: Entry,
    pub alert: Option<Notification>,
}

/// Service for the budget plan
pub struct PlanService<'a> {
    storage: &'a Storage,
    sink: Option<&'a dyn NotificationSink>,
}

impl<'a> PlanService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            sink: None,
        }
    }

    /// Plan service that forwards overspend alerts through `sink`
    pub fn with_sink(storage: &'a Storage, sink: &'a dyn NotificationSink) -> Self {
        Self {
            storage,
            sink: Some(sink),
        }
    }

    /// Split a salary using the configured percentage table
    pub fn compute_from_salary(&self, salary: f64) -> FinanceResult<Plan> {
        let settings = self.storage.settings();
        check_salary(salary, settings.minimum_salary)?;

        let plan = Plan::from_percentages(salary, &settings.plan_percentages);
        self.store(plan)
    }

    /// Compute the plan from the newest salary income entry
    pub fn compute_from_latest_income(&self) -> FinanceResult<Plan> {
        let salary_category = &self.storage.settings().salary_category;
        let latest = EntryService::new(self.storage)
            .latest(EntryKind::Income, salary_category)
            .map_err(|e| {
                if e.is_not_found() {
                    FinanceError::entry_not_found(format!(
                        "no income recorded in '{}'",
                        salary_category
                    ))
                } else {
                    e
                }
            })?;

        self.compute_from_salary(latest.amount)
    }

    /// Replace the plan with a manually supplied one
    pub fn edit(&self, plan: Plan) -> FinanceResult<Plan> {
        let plan = plan.validated(self.storage.settings().minimum_salary)?;
        self.store(plan)
    }

    pub fn get_current(&self) -> FinanceResult<Plan> {
        self.storage
            .plan
            .get()?
            .ok_or_else(FinanceError::plan_not_found)
    }

    /// Budget ceiling for a category in any spelling
    ///
    /// Unbounded (`f64::INFINITY`) when no plan is set or the category has
    /// no allocation.
    pub fn limit_for_category(&self, category: &str) -> FinanceResult<f64> {
        Ok(self
            .storage
            .plan
            .get()?
            .and_then(|plan| plan.limit_for(category))
            .unwrap_or(f64::INFINITY))
    }

    /// Create an entry, then raise an alert if its category is overspent
    ///
    /// The entry stays committed whatever happens to the alert. An alert is
    /// recorded locally and, when a destination and sink are configured,
    /// delivered. Failures past the commit are only logged.
    pub fn create_entry_with_budget_check(&self, draft: EntryDraft) -> FinanceResult<CheckedEntry> {
        let entry = EntryService::new(self.storage).create(draft)?;

        let alert = match self.check_budget(&entry) {
            Ok(alert) => alert,
            Err(e) => {
                warn!(id = entry.id, error = %e, "budget check failed after entry was stored");
                None
            }
        };

        Ok(CheckedEntry { entry, alert })
    }

    fn check_budget(&self, entry: &Entry) -> FinanceResult<Option<Notification>> {
        if !entry.is_expense() {
            return Ok(None);
        }

        let spent = EntryService::new(self.storage).sum_expenses_by_category(&entry.category)?;
        let limit = self.limit_for_category(&entry.category)?;
        if spent <= limit {
            return Ok(None);
        }

        let symbol = &self.storage.settings().currency_symbol;
        let content = format!(
            "Budget exceeded for {}: spent {} of {}",
            entry.category,
            format_money(spent, symbol),
            format_money(limit, symbol)
        );
        warn!(category = %entry.category, spent, limit, "budget exceeded");

        let alert = NotificationService::new(self.storage).record(&content)?;

        if let (Some(sink), Some(chat_id)) =
            (self.sink, self.storage.settings().notifications.chat_id)
        {
            if let Err(e) = sink.notify(chat_id, &content) {
                warn!(chat_id, error = %e, "could not deliver budget alert");
            }
        }

        Ok(Some(alert))
    }

    fn store(&self, plan: Plan) -> FinanceResult<Plan> {
        match self.storage.plan.set(plan.clone())? {
            Some(previous) => self.storage.log_update(
                EntityType::Plan,
                "current",
                None,
                &previous,
                &plan,
            ),
            None => self
                .storage
                .log_create(EntityType::Plan, "current", None, &plan),
        }
        self.storage.after_mutation(Document::Plan);
        debug!(salary = plan.salary, "plan replaced");

        Ok(plan)
    }
}
