//! Notification service
//!
//! Local notification history plus forwarding through a
//! [`NotificationSink`].

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Notification, ReportPeriod};
use crate::notify::{DeliveryError, NotificationSink};
use crate::storage::{Document, Storage};

/// Service for notifications
pub struct NotificationService<'a> {
    storage: &'a Storage,
    sink: Option<&'a dyn NotificationSink>,
}

impl<'a> NotificationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            sink: None,
        }
    }

    pub fn with_sink(storage: &'a Storage, sink: &'a dyn NotificationSink) -> Self {
        Self {
            storage,
            sink: Some(sink),
        }
    }

    /// Every recorded notification, oldest first
    pub fn list(&self) -> FinanceResult<Vec<Notification>> {
        let all = self.storage.notifications.get_all()?;
        if all.is_empty() {
            return Err(FinanceError::notification_not_found("no notifications recorded"));
        }
        Ok(all)
    }

    /// Record a notification locally, stamped with the current time
    pub fn record(&self, content: &str) -> FinanceResult<Notification> {
        let notification = Notification::new(content)?;
        self.storage.notifications.append(notification.clone())?;
        self.storage.after_mutation(Document::Notifications);
        debug!("notification recorded");
        Ok(notification)
    }

    /// Deliver a message, then record it locally
    ///
    /// Nothing is recorded when delivery fails.
    pub fn send(&self, destination_id: i64, content: &str) -> FinanceResult<Notification> {
        if content.trim().is_empty() {
            return Err(FinanceError::Validation(
                "Notification content must not be empty".into(),
            ));
        }

        let sink = self.sink.ok_or_else(|| {
            DeliveryError::NotConfigured("no delivery channel available".into())
        })?;
        sink.notify(destination_id, content.trim())?;

        self.record(content)
    }

    /// Notifications stamped within `[start, end)`
    pub fn filter_by_period(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> FinanceResult<Vec<Notification>> {
        let period = ReportPeriod::new(start, end)?;

        let found: Vec<Notification> = self
            .storage
            .notifications
            .get_all()?
            .into_iter()
            .filter(|n| period.contains(n.timestamp))
            .collect();

        if found.is_empty() {
            return Err(FinanceError::notification_not_found(format!(
                "none in {}",
                period
            )));
        }
        Ok(found)
    }

    /// Drop the whole history, returning how many were removed
    pub fn clear(&self) -> FinanceResult<usize> {
        let removed = self.storage.notifications.clear()?;
        self.storage.after_mutation(Document::Notifications);
        debug!(removed, "notifications cleared");
        Ok(removed)
    }
}
