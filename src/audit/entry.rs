//! Audit entry data structures
//!
//! One record per mutation of an entry or of the plan, with JSON snapshots
//! of the entity around the change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of mutation being recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        })
    }
}

/// What was mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Entry,
    Plan,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Entry => "Entry",
            Self::Plan => "Plan",
        })
    }
}

/// A single audit log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,

    /// Entry id, or "current" for the plan
    pub entity_id: String,

    /// Short label, e.g. the entry description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    /// Snapshot before the change; absent for creations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,

    /// Snapshot after the change; absent for removals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

impl AuditEntry {
    fn record(
        operation: Operation,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: Option<Value>,
        after: Option<Value>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let snapshot = serde_json::to_value(entity).ok();
        Self::record(Operation::Create, entity_type, entity_id.into(), entity_name, None, snapshot)
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            diff_summary,
            ..Self::record(
                Operation::Update,
                entity_type,
                entity_id.into(),
                entity_name,
                serde_json::to_value(before).ok(),
                serde_json::to_value(after).ok(),
            )
        }
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        let snapshot = serde_json::to_value(entity).ok();
        Self::record(Operation::Delete, entity_type, entity_id.into(), entity_name, snapshot, None)
    }

    /// `[time] OP Type #id (label)`, plus a change line for updates
    pub fn format_human_readable(&self) -> String {
        let label = self
            .entity_name
            .as_deref()
            .map(|name| format!(" ({})", name))
            .unwrap_or_default();

        let mut line = format!(
            "[{}] {} {} #{}{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id,
            label
        );
        if let Some(diff) = &self.diff_summary {
            line.push_str("\n    ");
            line.push_str(diff);
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_names() {
        assert_eq!(Operation::Update.to_string(), "UPDATE");
        assert_eq!(EntityType::Entry.to_string(), "Entry");
        assert_eq!(EntityType::Plan.to_string(), "Plan");
    }

    #[test]
    fn test_create_and_delete_snapshots() {
        let data = json!({"description": "Rent", "amount": 900.0});

        let created = AuditEntry::create(EntityType::Entry, "1", Some("Rent".into()), &data);
        assert_eq!(created.operation, Operation::Create);
        assert!(created.before.is_none());
        assert!(created.after.is_some());

        let deleted = AuditEntry::delete(EntityType::Entry, "1", Some("Rent".into()), &data);
        assert!(deleted.before.is_some());
        assert!(deleted.after.is_none());
    }

    #[test]
    fn test_serialization_round_trip() {
        let entry = AuditEntry::create(EntityType::Plan, "current", None, &json!({"salary": 1}));
        let line = serde_json::to_string(&entry).unwrap();
        assert!(line.contains("\"entity_type\":\"plan\""));

        let parsed: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.entity_type, EntityType::Plan);
    }

    #[test]
    fn test_human_readable_format() {
        let entry = AuditEntry::update(
            EntityType::Entry,
            "3",
            Some("Rent".into()),
            &json!({"amount": 900.0}),
            &json!({"amount": 950.0}),
            Some("amount: 900.0 -> 950.0".into()),
        );

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE Entry #3 (Rent)"));
        assert!(formatted.ends_with("\n    amount: 900.0 -> 950.0"));
    }
}
