//! User settings for fintrack
//!
//! Holds the allowed category names, the default plan percentage table, the
//! persistence flush policy and notification delivery preferences. Every
//! field has a default so older or partial settings files keep loading.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;
use crate::models::category::normalize_category;

/// When in-memory documents are written back to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    /// Save once, when storage is closed
    #[default]
    OnShutdown,
    /// Save the touched document after every successful mutation
    EveryMutation,
}

/// Notification delivery settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Destination chat for budget alerts; alerts stay local when unset
    #[serde(default)]
    pub chat_id: Option<i64>,

    /// Upper bound for a single delivery call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            chat_id: None,
            timeout_secs: default_timeout_secs(),
            api_base_url: default_api_base_url(),
        }
    }
}

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Allowed category names for entries
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Category whose income entries count as salary
    #[serde(default = "default_salary_category")]
    pub salary_category: String,

    /// Normalized category -> share of salary used by automatic plans
    #[serde(default = "default_plan_percentages")]
    pub plan_percentages: BTreeMap<String, f64>,

    /// Salary floor for plans; no floor when unset
    #[serde(default)]
    pub minimum_salary: Option<f64>,

    #[serde(default)]
    pub flush_policy: FlushPolicy,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_categories() -> Vec<String> {
    [
        "Salario",
        "Moradia",
        "Alimentação",
        "Transporte",
        "Saúde",
        "Educação",
        "Lazer",
        "Guardar",
        "Outros",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_salary_category() -> String {
    "Salario".to_string()
}

fn default_plan_percentages() -> BTreeMap<String, f64> {
    [
        ("moradia", 0.30),
        ("alimentacao", 0.20),
        ("transporte", 0.05),
        ("saude", 0.10),
        ("educacao", 0.10),
        ("lazer", 0.10),
        ("guardar", 0.15),
    ]
    .iter()
    .map(|(name, pct)| (name.to_string(), *pct))
    .collect()
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            categories: default_categories(),
            salary_category: default_salary_category(),
            plan_percentages: default_plan_percentages(),
            minimum_salary: None,
            flush_policy: FlushPolicy::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - `fintrack init` decides when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check invariants the rest of the crate relies on
    pub fn validate(&self) -> Result<(), FinanceError> {
        if self.categories.iter().all(|c| c.trim().is_empty()) {
            return Err(FinanceError::Config(
                "At least one category must be configured".into(),
            ));
        }

        if let Some(floor) = self.minimum_salary {
            if !floor.is_finite() || floor < 0.0 {
                return Err(FinanceError::Config(format!(
                    "minimum_salary must be a non-negative number, got {}",
                    floor
                )));
            }
        }

        let mut total = 0.0;
        for (name, pct) in &self.plan_percentages {
            if normalize_category(name) != *name {
                return Err(FinanceError::Config(format!(
                    "plan_percentages key '{}' must be lower-case without accents",
                    name
                )));
            }
            if !pct.is_finite() || *pct < 0.0 {
                return Err(FinanceError::Config(format!(
                    "plan_percentages['{}'] must be a non-negative fraction",
                    name
                )));
            }
            total += pct;
        }
        if self.plan_percentages.is_empty() || (total - 1.0).abs() > 1e-9 {
            return Err(FinanceError::Config(format!(
                "plan_percentages must sum to 1.0, got {}",
                total
            )));
        }

        if self.notifications.timeout_secs == 0 {
            return Err(FinanceError::Config(
                "notifications.timeout_secs must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
