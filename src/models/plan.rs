//! Budget plan model
//!
//! A plan splits a salary across spending categories. Only one plan exists
//! at a time; it is replaced wholesale, never versioned.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::normalize_category;
use super::money::{round_cents, to_cents};
use crate::error::{FinanceError, FinanceResult};

/// Current budget allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub salary: f64,
    /// Normalized category name -> allocated amount
    pub allocation: BTreeMap<String, f64>,
}

impl Plan {
    /// Split a salary using a percentage table
    ///
    /// Each share is rounded to cents; the rounding remainder goes to the
    /// largest share (first one in name order on ties) so the shares add up
    /// to the salary.
    pub fn from_percentages(salary: f64, percentages: &BTreeMap<String, f64>) -> Self {
        let salary = round_cents(salary);

        let mut allocation: BTreeMap<String, f64> = percentages
            .iter()
            .map(|(name, pct)| (name.clone(), round_cents(salary * pct)))
            .collect();

        let allocated_cents: i64 = allocation.values().map(|v| to_cents(*v)).sum();
        let remainder_cents = to_cents(salary) - allocated_cents;
        if remainder_cents != 0 {
            let largest = allocation
                .iter()
                .fold(None::<(&String, f64)>, |best, (name, value)| match best {
                    Some((_, best_value)) if best_value >= *value => best,
                    _ => Some((name, *value)),
                })
                .map(|(name, _)| name.clone());
            if let Some(share) = largest.and_then(|name| allocation.get_mut(&name)) {
                *share = round_cents(*share + remainder_cents as f64 / 100.0);
            }
        }

        Self { salary, allocation }
    }

    /// Check a manually supplied plan and normalize its category keys
    ///
    /// Rejects a non-positive salary, salaries at or below `minimum_salary`,
    /// negative shares, and allocations that don't add up to the salary
    /// once both are rounded to cents.
    pub fn validated(self, minimum_salary: Option<f64>) -> FinanceResult<Self> {
        check_salary(self.salary, minimum_salary)?;

        if self.allocation.is_empty() {
            return Err(FinanceError::Validation(
                "Allocation must contain at least one category".into(),
            ));
        }

        let mut allocation = BTreeMap::new();
        for (name, amount) in self.allocation {
            let key = normalize_category(&name);
            if key.is_empty() {
                return Err(FinanceError::Validation(
                    "Allocation category names must not be empty".into(),
                ));
            }
            if !amount.is_finite() || amount < 0.0 {
                return Err(FinanceError::Validation(format!(
                    "Allocation for '{}' must be a non-negative number, got {}",
                    name, amount
                )));
            }
            if allocation.insert(key.clone(), amount).is_some() {
                return Err(FinanceError::Validation(format!(
                    "Category '{}' appears more than once in the allocation",
                    key
                )));
            }
        }

        let total: f64 = allocation.values().sum();
        if to_cents(total) != to_cents(self.salary) {
            return Err(FinanceError::Validation(format!(
                "Allocation adds up to {:.2} but salary is {:.2}",
                total, self.salary
            )));
        }

        Ok(Self {
            salary: self.salary,
            allocation,
        })
    }

    /// Allocated amount for a category name in any spelling
    pub fn limit_for(&self, category: &str) -> Option<f64> {
        self.allocation.get(&normalize_category(category)).copied()
    }

    pub fn allocated_total(&self) -> f64 {
        self.allocation.values().sum()
    }
}

/// Largest salary a plan accepts; keeps every cent count well inside `i64`
pub const MAX_SALARY: f64 = 1e12;

/// Shared salary rule for computed and edited plans
///
/// The salary is judged after rounding to cents, the form it is stored in.
pub fn check_salary(salary: f64, minimum_salary: Option<f64>) -> FinanceResult<()> {
    if !salary.is_finite() || round_cents(salary) <= 0.0 {
        return Err(FinanceError::Validation(format!(
            "Salary must be at least 0.01, got {}",
            salary
        )));
    }
    if salary > MAX_SALARY {
        return Err(FinanceError::Validation(format!(
            "Salary must not exceed {:.2}, got {}",
            MAX_SALARY, salary
        )));
    }
    if let Some(floor) = minimum_salary {
        if round_cents(salary) <= floor {
            return Err(FinanceError::Validation(format!(
                "Salary must be greater than the minimum of {:.2}, got {:.2}",
                floor, salary
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BTreeMap<String, f64> {
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
        .map(|(k, v)| (k.to_string(), *v))
        .collect()
    }

    #[test]
    fn test_from_percentages_sums_to_salary() {
        for salary in [4000.0, 1234.57, 0.07, 99_999.99, 3333.33] {
            let plan = Plan::from_percentages(salary, &table());
            assert!((plan.allocated_total() - salary).abs() < 0.01, "salary {}", salary);
        }
    }

    #[test]
    fn test_from_percentages_values() {
        let plan = Plan::from_percentages(4000.0, &table());
        assert_eq!(plan.allocation["moradia"], 1200.0);
        assert_eq!(plan.allocation["guardar"], 600.0);
        assert_eq!(plan.allocation.len(), 7);
    }

    #[test]
    fn test_validated_normalizes_keys() {
        let plan = Plan {
            salary: 1000.0,
            allocation: [("Moradia".to_string(), 600.0), ("Saúde".to_string(), 400.0)]
                .into_iter()
                .collect(),
        };
        let plan = plan.validated(None).unwrap();
        assert!(plan.allocation.contains_key("moradia"));
        assert!(plan.allocation.contains_key("saude"));
    }

    #[test]
    fn test_validated_rejects_mismatch_and_negatives() {
        let mismatch = Plan {
            salary: 1000.0,
            allocation: [("moradia".to_string(), 999.0)].into_iter().collect(),
        };
        assert!(mismatch.validated(None).unwrap_err().is_validation());

        let negative = Plan {
            salary: 1000.0,
            allocation: [("moradia".to_string(), 1500.0), ("lazer".to_string(), -500.0)]
                .into_iter()
                .collect(),
        };
        assert!(negative.validated(None).unwrap_err().is_validation());
    }

    #[test]
    fn test_validated_rejects_duplicate_after_normalizing() {
        let plan = Plan {
            salary: 100.0,
            allocation: [("Saúde".to_string(), 50.0), ("saude".to_string(), 50.0)]
                .into_iter()
                .collect(),
        };
        assert!(plan.validated(None).is_err());
    }

    #[test]
    fn test_minimum_salary_floor() {
        assert!(check_salary(1630.0, Some(1630.0)).is_err());
        assert!(check_salary(1630.01, Some(1630.0)).is_ok());
        assert!(check_salary(10.0, None).is_ok());
        assert!(check_salary(-1.0, None).is_err());
    }

    #[test]
    fn test_salary_that_rounds_to_zero_is_rejected() {
        assert!(check_salary(0.004, None).unwrap_err().is_validation());
        assert!(check_salary(0.006, None).is_ok());
    }

    #[test]
    fn test_salary_above_ceiling_is_rejected() {
        assert!(check_salary(1e17, None).unwrap_err().is_validation());
        assert!(check_salary(MAX_SALARY, None).is_ok());

        let plan = Plan::from_percentages(MAX_SALARY, &table());
        assert_eq!(to_cents(plan.allocated_total()), to_cents(MAX_SALARY));
    }

    #[test]
    fn test_limit_for_any_spelling() {
        let plan = Plan::from_percentages(1000.0, &table());
        assert_eq!(plan.limit_for("Alimentação"), Some(200.0));
        assert_eq!(plan.limit_for("Viagem"), None);
    }
}
