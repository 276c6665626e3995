//! Plan display formatting

use super::report::{format_bar, format_percentage};
use crate::models::{format_money, Plan};

/// Format the plan as one line per category with its share of the salary
pub fn format_plan(plan: &Plan, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Salary: {}\n", format_money(plan.salary, currency)));
    output.push_str(&"-".repeat(56));
    output.push('\n');

    for (category, amount) in &plan.allocation {
        let pct = if plan.salary > 0.0 {
            amount / plan.salary * 100.0
        } else {
            0.0
        };
        output.push_str(&format!(
            "{:<16} {:>14} {:>6} {}\n",
            category,
            format_money(*amount, currency),
            format_percentage(pct),
            format_bar(*amount, plan.salary, 16)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_format_plan() {
        let allocation: BTreeMap<String, f64> = [
            ("moradia".to_string(), 300.0),
            ("lazer".to_string(), 700.0),
        ]
        .into_iter()
        .collect();
        let plan = Plan {
            salary: 1000.0,
            allocation,
        };

        let output = format_plan(&plan, "R$");
        assert!(output.starts_with("Salary: R$ 1000.00"));
        assert!(output.contains("moradia"));
        assert!(output.contains("R$ 700.00"));
        assert!(output.contains("70%"));
    }
}
