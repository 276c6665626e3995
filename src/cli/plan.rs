//! Plan CLI commands
//!
//! Implements CLI commands for the budget plan.

use std::path::PathBuf;

use clap::Subcommand;

use super::parse_amount_arg;
use crate::display::format_plan;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{format_money, Plan};
use crate::services::PlanService;
use crate::storage::Storage;

/// Plan subcommands
#[derive(Subcommand)]
pub enum PlanCommands {
    /// Split a salary using the configured percentage table
    Compute {
        /// Monthly salary
        salary: String,
    },
    /// Compute the plan from the newest salary income entry
    FromIncome,
    /// Show the current plan
    Show,
    /// Replace the plan with a manual allocation
    ///
    /// Input is JSON: {"salary": 4000, "allocation": {"moradia": 1500, ...}}
    Edit {
        /// Plan as inline JSON
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        json: Option<String>,
        /// Read the plan JSON from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show the budget limit for a category
    Limit {
        /// Category name, any spelling
        category: String,
    },
}

/// Handle a plan command
pub fn handle_plan_command(storage: &Storage, cmd: PlanCommands) -> FinanceResult<()> {
    let service = PlanService::new(storage);
    let currency = storage.settings().currency_symbol.as_str();

    match cmd {
        PlanCommands::Compute { salary } => {
            let plan = service.compute_from_salary(parse_amount_arg(&salary)?)?;
            println!("Plan updated.");
            print!("{}", format_plan(&plan, currency));
        }

        PlanCommands::FromIncome => {
            let plan = service.compute_from_latest_income()?;
            println!("Plan computed from the latest salary entry.");
            print!("{}", format_plan(&plan, currency));
        }

        PlanCommands::Show => {
            let plan = service.get_current()?;
            print!("{}", format_plan(&plan, currency));
        }

        PlanCommands::Edit { json, file } => {
            let raw = match (json, file) {
                (Some(json), _) => json,
                (None, Some(path)) => std::fs::read_to_string(&path).map_err(|e| {
                    FinanceError::Io(format!("Failed to read {}: {}", path.display(), e))
                })?,
                (None, None) => {
                    return Err(FinanceError::Validation(
                        "Provide the plan with --json or --file".into(),
                    ))
                }
            };
            let plan: Plan = serde_json::from_str(&raw)
                .map_err(|e| FinanceError::Validation(format!("Invalid plan JSON: {}", e)))?;

            let plan = service.edit(plan)?;
            println!("Plan replaced.");
            print!("{}", format_plan(&plan, currency));
        }

        PlanCommands::Limit { category } => {
            let limit = service.limit_for_category(&category)?;
            if limit.is_finite() {
                println!("{}: {}", category, format_money(limit, currency));
            } else {
                println!("{}: no limit", category);
            }
        }
    }

    Ok(())
}
