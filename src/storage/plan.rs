//! Plan repository for JSON storage
//!
//! plan.json holds the current plan object itself, with no wrapper. A
//! missing file means no plan has been set yet.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::Plan;

use super::file_io::{read_json, write_json_atomic};

/// Repository for the single current plan
pub struct PlanRepository {
    path: PathBuf,
    plan: RwLock<Option<Plan>>,
    dirty: AtomicBool,
}

impl PlanRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            plan: RwLock::new(None),
            dirty: AtomicBool::new(false),
        }
    }

    /// Load the plan from disk
    pub fn load(&self) -> Result<(), FinanceError> {
        let loaded: Option<Plan> = read_json(&self.path)?;

        let mut plan = self
            .plan
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *plan = loaded;
        self.dirty.store(false, Ordering::SeqCst);

        Ok(())
    }

    /// Save the plan to disk; nothing is written while no plan is set
    pub fn save(&self) -> Result<(), FinanceError> {
        let plan = self
            .plan
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        if let Some(plan) = plan.as_ref() {
            write_json_atomic(&self.path, plan)?;
        }
        self.dirty.store(false, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn get(&self) -> Result<Option<Plan>, FinanceError> {
        let plan = self
            .plan
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(plan.clone())
    }

    /// Replace the current plan, returning the previous one
    pub fn set(&self, new_plan: Plan) -> Result<Option<Plan>, FinanceError> {
        let mut plan = self
            .plan
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let previous = plan.replace(new_plan);
        self.dirty.store(true, Ordering::SeqCst);
        Ok(previous)
    }
}
