//! JSON file storage.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::PlanStorage;
use crate::core::{Plan, PlanError, PlanResult};

/// Stores the plan as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read and validate the plan, surfacing the failure reason.
    pub fn try_load(&self) -> PlanResult<Option<Plan>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Plan::from_json(&content).map(Some)
    }

    /// Write the plan, creating the parent directory if needed.
    pub fn try_save(&self, plan: &Plan) -> PlanResult<()> {
        let content = plan.to_json()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Where a rejected plan is moved: `plan.json` becomes `plan.json.bak`.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".bak");
        PathBuf::from(name)
    }

    pub fn try_clear(&self) -> PlanResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl PlanStorage for FileStorage {
    fn load(&self) -> Option<Plan> {
        match self.try_load() {
            Ok(plan) => {
                debug!(path = %self.path.display(), found = plan.is_some(), "load plan");
                plan
            }
            Err(PlanError::Io(e)) => {
                warn!(path = %self.path.display(), error = %e, "failed to read seating plan");
                None
            }
            Err(e) => {
                // Move the rejected file aside before the next save
                let backup = self.backup_path();
                match fs::rename(&self.path, &backup) {
                    Ok(()) => warn!(
                        path = %self.path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "rejected seating plan, moved aside"
                    ),
                    Err(rename_err) => warn!(
                        path = %self.path.display(),
                        error = %e,
                        rename_error = %rename_err,
                        "rejected seating plan, could not move it aside"
                    ),
                }
                None
            }
        }
    }

    fn save(&mut self, plan: &Plan) {
        match self.try_save(plan) {
            Ok(()) => info!(
                path = %self.path.display(),
                guests = plan.guests.len(),
                tables = plan.tables.len(),
                "saved seating plan"
            ),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to save seating plan"),
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.try_clear() {
            warn!(path = %self.path.display(), error = %e, "failed to clear seating plan");
        }
    }
}
