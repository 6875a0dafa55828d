//! Application state and lifecycle management.
//!
//! `App` is the explicit session object handed to every command: it owns the
//! seating store, the configuration and the storage adapter, and decides when
//! the settled state is written back.

use std::path::Path;

use anyhow::Context as _;
use tracing::{debug, info, warn};

use crate::core::{AutoAssignOutcome, Config, GuestId, PlanResult, SeatingStore, TableId};
use crate::export::{self, ExportFormat};
use crate::storage::{FileStorage, PlanStorage};

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Guests and tables
    pub store: SeatingStore,

    /// Application configuration
    pub config: Config,

    /// Where the plan is persisted
    storage: Box<dyn PlanStorage>,

    /// Store revision that was last written
    saved_revision: u64,
}

impl App {
    /// Open the plan file chosen by `plan_file` or the configuration.
    pub fn open(config: Config, plan_file: Option<&Path>) -> anyhow::Result<Self> {
        let path = config.plan_path(plan_file)?;
        debug!(path = %path.display(), "opening plan");
        Ok(Self::with_storage(config, Box::new(FileStorage::new(path))))
    }

    /// Start from whatever `storage` holds; an empty store if nothing loads.
    pub fn with_storage(config: Config, storage: Box<dyn PlanStorage>) -> Self {
        let store = match storage.load().map(SeatingStore::from_plan) {
            Some(Ok(store)) => store,
            Some(Err(e)) => {
                warn!(error = %e, "ignoring inconsistent saved plan");
                SeatingStore::new()
            }
            None => SeatingStore::new(),
        };
        let saved_revision = store.revision();
        Self { store, config, storage, saved_revision }
    }

    /// Whether the store changed since the last save.
    pub fn is_dirty(&self) -> bool {
        self.store.revision() != self.saved_revision
    }

    /// Save the current state if it changed and autosave is on.
    ///
    /// Call once after a burst of mutations; only the settled state is written.
    pub fn persist(&mut self) {
        if self.config.general.autosave && self.is_dirty() {
            self.save();
        }
    }

    /// Save unconditionally.
    pub fn save(&mut self) {
        self.storage.save(&self.store.to_plan());
        self.saved_revision = self.store.revision();
    }

    /// Remove every guest and table, and the saved plan.
    pub fn clear_all(&mut self) {
        self.store.clear();
        self.storage.clear();
        self.saved_revision = self.store.revision();
        info!("cleared seating plan");
    }

    /// Seat all unassigned guests using the configured engine.
    pub fn auto_assign(&mut self) -> AutoAssignOutcome {
        self.config.auto_assigner().run(&mut self.store)
    }

    /// Replace the whole state with an imported plan.
    ///
    /// The current state is untouched when the input is rejected.
    pub fn import_json(&mut self, input: &str) -> PlanResult<()> {
        let plan = export::from_json(input)?;
        info!(guests = plan.guests.len(), tables = plan.tables.len(), "imported plan");
        self.store.replace(plan);
        Ok(())
    }

    /// Render the current state in an export format.
    pub fn export(&self, format: ExportFormat) -> PlanResult<String> {
        match format {
            ExportFormat::Json => export::to_json(self.store.guests(), self.store.tables()),
            ExportFormat::Csv => Ok(export::to_csv(
                self.store.guests(),
                self.store.tables(),
                &self.config.export.unassigned_label,
            )),
        }
    }

    /// Find a guest by id or exact name.
    pub fn resolve_guest(&self, key: &str) -> anyhow::Result<GuestId> {
        let id = GuestId::from(key);
        if self.store.guest(&id).is_some() {
            return Ok(id);
        }
        let matches: Vec<_> = self.store.guests().iter().filter(|g| g.name == key).collect();
        match matches.as_slice() {
            [guest] => Ok(guest.id.clone()),
            [] => anyhow::bail!("No guest named '{key}'"),
            _ => anyhow::bail!("'{key}' matches {} guests; use the id instead", matches.len()),
        }
    }

    /// Find a table by id or exact name.
    pub fn resolve_table(&self, key: &str) -> anyhow::Result<TableId> {
        let id = TableId::from(key);
        if self.store.table(&id).is_some() {
            return Ok(id);
        }
        let matches: Vec<_> = self.store.tables().iter().filter(|t| t.name == key).collect();
        match matches.as_slice() {
            [table] => Ok(table.id.clone()),
            [] => anyhow::bail!("No table named '{key}'"),
            _ => anyhow::bail!("'{key}' matches {} tables; use the id instead", matches.len()),
        }
    }

    /// Read a plan file for import, with the path in the error message.
    pub fn read_import(path: &Path) -> anyhow::Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Could not read plan file {}", path.display()))
    }
}
