//! Tag-based auto-assignment.
//!
//! Seats every unassigned guest by grouping on the primary tag and creating
//! fresh tables for each group. Existing tables are never topped off; each run
//! only handles the guests still without a seat, so a second run in a row
//! does nothing.
//!
//! The work is split in two: [`AutoAssigner::plan`] is a pure function from
//! guests to planned tables, and [`AutoAssigner::run`] applies that plan
//! through the store's normal `add_table` and `assign_guest_to_table`
//! operations.

use tracing::{debug, info};

use super::{primary_tag, Guest, GuestId, SeatingStore, TableId, TableType, UNTAGGED_GROUP};

/// Capacity of tables created by auto-assignment.
pub const AUTO_TABLE_CAPACITY: u32 = 8;

/// Name prefix for tables holding untagged guests.
pub const DEFAULT_FALLBACK_PREFIX: &str = "Table";

/// Guests sharing a primary tag, in first-encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroup<'a> {
    pub key: &'a str,
    pub guests: Vec<&'a Guest>,
}

impl TagGroup<'_> {
    pub fn is_untagged(&self) -> bool {
        self.key == UNTAGGED_GROUP
    }
}

/// A table the engine intends to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTable {
    pub name: String,
    pub guests: Vec<GuestId>,
}

/// Result of an auto-assignment run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoAssignOutcome {
    /// Every guest already had a table
    NothingToDo,
    /// New tables were created and guests seated
    Assigned { tables: Vec<TableId>, guests_assigned: usize },
}

impl AutoAssignOutcome {
    pub fn tables_created(&self) -> usize {
        match self {
            Self::NothingToDo => 0,
            Self::Assigned { tables, .. } => tables.len(),
        }
    }

    pub fn guests_assigned(&self) -> usize {
        match self {
            Self::NothingToDo => 0,
            Self::Assigned { guests_assigned, .. } => *guests_assigned,
        }
    }
}

/// Group guests by primary tag.
///
/// Groups appear in the order their key is first met; guests keep their input
/// order within a group.
pub fn group_by_primary_tag<'a>(guests: &[&'a Guest]) -> Vec<TagGroup<'a>> {
    let mut groups: Vec<TagGroup<'a>> = Vec::new();
    for &guest in guests {
        let key = primary_tag(guest);
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.guests.push(guest),
            None => groups.push(TagGroup { key, guests: vec![guest] }),
        }
    }
    groups
}

/// Greedy, deterministic grouping engine.
#[derive(Debug, Clone)]
pub struct AutoAssigner {
    table_capacity: u32,
    fallback_prefix: String,
}

impl Default for AutoAssigner {
    fn default() -> Self {
        Self {
            table_capacity: AUTO_TABLE_CAPACITY,
            fallback_prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
        }
    }
}

impl AutoAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the capacity of created tables (minimum 1).
    pub fn with_table_capacity(mut self, capacity: u32) -> Self {
        self.table_capacity = capacity.max(1);
        self
    }

    /// Override the name prefix used for untagged tables.
    pub fn with_fallback_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.fallback_prefix = prefix.into();
        self
    }

    pub fn table_capacity(&self) -> u32 {
        self.table_capacity
    }

    /// Work out the tables to create for `unassigned` guests.
    ///
    /// Tagged groups get tables named `"<tag> 1"`, `"<tag> 2"`, ...; untagged
    /// tables continue the overall count, `"<prefix> <existing + created + 1>"`.
    pub fn plan(&self, unassigned: &[&Guest], existing_tables: usize) -> Vec<PlannedTable> {
        let chunk_size = self.table_capacity.max(1) as usize;
        let mut planned = Vec::new();

        for group in group_by_primary_tag(unassigned) {
            for (i, chunk) in group.guests.chunks(chunk_size).enumerate() {
                let name = if group.is_untagged() {
                    format!("{} {}", self.fallback_prefix, existing_tables + planned.len() + 1)
                } else {
                    format!("{} {}", group.key, i + 1)
                };
                planned.push(PlannedTable {
                    name,
                    guests: chunk.iter().map(|g| g.id.clone()).collect(),
                });
            }
        }

        planned
    }

    /// Seat every unassigned guest in the store.
    pub fn run(&self, store: &mut SeatingStore) -> AutoAssignOutcome {
        let planned = {
            let unassigned = store.unassigned_guests();
            if unassigned.is_empty() {
                debug!("auto-assign: no unassigned guests");
                return AutoAssignOutcome::NothingToDo;
            }
            self.plan(&unassigned, store.tables().len())
        };

        let mut tables = Vec::with_capacity(planned.len());
        let mut guests_assigned = 0;
        for table in planned {
            let table_id = store.add_table(&table.name, TableType::Round, self.table_capacity);
            for guest_id in &table.guests {
                if store.assign_guest_to_table(guest_id, &table_id) {
                    guests_assigned += 1;
                }
            }
            debug!(table = %table_id, name = %table.name, seated = table.guests.len(), "auto-assign table");
            tables.push(table_id);
        }

        info!(tables = tables.len(), guests = guests_assigned, "auto-assign complete");
        AutoAssignOutcome::Assigned { tables, guests_assigned }
    }
}
