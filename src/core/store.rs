//! The seating-state store.
//!
//! `SeatingStore` owns the canonical guest and table collections and is the
//! only place they are mutated. After every operation each guest's `table_id`
//! names exactly the one table whose `guests` list contains that guest.
//!
//! Operations on unknown ids are silent no-ops and report `false`. Capacity is
//! a soft limit: assignments beyond it are accepted and show up through
//! [`Table::occupancy`] and [`SeatingStats::over_capacity`].

use std::collections::HashSet;

use tracing::debug;

use super::layout::grid_positions;
use super::{
    parse_guest_line, Guest, GuestId, GuestUpdate, Plan, PlanResult, Position, Table, TableId,
    TablePreset, TableType, TableUpdate,
};

/// In-memory guests and tables with invariant-preserving mutations.
#[derive(Debug, Clone, Default)]
pub struct SeatingStore {
    /// Guests in creation order
    guests: Vec<Guest>,

    /// Tables in creation order
    tables: Vec<Table>,

    /// Bumped on every effective mutation
    revision: u64,
}

/// Aggregate numbers for the whole plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatingStats {
    pub tables: usize,
    pub guests: usize,
    pub seated: usize,
    pub unassigned: usize,
    pub total_capacity: u64,
    /// Capacity minus seated guests; negative when overbooked overall
    pub available_seats: i64,
    /// Tables holding more guests than their capacity
    pub over_capacity: Vec<TableId>,
}

impl SeatingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a plan after validating its cross-references.
    pub fn from_plan(plan: Plan) -> PlanResult<Self> {
        plan.validate()?;
        Ok(Self { guests: plan.guests, tables: plan.tables, revision: 0 })
    }

    /// Snapshot the current state as a plan stamped with the current time.
    pub fn to_plan(&self) -> Plan {
        Plan::new(self.guests.clone(), self.tables.clone())
    }

    /// Replace the whole state with a validated plan.
    pub(crate) fn replace(&mut self, plan: Plan) {
        self.guests = plan.guests;
        self.tables = plan.tables;
        self.touch();
    }

    /// Monotonic change counter, used to decide whether a save is needed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // --- Queries ---

    pub fn guests(&self) -> &[Guest] {
        &self.guests
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn guest(&self, id: &GuestId) -> Option<&Guest> {
        self.guests.iter().find(|g| &g.id == id)
    }

    pub fn table(&self, id: &TableId) -> Option<&Table> {
        self.tables.iter().find(|t| &t.id == id)
    }

    fn guest_mut(&mut self, id: &GuestId) -> Option<&mut Guest> {
        self.guests.iter_mut().find(|g| &g.id == id)
    }

    fn table_mut(&mut self, id: &TableId) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| &t.id == id)
    }

    /// Guests without a table, in guest order.
    pub fn unassigned_guests(&self) -> Vec<&Guest> {
        self.guests.iter().filter(|g| !g.is_seated()).collect()
    }

    /// Guests seated at a table, in seating order.
    pub fn guests_at(&self, table_id: &TableId) -> Vec<&Guest> {
        self.table(table_id)
            .map(|t| t.guests.iter().filter_map(|id| self.guest(id)).collect())
            .unwrap_or_default()
    }

    /// Unassigned guests whose name contains `search` (case-insensitive) and,
    /// when given, who carry `tag` exactly.
    pub fn unassigned_matching(&self, search: &str, tag: Option<&str>) -> Vec<&Guest> {
        let needle = search.to_lowercase();
        self.guests
            .iter()
            .filter(|g| !g.is_seated())
            .filter(|g| g.name.to_lowercase().contains(&needle))
            .filter(|g| tag.is_none_or(|t| g.has_tag(t)))
            .collect()
    }

    /// Every distinct tag, in first-seen order.
    pub fn all_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.guests
            .iter()
            .flat_map(|g| g.tags.iter())
            .map(String::as_str)
            .filter(|t| seen.insert(*t))
            .collect()
    }

    pub fn stats(&self) -> SeatingStats {
        let total_capacity: u64 = self.tables.iter().map(|t| u64::from(t.capacity)).sum();
        let seated: usize = self.tables.iter().map(Table::seated).sum();
        let unassigned = self.guests.iter().filter(|g| !g.is_seated()).count();

        SeatingStats {
            tables: self.tables.len(),
            guests: self.guests.len(),
            seated,
            unassigned,
            total_capacity,
            available_seats: total_capacity as i64 - seated as i64,
            over_capacity: self
                .tables
                .iter()
                .filter(|t| t.seats_left() < 0)
                .map(|t| t.id.clone())
                .collect(),
        }
    }

    // --- Guest operations ---

    /// Add an unseated guest and return its id.
    pub fn add_guest(&mut self, name: impl Into<String>, tags: Vec<String>) -> GuestId {
        let guest = Guest::new(name, tags);
        let id = guest.id.clone();
        debug!(guest = %id, name = %guest.name, "add guest");
        self.guests.push(guest);
        self.touch();
        id
    }

    /// Add one guest per line of `Name, tag1, tag2` text; lines without a name
    /// are skipped.
    pub fn add_guests_bulk(&mut self, text: &str) -> Vec<GuestId> {
        text.lines()
            .filter_map(parse_guest_line)
            .map(|(name, tags)| self.add_guest(name, tags))
            .collect()
    }

    /// Patch a guest's name and/or tags. An empty patch changes nothing.
    pub fn update_guest(&mut self, id: &GuestId, update: GuestUpdate) -> bool {
        let Some(guest) = self.guest_mut(id) else {
            debug!(guest = %id, "update on unknown guest ignored");
            return false;
        };
        if update.is_empty() {
            return true;
        }
        update.apply(guest);
        self.touch();
        true
    }

    /// Remove a guest and drop it from every table.
    pub fn delete_guest(&mut self, id: &GuestId) -> bool {
        let before = self.guests.len();
        self.guests.retain(|g| &g.id != id);
        if self.guests.len() == before {
            return false;
        }

        for table in &mut self.tables {
            table.guests.retain(|g| g != id);
        }
        debug!(guest = %id, "delete guest");
        self.touch();
        true
    }

    // --- Table operations ---

    /// Add an empty, unplaced table and return its id.
    ///
    /// Capacity is floored at 1 so every table the store holds passes
    /// [`Plan::validate`].
    pub fn add_table(
        &mut self,
        name: impl Into<String>,
        table_type: TableType,
        capacity: u32,
    ) -> TableId {
        let table = Table::new(name, table_type, capacity.max(1));
        let id = table.id.clone();
        debug!(table = %id, name = %table.name, capacity, "add table");
        self.tables.push(table);
        self.touch();
        id
    }

    /// Add a table from a preset, numbering it after existing tables.
    pub fn quick_add_table(&mut self, preset: TablePreset) -> TableId {
        let name = preset.next_name(&self.tables);
        self.add_table(name, preset.table_type(), preset.capacity())
    }

    /// Patch name, type and/or capacity. Seated guests and position are kept,
    /// and capacity is floored at 1 as in [`add_table`](Self::add_table).
    pub fn update_table(&mut self, id: &TableId, update: TableUpdate) -> bool {
        let Some(table) = self.table_mut(id) else {
            debug!(table = %id, "update on unknown table ignored");
            return false;
        };
        if update.is_empty() {
            return true;
        }
        update.apply(table);
        table.capacity = table.capacity.max(1);
        self.touch();
        true
    }

    /// Set a table's room position. Coordinates are stored as given.
    pub fn update_table_position(&mut self, id: &TableId, x: f64, y: f64) -> bool {
        let Some(table) = self.table_mut(id) else {
            return false;
        };
        table.position = Some(Position { x, y });
        self.touch();
        true
    }

    /// Place every table on an even grid, in table order.
    pub fn auto_arrange(&mut self) {
        if self.tables.is_empty() {
            return;
        }
        let positions = grid_positions(self.tables.len());
        for (table, position) in self.tables.iter_mut().zip(positions) {
            table.position = Some(position);
        }
        self.touch();
    }

    /// Remove a table and unseat everyone at it.
    pub fn delete_table(&mut self, id: &TableId) -> bool {
        let Some(index) = self.tables.iter().position(|t| &t.id == id) else {
            return false;
        };
        let table = self.tables.remove(index);

        for guest in &mut self.guests {
            if guest.table_id.as_ref() == Some(id) {
                guest.table_id = None;
            }
        }
        debug!(table = %id, unseated = table.guests.len(), "delete table");
        self.touch();
        true
    }

    // --- Seating operations ---

    /// Seat a guest at a table, leaving any previous table first.
    ///
    /// Re-seating at the current table changes nothing. Unknown guest or table
    /// ids leave the state untouched.
    pub fn assign_guest_to_table(&mut self, guest_id: &GuestId, table_id: &TableId) -> bool {
        if self.table(table_id).is_none() {
            debug!(guest = %guest_id, table = %table_id, "assign to unknown table ignored");
            return false;
        }
        let Some(guest) = self.guest(guest_id) else {
            debug!(guest = %guest_id, "assign of unknown guest ignored");
            return false;
        };
        if guest.table_id.as_ref() == Some(table_id) {
            return true;
        }

        self.detach(guest_id);
        if let Some(table) = self.table_mut(table_id) {
            table.guests.push(guest_id.clone());
        }
        if let Some(guest) = self.guest_mut(guest_id) {
            guest.table_id = Some(table_id.clone());
        }
        debug!(guest = %guest_id, table = %table_id, "assign guest");
        self.touch();
        true
    }

    /// Unseat a guest. No-op when the guest is unknown or already unseated.
    pub fn remove_guest_from_table(&mut self, guest_id: &GuestId) -> bool {
        match self.guest(guest_id) {
            Some(guest) if guest.is_seated() => {}
            _ => return false,
        }

        self.detach(guest_id);
        if let Some(guest) = self.guest_mut(guest_id) {
            guest.table_id = None;
        }
        debug!(guest = %guest_id, "unseat guest");
        self.touch();
        true
    }

    /// Drop a guest id from every table list.
    fn detach(&mut self, guest_id: &GuestId) {
        for table in &mut self.tables {
            table.guests.retain(|g| g != guest_id);
        }
    }

    /// Remove every guest and table.
    pub fn clear(&mut self) {
        self.guests.clear();
        self.tables.clear();
        self.touch();
    }
}
