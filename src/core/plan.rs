//! The persisted and exported snapshot of a seating plan.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Guest, GuestId, PlanError, PlanResult, Table, TableId};

/// Guests, tables and the time of the last change.
///
/// The JSON shape matches the browser app's saved plans:
/// `{ "guests": [...], "tables": [...], "lastUpdated": "<ISO-8601>" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub guests: Vec<Guest>,
    pub tables: Vec<Table>,
    pub last_updated: DateTime<Utc>,
}

impl Plan {
    /// Build a plan stamped with the current time.
    pub fn new(guests: Vec<Guest>, tables: Vec<Table>) -> Self {
        Self { guests, tables, last_updated: Utc::now() }
    }

    /// Parse and validate a plan document.
    pub fn from_json(input: &str) -> PlanResult<Self> {
        let plan: Self = serde_json::from_str(input)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> PlanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the guest/table cross-references.
    ///
    /// Every table entry must name an existing guest, each guest may be listed
    /// at most once overall, and a guest's `tableId` must be exactly the table
    /// that lists it.
    pub fn validate(&self) -> PlanResult<()> {
        let mut guest_ids = HashSet::with_capacity(self.guests.len());
        for guest in &self.guests {
            if !guest_ids.insert(&guest.id) {
                return Err(PlanError::DuplicateGuest(guest.id.clone()));
            }
        }

        let mut table_ids = HashSet::with_capacity(self.tables.len());
        let mut seated_at: HashMap<&GuestId, &TableId> = HashMap::new();
        for table in &self.tables {
            if !table_ids.insert(&table.id) {
                return Err(PlanError::DuplicateTable(table.id.clone()));
            }
            if table.capacity == 0 {
                return Err(PlanError::ZeroCapacity(table.id.clone()));
            }
            for guest_id in &table.guests {
                if !guest_ids.contains(guest_id) {
                    return Err(PlanError::UnknownGuest {
                        table: table.id.clone(),
                        guest: guest_id.clone(),
                    });
                }
                if seated_at.insert(guest_id, &table.id).is_some() {
                    return Err(PlanError::SeatedTwice(guest_id.clone()));
                }
            }
        }

        for guest in &self.guests {
            let actual = seated_at.get(&guest.id).copied();
            if guest.table_id.as_ref() != actual {
                return Err(PlanError::SeatMismatch {
                    guest: guest.id.clone(),
                    expected: guest.table_id.clone(),
                    actual: actual.cloned(),
                });
            }
        }

        Ok(())
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}
