//! JSON export and import.

use crate::core::{Guest, Plan, PlanResult, Table};

/// Pretty-printed plan of the given state, stamped with the current time.
pub fn to_json(guests: &[Guest], tables: &[Table]) -> PlanResult<String> {
    Plan::new(guests.to_vec(), tables.to_vec()).to_json()
}

/// Parse and validate an exported plan.
pub fn from_json(input: &str) -> PlanResult<Plan> {
    Plan::from_json(input)
}
