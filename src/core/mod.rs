//! Core types and functionality for Seatplan.
//!
//! This module contains the seating model (guests, tables, plans), the store
//! that keeps them consistent, the auto-assignment engine, and configuration.

mod auto_assign;
mod config;
mod error;
mod guest;
pub mod layout;
mod plan;
mod presets;
mod store;
mod table;

pub use auto_assign::{
    group_by_primary_tag, AutoAssignOutcome, AutoAssigner, PlannedTable, TagGroup,
    AUTO_TABLE_CAPACITY, DEFAULT_FALLBACK_PREFIX,
};
pub use config::{AutoAssignConfig, Config, ExportConfig, GeneralConfig};
pub use error::{PlanError, PlanResult};
pub use guest::{
    parse_guest_line, parse_tags, primary_tag, Guest, GuestId, GuestUpdate, UNTAGGED_GROUP,
};
pub use plan::Plan;
pub use presets::{next_table_number, PresetName, TablePreset};
pub use store::{SeatingStats, SeatingStore};
pub use table::{Occupancy, Position, Table, TableId, TableType, TableUpdate};
