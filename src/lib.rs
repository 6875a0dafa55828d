#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::float_cmp)]

//! # Seatplan
//!
//! Wedding seating planner - build a guest list, set up tables, seat guests by
//! hand or automatically by tag, lay tables out in the room, and export the
//! result.
//!
//! ## Features
//!
//! - **Consistent seating model**: every guest sits at most at one table, and
//!   deleting a guest or a table repairs the other side
//! - **Auto-assign**: groups unassigned guests by their first tag and creates
//!   tables of 8 for each group
//! - **Soft capacity**: overbooked tables are reported, never rejected
//! - **Exports**: JSON (re-importable) and CSV
//!
//! ## Quick Start
//!
//! ```bash
//! seatplan guest add "Ana" --tag Family
//! seatplan guest bulk guests.txt
//! seatplan auto-assign
//! seatplan show
//! seatplan export csv
//! ```
//!
//! ## Library use
//!
//! ```
//! use seatplan::core::{AutoAssigner, SeatingStore};
//!
//! let mut store = SeatingStore::new();
//! store.add_guests_bulk("Ana, Family\nBen, Family\nCara, Friends");
//!
//! let outcome = AutoAssigner::new().run(&mut store);
//! assert_eq!(outcome.tables_created(), 2);
//! assert!(store.unassigned_guests().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod app;
pub mod core;
pub mod export;
pub mod storage;

// Re-export commonly used types
pub use app::App;
pub use core::{
    AutoAssignOutcome, AutoAssigner, Config, Guest, GuestId, Plan, PlanError, SeatingStore,
    Table, TableId, TableType,
};
pub use storage::{FileStorage, MemoryStorage, PlanStorage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "seatplan";
