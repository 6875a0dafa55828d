//! Plan loading and import error types.

use thiserror::Error;

use super::{GuestId, TableId};

/// Result type for plan parsing and validation.
pub type PlanResult<T> = Result<T, PlanError>;

/// Reasons a plan is rejected on import or load.
///
/// Store mutations never produce these; they only guard data coming from
/// outside the process.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The input is not a valid plan document.
    #[error("Invalid plan JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Two guests share an id.
    #[error("Duplicate guest id '{0}'")]
    DuplicateGuest(GuestId),

    /// Two tables share an id.
    #[error("Duplicate table id '{0}'")]
    DuplicateTable(TableId),

    /// A table lists a guest that does not exist.
    #[error("Table '{table}' lists unknown guest '{guest}'")]
    UnknownGuest { table: TableId, guest: GuestId },

    /// A guest is listed more than once across tables.
    #[error("Guest '{0}' is seated more than once")]
    SeatedTwice(GuestId),

    /// A guest's table reference disagrees with table membership.
    #[error("Guest '{guest}' has table {expected:?} but is listed at {actual:?}")]
    SeatMismatch { guest: GuestId, expected: Option<TableId>, actual: Option<TableId> },

    /// Capacity must be positive.
    #[error("Table '{0}' has zero capacity")]
    ZeroCapacity(TableId),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
