//! Table data structures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::GuestId;

/// Opaque, stable table identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(String);

impl TableId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TableId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for TableId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TableId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Table shape. Only affects the default capacity and rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableType {
    #[default]
    Round,
    Rectangle,
}

impl TableType {
    /// Seat count suggested when no capacity is given.
    pub fn default_capacity(self) -> u32 {
        match self {
            Self::Round => 8,
            Self::Rectangle => 6,
        }
    }

    /// Lowercase name used in the plan file and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Rectangle => "rectangle",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "round" => Ok(Self::Round),
            "rectangle" | "rect" => Ok(Self::Rectangle),
            other => Err(format!("unknown table type '{other}' (expected round or rectangle)")),
        }
    }
}

/// Position in the room, as percentages of the room bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// How full a table is relative to its capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    Available,
    Full,
    OverCapacity,
}

/// A seating unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Unique identifier
    pub id: TableId,

    /// Display name
    pub name: String,

    /// Shape
    #[serde(rename = "type", default)]
    pub table_type: TableType,

    /// Intended seat count (soft limit)
    pub capacity: u32,

    /// Seated guest ids in insertion order
    #[serde(default)]
    pub guests: Vec<GuestId>,

    /// Room position, absent until placed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Table {
    /// Create an empty, unplaced table with a fresh id.
    pub fn new(name: impl Into<String>, table_type: TableType, capacity: u32) -> Self {
        Self {
            id: TableId::new(),
            name: name.into(),
            table_type,
            capacity,
            guests: Vec::new(),
            position: None,
        }
    }

    /// Number of seated guests.
    pub fn seated(&self) -> usize {
        self.guests.len()
    }

    /// Remaining seats; negative when overbooked.
    pub fn seats_left(&self) -> i64 {
        i64::from(self.capacity) - self.guests.len() as i64
    }

    pub fn occupancy(&self) -> Occupancy {
        match self.seats_left() {
            n if n > 0 => Occupancy::Available,
            0 => Occupancy::Full,
            _ => Occupancy::OverCapacity,
        }
    }
}

/// Partial update for a table. Seated guests and position are not patchable
/// here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableUpdate {
    pub name: Option<String>,
    pub table_type: Option<TableType>,
    pub capacity: Option<u32>,
}

impl TableUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn table_type(mut self, table_type: TableType) -> Self {
        self.table_type = Some(table_type);
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.table_type.is_none() && self.capacity.is_none()
    }

    pub(crate) fn apply(self, table: &mut Table) {
        if let Some(name) = self.name {
            table.name = name;
        }
        if let Some(table_type) = self.table_type {
            table.table_type = table_type;
        }
        if let Some(capacity) = self.capacity {
            table.capacity = capacity;
        }
    }
}
