//! Guest data structures.
//!
//! Defines the `Guest` struct, its identifier, the patch type used for
//! partial updates, and the tag helpers used by grouping and bulk entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TableId;

/// Grouping key for guests without a usable first tag.
pub const UNTAGGED_GROUP: &str = "Mixed";

/// Opaque, stable guest identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(String);

impl GuestId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for GuestId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for GuestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GuestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A person to be seated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    /// Unique identifier
    pub id: GuestId,

    /// Display name
    pub name: String,

    /// Free-text tags; the first one drives auto-assignment
    #[serde(default)]
    pub tags: Vec<String>,

    /// Table this guest is seated at, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<TableId>,
}

impl Guest {
    /// Create an unseated guest with a fresh id.
    pub fn new(name: impl Into<String>, tags: Vec<String>) -> Self {
        Self { id: GuestId::new(), name: name.into(), tags, table_id: None }
    }

    /// Whether the guest currently has a seat.
    pub fn is_seated(&self) -> bool {
        self.table_id.is_some()
    }

    /// Whether the guest carries the given tag (exact, case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Comma-joined tags for display and CSV output.
    pub fn tags_display(&self) -> String {
        self.tags.join(", ")
    }
}

/// Partial update for a guest.
///
/// Only the name and tags can be patched; seating changes go through the
/// store's assignment operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestUpdate {
    pub name: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl GuestUpdate {
    /// Set the new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the tag list.
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.tags.is_none()
    }

    pub(crate) fn apply(self, guest: &mut Guest) {
        if let Some(name) = self.name {
            guest.name = name;
        }
        if let Some(tags) = self.tags {
            guest.tags = tags;
        }
    }
}

/// The grouping key for auto-assignment.
///
/// Returns the first tag, or [`UNTAGGED_GROUP`] when the guest has no tags or
/// the first tag is empty. Later tags are ignored.
pub fn primary_tag(guest: &Guest) -> &str {
    match guest.tags.first() {
        Some(tag) if !tag.is_empty() => tag,
        _ => UNTAGGED_GROUP,
    }
}

/// Split comma-separated tag input, trimming pieces and dropping empty ones.
pub fn parse_tags(input: &str) -> Vec<String> {
    input.split(',').map(str::trim).filter(|t| !t.is_empty()).map(String::from).collect()
}

/// Parse one bulk-entry line of the form `Name, tag1, tag2`.
///
/// Returns `None` when the name part is empty.
pub fn parse_guest_line(line: &str) -> Option<(String, Vec<String>)> {
    let mut parts = line.split(',').map(str::trim);
    let name = parts.next().filter(|n| !n.is_empty())?;
    let tags = parts.filter(|t| !t.is_empty()).map(String::from).collect();
    Some((name.to_string(), tags))
}
