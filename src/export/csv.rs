//! CSV export, one row per guest.

use std::collections::HashMap;

use crate::core::{Guest, Table, TableId};

pub const CSV_HEADER: &str = "Guest Name,Tags,Table";

/// Render guests as CSV with columns `Guest Name, Tags, Table`.
///
/// Every field is quoted. Tags are joined with `", "`; guests without a table
/// get `unassigned_label` in the last column.
pub fn to_csv(guests: &[Guest], tables: &[Table], unassigned_label: &str) -> String {
    let names: HashMap<&TableId, &str> =
        tables.iter().map(|t| (&t.id, t.name.as_str())).collect();

    let mut out = String::with_capacity(64 * (guests.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for guest in guests {
        let table = guest
            .table_id
            .as_ref()
            .and_then(|id| names.get(id).copied())
            .unwrap_or(unassigned_label);

        out.push_str(&quote(&guest.name));
        out.push(',');
        out.push_str(&quote(&guest.tags_display()));
        out.push(',');
        out.push_str(&quote(table));
        out.push('\n');
    }

    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
