//! Quick-add table presets and table numbering.

use std::fmt;
use std::str::FromStr;

use super::{Table, TableType};

/// One-click table templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TablePreset {
    /// Round, 8 seats, numbered "Table N"
    Standard,
    /// Round, 10 seats, numbered "Table N"
    Large,
    /// Rectangle, 6 seats, numbered "VIP N"
    Vip,
    /// Rectangle, 2 seats for the couple
    Head,
}

/// How a preset names the tables it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetName {
    /// `"<prefix> <N>"` with the next free number for that prefix
    Numbered(&'static str),
    /// Always the same name
    Fixed(&'static str),
}

impl TablePreset {
    pub const ALL: [Self; 4] = [Self::Standard, Self::Large, Self::Vip, Self::Head];

    pub fn table_type(self) -> TableType {
        match self {
            Self::Standard | Self::Large => TableType::Round,
            Self::Vip | Self::Head => TableType::Rectangle,
        }
    }

    pub fn capacity(self) -> u32 {
        match self {
            Self::Standard => 8,
            Self::Large => 10,
            Self::Vip => 6,
            Self::Head => 2,
        }
    }

    pub fn naming(self) -> PresetName {
        match self {
            Self::Standard | Self::Large => PresetName::Numbered("Table"),
            Self::Vip => PresetName::Numbered("VIP"),
            Self::Head => PresetName::Fixed("Bride & Groom"),
        }
    }

    /// Name for the next table created from this preset.
    pub fn next_name(self, existing: &[Table]) -> String {
        match self.naming() {
            PresetName::Numbered(prefix) => {
                format!("{prefix} {}", next_table_number(existing, prefix))
            }
            PresetName::Fixed(name) => name.to_string(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Large => "large",
            Self::Vip => "vip",
            Self::Head => "head",
        }
    }
}

impl fmt::Display for TablePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TablePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset '{s}' (expected standard, large, vip or head)"))
    }
}

/// Next number in the `"<prefix> <N>"` sequence.
///
/// One more than the largest `N` among tables named exactly `prefix`, a single
/// space, and a positive integer. Other names never advance the sequence, so
/// `"VIP Table 1"` does not count towards `"Table"`.
pub fn next_table_number(tables: &[Table], prefix: &str) -> u32 {
    tables
        .iter()
        .filter_map(|t| t.name.strip_prefix(prefix)?.strip_prefix(' ')?.parse::<u32>().ok())
        .max()
        .map_or(1, |n| n.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(names: &[&str]) -> Vec<Table> {
        names.iter().map(|n| Table::new(*n, TableType::Round, 8)).collect()
    }

    #[test]
    fn test_next_number_starts_at_one() {
        assert_eq!(next_table_number(&[], "Table"), 1);
        assert_eq!(next_table_number(&tables(&["Bride & Groom"]), "Table"), 1);
    }

    #[test]
    fn test_next_number_follows_highest() {
        let existing = tables(&["Table 1", "Table 4", "Table 2"]);
        assert_eq!(next_table_number(&existing, "Table"), 5);
    }

    #[test]
    fn test_prefixes_do_not_collide() {
        let existing = tables(&["VIP 1", "VIP Table 3", "Tables 9", "Table x", "Table 2"]);
        assert_eq!(next_table_number(&existing, "Table"), 3);
        assert_eq!(next_table_number(&existing, "VIP"), 2);
    }

    #[test]
    fn test_preset_names() {
        let existing = tables(&["Table 1"]);
        assert_eq!(TablePreset::Standard.next_name(&existing), "Table 2");
        assert_eq!(TablePreset::Large.next_name(&existing), "Table 2");
        assert_eq!(TablePreset::Vip.next_name(&existing), "VIP 1");
        assert_eq!(TablePreset::Head.next_name(&existing), "Bride & Groom");
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("VIP".parse::<TablePreset>().unwrap(), TablePreset::Vip);
        assert!("banquet".parse::<TablePreset>().is_err());
        assert_eq!(TablePreset::Large.capacity(), 10);
        assert_eq!(TablePreset::Head.table_type(), TableType::Rectangle);
    }
}
