//! Plan exports.
//!
//! Exporters are pure functions of the current guests and tables; they never
//! touch the store.

mod csv;
mod json;

pub use self::csv::{to_csv, CSV_HEADER};
pub use self::json::{from_json, to_json};

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Download format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown export format '{other}' (expected json or csv)")),
        }
    }
}

/// `seating-plan-<YYYY-MM-DD>.<ext>`
pub fn export_filename(date: NaiveDate, format: ExportFormat) -> String {
    format!("seating-plan-{}.{}", date.format("%Y-%m-%d"), format.extension())
}
