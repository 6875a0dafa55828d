//! Configuration management for Seatplan.
//!
//! Handles loading configuration from TOML files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::auto_assign::{AutoAssigner, AUTO_TABLE_CAPACITY, DEFAULT_FALLBACK_PREFIX};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Auto-assignment settings
    pub auto_assign: AutoAssignConfig,

    /// Export settings
    pub export: ExportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Plan file location (defaults to the data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_file: Option<PathBuf>,

    /// Whether to persist the plan after each change
    pub autosave: bool,
}

/// Auto-assignment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoAssignConfig {
    /// Capacity of tables created by auto-assign
    pub table_capacity: u32,

    /// Name prefix for tables of guests without tags
    pub fallback_table_prefix: String,
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Table column value for guests without a seat
    pub unassigned_label: String,

    /// Default directory for exported files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Looks for config in:
    /// 1. `.seatplan.toml` in current directory
    /// 2. `~/.config/seatplan/config.toml`
    /// 3. Falls back to defaults
    pub fn load() -> anyhow::Result<Self> {
        let local_config = PathBuf::from(".seatplan.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(config_dir) = Self::config_dir() {
            let global_config = config_dir.join("config.toml");
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::APP_NAME))
    }

    /// Get the data directory path (for the saved plan).
    pub fn data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(crate::APP_NAME))
    }

    /// Resolve the plan file: explicit override, then config, then data dir.
    pub fn plan_path(&self, explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
        if let Some(path) = explicit.or(self.general.plan_file.as_deref()) {
            return Ok(path.to_path_buf());
        }
        Self::data_dir()
            .map(|d| d.join("plan.json"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
    }

    /// Auto-assign engine configured from the `[auto_assign]` section.
    pub fn auto_assigner(&self) -> AutoAssigner {
        AutoAssigner::new()
            .with_table_capacity(self.auto_assign.table_capacity)
            .with_fallback_prefix(self.auto_assign.fallback_table_prefix.clone())
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { plan_file: None, autosave: true }
    }
}

impl Default for AutoAssignConfig {
    fn default() -> Self {
        Self {
            table_capacity: AUTO_TABLE_CAPACITY,
            fallback_table_prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { unassigned_label: "Unassigned".to_string(), output_dir: None }
    }
}
