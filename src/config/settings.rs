//! User settings for Finboard
//!
//! Every field has a serde default, so an empty or partial `config.json`
//! still loads.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::FinboardPaths;
use crate::error::{FinboardError, FinboardResult};

/// Simulated service latency, in milliseconds per kind of call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_list_ms")]
    pub list_ms: u64,

    #[serde(default = "default_fetch_ms")]
    pub fetch_ms: u64,

    #[serde(default = "default_create_ms")]
    pub create_ms: u64,

    #[serde(default = "default_update_ms")]
    pub update_ms: u64,

    #[serde(default = "default_delete_ms")]
    pub delete_ms: u64,

    /// Totals and other derived values
    #[serde(default = "default_aggregate_ms")]
    pub aggregate_ms: u64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            list_ms: default_list_ms(),
            fetch_ms: default_fetch_ms(),
            create_ms: default_create_ms(),
            update_ms: default_update_ms(),
            delete_ms: default_delete_ms(),
            aggregate_ms: default_aggregate_ms(),
        }
    }
}

/// User settings for Finboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub latency: LatencySettings,

    /// Rows per page in transaction listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Load the seed from this directory instead of the built-in fixtures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<PathBuf>,

    /// Mirror the audit trail to `audit.log`
    #[serde(default)]
    pub audit_to_file: bool,
}

fn default_true() -> bool {
    true
}

fn default_list_ms() -> u64 {
    300
}

fn default_fetch_ms() -> u64 {
    200
}

fn default_create_ms() -> u64 {
    400
}

fn default_update_ms() -> u64 {
    300
}

fn default_delete_ms() -> u64 {
    250
}

fn default_aggregate_ms() -> u64 {
    200
}

fn default_schema_version() -> u32 {
    1
}

fn default_page_size() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            latency: LatencySettings::default(),
            page_size: default_page_size(),
            fixtures_dir: None,
            audit_to_file: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinboardPaths) -> FinboardResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FinboardError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            FinboardError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinboardPaths) -> FinboardResult<()> {
        self.validate()?;
        paths.ensure_directories()?;

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.settings_file(), json).map_err(|e| {
            FinboardError::Io(format!("Failed to write settings file: {}", e))
        })
    }

    pub fn validate(&self) -> FinboardResult<()> {
        if self.page_size == 0 {
            return Err(FinboardError::Config("page_size must be at least 1".into()));
        }
        Ok(())
    }
}
