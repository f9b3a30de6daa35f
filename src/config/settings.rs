//! TOML-based configuration for vibecraft.
//!
//! Supports a config file (vibecraft.toml) with environment variable
//! expansion in paths.
//!
//! Example configuration:
//! ```toml
//! [analysis]
//! sampling_ceiling = 1000000
//! sample_size = 100
//! row_sample_limit = 5
//! statistics_timeout_ms = 2000   # 0 disables the budget
//! detect_one_to_one = false
//!
//! [archetypes]
//! enabled = ["time-series", "geo-spatial", "kpi-dashboard", "comparison"]
//! catalog = "${HOME}/vibecraft/archetypes.toml"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::archetype::Archetype;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Schema analysis settings.
    pub analysis: AnalysisSettings,

    /// Archetype catalog settings.
    pub archetypes: ArchetypeSettings,
}

/// Schema analysis settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Tables with at least this many rows get no column statistics.
    pub sampling_ceiling: u64,

    /// Non-null values fetched per column for classification.
    pub sample_size: usize,

    /// Raw rows kept per table.
    pub row_sample_limit: usize,

    /// Per-column statistics budget in milliseconds. 0 disables it.
    pub statistics_timeout_ms: u64,

    /// Mark foreign keys on unique columns as one-to-one.
    pub detect_one_to_one: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sampling_ceiling: 1_000_000,
            sample_size: 100,
            row_sample_limit: 5,
            statistics_timeout_ms: 2_000,
            detect_one_to_one: false,
        }
    }
}

impl AnalysisSettings {
    /// The statistics budget, `None` when disabled.
    pub fn statistics_timeout(&self) -> Option<Duration> {
        (self.statistics_timeout_ms > 0).then(|| Duration::from_millis(self.statistics_timeout_ms))
    }
}

/// Archetype catalog settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArchetypeSettings {
    /// Archetypes considered by checks and recommendations.
    pub enabled: Vec<Archetype>,

    /// Catalog file replacing the built-in one (supports ${ENV_VAR}).
    pub catalog: Option<String>,
}

impl Default for ArchetypeSettings {
    fn default() -> Self {
        Self {
            enabled: vec![
                Archetype::TimeSeries,
                Archetype::GeoSpatial,
                Archetype::KpiDashboard,
                Archetype::Comparison,
            ],
            catalog: None,
        }
    }
}

impl ArchetypeSettings {
    /// Get the catalog path with environment variables expanded.
    pub fn catalog_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.catalog
            .as_deref()
            .map(|p| expand_env_vars(p).map(PathBuf::from))
            .transpose()
    }

    pub fn is_enabled(&self, archetype: Archetype) -> bool {
        self.enabled.contains(&archetype)
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `VIBECRAFT_CONFIG`
    /// 2. `./vibecraft.toml`
    /// 3. `~/.config/vibecraft/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("VIBECRAFT_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("vibecraft.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("vibecraft").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.analysis.sample_size == 0 {
            return Err(SettingsError::InvalidConfig(
                "analysis.sample_size must be at least 1".to_string(),
            ));
        }
        if self.archetypes.enabled.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "archetypes.enabled must name at least one archetype".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let braced = chars.next_if_eq(&'{').is_some();
        let mut var_name = String::new();
        while let Some(ch) = chars.next_if(|ch| braced || ch.is_alphanumeric() || *ch == '_') {
            if braced && ch == '}' {
                break;
            }
            var_name.push(ch);
        }

        if var_name.is_empty() && !braced {
            // Just a lone $, keep it
            result.push('$');
            continue;
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
