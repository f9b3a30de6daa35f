//! Configuration module for vibecraft.
//!
//! Handles the TOML settings file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, AnalysisSettings, ArchetypeSettings, Settings, SettingsError,
};
