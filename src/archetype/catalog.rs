//! Declarative archetype requirement registry.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Archetype;
use crate::config::{ArchetypeSettings, SettingsError};
use crate::inference::{SemanticKind, TypeCategory};

const BUILTIN_CATALOG: &str = include_str!("catalog.toml");

/// Error type for catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read catalog file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Archetype '{0}' is declared more than once")]
    Duplicate(Archetype),

    #[error("Archetype '{0}' is enabled but missing from the catalog")]
    Missing(Archetype),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Structural requirements of one archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeRequirement {
    #[serde(rename = "id")]
    pub archetype: Archetype,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_min_tables")]
    pub min_tables: usize,
    /// Categories that must each appear on at least one column.
    #[serde(default)]
    pub required_categories: Vec<TypeCategory>,
    /// Archetype-specific checks, applied after the generic ones.
    #[serde(default)]
    pub checks: Vec<RequirementCheck>,
}

fn default_min_tables() -> usize {
    1
}

/// An extra check with its own penalty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RequirementCheck {
    /// Some column is classified as one of `kinds`.
    SemanticType {
        kinds: Vec<SemanticKind>,
        penalty: u32,
        reason: String,
    },
    /// Some column's name contains one of `contains`, case-insensitively.
    ColumnName {
        contains: Vec<String>,
        penalty: u32,
        reason: String,
    },
}

impl RequirementCheck {
    pub fn penalty(&self) -> u32 {
        match self {
            RequirementCheck::SemanticType { penalty, .. }
            | RequirementCheck::ColumnName { penalty, .. } => *penalty,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            RequirementCheck::SemanticType { reason, .. }
            | RequirementCheck::ColumnName { reason, .. } => reason,
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "archetype")]
    archetypes: Vec<ArchetypeRequirement>,
}

/// Ordered set of archetype requirements. Order is tie-break priority.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchetypeCatalog {
    requirements: Vec<ArchetypeRequirement>,
}

impl ArchetypeCatalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(content: &str) -> CatalogResult<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.archetypes)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CatalogError::FileNotFound(path.to_path_buf()));
        }
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Build from records, rejecting duplicate archetypes.
    pub fn new(requirements: Vec<ArchetypeRequirement>) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        if let Some(dup) = requirements.iter().find(|r| !seen.insert(r.archetype)) {
            return Err(CatalogError::Duplicate(dup.archetype));
        }
        Ok(Self { requirements })
    }

    /// The catalog configured by `settings`: the override file or the
    /// built-in one, restricted to the enabled archetypes.
    pub fn from_settings(settings: &ArchetypeSettings) -> CatalogResult<Self> {
        let catalog = match settings.catalog_path()? {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin()?,
        };
        if let Some(missing) = settings.enabled.iter().find(|a| catalog.get(**a).is_none()) {
            return Err(CatalogError::Missing(*missing));
        }
        Ok(catalog.restricted_to(&settings.enabled))
    }

    pub fn get(&self, archetype: Archetype) -> Option<&ArchetypeRequirement> {
        self.requirements.iter().find(|r| r.archetype == archetype)
    }

    /// Keep only `enabled` archetypes, preserving catalog order.
    pub fn restricted_to(&self, enabled: &[Archetype]) -> Self {
        Self {
            requirements: self
                .requirements
                .iter()
                .filter(|r| enabled.contains(&r.archetype))
                .cloned()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchetypeRequirement> {
        self.requirements.iter()
    }

    pub fn archetypes(&self) -> impl Iterator<Item = Archetype> + '_ {
        self.requirements.iter().map(|r| r.archetype)
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
