//! Visualization archetypes and how well a schema fits them.
//!
//! Requirements live in a declarative catalog ([`ArchetypeCatalog`], TOML,
//! embedded at build time and replaceable from settings). The scorer reads
//! a requirement record and never branches on the archetype itself:
//!
//! ```text
//!   catalog.toml ─► ArchetypeRequirement ─┐
//!                                         ├─► check_compatibility ─► CompatibilityResult
//!   SchemaDescription ────────────────────┤
//!                                         └─► recommend ─► Vec<Recommendation>
//! ```

mod catalog;
mod compat;
mod recommend;

pub use catalog::{ArchetypeCatalog, ArchetypeRequirement, CatalogError, CatalogResult, RequirementCheck};
pub use compat::{check_compatibility, CompatibilityResult, COMPATIBILITY_THRESHOLD};
pub use recommend::{heuristic_score, recommend, Recommendation};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named visualization pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Archetype {
    TimeSeries,
    GeoSpatial,
    GanttChart,
    KpiDashboard,
    Comparison,
    FunnelAnalysis,
    CohortAnalysis,
    Heatmap,
    NetworkGraph,
    Custom,
}

impl Archetype {
    /// Every archetype, in the fixed priority order used to break ties.
    pub const ALL: [Archetype; 10] = [
        Archetype::TimeSeries,
        Archetype::GeoSpatial,
        Archetype::GanttChart,
        Archetype::KpiDashboard,
        Archetype::Comparison,
        Archetype::FunnelAnalysis,
        Archetype::CohortAnalysis,
        Archetype::Heatmap,
        Archetype::NetworkGraph,
        Archetype::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::TimeSeries => "time-series",
            Archetype::GeoSpatial => "geo-spatial",
            Archetype::GanttChart => "gantt-chart",
            Archetype::KpiDashboard => "kpi-dashboard",
            Archetype::Comparison => "comparison",
            Archetype::FunnelAnalysis => "funnel-analysis",
            Archetype::CohortAnalysis => "cohort-analysis",
            Archetype::Heatmap => "heatmap",
            Archetype::NetworkGraph => "network-graph",
            Archetype::Custom => "custom",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| format!("unknown archetype: {}", s))
    }
}
