//! Schema-only archetype ranking.
//!
//! Each archetype gets an independent heuristic score from the classified
//! columns and relationships; no requirement records are consulted. Scores
//! are fixed levels, not sums:
//!
//! | archetype       | condition                                            | score |
//! |-----------------|------------------------------------------------------|-------|
//! | time-series     | a date column and a non-key numeric column           | 90    |
//! | kpi-dashboard   | at least 3 non-key numeric columns                   | 85    |
//! | geo-spatial     | latitude and longitude names / a location name       | 80/60 |
//! | gantt-chart     | start date with end date or duration                 | 75    |
//! | comparison      | more than one table, or any relationship             | 70    |
//! | funnel-analysis | a percentage column or a rate/ratio/percent name     | 55    |
//! | heatmap         | a table with 2 non-key text and 1 non-key numeric    | 50    |
//! | network-graph   | a self-reference or link-like column names           | 50    |

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::catalog::ArchetypeCatalog;
use super::Archetype;
use crate::inference::{SemanticKind, TypeCategory};
use crate::roles::{map_table, NameClass, TableRoles};
use crate::schema::{ColumnDescription, SchemaDescription, TableDescription};

/// One ranked archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub archetype: Archetype,
    /// In `[0, 100]`.
    pub score: u32,
}

/// Rank every archetype in `catalog` for `schema`, best first.
///
/// Equal scores keep catalog order.
pub fn recommend(schema: &SchemaDescription, catalog: &ArchetypeCatalog) -> Vec<Recommendation> {
    let mut ranked: Vec<Recommendation> = catalog
        .archetypes()
        .map(|archetype| Recommendation {
            archetype,
            score: heuristic_score(archetype, schema),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    debug!(?ranked, "archetypes ranked");
    ranked
}

/// Heuristic fitness of `schema` for `archetype`.
pub fn heuristic_score(archetype: Archetype, schema: &SchemaDescription) -> u32 {
    let score = match archetype {
        Archetype::TimeSeries => {
            let has_date = schema.columns().any(|(_, c)| is_date(c));
            if has_date && non_key_numeric_count(schema) > 0 {
                90
            } else {
                0
            }
        }
        Archetype::KpiDashboard if non_key_numeric_count(schema) >= 3 => 85,
        Archetype::GeoSpatial => geo_score(schema),
        Archetype::GanttChart if any_table_maps(schema, Archetype::GanttChart) => 75,
        Archetype::Comparison if schema.tables.len() > 1 || !schema.relationships.is_empty() => 70,
        Archetype::FunnelAnalysis if schema.columns().any(|(_, c)| is_rate(c)) => 55,
        Archetype::Heatmap if schema.tables.iter().any(has_matrix_shape) => 50,
        Archetype::NetworkGraph if schema.tables.iter().any(has_links) => 50,
        _ => 0,
    };
    score.min(100)
}

fn is_date(column: &ColumnDescription) -> bool {
    column.effective_category() == Some(TypeCategory::Date)
}

fn is_non_key(column: &ColumnDescription, category: TypeCategory) -> bool {
    !column.is_key() && column.effective_category() == Some(category)
}

fn non_key_numeric_count(schema: &SchemaDescription) -> usize {
    schema
        .columns()
        .filter(|(_, c)| is_non_key(c, TypeCategory::Numeric))
        .count()
}

fn any_table_maps(schema: &SchemaDescription, archetype: Archetype) -> bool {
    schema.tables.iter().any(|t| map_table(t, archetype).is_some())
}

fn geo_score(schema: &SchemaDescription) -> u32 {
    let mut best = 0;
    for table in &schema.tables {
        if let Some(TableRoles::GeoSpatial(roles)) = map_table(table, Archetype::GeoSpatial) {
            let score = if roles.lat_column.is_some() && roles.lng_column.is_some() {
                80
            } else {
                60
            };
            best = best.max(score);
        }
    }
    best
}

fn is_rate(column: &ColumnDescription) -> bool {
    column.has_kind(&[SemanticKind::Percentage]) || NameClass::Percentage.is_match(&column.name)
}

fn has_matrix_shape(table: &TableDescription) -> bool {
    let text = table
        .columns
        .iter()
        .filter(|c| is_non_key(c, TypeCategory::Text))
        .count();
    let numeric = table
        .columns
        .iter()
        .filter(|c| is_non_key(c, TypeCategory::Numeric))
        .count();
    text >= 2 && numeric >= 1
}

const LINK_KEYWORDS: &[&str] = &["source", "target", "parent", "child"];

fn has_links(table: &TableDescription) -> bool {
    let self_reference = table
        .foreign_keys
        .iter()
        .any(|fk| fk.referenced_table.eq_ignore_ascii_case(&table.name));
    self_reference
        || table.columns.iter().any(|c| {
            let name = c.name.to_lowercase();
            name.starts_with("from_")
                || name.starts_with("to_")
                || LINK_KEYWORDS.iter().any(|k| name.contains(k))
        })
}
