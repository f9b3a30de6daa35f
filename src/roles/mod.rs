//! Column-to-role mapping.
//!
//! Binds columns to the slots a visualization archetype needs (time axis,
//! value series, latitude, task start, ...). Each role is searched by name
//! first, through the ordered name classes in [`ROLE_TABLE`], and falls back
//! to the inferred semantic kind only when no column name matches.
//!
//! A table appears in the mapping only when the archetype's minimal roles
//! are satisfied:
//!
//! | archetype     | minimal roles                 |
//! |---------------|-------------------------------|
//! | time-series   | time + at least one value     |
//! | geo-spatial   | lat + lng, or location        |
//! | gantt-chart   | start + (end or duration)     |
//! | kpi-dashboard | at least one metric           |
//! | anything else | none                          |

mod patterns;

pub use patterns::{
    aggregation_hint, metric_kind_hint, Aggregation, MetricKind, NameClass, GEO_NAME_KEYWORDS,
};

use std::collections::BTreeMap;

use inflector::Inflector;
use patterns::NameClass as N;
use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::inference::{SemanticKind, StorageClass, TypeCategory};
use crate::inference::SemanticKind as K;
use crate::schema::{ColumnDescription, SqlValue, TableDescription};

/// A slot a visualization can bind a column to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Time,
    Value,
    GroupBy,
    Latitude,
    Longitude,
    Location,
    Label,
    Start,
    End,
    Duration,
    Progress,
    Category,
    Metric,
    Dimension,
    Id,
}

/// How a role finds its columns.
#[derive(Debug)]
pub struct RoleSpec {
    pub role: Role,
    /// Name classes, in priority order.
    pub names: &'static [NameClass],
    /// Semantic kinds accepted when no name matches. Key columns are never
    /// picked by fallback.
    pub fallback: &'static [SemanticKind],
    /// Inclusive numeric range the column's min/max must lie in, when known.
    pub range: Option<(f64, f64)>,
}

const NUMERIC_KINDS: &[SemanticKind] = &[K::Number, K::Currency, K::Percentage];

const fn spec(
    role: Role,
    names: &'static [NameClass],
    fallback: &'static [SemanticKind],
) -> RoleSpec {
    RoleSpec {
        role,
        names,
        fallback,
        range: None,
    }
}

pub const ROLE_TABLE: &[RoleSpec] = &[
    spec(Role::Time, &[N::Timestamp, N::Date], &[K::DateTime, K::Date]),
    spec(Role::Value, &[N::Amount, N::Count, N::Percentage], NUMERIC_KINDS),
    spec(Role::GroupBy, &[N::Category, N::Name], &[K::Category]),
    spec(Role::Latitude, &[N::Latitude], &[]).within(-90.0, 90.0),
    spec(Role::Longitude, &[N::Longitude], &[]).within(-180.0, 180.0),
    spec(Role::Location, &[N::Location], &[]),
    spec(Role::Label, &[N::Name], &[K::Text]),
    spec(Role::Start, &[N::StartDate], &[]),
    spec(Role::End, &[N::EndDate], &[]),
    spec(Role::Duration, &[N::Duration], &[]),
    spec(Role::Progress, &[N::Progress], &[K::Percentage]),
    spec(Role::Category, &[N::Category], &[K::Category]),
    spec(Role::Metric, &[N::Amount, N::Count, N::Percentage], NUMERIC_KINDS),
    spec(Role::Dimension, &[N::Category, N::Date, N::Location], &[K::Category, K::Date, K::DateTime]),
    spec(Role::Id, &[N::Id], &[]),
];

impl Role {
    pub fn spec(self) -> &'static RoleSpec {
        // ROLE_TABLE lists roles in declaration order.
        &ROLE_TABLE[self as usize]
    }

    /// First column bound to this role.
    pub fn find<'t>(self, columns: &'t [ColumnDescription]) -> Option<&'t ColumnDescription> {
        let spec = self.spec();
        spec.names
            .iter()
            .find_map(|class| {
                columns
                    .iter()
                    .find(|c| name_matches(*class, &c.name) && spec.in_range(c))
            })
            .or_else(|| columns.iter().find(|c| spec.fallback_matches(c)))
    }

    /// Every column bound to this role.
    pub fn find_all<'t>(self, columns: &'t [ColumnDescription]) -> Vec<&'t ColumnDescription> {
        let spec = self.spec();
        let by_name: Vec<_> = columns
            .iter()
            .filter(|c| spec.names.iter().any(|class| name_matches(*class, &c.name)) && spec.in_range(c))
            .collect();
        if !by_name.is_empty() {
            return by_name;
        }
        columns.iter().filter(|c| spec.fallback_matches(c)).collect()
    }
}

impl RoleSpec {
    const fn within(self, low: f64, high: f64) -> Self {
        Self {
            range: Some((low, high)),
            ..self
        }
    }

    fn fallback_matches(&self, column: &ColumnDescription) -> bool {
        !column.is_key() && column.has_kind(self.fallback) && self.in_range(column)
    }

    fn in_range(&self, column: &ColumnDescription) -> bool {
        let Some((low, high)) = self.range else {
            return true;
        };
        let Some(stats) = &column.statistics else {
            return true;
        };
        let within = |v: &SqlValue| v.as_f64().map_or(true, |x| (low..=high).contains(&x));
        within(&stats.min) && within(&stats.max)
    }
}

/// Match the raw name and its snake_case form, so `startDate` reads like
/// `start_date`.
fn name_matches(class: NameClass, name: &str) -> bool {
    class.is_match(name) || class.is_match(&name.to_snake_case())
}

/// Roles for a time-series chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesRoles {
    pub time_column: String,
    pub value_columns: Vec<String>,
    pub group_by_columns: Vec<String>,
}

/// Roles for a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoSpatialRoles {
    pub lat_column: Option<String>,
    pub lng_column: Option<String>,
    pub location_column: Option<String>,
    pub name_column: Option<String>,
    pub value_columns: Vec<String>,
}

/// Roles for a schedule chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttRoles {
    /// Label column, else the primary key.
    pub task_column: Option<String>,
    pub start_column: String,
    pub end_column: Option<String>,
    pub duration_column: Option<String>,
    pub progress_column: Option<String>,
    pub category_column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiMetric {
    pub column: String,
    pub kind: MetricKind,
    pub aggregation: Aggregation,
}

/// Roles for a KPI dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiRoles {
    pub metrics: Vec<KpiMetric>,
    pub dimension_columns: Vec<String>,
}

/// Roles for every other archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericRoles {
    pub id_column: Option<String>,
    pub name_column: Option<String>,
    pub numeric_columns: Vec<String>,
    pub text_columns: Vec<String>,
    pub date_columns: Vec<String>,
}

/// Role bindings of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "kebab-case")]
pub enum TableRoles {
    TimeSeries(TimeSeriesRoles),
    GeoSpatial(GeoSpatialRoles),
    Gantt(GanttRoles),
    Kpi(KpiRoles),
    Generic(GenericRoles),
}

/// Table name → role bindings, for the tables that qualify.
pub type RoleMapping = BTreeMap<String, TableRoles>;

/// Map every qualifying table's columns to the roles `archetype` needs.
pub fn map_columns(tables: &[TableDescription], archetype: Archetype) -> RoleMapping {
    tables
        .iter()
        .filter_map(|table| map_table(table, archetype).map(|roles| (table.name.clone(), roles)))
        .collect()
}

/// Role bindings for one table, `None` when its minimal roles are missing.
pub fn map_table(table: &TableDescription, archetype: Archetype) -> Option<TableRoles> {
    let columns = table.columns.as_slice();
    match archetype {
        Archetype::TimeSeries => time_series(columns).map(TableRoles::TimeSeries),
        Archetype::GeoSpatial => geo_spatial(columns).map(TableRoles::GeoSpatial),
        Archetype::GanttChart => gantt(table).map(TableRoles::Gantt),
        Archetype::KpiDashboard => kpi(columns).map(TableRoles::Kpi),
        _ => Some(TableRoles::Generic(generic(table))),
    }
}

fn names(columns: Vec<&ColumnDescription>) -> Vec<String> {
    columns.into_iter().map(|c| c.name.clone()).collect()
}

fn name_of(column: Option<&ColumnDescription>) -> Option<String> {
    column.map(|c| c.name.clone())
}

fn time_series(columns: &[ColumnDescription]) -> Option<TimeSeriesRoles> {
    let time = Role::Time.find(columns)?;
    let values: Vec<_> = Role::Value
        .find_all(columns)
        .into_iter()
        .filter(|c| c.name != time.name)
        .collect();
    if values.is_empty() {
        return None;
    }

    Some(TimeSeriesRoles {
        time_column: time.name.clone(),
        value_columns: names(values),
        group_by_columns: names(Role::GroupBy.find_all(columns)),
    })
}

fn geo_spatial(columns: &[ColumnDescription]) -> Option<GeoSpatialRoles> {
    let lat = Role::Latitude.find(columns);
    let lng = Role::Longitude.find(columns);
    let location = Role::Location.find(columns);
    if !(lat.is_some() && lng.is_some()) && location.is_none() {
        return None;
    }

    Some(GeoSpatialRoles {
        lat_column: name_of(lat),
        lng_column: name_of(lng),
        location_column: name_of(location),
        name_column: name_of(Role::Label.find(columns)),
        value_columns: names(
            Role::Value
                .find_all(columns)
                .into_iter()
                .filter(|c| !NameClass::Percentage.is_match(&c.name))
                .collect(),
        ),
    })
}

fn gantt(table: &TableDescription) -> Option<GanttRoles> {
    let columns = table.columns.as_slice();
    let start = Role::Start.find(columns)?;
    let end = Role::End.find(columns);
    let duration = Role::Duration.find(columns);
    if end.is_none() && duration.is_none() {
        return None;
    }

    Some(GanttRoles {
        task_column: name_of(Role::Label.find(columns)).or_else(|| table.primary_key.clone()),
        start_column: start.name.clone(),
        end_column: name_of(end),
        duration_column: name_of(duration),
        progress_column: name_of(Role::Progress.find(columns)),
        category_column: name_of(Role::Category.find(columns)),
    })
}

fn kpi(columns: &[ColumnDescription]) -> Option<KpiRoles> {
    let metrics: Vec<KpiMetric> = Role::Metric
        .find_all(columns)
        .into_iter()
        .map(|c| KpiMetric {
            column: c.name.clone(),
            kind: metric_kind(c),
            aggregation: suggest_aggregation(c),
        })
        .collect();
    if metrics.is_empty() {
        return None;
    }

    Some(KpiRoles {
        metrics,
        dimension_columns: names(Role::Dimension.find_all(columns)),
    })
}

fn generic(table: &TableDescription) -> GenericRoles {
    let columns = table.columns.as_slice();
    let of_class = |class: StorageClass| {
        columns
            .iter()
            .filter(|c| c.storage_class() == class)
            .map(|c| c.name.clone())
            .collect()
    };

    GenericRoles {
        id_column: name_of(Role::Id.find(columns)).or_else(|| table.primary_key.clone()),
        name_column: name_of(Role::Label.find(columns)),
        numeric_columns: of_class(StorageClass::Numeric),
        text_columns: of_class(StorageClass::Text),
        date_columns: of_class(StorageClass::Date),
    }
}

fn is_numeric(column: &ColumnDescription) -> bool {
    column.effective_category() == Some(TypeCategory::Numeric)
}

fn metric_kind(column: &ColumnDescription) -> MetricKind {
    metric_kind_hint(&column.name).unwrap_or(match column.semantic_kind() {
        Some(SemanticKind::Currency) => MetricKind::Currency,
        Some(SemanticKind::Percentage) => MetricKind::Percentage,
        _ => MetricKind::Number,
    })
}

/// Aggregation verb for a metric column.
///
/// Name keywords decide first. Otherwise a numeric column with fewer than 10
/// distinct values is counted and any other numeric column is summed;
/// non-numeric columns are counted.
pub fn suggest_aggregation(column: &ColumnDescription) -> Aggregation {
    if let Some(agg) = aggregation_hint(&column.name) {
        return agg;
    }
    if !is_numeric(column) {
        return Aggregation::Count;
    }
    match column.distinct_count() {
        Some(distinct) if distinct < 10 => Aggregation::Count,
        _ => Aggregation::Sum,
    }
}
