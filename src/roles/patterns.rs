//! Column-name pattern table for role mapping.
//!
//! Every name regex the role mapper uses is declared here, grouped into name
//! classes. Roles refer to classes, never to raw regexes. All patterns are
//! case-insensitive.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// A family of column names that mean the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameClass {
    Timestamp,
    Date,
    Latitude,
    Longitude,
    Location,
    Amount,
    Count,
    Percentage,
    Id,
    Name,
    Category,
    StartDate,
    EndDate,
    Duration,
    Progress,
}

const NAME_SOURCE: &[(NameClass, &str)] = &[
    (
        NameClass::Timestamp,
        r"^(created|updated|modified|date|time|timestamp|datetime|recorded)",
    ),
    (
        NameClass::Date,
        r"^(date|day|month|year|period|created_at|updated_at)",
    ),
    (
        NameClass::Latitude,
        r"^(lat|latitude|geo_lat|location_lat|y_coord)",
    ),
    (
        NameClass::Longitude,
        r"^(lng|lon|longitude|geo_lng|location_lng|x_coord)",
    ),
    (
        NameClass::Location,
        r"^(location|address|city|region|country|place|area)",
    ),
    (
        NameClass::Amount,
        r"^(amount|price|cost|value|revenue|sales|total|sum)",
    ),
    (NameClass::Count, r"^(count|quantity|number|num|qty|volume)"),
    (NameClass::Percentage, r"^(percent|percentage|rate|ratio)"),
    (NameClass::Id, r"^(id|key|code|identifier|uuid)$"),
    (NameClass::Name, r"^(name|title|label|description)"),
    (NameClass::Category, r"^(category|type|class|group|tag|status)"),
    (NameClass::StartDate, r"^(start|begin|from).*date$"),
    (NameClass::EndDate, r"^(end|finish|to|due).*date$"),
    (NameClass::Duration, r"^(duration|length|period|time)"),
    (NameClass::Progress, r"^(progress|completion|done|status)"),
];

static NAME_TABLE: LazyLock<Vec<(NameClass, Regex)>> = LazyLock::new(|| {
    NAME_SOURCE
        .iter()
        .map(|(class, source)| (*class, case_insensitive(source)))
        .collect()
});

fn case_insensitive(source: &str) -> Regex {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .unwrap()
}

impl NameClass {
    /// The compiled pattern for this class.
    pub fn regex(self) -> &'static Regex {
        // Every class has exactly one entry in NAME_SOURCE.
        &NAME_TABLE[self as usize].1
    }

    pub fn is_match(self, name: &str) -> bool {
        self.regex().is_match(name)
    }
}

/// Aggregation verb suggested for a KPI metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Aggregation {
    Sum,
    Avg,
    Count,
    Max,
    Min,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Sum => "SUM",
            Aggregation::Avg => "AVG",
            Aggregation::Count => "COUNT",
            Aggregation::Max => "MAX",
            Aggregation::Min => "MIN",
        }
    }
}

impl std::fmt::Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display kind of a KPI metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Currency,
    Percentage,
    Count,
    Number,
}

/// Name keywords, checked in order, anywhere in the name.
const AGGREGATION_SOURCE: &[(Aggregation, &str)] = &[
    (Aggregation::Sum, r"sum|total|amount|revenue"),
    (Aggregation::Avg, r"avg|average|mean"),
    (Aggregation::Count, r"count|quantity"),
    (Aggregation::Max, r"max|maximum|highest"),
    (Aggregation::Min, r"min|minimum|lowest"),
];

const METRIC_KIND_SOURCE: &[(MetricKind, &str)] = &[
    (MetricKind::Currency, r"revenue|sales|price|cost|amount"),
    (MetricKind::Percentage, r"percent|rate|ratio"),
    (MetricKind::Count, r"count|quantity|number"),
];

static AGGREGATION_TABLE: LazyLock<Vec<(Aggregation, Regex)>> = LazyLock::new(|| {
    AGGREGATION_SOURCE
        .iter()
        .map(|(agg, source)| (*agg, case_insensitive(source)))
        .collect()
});

static METRIC_KIND_TABLE: LazyLock<Vec<(MetricKind, Regex)>> = LazyLock::new(|| {
    METRIC_KIND_SOURCE
        .iter()
        .map(|(kind, source)| (*kind, case_insensitive(source)))
        .collect()
});

/// Aggregation implied by the column name alone.
pub fn aggregation_hint(name: &str) -> Option<Aggregation> {
    AGGREGATION_TABLE
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(agg, _)| *agg)
}

/// Metric kind implied by the column name alone.
pub fn metric_kind_hint(name: &str) -> Option<MetricKind> {
    METRIC_KIND_TABLE
        .iter()
        .find(|(_, re)| re.is_match(name))
        .map(|(kind, _)| *kind)
}

/// Name keywords the geo-spatial compatibility check looks for.
pub const GEO_NAME_KEYWORDS: &[&str] = &["lat", "lon", "location", "address"];
