//! Per-candidate match scores.
//!
//! Every scorer receives the non-null sample and returns the average
//! per-value evidence in `[0.0, 1.0]`. Scorers never fail: a value that
//! cannot be interpreted contributes zero.

use super::patterns::{self, BOOLEAN_LITERALS};
use super::types::SemanticKind;
use crate::schema::SqlValue;

/// Score assigned to `text`, the fallback when nothing scores higher.
pub const TEXT_BASELINE: f64 = 0.5;

/// Evidence contributed by a bare number above 100 towards `currency`.
const LARGE_NUMBER_CURRENCY_EVIDENCE: f64 = 0.3;

/// Evidence contributed by a bare number in `[0, 100]` towards `percentage`.
const BOUNDED_NUMBER_PERCENT_EVIDENCE: f64 = 0.5;

/// Distinct/total counts used by the category heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueCardinality {
    pub distinct: u64,
    pub total: u64,
}

impl ValueCardinality {
    /// Cardinality of the sample itself, comparing rendered values.
    pub fn of_sample(values: &[SqlValue]) -> Self {
        let mut seen: Vec<String> = values
            .iter()
            .map(|v| v.render().unwrap_or_else(|| v.to_string()))
            .collect();
        let total = seen.len() as u64;
        seen.sort();
        seen.dedup();
        Self {
            distinct: seen.len() as u64,
            total,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.distinct as f64 / self.total as f64
        }
    }
}

/// Score from the kind's pattern list, and the format of the first pattern
/// (in list order) that matched at least one value.
pub fn score_patterns(kind: SemanticKind, values: &[SqlValue]) -> (f64, Option<&'static str>) {
    if values.is_empty() {
        return (0.0, None);
    }
    let table = patterns::patterns_for(kind);
    let rendered: Vec<Option<String>> = values.iter().map(SqlValue::render).collect();

    let matches = rendered
        .iter()
        .flatten()
        .filter(|value| table.iter().any(|p| p.is_match(value)))
        .count();

    let format = table
        .iter()
        .find(|p| rendered.iter().flatten().any(|value| p.is_match(value)))
        .and_then(|p| p.format);

    (matches as f64 / values.len() as f64, format)
}

pub fn score_currency(values: &[SqlValue]) -> f64 {
    average(values, |value| {
        let matched = value
            .render()
            .is_some_and(|s| patterns::matches_kind(SemanticKind::Currency, &s));
        if matched {
            1.0
        } else if value.as_f64().is_some_and(|n| n > 100.0) {
            LARGE_NUMBER_CURRENCY_EVIDENCE
        } else {
            0.0
        }
    })
}

pub fn score_percentage(values: &[SqlValue]) -> f64 {
    average(values, |value| {
        let suffixed = value
            .as_text()
            .is_some_and(|s| patterns::matches_kind(SemanticKind::Percentage, s));
        if suffixed {
            1.0
        } else if value.as_f64().is_some_and(|n| (0.0..=100.0).contains(&n)) {
            BOUNDED_NUMBER_PERCENT_EVIDENCE
        } else {
            0.0
        }
    })
}

pub fn score_number(values: &[SqlValue]) -> f64 {
    average(values, |value| {
        let numeric = value.is_numeric()
            || value
                .as_text()
                .is_some_and(|s| patterns::matches_kind(SemanticKind::Number, s));
        if numeric {
            1.0
        } else {
            0.0
        }
    })
}

/// Boolean evidence. `native_boolean` marks columns declared as BOOLEAN, in
/// which case integer 0/1 cells are native booleans rather than literals.
pub fn score_boolean(values: &[SqlValue], native_boolean: bool) -> f64 {
    average(values, |value| {
        let is_bool = match value {
            SqlValue::Integer(0) | SqlValue::Integer(1) if native_boolean => true,
            other => other.render().is_some_and(|s| {
                let lower = s.to_lowercase();
                BOOLEAN_LITERALS.contains(&lower.as_str())
            }),
        };
        if is_bool {
            1.0
        } else {
            0.0
        }
    })
}

pub fn score_json(values: &[SqlValue]) -> f64 {
    average(values, |value| match value.as_text() {
        Some(s) if s.starts_with('{') || s.starts_with('[') => {
            if serde_json::from_str::<serde_json::Value>(s).is_ok() {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    })
}

/// Inverse-cardinality heuristic: low-cardinality columns are grouping
/// candidates regardless of what the values mean.
pub fn score_category(cardinality: ValueCardinality) -> f64 {
    let ratio = cardinality.ratio();
    if ratio < 0.3 {
        0.9
    } else if ratio < 0.5 && cardinality.distinct < 100 {
        0.8
    } else {
        0.2
    }
}

fn average(values: &[SqlValue], evidence: impl Fn(&SqlValue) -> f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(evidence).sum::<f64>() / values.len() as f64
}
