//! Semantic type inference.
//!
//! Classifies a column from its declared SQL type, a sample of its non-null
//! values and (optionally) its whole-column cardinality. Every candidate type
//! gets an independent score in `[0.0, 1.0]`; the highest score wins.
//!
//! ```text
//!  declared type ─┐
//!  sample values ─┼─► score every candidate ─► pick max ─► Classification
//!  cardinality ───┘      (scoring.rs)          (ties)      (+ format)
//! ```
//!
//! Tie-breaking:
//! - if the best candidate does not beat the `text` baseline (0.5), the
//!   result is `text`;
//! - among candidates sharing the best score, the one hinted by the
//!   declared type wins, otherwise the earliest in
//!   [`SemanticKind::CANDIDATES`].
//!
//! Classification is a pure function: no I/O, no hidden state.

mod patterns;
mod scoring;
mod storage;
mod types;

pub use patterns::{matches_kind, patterns_for, ValuePattern, BOOLEAN_LITERALS};
pub use scoring::{ValueCardinality, TEXT_BASELINE};
pub use storage::{declared_hint, StorageClass};
pub use types::{Classification, SemanticKind, TypeCategory};

use crate::schema::SqlValue;

/// Scores closer than this are considered equal.
const SCORE_EPSILON: f64 = 1e-9;

/// Everything the inferencer looks at for one column.
#[derive(Debug, Clone, Copy)]
pub struct InferenceInput<'a> {
    /// Declared SQL type string, possibly empty.
    pub declared_type: &'a str,
    /// Sampled values. NULLs are ignored.
    pub values: &'a [SqlValue],
    /// Whole-column cardinality; when absent it is computed from the sample.
    pub cardinality: Option<ValueCardinality>,
}

impl<'a> InferenceInput<'a> {
    pub fn new(declared_type: &'a str, values: &'a [SqlValue]) -> Self {
        Self {
            declared_type,
            values,
            cardinality: None,
        }
    }

    pub fn with_cardinality(mut self, cardinality: ValueCardinality) -> Self {
        self.cardinality = Some(cardinality);
        self
    }
}

/// Score of one candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScore {
    pub kind: SemanticKind,
    pub score: f64,
    pub format: Option<&'static str>,
}

/// Score every candidate type. Returned in [`SemanticKind::CANDIDATES`]
/// order, followed by the `text` baseline.
pub fn score_candidates(input: &InferenceInput<'_>) -> Vec<CandidateScore> {
    let values: Vec<SqlValue> = input
        .values
        .iter()
        .filter(|v| !v.is_null())
        .cloned()
        .collect();
    let native_boolean = declared_hint(input.declared_type) == Some(SemanticKind::Boolean);
    let cardinality = input
        .cardinality
        .unwrap_or_else(|| ValueCardinality::of_sample(&values));

    let mut scores: Vec<CandidateScore> = SemanticKind::CANDIDATES
        .iter()
        .map(|&kind| {
            let (score, format) = match kind {
                SemanticKind::DateTime
                | SemanticKind::Date
                | SemanticKind::Time
                | SemanticKind::Email
                | SemanticKind::Url
                | SemanticKind::Phone => scoring::score_patterns(kind, &values),
                SemanticKind::Currency => (scoring::score_currency(&values), None),
                SemanticKind::Percentage => (scoring::score_percentage(&values), None),
                SemanticKind::Number => (scoring::score_number(&values), None),
                SemanticKind::Boolean => (scoring::score_boolean(&values, native_boolean), None),
                SemanticKind::Json => (scoring::score_json(&values), None),
                SemanticKind::Category => (scoring::score_category(cardinality), None),
                SemanticKind::Text | SemanticKind::Unknown => (0.0, None),
            };
            CandidateScore {
                kind,
                score,
                format: if kind.is_temporal() { format } else { None },
            }
        })
        .collect();

    scores.push(CandidateScore {
        kind: SemanticKind::Text,
        score: TEXT_BASELINE,
        format: None,
    });
    scores
}

/// Classify a column.
///
/// An empty or all-NULL sample yields [`Classification::Unknown`] with
/// confidence 0.
pub fn classify(input: &InferenceInput<'_>) -> Classification {
    if input.values.iter().all(SqlValue::is_null) {
        return Classification::Unknown;
    }

    let scores = score_candidates(input);
    let best = scores
        .iter()
        .filter(|c| c.kind != SemanticKind::Text)
        .map(|c| c.score)
        .fold(0.0_f64, f64::max);

    if best <= TEXT_BASELINE + SCORE_EPSILON {
        return Classification::new(SemanticKind::Text, TEXT_BASELINE, None);
    }

    let tied: Vec<&CandidateScore> = scores
        .iter()
        .filter(|c| c.kind != SemanticKind::Text && (c.score - best).abs() < SCORE_EPSILON)
        .collect();

    let hint = declared_hint(input.declared_type);
    let winner = tied
        .iter()
        .find(|c| Some(c.kind) == hint)
        .or_else(|| tied.first())
        .copied();

    match winner {
        Some(candidate) => Classification::new(candidate.kind, candidate.score, candidate.format),
        None => Classification::new(SemanticKind::Text, TEXT_BASELINE, None),
    }
}

/// Classify a bare list of values with no declared type.
pub fn classify_values(values: &[SqlValue]) -> Classification {
    classify(&InferenceInput::new("", values))
}
