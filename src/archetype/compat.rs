//! Requirement-driven compatibility scoring.

use serde::{Deserialize, Serialize};

use super::catalog::{ArchetypeRequirement, RequirementCheck};
use crate::inference::{SemanticKind, TypeCategory};
use crate::schema::{ColumnDescription, SchemaDescription};

/// Minimum score for a schema to count as compatible.
pub const COMPATIBILITY_THRESHOLD: u32 = 60;

const TABLE_SHORTFALL_PENALTY: i64 = 50;
const MISSING_CATEGORY_PENALTY: i64 = 30;

/// How well a schema meets one archetype's requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// `score >= 60`.
    pub compatible: bool,
    /// In `[0, 100]`.
    pub score: u32,
    /// One entry per deduction, in the order they were applied.
    pub reasons: Vec<String>,
}

impl CompatibilityResult {
    fn from_deductions(deductions: Vec<(i64, String)>) -> Self {
        let total: i64 = deductions.iter().map(|(penalty, _)| penalty).sum();
        let score = (100 - total).clamp(0, 100) as u32;
        Self {
            compatible: score >= COMPATIBILITY_THRESHOLD,
            score,
            reasons: deductions.into_iter().map(|(_, reason)| reason).collect(),
        }
    }
}

/// Score `schema` against `requirement`, starting from 100.
///
/// Deductions: 50 when the schema has fewer tables than required, 30 per
/// required category no column provides, then each failed extra check's own
/// penalty.
pub fn check_compatibility(
    requirement: &ArchetypeRequirement,
    schema: &SchemaDescription,
) -> CompatibilityResult {
    let mut deductions = Vec::new();

    let table_count = schema.tables.len();
    if table_count < requirement.min_tables {
        deductions.push((
            TABLE_SHORTFALL_PENALTY,
            format!(
                "Template requires at least {} tables, but schema has only {}",
                requirement.min_tables, table_count
            ),
        ));
    }

    for category in &requirement.required_categories {
        if !schema.columns().any(|(_, c)| provides_category(c, *category)) {
            deductions.push((
                MISSING_CATEGORY_PENALTY,
                format!("No {} column found in schema", category),
            ));
        }
    }

    for check in &requirement.checks {
        if !check_passes(check, schema) {
            deductions.push((i64::from(check.penalty()), check.reason().to_string()));
        }
    }

    CompatibilityResult::from_deductions(deductions)
}

/// Numeric and text requirements ignore primary-key columns.
fn provides_category(column: &ColumnDescription, category: TypeCategory) -> bool {
    let key_excluded = matches!(category, TypeCategory::Numeric | TypeCategory::Text);
    if key_excluded && column.is_primary_key {
        return false;
    }
    column.effective_category() == Some(category)
}

fn check_passes(check: &RequirementCheck, schema: &SchemaDescription) -> bool {
    match check {
        RequirementCheck::SemanticType { kinds, .. } => {
            schema.columns().any(|(_, c)| has_any_kind(c, kinds))
        }
        RequirementCheck::ColumnName { contains, .. } => schema.columns().any(|(_, c)| {
            let name = c.name.to_lowercase();
            contains.iter().any(|k| name.contains(&k.to_lowercase()))
        }),
    }
}

/// Unsampled columns count when their storage class falls in the same
/// category as one of `kinds`.
fn has_any_kind(column: &ColumnDescription, kinds: &[SemanticKind]) -> bool {
    if column.statistics.is_some() {
        return column.has_kind(kinds);
    }
    let category = column.effective_category();
    category.is_some() && kinds.iter().any(|k| k.category() == category)
}
