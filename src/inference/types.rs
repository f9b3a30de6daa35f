//! Semantic classification types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The meaning inferred for a column's values, independent of storage.
///
/// The variant order is the candidate order used when two candidates score
/// the same: earlier variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticKind {
    #[serde(rename = "datetime")]
    DateTime,
    Date,
    Time,
    Currency,
    Percentage,
    Number,
    Email,
    Url,
    Phone,
    Boolean,
    Json,
    Category,
    Text,
    Unknown,
}

impl SemanticKind {
    /// Every scored candidate, in tie-break order. `Text` is the baseline and
    /// `Unknown` is never scored.
    pub const CANDIDATES: [SemanticKind; 12] = [
        SemanticKind::DateTime,
        SemanticKind::Date,
        SemanticKind::Time,
        SemanticKind::Currency,
        SemanticKind::Percentage,
        SemanticKind::Number,
        SemanticKind::Email,
        SemanticKind::Url,
        SemanticKind::Phone,
        SemanticKind::Boolean,
        SemanticKind::Json,
        SemanticKind::Category,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticKind::DateTime => "datetime",
            SemanticKind::Date => "date",
            SemanticKind::Time => "time",
            SemanticKind::Currency => "currency",
            SemanticKind::Percentage => "percentage",
            SemanticKind::Number => "number",
            SemanticKind::Email => "email",
            SemanticKind::Url => "url",
            SemanticKind::Phone => "phone",
            SemanticKind::Boolean => "boolean",
            SemanticKind::Json => "json",
            SemanticKind::Category => "category",
            SemanticKind::Text => "text",
            SemanticKind::Unknown => "unknown",
        }
    }

    /// Broad category used by archetype requirements.
    pub fn category(&self) -> Option<TypeCategory> {
        match self {
            SemanticKind::DateTime | SemanticKind::Date | SemanticKind::Time => {
                Some(TypeCategory::Date)
            }
            SemanticKind::Currency | SemanticKind::Percentage | SemanticKind::Number => {
                Some(TypeCategory::Numeric)
            }
            SemanticKind::Email
            | SemanticKind::Url
            | SemanticKind::Phone
            | SemanticKind::Category
            | SemanticKind::Text => Some(TypeCategory::Text),
            SemanticKind::Boolean => Some(TypeCategory::Boolean),
            SemanticKind::Json => Some(TypeCategory::Structured),
            SemanticKind::Unknown => None,
        }
    }

    /// Kinds that carry a detected format string.
    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            SemanticKind::DateTime | SemanticKind::Date | SemanticKind::Time
        )
    }
}

impl fmt::Display for SemanticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad semantic category, the granularity archetype requirements use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeCategory {
    Date,
    Numeric,
    Text,
    Boolean,
    Structured,
}

impl TypeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Date => "date",
            TypeCategory::Numeric => "numeric",
            TypeCategory::Text => "text",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Structured => "structured",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(TypeCategory::Date),
            "numeric" => Ok(TypeCategory::Numeric),
            "text" => Ok(TypeCategory::Text),
            "boolean" => Ok(TypeCategory::Boolean),
            "structured" | "json" => Ok(TypeCategory::Structured),
            other => Err(format!("unknown type category: {}", other)),
        }
    }
}

/// Result of classifying a column, one variant per semantic type.
///
/// Temporal variants carry the detected format string. `confidence` is
/// always within `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Classification {
    #[serde(rename = "datetime")]
    DateTime { confidence: f64, format: String },
    Date { confidence: f64, format: String },
    Time { confidence: f64, format: String },
    Currency { confidence: f64 },
    Percentage { confidence: f64 },
    Number { confidence: f64 },
    Email { confidence: f64 },
    Url { confidence: f64 },
    Phone { confidence: f64 },
    Boolean { confidence: f64 },
    Json { confidence: f64 },
    Category { confidence: f64 },
    Text { confidence: f64 },
    #[default]
    Unknown,
}

impl Classification {
    /// Build a classification for `kind`, clamping confidence into range.
    ///
    /// `format` is only kept for temporal kinds; a temporal kind without a
    /// format falls back to the ISO date pattern.
    pub fn new(kind: SemanticKind, confidence: f64, format: Option<&str>) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let format = || format.unwrap_or("YYYY-MM-DD").to_string();
        match kind {
            SemanticKind::DateTime => Classification::DateTime {
                confidence,
                format: format(),
            },
            SemanticKind::Date => Classification::Date {
                confidence,
                format: format(),
            },
            SemanticKind::Time => Classification::Time {
                confidence,
                format: format(),
            },
            SemanticKind::Currency => Classification::Currency { confidence },
            SemanticKind::Percentage => Classification::Percentage { confidence },
            SemanticKind::Number => Classification::Number { confidence },
            SemanticKind::Email => Classification::Email { confidence },
            SemanticKind::Url => Classification::Url { confidence },
            SemanticKind::Phone => Classification::Phone { confidence },
            SemanticKind::Boolean => Classification::Boolean { confidence },
            SemanticKind::Json => Classification::Json { confidence },
            SemanticKind::Category => Classification::Category { confidence },
            SemanticKind::Text => Classification::Text { confidence },
            SemanticKind::Unknown => Classification::Unknown,
        }
    }

    pub fn kind(&self) -> SemanticKind {
        match self {
            Classification::DateTime { .. } => SemanticKind::DateTime,
            Classification::Date { .. } => SemanticKind::Date,
            Classification::Time { .. } => SemanticKind::Time,
            Classification::Currency { .. } => SemanticKind::Currency,
            Classification::Percentage { .. } => SemanticKind::Percentage,
            Classification::Number { .. } => SemanticKind::Number,
            Classification::Email { .. } => SemanticKind::Email,
            Classification::Url { .. } => SemanticKind::Url,
            Classification::Phone { .. } => SemanticKind::Phone,
            Classification::Boolean { .. } => SemanticKind::Boolean,
            Classification::Json { .. } => SemanticKind::Json,
            Classification::Category { .. } => SemanticKind::Category,
            Classification::Text { .. } => SemanticKind::Text,
            Classification::Unknown => SemanticKind::Unknown,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            Classification::DateTime { confidence, .. }
            | Classification::Date { confidence, .. }
            | Classification::Time { confidence, .. }
            | Classification::Currency { confidence }
            | Classification::Percentage { confidence }
            | Classification::Number { confidence }
            | Classification::Email { confidence }
            | Classification::Url { confidence }
            | Classification::Phone { confidence }
            | Classification::Boolean { confidence }
            | Classification::Json { confidence }
            | Classification::Category { confidence }
            | Classification::Text { confidence } => *confidence,
            Classification::Unknown => 0.0,
        }
    }

    pub fn format(&self) -> Option<&str> {
        match self {
            Classification::DateTime { format, .. }
            | Classification::Date { format, .. }
            | Classification::Time { format, .. } => Some(format),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<TypeCategory> {
        self.kind().category()
    }
}
