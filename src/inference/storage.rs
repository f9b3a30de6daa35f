//! Coarse storage class derived from the declared column type.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::schema::SqlValue;

static DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4}-[0-9]{2}-[0-9]{2}|[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}|[0-9]{2}/[0-9]{2}/[0-9]{4})$",
    )
    .unwrap()
});

/// Storage-level class of a column: what the declared type (and, for text
/// columns, the smallest value) says before any value-level inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageClass {
    Numeric,
    Text,
    Date,
    Boolean,
    Mixed,
}

impl StorageClass {
    /// Classify from the declared type. Text-like or untyped columns are
    /// promoted to `Date` when their minimum value looks like a date.
    pub fn infer(declared_type: &str, min: &SqlValue) -> Self {
        let upper = declared_type.to_uppercase();

        if upper.contains("BOOL") {
            StorageClass::Boolean
        } else if upper.contains("INT")
            || upper.contains("REAL")
            || upper.contains("NUM")
            || upper.contains("DEC")
            || upper.contains("FLOA")
            || upper.contains("DOUB")
        {
            StorageClass::Numeric
        } else if upper.contains("DATE") || upper.contains("TIME") {
            StorageClass::Date
        } else if upper.contains("TEXT")
            || upper.contains("CHAR")
            || upper.contains("CLOB")
            || upper.trim().is_empty()
        {
            match min.as_text() {
                Some(s) if DATE_LIKE.is_match(s) => StorageClass::Date,
                _ => StorageClass::Text,
            }
        } else if upper.contains("BLOB") {
            StorageClass::Mixed
        } else {
            StorageClass::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageClass::Numeric => "numeric",
            StorageClass::Text => "text",
            StorageClass::Date => "date",
            StorageClass::Boolean => "boolean",
            StorageClass::Mixed => "mixed",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic hint carried by a declared type, used to break score ties.
pub fn declared_hint(declared_type: &str) -> Option<super::SemanticKind> {
    use super::SemanticKind;

    let upper = declared_type.to_uppercase();
    if upper.contains("BOOL") {
        Some(SemanticKind::Boolean)
    } else if upper.contains("JSON") {
        Some(SemanticKind::Json)
    } else if upper.contains("DATETIME") || upper.contains("TIMESTAMP") {
        Some(SemanticKind::DateTime)
    } else if upper.contains("DATE") {
        Some(SemanticKind::Date)
    } else if upper.contains("TIME") {
        Some(SemanticKind::Time)
    } else if upper.contains("MONEY") || upper.contains("CURRENCY") {
        Some(SemanticKind::Currency)
    } else {
        None
    }
}
