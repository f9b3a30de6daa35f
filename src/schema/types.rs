//! Schema description types.
//!
//! These are the engine's output: built once per analysis in a single pass
//! and never mutated afterwards. Collaborators (summaries, prompt builders,
//! scorers) only ever borrow them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::value::SqlValue;
use crate::inference::{Classification, SemanticKind, StorageClass, TypeCategory};

/// Complete description of one SQLite database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescription {
    /// User tables in catalog order.
    pub tables: Vec<TableDescription>,
    /// Foreign-key relationships across all tables.
    pub relationships: Vec<RelationshipEdge>,
    /// Database-level metadata.
    pub metadata: DatabaseMetadata,
}

impl SchemaDescription {
    /// Find a table by name.
    pub fn table(&self, name: &str) -> Option<&TableDescription> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Iterate every column together with its owning table.
    pub fn columns(&self) -> impl Iterator<Item = (&TableDescription, &ColumnDescription)> {
        self.tables
            .iter()
            .flat_map(|t| t.columns.iter().map(move |c| (t, c)))
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Database-level metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    /// Version of the SQLite library that read the file.
    pub sqlite_version: String,
    /// Text encoding (`UTF-8`, `UTF-16le`, ...).
    pub encoding: String,
    /// Page size in bytes.
    pub page_size: u32,
    /// File size in bytes (0 for in-memory databases).
    pub file_size: u64,
    pub table_count: usize,
    /// Sum of all table row counts.
    pub total_row_count: u64,
    /// File creation time, seconds since the Unix epoch, when the platform
    /// reports it.
    pub created_at: Option<u64>,
    /// File modification time, seconds since the Unix epoch.
    pub modified_at: Option<u64>,
}

/// One user table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescription {
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDescription>,
    /// First primary-key column, if the table declares one.
    pub primary_key: Option<String>,
    pub foreign_keys: Vec<ForeignKeyEdge>,
    pub indexes: Vec<IndexDescription>,
    /// Exact row count. Drives the sampling decision.
    pub row_count: u64,
    /// Up to a handful of raw rows, values aligned with `columns`.
    pub sample_rows: Vec<Vec<SqlValue>>,
}

impl TableDescription {
    pub fn column(&self, name: &str) -> Option<&ColumnDescription> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether column statistics were collected for this table.
    pub fn is_sampled(&self) -> bool {
        self.columns.iter().any(|c| c.statistics.is_some())
    }
}

/// One column of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub name: String,
    /// Declared type string exactly as written in the DDL (may be empty).
    pub declared_type: String,
    /// Always `false` for primary-key columns.
    pub nullable: bool,
    /// Default value expression as written in the DDL.
    pub default_value: Option<String>,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    /// Covered by a single- or multi-column unique index.
    pub is_unique: bool,
    /// Present only when the owning table was below the sampling ceiling
    /// and the column's aggregate query succeeded.
    pub statistics: Option<ColumnStatistics>,
}

impl ColumnDescription {
    /// Inferred semantic kind, `None` when statistics are absent.
    pub fn semantic_kind(&self) -> Option<SemanticKind> {
        self.statistics.as_ref().map(|s| s.classification.kind())
    }

    /// Broad semantic category, `None` when statistics are absent or the
    /// column classified as unknown.
    pub fn category(&self) -> Option<TypeCategory> {
        self.semantic_kind().and_then(|k| k.category())
    }

    /// Sampled storage class, or the one implied by the declared type when
    /// statistics are absent.
    pub fn storage_class(&self) -> StorageClass {
        match &self.statistics {
            Some(stats) => stats.storage_class,
            None => StorageClass::infer(&self.declared_type, &SqlValue::Null),
        }
    }

    /// Semantic category, falling back to the storage class for columns
    /// without statistics.
    pub fn effective_category(&self) -> Option<TypeCategory> {
        if self.statistics.is_some() {
            return self.category();
        }
        match self.storage_class() {
            StorageClass::Numeric => Some(TypeCategory::Numeric),
            StorageClass::Text => Some(TypeCategory::Text),
            StorageClass::Date => Some(TypeCategory::Date),
            StorageClass::Boolean => Some(TypeCategory::Boolean),
            StorageClass::Mixed => None,
        }
    }

    pub fn has_kind(&self, kinds: &[SemanticKind]) -> bool {
        self.semantic_kind().is_some_and(|k| kinds.contains(&k))
    }

    /// Primary or foreign key column.
    pub fn is_key(&self) -> bool {
        self.is_primary_key || self.is_foreign_key
    }

    pub fn distinct_count(&self) -> Option<u64> {
        self.statistics.as_ref().map(|s| s.distinct_count)
    }
}

/// Summary statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub distinct_count: u64,
    pub null_count: u64,
    pub min: SqlValue,
    pub max: SqlValue,
    /// Average length of the values rendered as text.
    pub avg_length: f64,
    pub storage_class: StorageClass,
    pub classification: Classification,
    /// Non-null values the classification was computed from.
    #[serde(skip)]
    pub sample: Vec<SqlValue>,
}

impl ColumnStatistics {
    pub fn confidence(&self) -> f64 {
        self.classification.confidence()
    }
}

/// A foreign key declared on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyEdge {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub on_update: String,
    pub on_delete: String,
}

/// An index on a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescription {
    pub name: String,
    /// Indexed columns in key order. Expression terms are omitted.
    pub columns: Vec<String>,
    pub unique: bool,
}

/// A relationship between two tables, derived from a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub cardinality: Cardinality,
}

/// Cardinality hint of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Cardinality::OneToOne => "one-to-one",
            Cardinality::OneToMany => "one-to-many",
        };
        f.write_str(s)
    }
}
