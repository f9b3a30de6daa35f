//! Read-only views of a [`SchemaDescription`] for people and prompts.
//!
//! Nothing here analyzes anything: these functions only reformat what the
//! analyzer already produced.

use serde::Serialize;

use crate::inference::{SemanticKind, TypeCategory};
use crate::schema::{ColumnDescription, RelationshipEdge, SchemaDescription, SqlValue};

/// Sample rows included per table in prompt JSON.
pub const PROMPT_SAMPLE_ROWS: usize = 3;

/// Text columns with fewer distinct values than this count as categorical.
pub const CATEGORICAL_DISTINCT_LIMIT: u64 = 50;

/// Markdown overview of the database.
pub fn render_markdown(schema: &SchemaDescription) -> String {
    let meta = &schema.metadata;
    let mut out = String::from("## Database Schema Summary\n\n");

    out.push_str("### Database Information\n");
    out.push_str(&format!("- Tables: {}\n", meta.table_count));
    out.push_str(&format!(
        "- Total Size: {:.2} MB\n",
        meta.file_size as f64 / 1024.0 / 1024.0
    ));
    out.push_str(&format!("- Total Rows: {}\n", meta.total_row_count));
    out.push_str(&format!(
        "- SQLite: {} ({}, page size {})\n",
        meta.sqlite_version, meta.encoding, meta.page_size
    ));
    if let Some(modified) = meta.modified_at {
        out.push_str(&format!("- Last Modified: {} (unix time)\n", modified));
    }
    out.push('\n');

    out.push_str("### Tables\n\n");
    for table in &schema.tables {
        out.push_str(&format!("#### {} ({} rows)\n", table.name, table.row_count));
        out.push_str("Columns:\n");
        for column in &table.columns {
            out.push_str(&format!("- {}\n", column_line(column)));
        }

        if !table.indexes.is_empty() {
            out.push_str("\nIndexes:\n");
            for idx in &table.indexes {
                let unique = if idx.unique { " (UNIQUE)" } else { "" };
                out.push_str(&format!("- {}{}: {}\n", idx.name, unique, idx.columns.join(", ")));
            }
        }
        out.push('\n');
    }

    if !schema.relationships.is_empty() {
        out.push_str("### Relationships\n\n");
        for rel in &schema.relationships {
            out.push_str(&format!("- {}\n", relationship_line(rel)));
        }
        out.push('\n');
    }

    out
}

fn column_line(column: &ColumnDescription) -> String {
    let mut line = format!("{}: {}", column.name, column.declared_type);
    if column.is_primary_key {
        line.push_str(" [PK]");
    }
    if column.is_foreign_key {
        line.push_str(" [FK]");
    }
    if column.is_unique && !column.is_primary_key {
        line.push_str(" [UNIQUE]");
    }
    line.push_str(if column.nullable { " (nullable)" } else { " (not null)" });

    if let Some(stats) = &column.statistics {
        line.push_str(&format!(" - {} unique values", stats.distinct_count));
        let numeric = column.category() == Some(TypeCategory::Numeric);
        if numeric && !stats.min.is_null() && !stats.max.is_null() {
            line.push_str(&format!(", range: [{}, {}]", stats.min, stats.max));
        }
        let kind = stats.classification.kind();
        if kind != SemanticKind::Unknown {
            line.push_str(&format!(", {}", kind));
            if let Some(format) = stats.classification.format() {
                line.push_str(&format!(" ({})", format));
            }
        }
    }
    line
}

fn relationship_line(rel: &RelationshipEdge) -> String {
    format!(
        "{}.{} → {}.{} ({})",
        rel.from_table, rel.from_column, rel.to_table, rel.to_column, rel.cardinality
    )
}

#[derive(Serialize)]
struct PromptSchema<'a> {
    tables: Vec<PromptTable<'a>>,
    relationships: &'a [RelationshipEdge],
}

#[derive(Serialize)]
struct PromptTable<'a> {
    name: &'a str,
    row_count: u64,
    columns: Vec<PromptColumn<'a>>,
    sample_rows: &'a [Vec<SqlValue>],
}

#[derive(Serialize)]
struct PromptColumn<'a> {
    name: &'a str,
    declared_type: &'a str,
    nullable: bool,
    is_primary_key: bool,
    is_foreign_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    semantic_type: Option<SemanticKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distinct_count: Option<u64>,
}

/// Pretty JSON of the schema for prompt construction, with at most
/// [`PROMPT_SAMPLE_ROWS`] sample rows per table.
pub fn prompt_json(schema: &SchemaDescription) -> serde_json::Result<String> {
    let view = PromptSchema {
        tables: schema
            .tables
            .iter()
            .map(|t| PromptTable {
                name: &t.name,
                row_count: t.row_count,
                columns: t
                    .columns
                    .iter()
                    .map(|c| PromptColumn {
                        name: &c.name,
                        declared_type: &c.declared_type,
                        nullable: c.nullable,
                        is_primary_key: c.is_primary_key,
                        is_foreign_key: c.is_foreign_key,
                        semantic_type: c.semantic_kind(),
                        format: c.statistics.as_ref().and_then(|s| s.classification.format()),
                        distinct_count: c.distinct_count(),
                    })
                    .collect(),
                sample_rows: &t.sample_rows[..t.sample_rows.len().min(PROMPT_SAMPLE_ROWS)],
            })
            .collect(),
        relationships: &schema.relationships,
    };
    serde_json::to_string_pretty(&view)
}

/// Reference to one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnRef {
    pub table: String,
    pub column: String,
}

/// A numeric column worth charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricColumn {
    pub table: String,
    pub column: String,
    pub distinct_count: Option<u64>,
    pub min: SqlValue,
    pub max: SqlValue,
}

/// A low-cardinality text column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalColumn {
    pub table: String,
    pub column: String,
    pub distinct_count: u64,
}

/// Headline facts about a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub total_tables: usize,
    pub total_rows: u64,
    pub relationships: usize,
    /// Non-primary-key numeric columns.
    pub primary_metrics: Vec<MetricColumn>,
    pub date_columns: Vec<ColumnRef>,
    /// Text columns with fewer than [`CATEGORICAL_DISTINCT_LIMIT`] distinct
    /// values. Needs statistics.
    pub categorical_columns: Vec<CategoricalColumn>,
}

pub fn key_metrics(schema: &SchemaDescription) -> KeyMetrics {
    let mut metrics = KeyMetrics {
        total_tables: schema.metadata.table_count,
        total_rows: schema.metadata.total_row_count,
        relationships: schema.relationships.len(),
        primary_metrics: Vec::new(),
        date_columns: Vec::new(),
        categorical_columns: Vec::new(),
    };

    for (table, column) in schema.columns() {
        let category = column.effective_category();
        match category {
            Some(TypeCategory::Numeric) if !column.is_primary_key => {
                let (min, max) = column
                    .statistics
                    .as_ref()
                    .map(|s| (s.min.clone(), s.max.clone()))
                    .unwrap_or_default();
                metrics.primary_metrics.push(MetricColumn {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    distinct_count: column.distinct_count(),
                    min,
                    max,
                });
            }
            Some(TypeCategory::Date) => metrics.date_columns.push(ColumnRef {
                table: table.name.clone(),
                column: column.name.clone(),
            }),
            Some(TypeCategory::Text) if !column.is_primary_key => {
                if let Some(distinct) = column
                    .distinct_count()
                    .filter(|d| *d < CATEGORICAL_DISTINCT_LIMIT)
                {
                    metrics.categorical_columns.push(CategoricalColumn {
                        table: table.name.clone(),
                        column: column.name.clone(),
                        distinct_count: distinct,
                    });
                }
            }
            _ => {}
        }
    }

    metrics
}
