//! Schema analysis for SQLite databases.
//!
//! Reconstructs the structural and semantic shape of a database file in one
//! read-only pass:
//!
//! ```text
//! path ─► validate ─► open (read-only) ─► introspect ─► sample ─► classify
//!                                          (catalog)    (stats)   (inference)
//!                                                                      │
//!                                                   SchemaDescription ◄┘
//! ```
//!
//! The connection is owned by [`SchemaAnalyzer::analyze`] and dropped on
//! every exit path. Independent analyses may run on independent threads.

mod error;
mod introspect;
mod sampler;
mod types;
mod validate;
mod value;

pub use error::{ConnectionError, SchemaError, SchemaResult, StatisticsError};
pub use introspect::{quote_ident, relationships, resolve_implicit_references, Introspector};
pub use sampler::{RawColumnStatistics, StatisticsSampler};
pub use types::{
    Cardinality, ColumnDescription, ColumnStatistics, DatabaseMetadata, ForeignKeyEdge,
    IndexDescription, RelationshipEdge, SchemaDescription, TableDescription,
};
pub use validate::{validate_database_path, SQLITE_HEADER};
pub use value::SqlValue;

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use tracing::{info, instrument};

use crate::config::AnalysisSettings;
use crate::inference::{classify, InferenceInput, StorageClass, ValueCardinality};

/// Builds a [`SchemaDescription`] from a database file or connection.
///
/// Holds no state besides its settings; reuse it freely.
#[derive(Debug, Clone, Default)]
pub struct SchemaAnalyzer {
    settings: AnalysisSettings,
}

impl SchemaAnalyzer {
    pub fn new(settings: AnalysisSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Analyze the database at `path`.
    ///
    /// A database with no user tables yields an empty description; use
    /// [`SchemaAnalyzer::analyze_non_empty`] to treat that as an error.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn analyze(&self, path: &Path) -> SchemaResult<SchemaDescription> {
        validate_database_path(path)?;

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| ConnectionError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.analyze_connection(&conn, Some(path))
    }

    /// Like [`SchemaAnalyzer::analyze`], but zero user tables is an
    /// [`SchemaError::EmptySchema`].
    pub fn analyze_non_empty(&self, path: &Path) -> SchemaResult<SchemaDescription> {
        let schema = self.analyze(path)?;
        if schema.is_empty() {
            return Err(SchemaError::EmptySchema);
        }
        Ok(schema)
    }

    /// Analyze an already-open connection. `source_path` only feeds the
    /// file-level metadata.
    pub fn analyze_connection(
        &self,
        conn: &Connection,
        source_path: Option<&Path>,
    ) -> SchemaResult<SchemaDescription> {
        let introspector = Introspector::new(conn);
        let sampler = StatisticsSampler::new(conn, &self.settings);

        let mut tables = introspector
            .list_tables()?
            .iter()
            .map(|name| introspector.describe_table(name, self.settings.row_sample_limit))
            .collect::<SchemaResult<Vec<_>>>()?;
        resolve_implicit_references(&mut tables);

        for table in tables.iter_mut() {
            let raw = sampler.sample_table(table);
            attach_statistics(table, raw);
        }

        let relationships = relationships(&tables, self.settings.detect_one_to_one);

        let mut metadata = introspector.database_metadata(source_path)?;
        metadata.table_count = tables.len();
        metadata.total_row_count = tables.iter().map(|t| t.row_count).sum();

        info!(
            tables = metadata.table_count,
            rows = metadata.total_row_count,
            relationships = relationships.len(),
            "schema analyzed"
        );

        Ok(SchemaDescription {
            tables,
            relationships,
            metadata,
        })
    }
}

/// Analyze `path` with the given settings.
pub fn analyze(path: &Path, settings: &AnalysisSettings) -> SchemaResult<SchemaDescription> {
    SchemaAnalyzer::new(settings.clone()).analyze(path)
}

/// Classify each column's raw statistics and store the result on it.
fn attach_statistics(table: &mut TableDescription, raw: Vec<Option<RawColumnStatistics>>) {
    let row_count = table.row_count;
    for (column, raw) in table.columns.iter_mut().zip(raw) {
        column.statistics = raw.map(|raw| build_statistics(&column.declared_type, row_count, raw));
    }
}

fn build_statistics(declared_type: &str, row_count: u64, raw: RawColumnStatistics) -> ColumnStatistics {
    let cardinality = ValueCardinality {
        distinct: raw.distinct_count,
        total: row_count.saturating_sub(raw.null_count),
    };
    let classification =
        classify(&InferenceInput::new(declared_type, &raw.sample).with_cardinality(cardinality));

    ColumnStatistics {
        distinct_count: raw.distinct_count,
        null_count: raw.null_count,
        storage_class: StorageClass::infer(declared_type, &raw.min),
        min: raw.min,
        max: raw.max,
        avg_length: raw.avg_length,
        classification,
        sample: raw.sample,
    }
}
