//! Error types for schema analysis.

use std::path::PathBuf;

/// Result type for schema analysis.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// The database file could not be used at all.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("SQLite file not found: {0}")]
    NotFound(PathBuf),

    #[error("Path is not a file: {0}")]
    NotAFile(PathBuf),

    #[error("File is not a valid SQLite database: {0}")]
    InvalidSignature(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

/// Fatal errors that abort an analysis.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error("Database contains no user tables")]
    EmptySchema,

    #[error("Failed to introspect table '{table}': {source}")]
    Introspection {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to read database catalog: {0}")]
    Catalog(#[from] rusqlite::Error),
}

impl SchemaError {
    pub(crate) fn introspection(table: &str, source: rusqlite::Error) -> Self {
        SchemaError::Introspection {
            table: table.to_string(),
            source,
        }
    }
}

/// A single column's statistics could not be collected.
///
/// Never escapes the sampler as a failure of the analysis: the column's
/// statistics are omitted instead.
#[derive(Debug, thiserror::Error)]
pub enum StatisticsError {
    #[error("Statistics query for {table}.{column} failed: {source}")]
    Query {
        table: String,
        column: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Statistics query for {table}.{column} exceeded {budget_ms} ms")]
    TimedOut {
        table: String,
        column: String,
        budget_ms: u128,
    },
}
