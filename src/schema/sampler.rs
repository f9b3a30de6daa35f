//! Per-column statistics.
//!
//! One aggregate query and one value-sample query per column, each run
//! under a wall-clock budget enforced with SQLite's progress handler. A
//! column whose queries fail or time out simply gets no statistics.

use std::time::{Duration, Instant};

use rusqlite::{params, Connection, ErrorCode};
use tracing::debug;

use super::error::StatisticsError;
use super::introspect::quote_ident;
use super::types::TableDescription;
use super::value::SqlValue;
use crate::config::AnalysisSettings;

/// VM instructions between progress-handler callbacks.
const PROGRESS_INTERVAL: i32 = 1_000;

/// Statistics gathered for one column, before classification.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawColumnStatistics {
    pub distinct_count: u64,
    pub null_count: u64,
    pub min: SqlValue,
    pub max: SqlValue,
    pub avg_length: f64,
    /// Non-null values, at most `sample_size` of them.
    pub sample: Vec<SqlValue>,
}

/// Interrupts every statement on the connection once the deadline passes.
/// The handler is removed when the guard drops.
struct QueryDeadline<'conn> {
    conn: &'conn Connection,
}

impl<'conn> QueryDeadline<'conn> {
    fn arm(conn: &'conn Connection, budget: Duration) -> Self {
        let deadline = Instant::now() + budget;
        conn.progress_handler(PROGRESS_INTERVAL, Some(move || Instant::now() >= deadline));
        Self { conn }
    }
}

impl Drop for QueryDeadline<'_> {
    fn drop(&mut self) {
        self.conn.progress_handler(0, None::<fn() -> bool>);
    }
}

/// Collects column statistics for tables below the sampling ceiling.
pub struct StatisticsSampler<'conn> {
    conn: &'conn Connection,
    ceiling: u64,
    sample_size: usize,
    timeout: Option<Duration>,
}

impl<'conn> StatisticsSampler<'conn> {
    pub fn new(conn: &'conn Connection, settings: &AnalysisSettings) -> Self {
        Self {
            conn,
            ceiling: settings.sampling_ceiling,
            sample_size: settings.sample_size,
            timeout: settings.statistics_timeout(),
        }
    }

    /// Tables with `row_count >= ceiling` are never sampled.
    pub fn should_sample(&self, row_count: u64) -> bool {
        row_count < self.ceiling
    }

    /// Statistics for every column of `table`, aligned with its columns.
    ///
    /// Returns an empty vector when the table is at or above the ceiling.
    /// Individual column failures are logged and yield `None`.
    pub fn sample_table(&self, table: &TableDescription) -> Vec<Option<RawColumnStatistics>> {
        if !self.should_sample(table.row_count) {
            debug!(
                table = %table.name,
                row_count = table.row_count,
                ceiling = self.ceiling,
                "skipping statistics above sampling ceiling"
            );
            return Vec::new();
        }

        table
            .columns
            .iter()
            .map(|column| match self.sample_column(&table.name, &column.name) {
                Ok(stats) => Some(stats),
                Err(e) => {
                    debug!(table = %table.name, column = %column.name, error = %e, "column statistics omitted");
                    None
                }
            })
            .collect()
    }

    /// Run the aggregate and sample queries for one column.
    pub fn sample_column(
        &self,
        table: &str,
        column: &str,
    ) -> Result<RawColumnStatistics, StatisticsError> {
        let _deadline = self.timeout.map(|budget| QueryDeadline::arm(self.conn, budget));

        self.query_column(table, column)
            .map_err(|source| self.classify_failure(table, column, source))
    }

    fn query_column(&self, table: &str, column: &str) -> rusqlite::Result<RawColumnStatistics> {
        let t = quote_ident(table);
        let c = quote_ident(column);

        let aggregate = format!(
            "SELECT COUNT(DISTINCT {c}), COUNT(*) - COUNT({c}), MIN({c}), MAX({c}), \
             AVG(LENGTH(CAST({c} AS TEXT))) FROM {t}"
        );
        let mut stats = self.conn.query_row(&aggregate, [], |row| {
            Ok(RawColumnStatistics {
                distinct_count: row.get::<_, i64>(0)?.max(0) as u64,
                null_count: row.get::<_, i64>(1)?.max(0) as u64,
                min: SqlValue::from(row.get_ref(2)?),
                max: SqlValue::from(row.get_ref(3)?),
                avg_length: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
                sample: Vec::new(),
            })
        })?;

        let sample_sql = format!("SELECT {c} FROM {t} WHERE {c} IS NOT NULL LIMIT ?1");
        let mut stmt = self.conn.prepare(&sample_sql)?;
        stats.sample = stmt
            .query_map(params![self.sample_size as i64], |row| {
                row.get_ref(0).map(SqlValue::from)
            })?
            .collect::<Result<_, _>>()?;

        Ok(stats)
    }

    fn classify_failure(&self, table: &str, column: &str, source: rusqlite::Error) -> StatisticsError {
        let interrupted = source.sqlite_error_code() == Some(ErrorCode::OperationInterrupted);
        match (interrupted, self.timeout) {
            (true, Some(budget)) => StatisticsError::TimedOut {
                table: table.to_string(),
                column: column.to_string(),
                budget_ms: budget.as_millis(),
            },
            _ => StatisticsError::Query {
                table: table.to_string(),
                column: column.to_string(),
                source,
            },
        }
    }
}
