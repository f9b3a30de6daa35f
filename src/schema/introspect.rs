//! Structural introspection through SQLite's catalog.
//!
//! Uses the table-valued pragma functions (`pragma_table_xinfo(?)` and
//! friends) so table names are bound as parameters instead of being spliced
//! into pragma strings. Data queries that need a table name in the FROM
//! clause go through [`quote_ident`].

use std::collections::HashSet;
use std::path::Path;
use std::time::UNIX_EPOCH;

use rusqlite::{params, Connection};
use tracing::debug;

use super::error::{SchemaError, SchemaResult};
use super::types::{
    Cardinality, ColumnDescription, DatabaseMetadata, ForeignKeyEdge, IndexDescription,
    RelationshipEdge, TableDescription,
};
use super::value::SqlValue;

/// Quote an identifier for use in SQL text.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Reads the structure of a database over a borrowed connection.
pub struct Introspector<'conn> {
    conn: &'conn Connection,
}

/// Raw row of `pragma_table_xinfo`.
struct RawColumn {
    name: String,
    declared_type: String,
    not_null: bool,
    default_value: Option<String>,
    pk_position: i64,
}

/// Raw row of `pragma_index_list`.
struct RawIndex {
    name: String,
    unique: bool,
}

impl<'conn> Introspector<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Names of all user tables, internal `sqlite_%` tables excluded.
    pub fn list_tables(&self) -> SchemaResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// Columns, keys, indexes, row count and a few sample rows for one
    /// table. Statistics are not collected here.
    pub fn describe_table(&self, table: &str, sample_limit: usize) -> SchemaResult<TableDescription> {
        let wrap = |e| SchemaError::introspection(table, e);

        let raw_columns = self.table_columns(table).map_err(wrap)?;
        let foreign_keys = self.foreign_keys(table).map_err(wrap)?;
        let indexes = self.indexes(table).map_err(wrap)?;
        let row_count = self.row_count(table).map_err(wrap)?;

        let fk_columns: HashSet<&str> = foreign_keys.iter().map(|fk| fk.column.as_str()).collect();
        // A column in a composite unique index is not unique on its own.
        let unique_columns: HashSet<&str> = indexes
            .iter()
            .filter(|idx| idx.unique && idx.columns.len() == 1)
            .map(|idx| idx.columns[0].as_str())
            .collect();

        let columns: Vec<ColumnDescription> = raw_columns
            .iter()
            .map(|raw| {
                let is_primary_key = raw.pk_position > 0;
                ColumnDescription {
                    name: raw.name.clone(),
                    declared_type: raw.declared_type.clone(),
                    nullable: !raw.not_null && !is_primary_key,
                    default_value: raw.default_value.clone(),
                    is_primary_key,
                    is_foreign_key: fk_columns.contains(raw.name.as_str()),
                    is_unique: unique_columns.contains(raw.name.as_str()),
                    statistics: None,
                }
            })
            .collect();

        let primary_key = raw_columns
            .iter()
            .find(|raw| raw.pk_position == 1)
            .map(|raw| raw.name.clone());

        // An expression column that fails to evaluate costs the sample rows,
        // not the table.
        let sample_rows = if row_count > 0 && sample_limit > 0 {
            self.sample_rows(table, &columns, sample_limit)
                .unwrap_or_else(|e| {
                    debug!(table, error = %e, "sample rows omitted");
                    Vec::new()
                })
        } else {
            Vec::new()
        };

        Ok(TableDescription {
            name: table.to_string(),
            columns,
            primary_key,
            foreign_keys,
            indexes,
            row_count,
            sample_rows,
        })
    }

    /// Declared columns in table order, generated columns included. Hidden
    /// columns of virtual tables (`hidden = 1`) are left out.
    fn table_columns(&self, table: &str) -> rusqlite::Result<Vec<RawColumn>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_xinfo(?1) \
             WHERE hidden <> 1 ORDER BY cid",
        )?;
        let rows = stmt.query_map(params![table], |row| {
            Ok(RawColumn {
                name: row.get(0)?,
                declared_type: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                not_null: row.get::<_, i64>(2)? != 0,
                default_value: row.get(3)?,
                pk_position: row.get(4)?,
            })
        })?;
        rows.collect()
    }

    /// Foreign keys in declaration order. A reference without an explicit
    /// target column is left empty here and resolved once every table's
    /// primary key is known.
    fn foreign_keys(&self, table: &str) -> rusqlite::Result<Vec<ForeignKeyEdge>> {
        let mut stmt = self.conn.prepare(
            "SELECT \"table\", \"from\", \"to\", on_update, on_delete \
             FROM pragma_foreign_key_list(?1) ORDER BY id, seq",
        )?;
        let rows = stmt.query_map(params![table], |row| {
            Ok(ForeignKeyEdge {
                referenced_table: row.get(0)?,
                column: row.get(1)?,
                referenced_column: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                on_update: row.get(3)?,
                on_delete: row.get(4)?,
            })
        })?;
        rows.collect()
    }

    fn indexes(&self, table: &str) -> rusqlite::Result<Vec<IndexDescription>> {
        let raw: Vec<RawIndex> = {
            let mut stmt = self
                .conn
                .prepare("SELECT name, \"unique\" FROM pragma_index_list(?1) ORDER BY seq")?;
            let rows = stmt.query_map(params![table], |row| {
                Ok(RawIndex {
                    name: row.get(0)?,
                    unique: row.get::<_, i64>(1)? != 0,
                })
            })?;
            rows.collect::<Result<_, _>>()?
        };

        let mut stmt = self
            .conn
            .prepare("SELECT name FROM pragma_index_info(?1) ORDER BY seqno")?;
        raw.into_iter()
            .map(|idx| -> rusqlite::Result<IndexDescription> {
                let columns = stmt
                    .query_map(params![idx.name], |row| row.get::<_, Option<String>>(0))?
                    .filter_map(|r| r.transpose())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(IndexDescription {
                    name: idx.name,
                    columns,
                    unique: idx.unique,
                })
            })
            .collect()
    }

    fn row_count(&self, table: &str) -> rusqlite::Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// First `limit` rows, one value per entry of `columns` in the same order.
    fn sample_rows(
        &self,
        table: &str,
        columns: &[ColumnDescription],
        limit: usize,
    ) -> rusqlite::Result<Vec<Vec<SqlValue>>> {
        if columns.is_empty() {
            return Ok(Vec::new());
        }
        let select_list = columns
            .iter()
            .map(|c| quote_ident(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("SELECT {select_list} FROM {} LIMIT ?1", quote_ident(table));
        let mut stmt = self.conn.prepare(&sql)?;
        let width = columns.len();
        let rows = stmt.query_map(params![limit as i64], |row| {
            (0..width)
                .map(|i| row.get_ref(i).map(SqlValue::from))
                .collect::<Result<Vec<_>, _>>()
        })?;
        rows.collect()
    }

    /// Page size, encoding and library version. File-level fields are
    /// filled from `path` when given.
    pub fn database_metadata(&self, path: Option<&Path>) -> SchemaResult<DatabaseMetadata> {
        let page_size: i64 = self
            .conn
            .query_row("PRAGMA page_size", [], |row| row.get(0))?;
        let encoding: String = self
            .conn
            .query_row("PRAGMA encoding", [], |row| row.get(0))?;
        let sqlite_version: String = self
            .conn
            .query_row("SELECT sqlite_version()", [], |row| row.get(0))?;

        let mut metadata = DatabaseMetadata {
            sqlite_version,
            encoding,
            page_size: page_size.max(0) as u32,
            ..DatabaseMetadata::default()
        };

        if let Some(fs_meta) = path.and_then(|p| std::fs::metadata(p).ok()) {
            let epoch_secs = |t: std::io::Result<std::time::SystemTime>| {
                t.ok()
                    .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                    .map(|d| d.as_secs())
            };
            metadata.file_size = fs_meta.len();
            metadata.created_at = epoch_secs(fs_meta.created());
            metadata.modified_at = epoch_secs(fs_meta.modified());
        }

        Ok(metadata)
    }
}

/// Fill in foreign-key targets that were declared without a column, using
/// the referenced table's primary key (or `rowid` when it has none).
pub fn resolve_implicit_references(tables: &mut [TableDescription]) {
    let primary_keys: Vec<(String, Option<String>)> = tables
        .iter()
        .map(|t| (t.name.clone(), t.primary_key.clone()))
        .collect();

    for table in tables.iter_mut() {
        for fk in table.foreign_keys.iter_mut().filter(|fk| fk.referenced_column.is_empty()) {
            fk.referenced_column = primary_keys
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&fk.referenced_table))
                .and_then(|(_, pk)| pk.clone())
                .unwrap_or_else(|| "rowid".to_string());
        }
    }
}

/// Build relationship edges from every table's foreign keys.
///
/// Every edge is `one-to-many` unless `detect_one_to_one` is set, in which
/// case a foreign key whose column is the table's sole primary key or is
/// covered by a single-column unique index becomes `one-to-one`.
pub fn relationships(tables: &[TableDescription], detect_one_to_one: bool) -> Vec<RelationshipEdge> {
    tables
        .iter()
        .flat_map(|table| {
            table.foreign_keys.iter().map(move |fk| {
                let cardinality = if detect_one_to_one && is_single_column_unique(table, &fk.column) {
                    Cardinality::OneToOne
                } else {
                    Cardinality::OneToMany
                };
                RelationshipEdge {
                    from_table: table.name.clone(),
                    from_column: fk.column.clone(),
                    to_table: fk.referenced_table.clone(),
                    to_column: fk.referenced_column.clone(),
                    cardinality,
                }
            })
        })
        .collect()
}

fn is_single_column_unique(table: &TableDescription, column: &str) -> bool {
    let sole_primary_key = table.primary_key.as_deref() == Some(column)
        && table.columns.iter().filter(|c| c.is_primary_key).count() == 1;
    let unique_index = table
        .indexes
        .iter()
        .any(|idx| idx.unique && idx.columns.len() == 1 && idx.columns[0] == column);
    sole_primary_key || unique_index
}
