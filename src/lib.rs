//! # vibecraft
//!
//! Schema intelligence for SQLite databases.
//!
//! ## Architecture
//!
//! One read-only pass over a database file produces an immutable
//! [`schema::SchemaDescription`]; everything after that is a pure function of
//! it:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   SQLite file (read-only)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [schema: introspect + sample]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Tables, columns, keys, indexes, column statistics    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [inference]
//! ┌─────────────────────────────────────────────────────────┐
//! │       SchemaDescription (semantic type per column)       │
//! └─────────────────────────────────────────────────────────┘
//!              │                     │                 │
//!              ▼ [roles]             ▼ [archetype]     ▼ [summary]
//!      column → role bindings   fit scores, ranking   markdown / JSON
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use vibecraft::archetype::{recommend, ArchetypeCatalog};
//! use vibecraft::config::AnalysisSettings;
//!
//! let schema = vibecraft::schema::analyze(Path::new("sales.db"), &AnalysisSettings::default())?;
//! let catalog = ArchetypeCatalog::builtin()?;
//! for rec in recommend(&schema, &catalog) {
//!     println!("{}: {}", rec.archetype, rec.score);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod archetype;
pub mod config;
pub mod inference;
pub mod roles;
pub mod schema;
pub mod summary;

pub use archetype::{Archetype, ArchetypeCatalog, CompatibilityResult, Recommendation};
pub use config::{AnalysisSettings, Settings};
pub use inference::{Classification, SemanticKind, TypeCategory};
pub use schema::{SchemaAnalyzer, SchemaDescription, SchemaError};
