//! Fixture databases shared by the integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tempfile::TempDir;
use vibecraft::config::AnalysisSettings;
use vibecraft::schema::{SchemaAnalyzer, SchemaDescription};

/// A database file that lives as long as the fixture.
pub struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn analyze(&self) -> SchemaDescription {
        self.analyze_with(AnalysisSettings::default())
    }

    pub fn analyze_with(&self, settings: AnalysisSettings) -> SchemaDescription {
        SchemaAnalyzer::new(settings).analyze(&self.path).unwrap()
    }
}

/// Create a database file from a SQL script.
pub fn fixture(sql: &str) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(sql).unwrap();
    drop(conn);
    Fixture { _dir: dir, path }
}

/// Analyze a SQL script with default settings.
pub fn analyze(sql: &str) -> SchemaDescription {
    fixture(sql).analyze()
}

/// One table of daily sales: a date column, two numeric measures, a
/// low-cardinality region.
pub const DAILY_SALES: &str = r#"
CREATE TABLE daily_sales (
    id INTEGER PRIMARY KEY,
    sale_date TEXT NOT NULL,
    region TEXT,
    revenue REAL,
    units INTEGER
);
WITH RECURSIVE d(n) AS (SELECT 0 UNION ALL SELECT n + 1 FROM d WHERE n < 59)
INSERT INTO daily_sales (sale_date, region, revenue, units)
SELECT date('2024-01-01', '+' || n || ' days'),
       CASE n % 3 WHEN 0 THEN 'north' WHEN 1 THEN 'south' ELSE 'east' END,
       100 + n * 7.5,
       n % 40 + 1
FROM d;
"#;

/// Customers and their orders, linked by a foreign key.
pub const SHOP: &str = r#"
CREATE TABLE customers (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT UNIQUE,
    city TEXT
);
CREATE TABLE orders (
    id INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
    ordered_at TEXT,
    amount REAL,
    status TEXT
);
CREATE INDEX idx_orders_customer ON orders(customer_id);
INSERT INTO customers VALUES
    (1, 'Ada', 'ada@example.com', 'Seoul'),
    (2, 'Grace', 'grace@example.com', 'Busan'),
    (3, 'Linus', 'linus@example.com', 'Seoul');
INSERT INTO orders VALUES
    (1, 1, '2024-03-01 09:15:00', 120.5, 'paid'),
    (2, 1, '2024-03-02 10:00:00', 80.0, 'paid'),
    (3, 2, '2024-03-02 11:30:00', 42.25, 'refunded'),
    (4, 3, '2024-03-05 16:45:00', 300.0, 'paid');
"#;
