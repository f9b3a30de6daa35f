#[path = "../common/mod.rs"]
mod common;

use common::{analyze, DAILY_SALES, SHOP};
use vibecraft::archetype::Archetype;
use vibecraft::roles::{map_columns, map_table, Aggregation, KpiMetric, MetricKind, TableRoles};

#[test]
fn test_time_series_on_daily_sales() {
    let schema = analyze(DAILY_SALES);
    let roles = map_table(schema.table("daily_sales").unwrap(), Archetype::TimeSeries).unwrap();

    let TableRoles::TimeSeries(roles) = roles else {
        panic!("expected time-series roles");
    };
    // sale_date has no time-like name; it is found through its semantic type.
    assert_eq!(roles.time_column, "sale_date");
    assert_eq!(roles.value_columns, vec!["revenue"]);
    assert_eq!(roles.group_by_columns, vec!["region"]);
}

#[test]
fn test_time_series_skips_tables_without_time() {
    let schema = analyze(SHOP);
    let mapping = map_columns(&schema.tables, Archetype::TimeSeries);

    assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["orders"]);
    let TableRoles::TimeSeries(orders) = &mapping["orders"] else {
        panic!("expected time-series roles");
    };
    assert_eq!(orders.time_column, "ordered_at");
    assert_eq!(orders.value_columns, vec!["amount"]);
}

#[test]
fn test_latitude_with_location_is_enough() {
    let schema = analyze(
        "CREATE TABLE places (id INTEGER PRIMARY KEY, city TEXT, latitude REAL, visits INTEGER);
         INSERT INTO places (city, latitude, visits) VALUES
             ('Seoul', 37.56, 120), ('Busan', 35.17, 80),
             ('Incheon', 37.45, 45), ('Daegu', 35.87, 60);",
    );
    let roles = map_table(schema.table("places").unwrap(), Archetype::GeoSpatial).unwrap();

    let TableRoles::GeoSpatial(geo) = roles else {
        panic!("expected geo-spatial roles");
    };
    assert_eq!(geo.lat_column.as_deref(), Some("latitude"));
    assert_eq!(geo.lng_column, None);
    assert_eq!(geo.location_column.as_deref(), Some("city"));
    assert!(geo.value_columns.contains(&"visits".to_string()));
}

#[test]
fn test_out_of_range_latitude_is_rejected() {
    let schema = analyze(
        "CREATE TABLE readings (lat REAL, lng REAL);
         INSERT INTO readings VALUES (120.0, 10.0), (130.5, 11.0);",
    );
    assert!(map_table(schema.table("readings").unwrap(), Archetype::GeoSpatial).is_none());
}

#[test]
fn test_gantt_roles() {
    let schema = analyze(
        "CREATE TABLE tasks (
             id INTEGER PRIMARY KEY,
             title TEXT,
             start_date TEXT,
             end_date TEXT,
             progress REAL,
             status TEXT
         );
         INSERT INTO tasks (title, start_date, end_date, progress, status) VALUES
             ('Design', '2024-01-01', '2024-01-10', 100, 'done'),
             ('Build', '2024-01-08', '2024-02-20', 40, 'active');",
    );
    let roles = map_table(schema.table("tasks").unwrap(), Archetype::GanttChart).unwrap();

    let TableRoles::Gantt(gantt) = roles else {
        panic!("expected gantt roles");
    };
    assert_eq!(gantt.task_column.as_deref(), Some("title"));
    assert_eq!(gantt.start_column, "start_date");
    assert_eq!(gantt.end_column.as_deref(), Some("end_date"));
    assert_eq!(gantt.duration_column, None);
    assert_eq!(gantt.progress_column.as_deref(), Some("progress"));
    assert_eq!(gantt.category_column.as_deref(), Some("status"));
}

#[test]
fn test_gantt_task_falls_back_to_primary_key() {
    let schema = analyze(
        "CREATE TABLE jobs (job_no INTEGER PRIMARY KEY, begin_date TEXT, due_date TEXT);
         INSERT INTO jobs VALUES (1, '2024-03-01', '2024-03-04'), (2, '2024-03-02', '2024-03-09');",
    );
    let roles = map_table(schema.table("jobs").unwrap(), Archetype::GanttChart).unwrap();

    let TableRoles::Gantt(gantt) = roles else {
        panic!("expected gantt roles");
    };
    assert_eq!(gantt.task_column.as_deref(), Some("job_no"));
    assert_eq!(gantt.start_column, "begin_date");
    assert_eq!(gantt.end_column.as_deref(), Some("due_date"));
}

#[test]
fn test_gantt_needs_end_or_duration() {
    let schema = analyze(
        "CREATE TABLE milestones (id INTEGER PRIMARY KEY, start_date TEXT);
         INSERT INTO milestones (start_date) VALUES ('2024-01-01');",
    );
    assert!(map_columns(&schema.tables, Archetype::GanttChart).is_empty());
}

#[test]
fn test_kpi_metrics_and_aggregations() {
    let schema = analyze(
        "CREATE TABLE kpis (id INTEGER PRIMARY KEY, region TEXT, revenue REAL, quantity INTEGER, rate REAL);
         WITH RECURSIVE s(n) AS (SELECT 0 UNION ALL SELECT n + 1 FROM s WHERE n < 29)
         INSERT INTO kpis (region, revenue, quantity, rate)
         SELECT CASE n % 2 WHEN 0 THEN 'west' ELSE 'east' END, 1000 + n * 13.5, n, n % 3 * 0.1
         FROM s;",
    );
    let roles = map_table(schema.table("kpis").unwrap(), Archetype::KpiDashboard).unwrap();

    let TableRoles::Kpi(kpi) = roles else {
        panic!("expected kpi roles");
    };
    assert_eq!(
        kpi.metrics,
        vec![
            KpiMetric {
                column: "revenue".into(),
                kind: MetricKind::Currency,
                aggregation: Aggregation::Sum,
            },
            KpiMetric {
                column: "quantity".into(),
                kind: MetricKind::Count,
                aggregation: Aggregation::Count,
            },
            // No name hint for the verb; three distinct values means count.
            KpiMetric {
                column: "rate".into(),
                kind: MetricKind::Percentage,
                aggregation: Aggregation::Count,
            },
        ]
    );
    assert_eq!(kpi.dimension_columns, vec!["region"]);
}

#[test]
fn test_kpi_needs_a_metric() {
    let schema = analyze(
        "CREATE TABLE notes (body TEXT);
         INSERT INTO notes VALUES ('first note'), ('second note');",
    );
    assert!(map_table(schema.table("notes").unwrap(), Archetype::KpiDashboard).is_none());
}

#[test]
fn test_generic_roles_for_other_archetypes() {
    let schema = analyze(SHOP);
    let mapping = map_columns(&schema.tables, Archetype::Comparison);
    assert_eq!(mapping.len(), 2);

    let TableRoles::Generic(customers) = &mapping["customers"] else {
        panic!("expected generic roles");
    };
    assert_eq!(customers.id_column.as_deref(), Some("id"));
    assert_eq!(customers.name_column.as_deref(), Some("name"));
    assert_eq!(customers.numeric_columns, vec!["id"]);
    assert_eq!(customers.text_columns, vec!["name", "email", "city"]);

    let TableRoles::Generic(orders) = &mapping["orders"] else {
        panic!("expected generic roles");
    };
    assert_eq!(orders.date_columns, vec!["ordered_at"]);
}

#[test]
fn test_roles_serialize_with_layout_tag() {
    let schema = analyze(DAILY_SALES);
    let mapping = map_columns(&schema.tables, Archetype::TimeSeries);
    let json = serde_json::to_value(&mapping).unwrap();

    assert_eq!(json["daily_sales"]["layout"], "time-series");
    assert_eq!(json["daily_sales"]["time_column"], "sale_date");
}
