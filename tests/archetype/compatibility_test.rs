#[path = "../common/mod.rs"]
mod common;

use common::{analyze, fixture, DAILY_SALES, SHOP};
use vibecraft::archetype::{
    check_compatibility, Archetype, ArchetypeCatalog, COMPATIBILITY_THRESHOLD,
};
use vibecraft::config::AnalysisSettings;

fn builtin() -> ArchetypeCatalog {
    ArchetypeCatalog::builtin().unwrap()
}

#[test]
fn test_table_shortfall() {
    let schema = analyze(DAILY_SALES);
    let catalog = builtin();
    let result = check_compatibility(catalog.get(Archetype::Comparison).unwrap(), &schema);

    assert!(!result.compatible);
    assert!(result.score <= 50);
    assert_eq!(
        result.reasons,
        vec!["Template requires at least 2 tables, but schema has only 1"]
    );
}

#[test]
fn test_time_series_fits_daily_sales() {
    let schema = analyze(DAILY_SALES);
    let catalog = builtin();
    let result = check_compatibility(catalog.get(Archetype::TimeSeries).unwrap(), &schema);

    assert!(result.compatible);
    assert_eq!(result.score, 100);
    assert!(result.reasons.is_empty());
}

#[test]
fn test_missing_location_names() {
    let schema = analyze(DAILY_SALES);
    let catalog = builtin();
    let result = check_compatibility(catalog.get(Archetype::GeoSpatial).unwrap(), &schema);

    // One failed check of 40 leaves exactly the threshold.
    assert_eq!(result.score, COMPATIBILITY_THRESHOLD);
    assert!(result.compatible);
    assert_eq!(
        result.reasons,
        vec!["Geo-spatial visualization requires location-related columns"]
    );
}

#[test]
fn test_location_names_satisfy_geo() {
    let schema = analyze(
        "CREATE TABLE stores (id INTEGER PRIMARY KEY, address TEXT, lat REAL, lon REAL);
         INSERT INTO stores (address, lat, lon) VALUES ('1 Main St', 37.5, 127.0);",
    );
    let catalog = builtin();
    let result = check_compatibility(catalog.get(Archetype::GeoSpatial).unwrap(), &schema);
    assert_eq!(result.score, 100);
}

#[test]
fn test_deductions_accumulate_in_order() {
    let schema = analyze(
        "CREATE TABLE notes (id INTEGER PRIMARY KEY, body TEXT);
         INSERT INTO notes (body) VALUES ('first note'), ('second note');",
    );
    let catalog = builtin();
    let result = check_compatibility(catalog.get(Archetype::GanttChart).unwrap(), &schema);

    assert_eq!(result.score, 30);
    assert!(!result.compatible);
    assert_eq!(
        result.reasons,
        vec![
            "No date column found in schema",
            "Gantt chart requires a start date column",
        ]
    );
}

#[test]
fn test_primary_key_does_not_count_as_numeric() {
    let schema = analyze(
        "CREATE TABLE tags (id INTEGER PRIMARY KEY, label TEXT);
         INSERT INTO tags (label) VALUES ('red'), ('blue');",
    );
    let catalog = builtin();
    let result = check_compatibility(catalog.get(Archetype::KpiDashboard).unwrap(), &schema);

    assert_eq!(result.score, 70);
    assert_eq!(result.reasons, vec!["No numeric column found in schema"]);
}

#[test]
fn test_unsampled_columns_use_declared_types() {
    let db = fixture(
        "CREATE TABLE events (id INTEGER PRIMARY KEY, happened DATE, amount REAL);
         INSERT INTO events (happened, amount) VALUES ('2024-01-01', 10.0);",
    );
    let schema = db.analyze_with(AnalysisSettings {
        sampling_ceiling: 0,
        ..AnalysisSettings::default()
    });
    assert!(!schema.table("events").unwrap().is_sampled());

    let catalog = builtin();
    let result = check_compatibility(catalog.get(Archetype::TimeSeries).unwrap(), &schema);
    assert_eq!(result.score, 100);
}

#[test]
fn test_custom_catalog_penalties() {
    let catalog = ArchetypeCatalog::from_toml_str(
        r#"
        [[archetype]]
        id = "heatmap"
        name = "Heatmap"
        description = "Grid"
        min_tables = 3
        required_categories = ["boolean"]

        [[archetype.checks]]
        type = "column-name"
        contains = ["cell"]
        penalty = 25
        reason = "Needs cell columns"
        "#,
    )
    .unwrap();
    let schema = analyze(SHOP);
    let result = check_compatibility(catalog.get(Archetype::Heatmap).unwrap(), &schema);

    // 50 + 30 + 25 exceeds 100; the score stops at zero.
    assert_eq!(result.score, 0);
    assert_eq!(result.reasons.len(), 3);
    assert_eq!(result.reasons[2], "Needs cell columns");
}

#[test]
fn test_scores_stay_in_range() {
    let catalog = builtin();
    for sql in [DAILY_SALES, SHOP, "CREATE TABLE t (x BLOB);"] {
        let schema = analyze(sql);
        for requirement in catalog.iter() {
            let result = check_compatibility(requirement, &schema);
            assert!(result.score <= 100, "{}", requirement.archetype);
            assert_eq!(result.compatible, result.score >= COMPATIBILITY_THRESHOLD);
        }
    }
}
