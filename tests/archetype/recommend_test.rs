#[path = "../common/mod.rs"]
mod common;

use common::{analyze, DAILY_SALES, SHOP};
use vibecraft::archetype::{heuristic_score, recommend, Archetype, ArchetypeCatalog, Recommendation};
use vibecraft::schema::SchemaDescription;

fn ranking(schema: &SchemaDescription) -> Vec<Recommendation> {
    recommend(schema, &ArchetypeCatalog::builtin().unwrap())
}

fn score_of(ranked: &[Recommendation], archetype: Archetype) -> u32 {
    ranked
        .iter()
        .find(|r| r.archetype == archetype)
        .map(|r| r.score)
        .unwrap()
}

#[test]
fn test_date_and_numeric_favor_time_series() {
    let ranked = ranking(&analyze(DAILY_SALES));

    assert_eq!(ranked[0].archetype, Archetype::TimeSeries);
    assert_eq!(ranked[0].score, 90);
    // Neither gantt nor network graph needs a date plus a measure.
    assert!(ranked[0].score > score_of(&ranked, Archetype::GanttChart));
    assert!(ranked[0].score > score_of(&ranked, Archetype::NetworkGraph));
    // 'region' reads as a place name.
    assert_eq!(score_of(&ranked, Archetype::GeoSpatial), 60);
}

#[test]
fn test_ranking_is_sorted_and_complete() {
    let ranked = ranking(&analyze(SHOP));
    assert_eq!(ranked.len(), Archetype::ALL.len());
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_related_tables_suggest_comparison() {
    let ranked = ranking(&analyze(SHOP));
    let top: Vec<_> = ranked.iter().take(3).map(|r| (r.archetype, r.score)).collect();
    assert_eq!(
        top,
        vec![
            (Archetype::TimeSeries, 90),
            (Archetype::Comparison, 70),
            (Archetype::GeoSpatial, 60),
        ]
    );
}

#[test]
fn test_many_measures_suggest_kpi() {
    let schema = analyze(
        "CREATE TABLE kpis (id INTEGER PRIMARY KEY, revenue REAL, quantity INTEGER, conversion_rate REAL);
         WITH RECURSIVE s(n) AS (SELECT 0 UNION ALL SELECT n + 1 FROM s WHERE n < 19)
         INSERT INTO kpis (revenue, quantity, conversion_rate)
         SELECT 500 + n * 11.5, n + 3, n * 0.05 FROM s;",
    );
    assert_eq!(heuristic_score(Archetype::KpiDashboard, &schema), 85);
    assert_eq!(heuristic_score(Archetype::TimeSeries, &schema), 0);
    assert_eq!(ranking(&schema)[0].archetype, Archetype::KpiDashboard);
}

#[test]
fn test_coordinates_beat_place_names() {
    let coordinates = analyze(
        "CREATE TABLE stops (id INTEGER PRIMARY KEY, lat REAL, lng REAL);
         INSERT INTO stops (lat, lng) VALUES (37.5, 127.0), (35.1, 129.0);",
    );
    let places = analyze(
        "CREATE TABLE venues (id INTEGER PRIMARY KEY, city TEXT);
         INSERT INTO venues (city) VALUES ('Seoul'), ('Busan');",
    );
    assert_eq!(heuristic_score(Archetype::GeoSpatial, &coordinates), 80);
    assert_eq!(heuristic_score(Archetype::GeoSpatial, &places), 60);
}

#[test]
fn test_self_reference_suggests_network() {
    let schema = analyze(
        "CREATE TABLE employees (
             id INTEGER PRIMARY KEY,
             name TEXT,
             manager_id INTEGER REFERENCES employees(id)
         );
         INSERT INTO employees VALUES (1, 'Ada', NULL), (2, 'Grace', 1);",
    );
    assert_eq!(heuristic_score(Archetype::NetworkGraph, &schema), 50);
}

#[test]
fn test_link_names_suggest_network() {
    let schema = analyze(
        "CREATE TABLE edges (source TEXT, target TEXT, weight REAL);
         INSERT INTO edges VALUES ('a', 'b', 1.0), ('b', 'c', 2.0);",
    );
    assert_eq!(heuristic_score(Archetype::NetworkGraph, &schema), 50);
}

#[test]
fn test_ties_follow_catalog_order() {
    let schema = analyze(
        "CREATE TABLE notes (body TEXT);
         INSERT INTO notes VALUES ('first note'), ('second note');",
    );
    let ranked = ranking(&schema);

    assert!(ranked.iter().all(|r| r.score == 0));
    let order: Vec<_> = ranked.iter().map(|r| r.archetype).collect();
    assert_eq!(order, Archetype::ALL.to_vec());
}

#[test]
fn test_only_enabled_archetypes_are_ranked() {
    let catalog = ArchetypeCatalog::builtin()
        .unwrap()
        .restricted_to(&[Archetype::Heatmap, Archetype::TimeSeries]);
    let ranked = recommend(&analyze(SHOP), &catalog);

    let order: Vec<_> = ranked.iter().map(|r| r.archetype).collect();
    assert_eq!(order, vec![Archetype::TimeSeries, Archetype::Heatmap]);
}

#[test]
fn test_scores_stay_in_range() {
    let fixtures = [
        DAILY_SALES,
        SHOP,
        "CREATE TABLE empty (x);",
        "CREATE TABLE t (a TEXT, b TEXT, v REAL, source TEXT, start_date TEXT, end_date TEXT);
         INSERT INTO t VALUES ('x', 'y', 1.0, 'n', '2024-01-01', '2024-01-02');",
    ];
    for sql in fixtures {
        let schema = analyze(sql);
        for archetype in Archetype::ALL {
            assert!(heuristic_score(archetype, &schema) <= 100, "{}", archetype);
        }
    }
}
