use insta::assert_snapshot;
use vibecraft::inference::{
    classify, classify_values, score_candidates, Classification, InferenceInput, SemanticKind,
    TypeCategory, ValueCardinality,
};
use vibecraft::schema::SqlValue;

fn texts(values: &[&str]) -> Vec<SqlValue> {
    values.iter().map(|v| SqlValue::from(*v)).collect()
}

fn kind_of(values: &[&str]) -> SemanticKind {
    classify_values(&texts(values)).kind()
}

#[test]
fn test_datetime() {
    let c = classify_values(&texts(&["2024-01-01 10:00:00", "2024-01-02T11:30:00"]));
    assert_eq!(c.kind(), SemanticKind::DateTime);
    assert_eq!(c.format(), Some("YYYY-MM-DD HH:mm:ss"));
    assert_eq!(c.confidence(), 1.0);
}

#[test]
fn test_iso_date() {
    let c = classify_values(&texts(&["2024-01-01", "2024-02-01", "2024-03-01"]));
    assert_eq!(c.kind(), SemanticKind::Date);
    assert_eq!(c.format(), Some("YYYY-MM-DD"));
    assert_eq!(c.confidence(), 1.0);
}

#[test]
fn test_korean_date() {
    let c = classify_values(&texts(&["2024년 1월 5일", "2024년 12월 25일"]));
    assert_eq!(c.kind(), SemanticKind::Date);
    assert_eq!(c.format(), Some("YYYY년 MM월 DD일"));
}

#[test]
fn test_compact_date_beats_number() {
    // Both score 1.0; date comes first in tie-break order.
    let c = classify_values(&texts(&["20240101", "20240215", "20241231"]));
    assert_eq!(c.kind(), SemanticKind::Date);
    assert_eq!(c.format(), Some("YYYYMMDD"));
}

#[test]
fn test_time() {
    let c = classify_values(&texts(&["09:00", "17:30", "12:15"]));
    assert_eq!(c.kind(), SemanticKind::Time);
    assert_eq!(c.format(), Some("HH:mm"));
}

#[test]
fn test_currency() {
    assert_eq!(kind_of(&["$1,200.00", "$35.50", "$99.99"]), SemanticKind::Currency);
    assert_eq!(kind_of(&["15,000원", "3,500원"]), SemanticKind::Currency);
}

#[test]
fn test_percentage() {
    assert_eq!(kind_of(&["12%", "45.5%", "100%"]), SemanticKind::Percentage);
}

#[test]
fn test_contact_kinds() {
    assert_eq!(kind_of(&["ada@example.com", "grace@example.org"]), SemanticKind::Email);
    assert_eq!(
        kind_of(&["https://example.com", "https://rust-lang.org/learn"]),
        SemanticKind::Url
    );
    assert_eq!(
        kind_of(&["010-1234-5678", "02-123-4567", "010-9876-5432"]),
        SemanticKind::Phone
    );
}

#[test]
fn test_boolean_literals() {
    assert_eq!(kind_of(&["yes", "no", "yes"]), SemanticKind::Boolean);
}

#[test]
fn test_json() {
    assert_eq!(kind_of(&[r#"{"a": 1}"#, "[1, 2, 3]"]), SemanticKind::Json);
}

#[test]
fn test_native_numbers() {
    let values = vec![SqlValue::Real(120.5), SqlValue::Integer(7), SqlValue::Real(3.25)];
    let c = classify(&InferenceInput::new("REAL", &values));
    assert_eq!(c.kind(), SemanticKind::Number);
    assert_eq!(c.category(), Some(TypeCategory::Numeric));
}

#[test]
fn test_free_text() {
    let c = classify_values(&texts(&["a quick note", "another thought", "something else"]));
    assert_eq!(c.kind(), SemanticKind::Text);
    assert_eq!(c.confidence(), 0.5);
}

#[test]
fn test_nulls_are_ignored() {
    let values = vec![
        SqlValue::Null,
        SqlValue::from("2024-05-01"),
        SqlValue::Null,
        SqlValue::from("2024-05-02"),
    ];
    let c = classify_values(&values);
    assert_eq!(c.kind(), SemanticKind::Date);
    assert_eq!(c.confidence(), 1.0);
}

#[test]
fn test_whole_column_cardinality() {
    let values = texts(&["north", "south", "east"]);
    let sample_only = classify(&InferenceInput::new("TEXT", &values));
    assert_eq!(sample_only.kind(), SemanticKind::Text);

    let with_column = classify(
        &InferenceInput::new("TEXT", &values)
            .with_cardinality(ValueCardinality { distinct: 3, total: 60 }),
    );
    assert_eq!(with_column.kind(), SemanticKind::Category);
}

#[test]
fn test_candidates_cover_every_kind_once() {
    let values = texts(&["x"]);
    let scores = score_candidates(&InferenceInput::new("", &values));
    assert_eq!(scores.len(), SemanticKind::CANDIDATES.len() + 1);
    assert_eq!(scores.last().map(|c| c.kind), Some(SemanticKind::Text));
}

#[test]
fn test_classification_json_shape() {
    let c = classify_values(&texts(&["2024-01-01 10:00:00", "2024-01-02 11:30:00"]));
    assert_snapshot!(serde_json::to_string_pretty(&c).unwrap(), @r#"
    {
      "type": "datetime",
      "confidence": 1.0,
      "format": "YYYY-MM-DD HH:mm:ss"
    }
    "#);

    assert_snapshot!(serde_json::to_string(&Classification::Unknown).unwrap(), @r#"{"type":"unknown"}"#);
}
