use proptest::prelude::*;
use vibecraft::inference::{classify, score_candidates, InferenceInput, SemanticKind};
use vibecraft::schema::SqlValue;

fn sql_value() -> impl Strategy<Value = SqlValue> {
    prop_oneof![
        Just(SqlValue::Null),
        any::<i64>().prop_map(SqlValue::Integer),
        any::<f64>().prop_map(SqlValue::Real),
        ".{0,24}".prop_map(SqlValue::Text),
        "[0-9]{4}-[0-9]{2}-[0-9]{2}".prop_map(SqlValue::Text),
        "[$€]?[0-9,]{1,7}(\\.[0-9]{2})?%?".prop_map(SqlValue::Text),
        proptest::collection::vec(any::<u8>(), 0..8).prop_map(SqlValue::Blob),
    ]
}

fn declared_type() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(""),
        Just("TEXT"),
        Just("INTEGER"),
        Just("REAL"),
        Just("BOOLEAN"),
        Just("DATETIME"),
        Just("JSON"),
    ]
}

proptest! {
    #[test]
    fn test_confidence_is_bounded(
        values in proptest::collection::vec(sql_value(), 0..40),
        declared in declared_type(),
    ) {
        let c = classify(&InferenceInput::new(declared, &values));
        prop_assert!((0.0..=1.0).contains(&c.confidence()));
        prop_assert_eq!(c.format().is_some(), c.kind().is_temporal());
    }

    #[test]
    fn test_candidate_scores_are_bounded(
        values in proptest::collection::vec(sql_value(), 0..40),
        declared in declared_type(),
    ) {
        for candidate in score_candidates(&InferenceInput::new(declared, &values)) {
            prop_assert!((0.0..=1.0).contains(&candidate.score));
        }
    }

    #[test]
    fn test_all_null_is_unknown(len in 0usize..20) {
        let values = vec![SqlValue::Null; len];
        let c = classify(&InferenceInput::new("TEXT", &values));
        prop_assert_eq!(c.kind(), SemanticKind::Unknown);
        prop_assert_eq!(c.confidence(), 0.0);
    }

    #[test]
    fn test_classification_is_deterministic(
        values in proptest::collection::vec(sql_value(), 1..20),
    ) {
        let input = InferenceInput::new("", &values);
        prop_assert_eq!(classify(&input), classify(&input));
    }
}
