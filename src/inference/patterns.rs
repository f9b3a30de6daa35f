//! Value pattern table for semantic type scoring.
//!
//! All value-shape regular expressions live here, keyed by the semantic kind
//! they provide evidence for. Within a kind the list is ordered: when a
//! temporal kind wins, the first pattern in its list that matches any value
//! names the detected format.

use std::sync::LazyLock;

use regex::Regex;

use super::types::SemanticKind;

/// One entry of the pattern table.
#[derive(Debug)]
pub struct ValuePattern {
    /// Format string reported when this pattern decides a temporal format.
    pub format: Option<&'static str>,
    pub regex: Regex,
}

impl ValuePattern {
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

type PatternSource = (Option<&'static str>, &'static str);

/// Declarative source of the table: kind → ordered (format, regex) list.
const SOURCE: &[(SemanticKind, &[PatternSource])] = &[
    (
        SemanticKind::DateTime,
        &[
            (
                Some("YYYY-MM-DD HH:mm:ss"),
                r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[T ][0-9]{2}:[0-9]{2}:[0-9]{2}",
            ),
            (
                Some("MM/DD/YYYY HH:mm"),
                r"^[0-9]{2}/[0-9]{2}/[0-9]{4} [0-9]{2}:[0-9]{2}",
            ),
            (
                Some("YYYY년 MM월 DD일 HH:mm"),
                r"^[0-9]{4}년 [0-9]{1,2}월 [0-9]{1,2}일 [0-9]{1,2}:[0-9]{2}",
            ),
        ],
    ),
    (
        SemanticKind::Date,
        &[
            (Some("YYYY-MM-DD"), r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$"),
            (Some("MM/DD/YYYY"), r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$"),
            (Some("YYYYMMDD"), r"^[0-9]{8}$"),
            (Some("YYYY년 MM월 DD일"), r"^[0-9]{4}년 [0-9]{1,2}월 [0-9]{1,2}일$"),
        ],
    ),
    (
        SemanticKind::Time,
        &[
            (Some("HH:mm:ss"), r"^[0-9]{2}:[0-9]{2}:[0-9]{2}$"),
            (Some("HH:mm"), r"^[0-9]{2}:[0-9]{2}$"),
            (Some("HH시 mm분"), r"^[0-9]{1,2}시 [0-9]{1,2}분$"),
        ],
    ),
    (
        SemanticKind::Currency,
        &[
            (None, r"^[$₩￥¥€£]\s*-?[0-9,]+(\.[0-9]{2})?$"),
            (None, r"^-?[0-9,]+(\.[0-9]{2})?\s*([$€£]|원|USD|EUR|KRW)$"),
            (None, r"^-?[0-9,]+\.[0-9]{2}$"),
        ],
    ),
    (SemanticKind::Percentage, &[(None, r"%$")]),
    (SemanticKind::Number, &[(None, r"^-?[0-9]+(\.[0-9]+)?$")]),
    (SemanticKind::Email, &[(None, r"^[^\s@]+@[^\s@]+\.[^\s@]+$")]),
    (
        SemanticKind::Url,
        &[(
            None,
            r"^(https?://)?([0-9a-z.-]+)\.([a-z.]{2,6})([/A-Za-z0-9_ .-]*)/?$",
        )],
    ),
    (
        SemanticKind::Phone,
        &[
            (None, r"^(\+[0-9]{1,3}[- ]?)?[0-9]{10}$"),
            (None, r"^[0-9]{3}-[0-9]{3,4}-[0-9]{4}$"),
            (None, r"^0[0-9]{1,2}-[0-9]{3,4}-[0-9]{4}$"),
        ],
    ),
];

/// Literal spellings accepted as booleans (compared case-insensitively).
pub const BOOLEAN_LITERALS: &[&str] = &["true", "false", "0", "1", "yes", "no", "y", "n", "t", "f"];

static TABLE: LazyLock<Vec<(SemanticKind, Vec<ValuePattern>)>> = LazyLock::new(|| {
    SOURCE
        .iter()
        .map(|(kind, patterns)| {
            let compiled = patterns
                .iter()
                .map(|(format, source)| ValuePattern {
                    format: *format,
                    regex: Regex::new(source).unwrap(),
                })
                .collect();
            (*kind, compiled)
        })
        .collect()
});

/// Ordered patterns for `kind`. Kinds scored without patterns get an empty
/// slice.
pub fn patterns_for(kind: SemanticKind) -> &'static [ValuePattern] {
    TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, patterns)| patterns.as_slice())
        .unwrap_or(&[])
}

/// Whether any pattern registered for `kind` matches `value`.
pub fn matches_kind(kind: SemanticKind, value: &str) -> bool {
    patterns_for(kind).iter().any(|p| p.is_match(value))
}
