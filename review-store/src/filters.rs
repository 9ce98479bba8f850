//! Filter construction for corpus lookups.
//!
//! Lookups use a single substring predicate over one payload attribute. The
//! collection has no full-text index on these attributes, so Qdrant evaluates
//! a `Text` match as a plain substring check.

use qdrant_client::qdrant::{
    Condition, FieldCondition, Filter, Match, condition::ConditionOneOf, r#match::MatchValue,
};

/// Builds a filter matching points whose `field` contains `needle`.
pub fn text_contains(field: &str, needle: &str) -> Filter {
    let condition = Condition {
        condition_one_of: Some(ConditionOneOf::Field(FieldCondition {
            key: field.to_string(),
            r#match: Some(Match {
                match_value: Some(MatchValue::Text(needle.to_string())),
            }),
            ..Default::default()
        })),
    };

    Filter {
        must: vec![condition],
        ..Default::default()
    }
}
