//! Wire-format compatibility for persisted rule documents.
//!
//! Rule definitions are authored in the admin UI and stored as JSON; these
//! tests pin the camelCase wire shape and the tolerance for documents
//! written by newer versions (unknown operators must not poison a whole
//! rule list).

#![allow(clippy::unwrap_used)]

use seagrape_core::{ConditionOperator, CrossSellingRule, MatchType, RuleValidationError};

const STORED_RULES: &str = r#"[
    {
        "id": "8f5f1f8a-bb9d-4f49-9c55-48a83cd3f89b",
        "name": "Shelving companions",
        "description": "Suggest shelving in a similar size",
        "active": true,
        "sourceConditions": [
            {"field": "category_names", "operator": "contains", "value": "Shelving"},
            {"field": "dimensions", "operator": "matchesDimensions", "value": {"height": 190}}
        ],
        "targetCriteria": [
            {"field": "category_names", "matchType": "contains", "value": "Shelving"},
            {"field": "dimensions", "matchType": "sameDimensions"}
        ],
        "createdAt": "2025-11-02T09:30:00Z",
        "updatedAt": "2025-11-14T16:05:00Z"
    },
    {
        "id": "6a3d9c3e-1a75-4e2e-b9a9-2f1f9f3f2f10",
        "name": "Same maker accessories",
        "active": false,
        "sourceConditions": [
            {"field": "price", "operator": "greaterThanOrEqual", "value": 50}
        ],
        "targetCriteria": [
            {"field": "manufacturer.name", "matchType": "sameProperty"}
        ],
        "createdAt": "2025-12-01T08:00:00Z",
        "updatedAt": "2025-12-01T08:00:00Z"
    }
]"#;

#[test]
fn stored_rule_documents_parse_and_validate() {
    let rules: Vec<CrossSellingRule> = serde_json::from_str(STORED_RULES).unwrap();
    assert_eq!(rules.len(), 2);

    for rule in &rules {
        rule.validate().unwrap();
    }

    assert_eq!(
        rules[0].source_conditions[0].operator,
        ConditionOperator::Contains
    );
    assert_eq!(rules[0].target_criteria[1].match_type, MatchType::SameDimensions);
    assert!(!rules[1].active);
}

#[test]
fn serialization_round_trips_the_wire_shape() {
    let rules: Vec<CrossSellingRule> = serde_json::from_str(STORED_RULES).unwrap();
    let json = serde_json::to_value(&rules).unwrap();

    // camelCase keys on the wire
    let first = json.get(0).unwrap();
    assert!(first.get("sourceConditions").is_some());
    assert!(first.get("targetCriteria").is_some());
    assert!(first.get("createdAt").is_some());

    // Criteria without an authored value omit the key entirely
    let same_dims = first.get("targetCriteria").unwrap().get(1).unwrap();
    assert!(same_dims.get("value").is_none());

    let back: Vec<CrossSellingRule> = serde_json::from_value(json).unwrap();
    assert_eq!(back, rules);
}

#[test]
fn unknown_operator_from_a_newer_writer_is_tolerated_but_invalid() {
    let json = r#"{
        "id": "2c9f9d52-7a94-4f80-bb1b-30b6ad0cb53f",
        "name": "Future rule",
        "active": true,
        "sourceConditions": [
            {"field": "name", "operator": "startsWith", "value": "Cedar"}
        ],
        "targetCriteria": [],
        "createdAt": "2026-01-10T12:00:00Z",
        "updatedAt": "2026-01-10T12:00:00Z"
    }"#;

    // Deserialization must not fail the whole document...
    let rule: CrossSellingRule = serde_json::from_str(json).unwrap();
    assert_eq!(rule.source_conditions[0].operator, ConditionOperator::Unknown);

    // ...but load-time validation flags the rule for the admin UI.
    assert_eq!(
        rule.validate(),
        Err(RuleValidationError::UnknownOperator { index: 0 })
    );
}

#[test]
fn malformed_numeric_condition_is_rejected_at_load_time() {
    let json = r#"{
        "id": "4d1f79a3-9a3a-46f1-8d7e-5a3f0b9a6f77",
        "name": "Premium companions",
        "active": true,
        "sourceConditions": [
            {"field": "price", "operator": "greaterThan", "value": "expensive"}
        ],
        "targetCriteria": [],
        "createdAt": "2026-01-10T12:00:00Z",
        "updatedAt": "2026-01-10T12:00:00Z"
    }"#;

    let rule: CrossSellingRule = serde_json::from_str(json).unwrap();
    assert_eq!(
        rule.validate(),
        Err(RuleValidationError::NonNumericValue {
            index: 0,
            operator: ConditionOperator::GreaterThan,
        })
    );
}
