//! Shared builders for unit tests.

use chrono::Utc;
use rust_decimal::Decimal;
use seagrape_core::{
    ConditionOperator, ConditionValue, CrossSellingRule, Dimensions, FieldValue, Manufacturer,
    MatchType, Product, ProductId, RuleCondition, RuleId, RuleTargetCriteria,
};

/// A purchasable product with sensible defaults for tests.
pub(crate) fn product(id: &str, name: &str, categories: &[&str]) -> Product {
    Product {
        id: ProductId::new(id),
        product_number: format!("SG-{id}"),
        name: name.to_string(),
        price: Decimal::new(2500, 2),
        net_price: Decimal::new(2101, 2),
        stock: 10,
        available: true,
        dimensions: None,
        category_names: categories.iter().map(ToString::to_string).collect(),
        manufacturer: Some(Manufacturer {
            name: "Grove Works".to_string(),
        }),
        custom_fields: std::collections::HashMap::new(),
    }
}

pub(crate) fn with_dimensions(mut product: Product, width: f64, height: f64) -> Product {
    product.dimensions = Some(Dimensions {
        width: Some(width),
        height: Some(height),
        length: None,
        unit: Some("cm".to_string()),
    });
    product
}

pub(crate) fn condition(field: &str, operator: ConditionOperator, value: FieldValue) -> RuleCondition {
    RuleCondition {
        field: field.to_string(),
        operator,
        value: ConditionValue::Value(value),
    }
}

pub(crate) fn criterion(
    field: &str,
    match_type: MatchType,
    value: Option<FieldValue>,
) -> RuleTargetCriteria {
    RuleTargetCriteria {
        field: field.to_string(),
        match_type,
        value: value.map(ConditionValue::Value),
    }
}

pub(crate) fn rule(
    name: &str,
    source_conditions: Vec<RuleCondition>,
    target_criteria: Vec<RuleTargetCriteria>,
) -> CrossSellingRule {
    CrossSellingRule {
        id: RuleId::generate(),
        name: name.to_string(),
        description: None,
        active: true,
        source_conditions,
        target_criteria,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
