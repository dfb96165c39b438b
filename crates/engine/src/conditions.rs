//! Source-side condition evaluation: does a rule apply to a product?

use std::cmp::Ordering;

use tracing::warn;

use seagrape_core::{ConditionOperator, ConditionValue, FieldValue, Product, RuleCondition};

use crate::compare::{loose_contains, loose_eq, numeric_cmp, within_spec_tolerance};
use crate::metrics::EngineMetrics;

/// True iff `product` satisfies every condition. An empty list matches any
/// product (AND-of-zero).
pub(crate) fn evaluate_conditions(
    product: &Product,
    conditions: &[RuleCondition],
    metrics: &dyn EngineMetrics,
) -> bool {
    conditions
        .iter()
        .all(|condition| evaluate_condition(product, condition, metrics))
}

/// Evaluate a single condition. Malformed predicates degrade to `false`;
/// this never panics and never errors.
pub(crate) fn evaluate_condition(
    product: &Product,
    condition: &RuleCondition,
    metrics: &dyn EngineMetrics,
) -> bool {
    let field_value = product.field(&condition.field);

    match condition.operator {
        ConditionOperator::Equals => equality_holds(field_value.as_ref(), &condition.value),
        ConditionOperator::NotEquals => !equality_holds(field_value.as_ref(), &condition.value),
        ConditionOperator::Contains => containment_holds(field_value.as_ref(), &condition.value),
        ConditionOperator::NotContains => {
            !containment_holds(field_value.as_ref(), &condition.value)
        }
        ConditionOperator::GreaterThan
        | ConditionOperator::LessThan
        | ConditionOperator::GreaterThanOrEqual
        | ConditionOperator::LessThanOrEqual => {
            ordering_holds(field_value.as_ref(), &condition.value, condition.operator)
        }
        ConditionOperator::MatchesDimensions => {
            let Some(spec) = condition.value.as_dimensions() else {
                warn!(
                    field = %condition.field,
                    "matchesDimensions condition without a dimension target"
                );
                metrics.unknown_predicate();
                return false;
            };
            product
                .dimensions
                .as_ref()
                .is_some_and(|dims| within_spec_tolerance(dims, spec))
        }
        ConditionOperator::Unknown => {
            warn!(
                field = %condition.field,
                "Skipping condition with unrecognized operator"
            );
            metrics.unknown_predicate();
            false
        }
    }
}

fn equality_holds(field: Option<&FieldValue>, target: &ConditionValue) -> bool {
    match (field, target.as_value()) {
        (Some(field), Some(target)) => loose_eq(field, target),
        _ => false,
    }
}

fn containment_holds(field: Option<&FieldValue>, target: &ConditionValue) -> bool {
    match (field, target.as_value()) {
        (Some(field), Some(target)) => loose_contains(field, target),
        _ => false,
    }
}

fn ordering_holds(
    field: Option<&FieldValue>,
    target: &ConditionValue,
    operator: ConditionOperator,
) -> bool {
    let ordering = field
        .zip(target.as_value())
        .and_then(|(field, target)| numeric_cmp(field, target));
    let Some(ordering) = ordering else {
        // Either side failed numeric coercion: not a match, not an error
        return false;
    };
    match operator {
        ConditionOperator::GreaterThan => ordering == Ordering::Greater,
        ConditionOperator::LessThan => ordering == Ordering::Less,
        ConditionOperator::GreaterThanOrEqual => ordering != Ordering::Less,
        ConditionOperator::LessThanOrEqual => ordering != Ordering::Greater,
        _ => false,
    }
}
