//! Target-side criterion evaluation: should a candidate be suggested?

use tracing::warn;

use seagrape_core::{ConditionValue, FieldValue, MatchType, Product, RuleTargetCriteria};

use crate::compare::{loose_contains, loose_eq, share_close_dimension};
use crate::metrics::EngineMetrics;

/// Scan `population` for candidates satisfying every criterion.
///
/// The source product itself is always excluded, and results keep the
/// population's scan order.
pub(crate) fn find_matching_products(
    source: &Product,
    criteria: &[RuleTargetCriteria],
    population: &[Product],
    metrics: &dyn EngineMetrics,
) -> Vec<Product> {
    population
        .iter()
        .filter(|candidate| candidate.id != source.id)
        .filter(|candidate| matches_all_criteria(source, candidate, criteria, metrics))
        .cloned()
        .collect()
}

pub(crate) fn matches_all_criteria(
    source: &Product,
    candidate: &Product,
    criteria: &[RuleTargetCriteria],
    metrics: &dyn EngineMetrics,
) -> bool {
    criteria
        .iter()
        .all(|criterion| matches_criterion(source, candidate, criterion, metrics))
}

fn matches_criterion(
    source: &Product,
    candidate: &Product,
    criterion: &RuleTargetCriteria,
    metrics: &dyn EngineMetrics,
) -> bool {
    match criterion.match_type {
        MatchType::Exact => match (
            candidate.field(&criterion.field),
            authored_value(criterion, metrics),
        ) {
            (Some(field), Some(target)) => loose_eq(&field, target),
            _ => false,
        },
        MatchType::Contains => match (
            candidate.field(&criterion.field),
            authored_value(criterion, metrics),
        ) {
            (Some(field), Some(target)) => loose_contains(&field, target),
            _ => false,
        },
        MatchType::SameDimensions => match (&source.dimensions, &candidate.dimensions) {
            (Some(a), Some(b)) => share_close_dimension(a, b),
            _ => false,
        },
        // Ignores any authored value; the source product is the target
        MatchType::SameProperty => match (
            source.field(&criterion.field),
            candidate.field(&criterion.field),
        ) {
            (Some(source_value), Some(candidate_value)) => {
                loose_eq(&candidate_value, &source_value)
            }
            _ => false,
        },
        MatchType::Unknown => {
            warn!(
                field = %criterion.field,
                "Skipping criterion with unrecognized match type"
            );
            metrics.unknown_predicate();
            false
        }
    }
}

fn authored_value<'a>(
    criterion: &'a RuleTargetCriteria,
    metrics: &dyn EngineMetrics,
) -> Option<&'a FieldValue> {
    let value = criterion.value.as_ref().and_then(ConditionValue::as_value);
    if value.is_none() {
        warn!(
            field = %criterion.field,
            match_type = %criterion.match_type,
            "Criterion is missing a comparison value"
        );
        metrics.unknown_predicate();
    }
    value
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::metrics::{CounterMetrics, NoopMetrics};
    use crate::testutil::{criterion, product, with_dimensions};

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_source_product_is_excluded() {
        let source = product("p-1", "Cedar Shelf", &["Shelving"]);
        let population = vec![
            source.clone(),
            product("p-2", "Pine Shelf", &["Shelving"]),
        ];
        let matches = find_matching_products(
            &source,
            &[criterion(
                "category_names",
                MatchType::Contains,
                Some(FieldValue::from("Shelving")),
            )],
            &population,
            &NoopMetrics,
        );
        assert_eq!(ids(&matches), vec!["p-2"]);
    }

    #[test]
    fn test_empty_criteria_match_every_other_product() {
        let source = product("p-1", "Cedar Shelf", &["Shelving"]);
        let population = vec![
            source.clone(),
            product("p-2", "Pine Shelf", &["Shelving"]),
            product("p-3", "Desk Lamp", &["Lighting"]),
        ];
        let matches = find_matching_products(&source, &[], &population, &NoopMetrics);
        assert_eq!(ids(&matches), vec!["p-2", "p-3"]);
    }

    #[test]
    fn test_criteria_combine_with_and_and_keep_scan_order() {
        let source = product("p-1", "Cedar Shelf", &["Shelving"]);
        let mut lamp = product("p-2", "Shelf Lamp", &["Lighting"]);
        lamp.manufacturer = None;
        let population = vec![
            product("p-4", "Wall Shelf", &["Shelving"]),
            lamp,
            product("p-3", "Pine Shelf", &["Shelving"]),
        ];
        let matches = find_matching_products(
            &source,
            &[
                criterion(
                    "category_names",
                    MatchType::Contains,
                    Some(FieldValue::from("Shelving")),
                ),
                criterion("manufacturer.name", MatchType::SameProperty, None),
            ],
            &population,
            &NoopMetrics,
        );
        assert_eq!(ids(&matches), vec!["p-4", "p-3"]);
    }

    #[test]
    fn test_exact_match_on_candidate_field() {
        let source = product("p-1", "Cedar Shelf", &["Shelving"]);
        let candidate = product("p-2", "Pine Shelf", &["Shelving"]);
        assert!(matches_all_criteria(
            &source,
            &candidate,
            &[criterion(
                "name",
                MatchType::Exact,
                Some(FieldValue::from("Pine Shelf")),
            )],
            &NoopMetrics,
        ));
    }

    #[test]
    fn test_same_dimensions_needs_one_close_axis() {
        let source = with_dimensions(product("p-1", "Cedar Shelf", &["Shelving"]), 80.0, 190.0);
        let close = with_dimensions(product("p-2", "Pine Shelf", &["Shelving"]), 120.0, 200.0);
        let far = with_dimensions(product("p-3", "Side Table", &["Tables"]), 120.0, 45.0);
        let missing = product("p-4", "Desk Lamp", &["Lighting"]);

        let same_dims = [criterion("dimensions", MatchType::SameDimensions, None)];
        assert!(matches_all_criteria(&source, &close, &same_dims, &NoopMetrics));
        assert!(!matches_all_criteria(&source, &far, &same_dims, &NoopMetrics));
        assert!(!matches_all_criteria(&source, &missing, &same_dims, &NoopMetrics));
    }

    #[test]
    fn test_same_property_compares_source_and_candidate() {
        let source = product("p-1", "Cedar Shelf", &["Shelving"]);
        let mut other_maker = product("p-2", "Pine Shelf", &["Shelving"]);
        other_maker.manufacturer = Some(seagrape_core::Manufacturer {
            name: "Driftwood Co".to_string(),
        });

        let same_maker = [criterion("manufacturer.name", MatchType::SameProperty, None)];
        assert!(!matches_all_criteria(
            &source,
            &other_maker,
            &same_maker,
            &NoopMetrics
        ));
        assert!(matches_all_criteria(
            &source,
            &product("p-3", "Oak Shelf", &["Shelving"]),
            &same_maker,
            &NoopMetrics
        ));
    }

    #[test]
    fn test_same_property_with_field_absent_on_either_side_is_false() {
        let mut source = product("p-1", "Cedar Shelf", &["Shelving"]);
        source.manufacturer = None;
        let candidate = product("p-2", "Pine Shelf", &["Shelving"]);
        assert!(!matches_all_criteria(
            &source,
            &candidate,
            &[criterion("manufacturer.name", MatchType::SameProperty, None)],
            &NoopMetrics,
        ));
    }

    #[test]
    fn test_unknown_match_type_is_counted_and_false() {
        let source = product("p-1", "Cedar Shelf", &["Shelving"]);
        let candidate = product("p-2", "Pine Shelf", &["Shelving"]);
        let metrics = CounterMetrics::new();
        assert!(!matches_all_criteria(
            &source,
            &candidate,
            &[criterion("name", MatchType::Unknown, None)],
            &metrics,
        ));
        assert_eq!(metrics.snapshot().unknown_predicates, 1);
    }

    #[test]
    fn test_exact_without_authored_value_is_false() {
        let source = product("p-1", "Cedar Shelf", &["Shelving"]);
        let candidate = product("p-2", "Pine Shelf", &["Shelving"]);
        let metrics = CounterMetrics::new();
        assert!(!matches_all_criteria(
            &source,
            &candidate,
            &[criterion("name", MatchType::Exact, None)],
            &metrics,
        ));
        assert_eq!(metrics.snapshot().unknown_predicates, 1);
    }
}
