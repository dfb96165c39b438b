//! Suggestion aggregation across rules.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use seagrape_core::{CrossSellingRule, Product, ProductId, RuleCondition, RuleTargetCriteria};

use crate::catalog::{CatalogError, CatalogFilter, ProductCatalog};
use crate::conditions;
use crate::criteria;
use crate::error::EngineError;
use crate::metrics::{EngineMetrics, NoopMetrics};

/// Stateless evaluator for cross-selling rules.
///
/// Safe to share and to invoke concurrently: every call computes a fresh
/// suggestion set and touches no shared mutable state. The only injected
/// collaborator is the [`EngineMetrics`] sink.
#[derive(Clone)]
pub struct CrossSellingEngine {
    metrics: Arc<dyn EngineMetrics>,
}

impl Default for CrossSellingEngine {
    fn default() -> Self {
        Self {
            metrics: Arc::new(NoopMetrics),
        }
    }
}

impl CrossSellingEngine {
    /// Create an engine that discards metrics events.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine reporting to the given metrics sink.
    #[must_use]
    pub fn with_metrics(metrics: Arc<dyn EngineMetrics>) -> Self {
        Self { metrics }
    }

    /// True iff `product` satisfies every source condition.
    ///
    /// An empty condition list vacuously matches all products. Malformed
    /// predicates degrade to `false` and are logged; this never panics.
    #[must_use]
    pub fn evaluate_source_conditions(
        &self,
        product: &Product,
        source_conditions: &[RuleCondition],
    ) -> bool {
        conditions::evaluate_conditions(product, source_conditions, self.metrics.as_ref())
    }

    /// Products in `population` satisfying every target criterion.
    ///
    /// The source product is always excluded by identity; results keep the
    /// population's scan order.
    #[must_use]
    pub fn find_matching_products(
        &self,
        source: &Product,
        target_criteria: &[RuleTargetCriteria],
        population: &[Product],
    ) -> Vec<Product> {
        criteria::find_matching_products(
            source,
            target_criteria,
            population,
            self.metrics.as_ref(),
        )
    }

    /// Aggregate suggestions for `product` across all active rules.
    ///
    /// Rules are defensively re-filtered to `active` even when the caller
    /// already did so. Matches union into an identity-keyed set: a product
    /// suggested by several rules appears once, at its first match
    /// position.
    #[must_use]
    pub fn suggest_cross_selling(
        &self,
        product: &Product,
        rules: &[CrossSellingRule],
        population: &[Product],
    ) -> Vec<Product> {
        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();

        for rule in self.matching_rules(product, rules) {
            let matches = self.find_matching_products(product, &rule.target_criteria, population);
            debug!(rule_id = %rule.id, matches = matches.len(), "Rule produced matches");
            union_into(&mut seen, &mut suggestions, matches);
        }

        self.metrics.suggestions_emitted(suggestions.len());
        suggestions
    }

    /// Aggregate suggestions with candidates fetched from a catalog.
    ///
    /// Per-rule catalog queries are dispatched concurrently, then filtered
    /// and unioned in rule order so the result is deterministic for a given
    /// catalog state.
    ///
    /// # Errors
    ///
    /// Any catalog failure fails the whole call; the caller decides whether
    /// to retry, skip, or surface it (see [`crate::CrossSellingService`]
    /// for the per-rule skip policy).
    pub async fn suggest_from_catalog(
        &self,
        product: &Product,
        rules: &[CrossSellingRule],
        catalog: &dyn ProductCatalog,
    ) -> Result<Vec<Product>, EngineError> {
        let matching = self.matching_rules(product, rules);
        let scans = matching
            .iter()
            .map(|rule| self.scan_rule(product, rule, catalog));
        let per_rule = try_join_all(scans).await?;

        let mut seen = HashSet::new();
        let mut suggestions = Vec::new();
        for matches in per_rule {
            union_into(&mut seen, &mut suggestions, matches);
        }

        self.metrics.suggestions_emitted(suggestions.len());
        Ok(suggestions)
    }

    /// Active rules whose source conditions match `product`, in input order.
    pub(crate) fn matching_rules<'a>(
        &self,
        product: &Product,
        rules: &'a [CrossSellingRule],
    ) -> Vec<&'a CrossSellingRule> {
        let mut matching = Vec::new();
        for rule in rules.iter().filter(|rule| rule.active) {
            self.metrics.rule_evaluated();
            if self.evaluate_source_conditions(product, &rule.source_conditions) {
                self.metrics.rule_matched();
                matching.push(rule);
            }
        }
        matching
    }

    /// Run one rule's target scan against the catalog.
    pub(crate) async fn scan_rule(
        &self,
        source: &Product,
        rule: &CrossSellingRule,
        catalog: &dyn ProductCatalog,
    ) -> Result<Vec<Product>, CatalogError> {
        let filter = CatalogFilter::from_criteria(source, &rule.target_criteria);
        let candidates = catalog.search(&filter).await?;
        debug!(
            rule_id = %rule.id,
            candidates = candidates.len(),
            "Scanning catalog candidates"
        );
        Ok(self.find_matching_products(source, &rule.target_criteria, &candidates))
    }
}

/// Append products not yet seen, keyed by identity.
pub(crate) fn union_into(
    seen: &mut HashSet<ProductId>,
    suggestions: &mut Vec<Product>,
    matches: Vec<Product>,
) {
    for product in matches {
        if seen.insert(product.id.clone()) {
            suggestions.push(product);
        }
    }
}
