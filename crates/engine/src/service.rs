//! Orchestration over a rule store and a product catalog.
//!
//! This is the boundary HTTP handlers call into. It owns the policies the
//! pure engine deliberately does not: which rules load, what happens when a
//! single rule's catalog scan fails, and request-level logging.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use seagrape_core::Product;

use crate::catalog::ProductCatalog;
use crate::engine::{CrossSellingEngine, union_into};
use crate::error::SuggestError;
use crate::store::RuleStore;

/// Cross-selling suggestion service.
#[derive(Clone)]
pub struct CrossSellingService {
    rules: Arc<dyn RuleStore>,
    catalog: Arc<dyn ProductCatalog>,
    engine: CrossSellingEngine,
}

impl CrossSellingService {
    /// Create a service with a metrics-less engine.
    #[must_use]
    pub fn new(rules: Arc<dyn RuleStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self::with_engine(rules, catalog, CrossSellingEngine::new())
    }

    /// Create a service around a pre-configured engine.
    #[must_use]
    pub fn with_engine(
        rules: Arc<dyn RuleStore>,
        catalog: Arc<dyn ProductCatalog>,
        engine: CrossSellingEngine,
    ) -> Self {
        Self {
            rules,
            catalog,
            engine,
        }
    }

    /// Compute cross-selling suggestions for `product`.
    ///
    /// Loads the active rules, scans the catalog per matching rule
    /// (concurrently), and unions the results. A rule whose catalog scan
    /// fails contributes zero suggestions and is logged; the request still
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Fails only when the rules themselves cannot be loaded.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn suggestions_for(&self, product: &Product) -> Result<Vec<Product>, SuggestError> {
        let rules = self.rules.active_rules().await?;
        debug!(rule_count = rules.len(), "Loaded active cross-selling rules");

        for rule in &rules {
            if let Err(error) = rule.validate() {
                // Evaluation degrades malformed predicates to non-matches,
                // so the rule still runs; surface the authoring problem.
                warn!(rule_id = %rule.id, %error, "Active rule failed validation");
            }
        }

        let matching = self.engine.matching_rules(product, &rules);
        let scans = matching.iter().map(|rule| async move {
            let outcome = self
                .engine
                .scan_rule(product, rule, self.catalog.as_ref())
                .await;
            (*rule, outcome)
        });

        let mut seen = std::collections::HashSet::new();
        let mut suggestions = Vec::new();
        for (rule, outcome) in join_all(scans).await {
            match outcome {
                Ok(matches) => union_into(&mut seen, &mut suggestions, matches),
                Err(error) => {
                    warn!(
                        rule_id = %rule.id,
                        %error,
                        "Skipping rule contribution after catalog failure"
                    );
                }
            }
        }

        info!(
            suggestions = suggestions.len(),
            "Cross-selling suggestions computed"
        );
        Ok(suggestions)
    }
}
