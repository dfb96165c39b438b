//! Observability seam for the rule engine.
//!
//! The engine surfaces only booleans and product lists; everything a
//! dashboard or alert needs to know about evaluation happens through this
//! trait. All hooks default to no-ops so implementors opt into the events
//! they care about.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

/// Hooks invoked by the engine during evaluation.
pub trait EngineMetrics: Send + Sync {
    /// An active rule's source conditions were evaluated against a product.
    fn rule_evaluated(&self) {}

    /// A rule's source conditions matched; its target scan will run.
    fn rule_matched(&self) {}

    /// A predicate carried an operator, match type, or value shape the
    /// engine does not recognize and was degraded to a non-match.
    fn unknown_predicate(&self) {}

    /// A suggestion set was produced.
    fn suggestions_emitted(&self, count: usize) {
        let _ = count;
    }
}

/// Discards every event. Default for the pure entry points.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl EngineMetrics for NoopMetrics {}

/// Emits structured `tracing` events for every hook.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetrics;

impl EngineMetrics for TracingMetrics {
    fn rule_evaluated(&self) {
        debug!(counter = "cross_selling.rules_evaluated", "Rule evaluated");
    }

    fn rule_matched(&self) {
        debug!(counter = "cross_selling.rules_matched", "Rule matched");
    }

    fn unknown_predicate(&self) {
        debug!(
            counter = "cross_selling.unknown_predicates",
            "Predicate degraded to non-match"
        );
    }

    fn suggestions_emitted(&self, count: usize) {
        debug!(
            counter = "cross_selling.suggestions_emitted",
            count, "Suggestions emitted"
        );
    }
}

/// Accumulates counts in atomics; inspectable via [`CounterMetrics::snapshot`].
#[derive(Debug, Default)]
pub struct CounterMetrics {
    rules_evaluated: AtomicU64,
    rules_matched: AtomicU64,
    unknown_predicates: AtomicU64,
    suggestions_emitted: AtomicU64,
}

/// Point-in-time view of a [`CounterMetrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Rules whose source conditions were evaluated.
    pub rules_evaluated: u64,
    /// Rules whose source conditions matched.
    pub rules_matched: u64,
    /// Predicates degraded to non-matches.
    pub unknown_predicates: u64,
    /// Total suggestions emitted across invocations.
    pub suggestions_emitted: u64,
}

impl CounterMetrics {
    /// Create a zeroed counter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the current counter values.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rules_evaluated: self.rules_evaluated.load(Ordering::Relaxed),
            rules_matched: self.rules_matched.load(Ordering::Relaxed),
            unknown_predicates: self.unknown_predicates.load(Ordering::Relaxed),
            suggestions_emitted: self.suggestions_emitted.load(Ordering::Relaxed),
        }
    }
}

impl EngineMetrics for CounterMetrics {
    fn rule_evaluated(&self) {
        self.rules_evaluated.fetch_add(1, Ordering::Relaxed);
    }

    fn rule_matched(&self) {
        self.rules_matched.fetch_add(1, Ordering::Relaxed);
    }

    fn unknown_predicate(&self) {
        self.unknown_predicates.fetch_add(1, Ordering::Relaxed);
    }

    fn suggestions_emitted(&self, count: usize) {
        self.suggestions_emitted
            .fetch_add(u64::try_from(count).unwrap_or(u64::MAX), Ordering::Relaxed);
    }
}
