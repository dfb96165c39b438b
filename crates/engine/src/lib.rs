//! Seagrape Engine - cross-selling rule evaluation.
//!
//! Given a source product and a set of user-authored rules, the engine
//! decides which other catalog products should be suggested as
//! complementary items. Evaluation is pure and stateless: rules come from a
//! [`RuleStore`], candidate products from a materialized list or a
//! [`ProductCatalog`], and every invocation produces a fresh suggestion
//! set.
//!
//! # Entry points
//!
//! - [`CrossSellingEngine::evaluate_source_conditions`] - does a rule apply
//!   to this product?
//! - [`CrossSellingEngine::find_matching_products`] - which candidates
//!   satisfy a rule's target criteria?
//! - [`CrossSellingEngine::suggest_cross_selling`] /
//!   [`CrossSellingEngine::suggest_from_catalog`] - aggregate suggestions
//!   across all active rules, deduplicated by product identity.
//! - [`CrossSellingService`] - orchestration over a rule store and catalog,
//!   with a per-rule failure boundary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod service;
pub mod store;

mod compare;
mod conditions;
mod criteria;

#[cfg(test)]
pub(crate) mod testutil;

pub use catalog::{CatalogError, CatalogFilter, InMemoryCatalog, ProductCatalog};
pub use engine::CrossSellingEngine;
pub use error::{EngineError, SuggestError};
pub use metrics::{CounterMetrics, EngineMetrics, MetricsSnapshot, NoopMetrics, TracingMetrics};
pub use service::CrossSellingService;
pub use store::{InMemoryRuleStore, RuleStore, RuleStoreError};
