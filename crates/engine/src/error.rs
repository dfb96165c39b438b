//! Error types for engine entry points.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::store::RuleStoreError;

/// Failure of a catalog-backed suggestion run.
///
/// Predicate-level problems never surface here - they degrade to
/// non-matches. Only the product population source can fail a run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The product population source failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Failure of a [`crate::CrossSellingService`] request.
///
/// Catalog failures are handled per rule inside the service (a failing rule
/// contributes zero suggestions); only rule loading fails the request.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// The rule store failed.
    #[error("Rule store error: {0}")]
    RuleStore(#[from] RuleStoreError),
}
