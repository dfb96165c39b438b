//! Rule store seam.
//!
//! Rule persistence lives outside the engine; the admin panel's repository
//! layer implements this trait. The engine only ever reads rules.

use async_trait::async_trait;
use thiserror::Error;

use seagrape_core::CrossSellingRule;

/// Why loading rules failed.
#[derive(Debug, Error)]
pub enum RuleStoreError {
    /// The backing store reported an error.
    #[error("Rule store backend error: {0}")]
    Backend(String),
}

/// A read-only source of cross-selling rules.
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Every persisted rule, active or not.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleStoreError`] when the backing store fails.
    async fn all_rules(&self) -> Result<Vec<CrossSellingRule>, RuleStoreError>;

    /// Rules participating in evaluation.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleStoreError`] when the backing store fails.
    async fn active_rules(&self) -> Result<Vec<CrossSellingRule>, RuleStoreError> {
        Ok(self
            .all_rules()
            .await?
            .into_iter()
            .filter(|rule| rule.active)
            .collect())
    }
}

/// Rule store backed by an in-memory list. Used by tests and seeding.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRuleStore {
    rules: Vec<CrossSellingRule>,
}

impl InMemoryRuleStore {
    /// Wrap a list of rules.
    #[must_use]
    pub const fn new(rules: Vec<CrossSellingRule>) -> Self {
        Self { rules }
    }
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    async fn all_rules(&self) -> Result<Vec<CrossSellingRule>, RuleStoreError> {
        Ok(self.rules.clone())
    }
}
