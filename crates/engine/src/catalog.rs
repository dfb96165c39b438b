//! Product population provider.
//!
//! The engine does not own a transport; it only needs to iterate candidate
//! products. Callers either hand it a pre-fetched list or a
//! [`ProductCatalog`] capability, which the platform proxy layer implements
//! against the admin API.

use async_trait::async_trait;
use thiserror::Error;

use seagrape_core::{ConditionValue, FieldValue, MatchType, Product, RuleTargetCriteria};

/// Why a catalog query failed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing product source reported an error.
    #[error("Catalog backend error: {0}")]
    Backend(String),

    /// The backing product source could not be reached.
    #[error("Catalog unavailable")]
    Unavailable,
}

/// Simple narrowing filters for a catalog query.
///
/// A filter only ever narrows the candidate set towards products that could
/// still match; every candidate it returns is re-checked against the full
/// criteria list, so an empty filter (match everything) is always correct.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Keep products carrying this category name.
    pub category: Option<String>,
    /// Keep products from this manufacturer.
    pub manufacturer: Option<String>,
    /// Keep products with this availability.
    pub available: Option<bool>,
    /// Cap the number of returned candidates.
    pub limit: Option<usize>,
}

impl CatalogFilter {
    /// Derive a narrowing filter from a rule's target criteria.
    ///
    /// Only criteria whose semantics reduce to one of the supported filters
    /// contribute; everything else is left to the in-memory criterion scan.
    /// `contains` on `manufacturer.name` is deliberately not mapped - it is
    /// a substring test, which an equality filter would over-narrow.
    #[must_use]
    pub fn from_criteria(source: &Product, criteria: &[RuleTargetCriteria]) -> Self {
        let mut filter = Self::default();

        for criterion in criteria {
            let authored = criterion.value.as_ref().and_then(ConditionValue::as_value);
            match (criterion.match_type, criterion.field.as_str()) {
                // Membership of one category name, for both exact and contains
                (MatchType::Exact | MatchType::Contains, "category_names") => {
                    if let Some(FieldValue::Str(name)) = authored {
                        filter.category = Some(name.clone());
                    }
                }
                (MatchType::Exact, "manufacturer.name") => {
                    if let Some(FieldValue::Str(name)) = authored {
                        filter.manufacturer = Some(name.clone());
                    }
                }
                (MatchType::SameProperty, "manufacturer.name") => {
                    filter.manufacturer =
                        source.manufacturer.as_ref().map(|m| m.name.clone());
                }
                (MatchType::Exact, "available") => {
                    if let Some(FieldValue::Bool(available)) = authored {
                        filter.available = Some(*available);
                    }
                }
                (MatchType::SameProperty, "available") => {
                    filter.available = Some(source.available);
                }
                _ => {}
            }
        }

        filter
    }

    /// Whether a product passes every set filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !product.category_names.iter().any(|name| name == category) {
                return false;
            }
        }
        if let Some(manufacturer) = &self.manufacturer {
            if product
                .manufacturer
                .as_ref()
                .is_none_or(|m| &m.name != manufacturer)
            {
                return false;
            }
        }
        if let Some(available) = self.available {
            if product.available != available {
                return false;
            }
        }
        true
    }
}

/// A searchable source of candidate products.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch candidate products, narrowed by `filter`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the backing source fails; the engine
    /// propagates it unchanged.
    async fn search(&self, filter: &CatalogFilter) -> Result<Vec<Product>, CatalogError>;
}

/// Catalog backed by a pre-fetched product list.
///
/// Used by tests and by callers that already hold the full population.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Wrap a pre-fetched product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn search(&self, filter: &CatalogFilter) -> Result<Vec<Product>, CatalogError> {
        let mut results: Vec<Product> = self
            .products
            .iter()
            .filter(|product| filter.matches(product))
            .cloned()
            .collect();
        if let Some(limit) = filter.limit {
            results.truncate(limit);
        }
        Ok(results)
    }
}
