//! Core types for Seagrape.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod field;
pub mod id;
pub mod product;
pub mod rule;

pub use field::FieldValue;
pub use id::*;
pub use product::{Dimensions, Manufacturer, Product};
pub use rule::{
    ConditionOperator, ConditionValue, CrossSellingRule, DimensionSpec, MatchType, RuleCondition,
    RuleTargetCriteria, RuleValidationError,
};
