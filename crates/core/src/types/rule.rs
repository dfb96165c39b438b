//! Cross-selling rule definition model.
//!
//! Rules are authored in the admin UI and persisted by the rule store; the
//! engine only ever reads them. A rule pairs *source conditions* (which
//! products the rule applies to) with *target criteria* (how to find
//! companion products). Both lists combine with AND.
//!
//! Operators and match types are closed sets on the wire. Unrecognized
//! values deserialize into the `Unknown` catch-all instead of failing the
//! whole payload: [`CrossSellingRule::validate`] rejects them at load time,
//! and the engine degrades them to non-matches at evaluation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::field::FieldValue;
use super::id::RuleId;

/// How a source condition compares a product field against its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOperator {
    /// Value equality, array-aware (see the engine's comparison semantics).
    Equals,
    /// Negation of `Equals`.
    NotEquals,
    /// Membership or case-insensitive substring test.
    Contains,
    /// Negation of `Contains`.
    NotContains,
    /// Numeric `>` after coercion.
    GreaterThan,
    /// Numeric `<` after coercion.
    LessThan,
    /// Numeric `>=` after coercion.
    GreaterThanOrEqual,
    /// Numeric `<=` after coercion.
    LessThanOrEqual,
    /// All dimensions named in the target spec within 5% of the spec value.
    MatchesDimensions,
    /// Catch-all for unrecognized wire values; never matches.
    Unknown,
}

impl ConditionOperator {
    /// Parse a wire name. Unrecognized names become [`Self::Unknown`] so
    /// one forward-written rule cannot poison a stored rule list.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "equals" => Self::Equals,
            "notEquals" => Self::NotEquals,
            "contains" => Self::Contains,
            "notContains" => Self::NotContains,
            "greaterThan" => Self::GreaterThan,
            "lessThan" => Self::LessThan,
            "greaterThanOrEqual" => Self::GreaterThanOrEqual,
            "lessThanOrEqual" => Self::LessThanOrEqual,
            "matchesDimensions" => Self::MatchesDimensions,
            _ => Self::Unknown,
        }
    }

    /// Wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::GreaterThanOrEqual => "greaterThanOrEqual",
            Self::LessThanOrEqual => "lessThanOrEqual",
            Self::MatchesDimensions => "matchesDimensions",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this operator compares numerically.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::GreaterThan | Self::LessThan | Self::GreaterThanOrEqual | Self::LessThanOrEqual
        )
    }
}

impl std::fmt::Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConditionOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConditionOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

/// How a target criterion matches a candidate product, optionally in
/// relation to the source product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Candidate field equals the criterion value.
    Exact,
    /// Candidate field contains the criterion value.
    Contains,
    /// Source and candidate share at least one dimension within 10%.
    SameDimensions,
    /// Candidate field equals the source product's same field.
    SameProperty,
    /// Catch-all for unrecognized wire values; never matches.
    Unknown,
}

impl MatchType {
    /// Parse a wire name. Unrecognized names become [`Self::Unknown`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "exact" => Self::Exact,
            "contains" => Self::Contains,
            "sameDimensions" => Self::SameDimensions,
            "sameProperty" => Self::SameProperty,
            _ => Self::Unknown,
        }
    }

    /// Wire name of the match type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Contains => "contains",
            Self::SameDimensions => "sameDimensions",
            Self::SameProperty => "sameProperty",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MatchType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MatchType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::parse(&name))
    }
}

/// Target shape for `matchesDimensions` conditions.
///
/// Axes absent from the spec are not checked against the product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionSpec {
    /// Target width.
    pub width: Option<f64>,
    /// Target height.
    pub height: Option<f64>,
    /// Target length.
    pub length: Option<f64>,
}

impl DimensionSpec {
    /// Whether the spec names no axis at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.length.is_none()
    }
}

/// The authored comparison value of a condition or criterion.
///
/// Tagged by shape so each evaluator only ever sees the value forms it
/// supports: `matchesDimensions` takes a [`DimensionSpec`], everything else
/// takes a scalar or list [`FieldValue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    /// A dimension target, e.g. `{"height": 100}`.
    Dimensions(DimensionSpec),
    /// A scalar or list value.
    Value(FieldValue),
}

impl ConditionValue {
    /// Borrow the scalar/list value, if this is one.
    #[must_use]
    pub const fn as_value(&self) -> Option<&FieldValue> {
        match self {
            Self::Value(value) => Some(value),
            Self::Dimensions(_) => None,
        }
    }

    /// Borrow the dimension spec, if this is one.
    #[must_use]
    pub const fn as_dimensions(&self) -> Option<&DimensionSpec> {
        match self {
            Self::Dimensions(spec) => Some(spec),
            Self::Value(_) => None,
        }
    }
}

/// A single source-side predicate: does the rule apply to this product?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCondition {
    /// Dotted field path into the product shape, e.g. `dimensions.height`.
    pub field: String,
    /// Comparison operator.
    pub operator: ConditionOperator,
    /// Authored comparison value.
    pub value: ConditionValue,
}

/// A single target-side predicate: should this candidate be suggested?
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTargetCriteria {
    /// Dotted field path into the product shape.
    pub field: String,
    /// How the candidate is matched.
    pub match_type: MatchType,
    /// Authored comparison value. Ignored by `sameDimensions` and
    /// `sameProperty`, which compare against the source product instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConditionValue>,
}

/// A user-authored cross-selling rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossSellingRule {
    /// Rule identity.
    pub id: RuleId,
    /// Merchant-facing rule name.
    pub name: String,
    /// Optional free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inactive rules are skipped by every engine entry point.
    pub active: bool,
    /// ANDed predicates selecting the products the rule applies to.
    pub source_conditions: Vec<RuleCondition>,
    /// ANDed predicates selecting companion products.
    pub target_criteria: Vec<RuleTargetCriteria>,
    /// When the rule was created.
    pub created_at: DateTime<Utc>,
    /// When the rule was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Why a rule failed load-time validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleValidationError {
    /// A condition has an empty field path.
    #[error("condition {index}: field path is empty")]
    EmptyConditionField {
        /// Position in `source_conditions`.
        index: usize,
    },

    /// A condition carries an operator the engine does not recognize.
    #[error("condition {index}: operator is not recognized")]
    UnknownOperator {
        /// Position in `source_conditions`.
        index: usize,
    },

    /// A numeric operator was authored with a value that cannot coerce.
    #[error("condition {index}: operator `{operator}` requires a numeric value")]
    NonNumericValue {
        /// Position in `source_conditions`.
        index: usize,
        /// The offending operator.
        operator: ConditionOperator,
    },

    /// `matchesDimensions` was authored without a dimension target.
    #[error("condition {index}: `matchesDimensions` requires a dimension target")]
    MissingDimensionTarget {
        /// Position in `source_conditions`.
        index: usize,
    },

    /// `matchesDimensions` was authored with a target naming no axis.
    #[error("condition {index}: dimension target names no axis")]
    EmptyDimensionTarget {
        /// Position in `source_conditions`.
        index: usize,
    },

    /// A non-dimension operator was authored with a dimension target.
    #[error("condition {index}: operator `{operator}` cannot compare a dimension target")]
    UnexpectedDimensionTarget {
        /// Position in `source_conditions`.
        index: usize,
        /// The offending operator.
        operator: ConditionOperator,
    },

    /// A criterion has an empty field path.
    #[error("criterion {index}: field path is empty")]
    EmptyCriterionField {
        /// Position in `target_criteria`.
        index: usize,
    },

    /// A criterion carries a match type the engine does not recognize.
    #[error("criterion {index}: match type is not recognized")]
    UnknownMatchType {
        /// Position in `target_criteria`.
        index: usize,
    },

    /// `exact`/`contains` criteria need an authored comparison value.
    #[error("criterion {index}: match type `{match_type}` requires a comparison value")]
    MissingCriterionValue {
        /// Position in `target_criteria`.
        index: usize,
        /// The offending match type.
        match_type: MatchType,
    },

    /// `exact`/`contains` criteria compare scalars/lists, not dimensions.
    #[error("criterion {index}: match type `{match_type}` cannot compare a dimension target")]
    UnexpectedCriterionDimensionTarget {
        /// Position in `target_criteria`.
        index: usize,
        /// The offending match type.
        match_type: MatchType,
    },
}

impl CrossSellingRule {
    /// Validate the rule's predicates at load time.
    ///
    /// The engine never panics on a malformed predicate - it degrades it to
    /// a non-match - but validating on load surfaces authoring mistakes to
    /// the admin UI instead of silently suggesting nothing.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleValidationError`] found, in declaration
    /// order: source conditions first, then target criteria.
    pub fn validate(&self) -> Result<(), RuleValidationError> {
        for (index, condition) in self.source_conditions.iter().enumerate() {
            validate_condition(index, condition)?;
        }
        for (index, criterion) in self.target_criteria.iter().enumerate() {
            validate_criterion(index, criterion)?;
        }
        Ok(())
    }
}

fn validate_condition(index: usize, condition: &RuleCondition) -> Result<(), RuleValidationError> {
    if condition.field.trim().is_empty() {
        return Err(RuleValidationError::EmptyConditionField { index });
    }

    let operator = condition.operator;
    match operator {
        ConditionOperator::Unknown => Err(RuleValidationError::UnknownOperator { index }),
        ConditionOperator::MatchesDimensions => match condition.value.as_dimensions() {
            None => Err(RuleValidationError::MissingDimensionTarget { index }),
            Some(spec) if spec.is_empty() => {
                Err(RuleValidationError::EmptyDimensionTarget { index })
            }
            Some(_) => Ok(()),
        },
        _ => {
            let Some(value) = condition.value.as_value() else {
                return Err(RuleValidationError::UnexpectedDimensionTarget { index, operator });
            };
            if operator.is_numeric() && value.as_number().is_none() {
                return Err(RuleValidationError::NonNumericValue { index, operator });
            }
            Ok(())
        }
    }
}

fn validate_criterion(
    index: usize,
    criterion: &RuleTargetCriteria,
) -> Result<(), RuleValidationError> {
    if criterion.field.trim().is_empty() {
        return Err(RuleValidationError::EmptyCriterionField { index });
    }

    let match_type = criterion.match_type;
    match match_type {
        MatchType::Unknown => Err(RuleValidationError::UnknownMatchType { index }),
        MatchType::Exact | MatchType::Contains => match &criterion.value {
            None => Err(RuleValidationError::MissingCriterionValue { index, match_type }),
            Some(ConditionValue::Dimensions(_)) => Err(
                RuleValidationError::UnexpectedCriterionDimensionTarget { index, match_type },
            ),
            Some(ConditionValue::Value(_)) => Ok(()),
        },
        // Compared against the source product; any authored value is ignored
        MatchType::SameDimensions | MatchType::SameProperty => Ok(()),
    }
}
