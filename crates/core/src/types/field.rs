//! Loosely-shaped attribute values resolved from product records.
//!
//! Rule predicates address product attributes by dotted path and compare
//! them against authored values. Both sides of that comparison are
//! [`FieldValue`]s: a closed set of scalar and list shapes, so every
//! evaluator can match on exactly the shapes it supports instead of
//! inspecting untyped JSON.

use serde::{Deserialize, Serialize};

/// A scalar or list attribute value.
///
/// Custom fields on platform products are restricted to scalars and flat
/// arrays, so there is deliberately no object variant; nested structure is
/// reached through dotted paths on [`crate::Product`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value. Prices and stock levels resolve to this variant.
    Number(f64),
    /// Text value.
    Str(String),
    /// Flat list of values, e.g. category names or multi-select custom fields.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Numeric coercion used by the ordering comparators.
    ///
    /// Numbers pass through, numeric strings parse, everything else is
    /// absent. Callers treat an absent coercion as "no match", never as an
    /// error.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => (!n.is_nan()).then_some(*n),
            Self::Str(s) => s.trim().parse::<f64>().ok().filter(|n| !n.is_nan()),
            Self::Bool(_) | Self::List(_) => None,
        }
    }

    /// Borrow the text value, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the list elements, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[FieldValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value is a list.
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number_passthrough() {
        assert_eq!(FieldValue::Number(4.5).as_number(), Some(4.5));
    }

    #[test]
    fn test_as_number_parses_numeric_strings() {
        assert_eq!(FieldValue::from("12.5").as_number(), Some(12.5));
        assert_eq!(FieldValue::from(" 7 ").as_number(), Some(7.0));
    }

    #[test]
    fn test_as_number_rejects_non_numeric() {
        assert_eq!(FieldValue::from("tall").as_number(), None);
        assert_eq!(FieldValue::Bool(true).as_number(), None);
        assert_eq!(FieldValue::from(vec![1.0]).as_number(), None);
        assert_eq!(FieldValue::Number(f64::NAN).as_number(), None);
    }

    #[test]
    fn test_serde_untagged_shapes() {
        let value: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(value, FieldValue::Bool(true));

        let value: FieldValue = serde_json::from_str("3.25").unwrap();
        assert_eq!(value, FieldValue::Number(3.25));

        let value: FieldValue = serde_json::from_str("\"Shelving\"").unwrap();
        assert_eq!(value, FieldValue::from("Shelving"));

        let value: FieldValue = serde_json::from_str("[\"a\", 1]").unwrap();
        assert_eq!(
            value,
            FieldValue::List(vec![FieldValue::from("a"), FieldValue::Number(1.0)])
        );
    }
}
