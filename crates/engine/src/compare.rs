//! Value comparison semantics shared by condition and criterion evaluation.
//!
//! Rules were historically authored against loosely-typed product records,
//! so equality and containment keep their array-aware behavior: comparing a
//! list against a scalar degrades to a membership test rather than failing.
//! Tightening that would silently break existing category rules.

use std::cmp::Ordering;

use seagrape_core::{DimensionSpec, Dimensions, FieldValue};

/// Maximum relative deviation per axis for `matchesDimensions`.
///
/// Every axis named in the authored spec must be within this tolerance of
/// the spec value (AND across axes).
pub(crate) const DIMENSION_SPEC_TOLERANCE: f64 = 0.05;

/// Maximum relative deviation for `sameDimensions`.
///
/// One shared axis within this tolerance of the larger value is enough (OR
/// across axes). Deliberately looser and shaped differently than
/// [`DIMENSION_SPEC_TOLERANCE`]; the two comparators must not be unified.
pub(crate) const SHARED_DIMENSION_TOLERANCE: f64 = 0.10;

/// Equality with array-aware fallback.
///
/// - two lists: equal iff same length and every element of one appears in
///   the other (unordered),
/// - list vs scalar (either side): membership test,
/// - scalars: strict same-shape equality.
pub(crate) fn loose_eq(a: &FieldValue, b: &FieldValue) -> bool {
    match (a, b) {
        (FieldValue::List(xs), FieldValue::List(ys)) => {
            xs.len() == ys.len() && xs.iter().all(|x| ys.iter().any(|y| loose_eq(x, y)))
        }
        (FieldValue::List(xs), y) => xs.iter().any(|x| loose_eq(x, y)),
        (x, FieldValue::List(ys)) => ys.iter().any(|y| loose_eq(x, y)),
        (FieldValue::Str(x), FieldValue::Str(y)) => x == y,
        (FieldValue::Number(x), FieldValue::Number(y)) => x == y,
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x == y,
        _ => false,
    }
}

/// Containment test.
///
/// - list haystack, list needle: true iff any needle element is present,
/// - list haystack, scalar needle: membership,
/// - string haystack, string needle: case-insensitive substring,
/// - anything else: false.
pub(crate) fn loose_contains(haystack: &FieldValue, needle: &FieldValue) -> bool {
    match (haystack, needle) {
        (FieldValue::List(xs), FieldValue::List(ns)) => {
            ns.iter().any(|n| xs.iter().any(|x| loose_eq(x, n)))
        }
        (FieldValue::List(xs), n) => xs.iter().any(|x| loose_eq(x, n)),
        (FieldValue::Str(h), FieldValue::Str(n)) => {
            h.to_lowercase().contains(&n.to_lowercase())
        }
        _ => false,
    }
}

/// Order two values numerically. `None` when either side does not coerce.
pub(crate) fn numeric_cmp(field: &FieldValue, target: &FieldValue) -> Option<Ordering> {
    let lhs = field.as_number()?;
    let rhs = target.as_number()?;
    lhs.partial_cmp(&rhs)
}

/// All axes named in `spec` and present on the product must be within
/// [`DIMENSION_SPEC_TOLERANCE`] of the spec value. Axes absent from either
/// side are not checked.
pub(crate) fn within_spec_tolerance(dimensions: &Dimensions, spec: &DimensionSpec) -> bool {
    let axes = [
        (dimensions.width, spec.width),
        (dimensions.height, spec.height),
        (dimensions.length, spec.length),
    ];
    axes.into_iter().all(|(actual, target)| match (actual, target) {
        (Some(actual), Some(target)) => {
            (actual - target).abs() <= target.abs() * DIMENSION_SPEC_TOLERANCE
        }
        _ => true,
    })
}

/// True iff at least one axis is present on both products and within
/// [`SHARED_DIMENSION_TOLERANCE`] of the larger of the two values.
pub(crate) fn share_close_dimension(a: &Dimensions, b: &Dimensions) -> bool {
    let axes = [(a.width, b.width), (a.height, b.height), (a.length, b.length)];
    axes.into_iter().any(|axis| match axis {
        (Some(x), Some(y)) => {
            let larger = x.abs().max(y.abs());
            (x - y).abs() <= larger * SHARED_DIMENSION_TOLERANCE
        }
        _ => false,
    })
}
