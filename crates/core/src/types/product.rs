//! Product read model consumed from the platform admin API.
//!
//! Products are never written by Seagrape; they arrive from the platform
//! proxy layer and are evaluated read-only by the cross-selling engine.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::field::FieldValue;
use super::id::ProductId;

/// Physical dimensions of a product, as maintained on the platform.
///
/// Each axis is optional; merchants frequently fill in only the axes that
/// matter for their packaging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in `unit`.
    pub width: Option<f64>,
    /// Height in `unit`.
    pub height: Option<f64>,
    /// Length in `unit`.
    pub length: Option<f64>,
    /// Measurement unit (e.g. "mm", "cm"). Purely informational.
    pub unit: Option<String>,
}

impl Dimensions {
    /// Resolve one axis of the dimension record by name.
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "width" => self.width.map(FieldValue::Number),
            "height" => self.height.map(FieldValue::Number),
            "length" => self.length.map(FieldValue::Number),
            "unit" => self.unit.clone().map(FieldValue::Str),
            _ => None,
        }
    }
}

/// Manufacturer reference on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    /// Manufacturer display name.
    pub name: String,
}

/// A product in the admin, read-only from the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Platform-assigned product ID.
    pub id: ProductId,
    /// Merchant-facing product number (SKU-like).
    pub product_number: String,
    /// Display name.
    pub name: String,
    /// Gross price.
    pub price: Decimal,
    /// Net price.
    pub net_price: Decimal,
    /// Units in stock.
    pub stock: i64,
    /// Whether the product is currently purchasable.
    pub available: bool,
    /// Physical dimensions, if maintained.
    pub dimensions: Option<Dimensions>,
    /// Category names in platform order. Names may repeat across products.
    pub category_names: Vec<String>,
    /// Manufacturer, if assigned.
    pub manufacturer: Option<Manufacturer>,
    /// Merchant-defined custom fields (scalar or list values).
    #[serde(default)]
    pub custom_fields: HashMap<String, FieldValue>,
}

impl Product {
    /// Resolve a dotted field path against this product.
    ///
    /// Known paths map to typed getters; `custom_fields.<key>` reaches the
    /// merchant-defined map. Missing structure (no `dimensions`, absent
    /// custom field, unknown path) resolves to `None` - this never panics
    /// and never errors, so predicate evaluation can treat absence as a
    /// plain non-match.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<FieldValue> {
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        match (head, rest) {
            ("id", None) => Some(FieldValue::Str(self.id.to_string())),
            ("product_number", None) => Some(FieldValue::Str(self.product_number.clone())),
            ("name", None) => Some(FieldValue::Str(self.name.clone())),
            ("price", None) => self.price.to_f64().map(FieldValue::Number),
            ("net_price", None) => self.net_price.to_f64().map(FieldValue::Number),
            #[allow(clippy::cast_precision_loss)] // Stock counts stay far below 2^52
            ("stock", None) => Some(FieldValue::Number(self.stock as f64)),
            ("available", None) => Some(FieldValue::Bool(self.available)),
            ("category_names", None) => Some(FieldValue::List(
                self.category_names
                    .iter()
                    .map(|name| FieldValue::Str(name.clone()))
                    .collect(),
            )),
            ("dimensions", Some(axis)) => self.dimensions.as_ref()?.field(axis),
            ("manufacturer", Some("name")) => self
                .manufacturer
                .as_ref()
                .map(|m| FieldValue::Str(m.name.clone())),
            ("custom_fields", Some(key)) => self.custom_fields.get(key).cloned(),
            _ => None,
        }
    }
}
