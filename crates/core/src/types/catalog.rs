//! Catalog types: option dimensions, variants and products.
//!
//! Variants reference option dimensions by id only. The [`OptionCatalog`] is
//! the authoritative list of dimensions that still exist; a variant selection
//! may keep pointing at a dimension an administrator has since deleted
//! ("stale keys"), and readers are expected to filter against the catalog
//! rather than trust the stored selection.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{DimensionId, ProductId, VariantId};
use super::status::{ProductType, StockStatus};

// =============================================================================
// Option Types
// =============================================================================

/// A named axis of product variation (e.g., "Size").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDimension {
    /// Dimension ID referenced by variant selections.
    pub id: DimensionId,
    /// Display name (e.g., "Size").
    #[serde(default)]
    pub name: Option<String>,
    /// Allowed values (e.g., `["S", "M", "L"]`), in display order.
    #[serde(default)]
    pub values: Vec<String>,
}

impl OptionDimension {
    /// Create a dimension from an id and its values.
    #[must_use]
    pub fn new<I, S>(id: impl Into<DimensionId>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: None,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `value` is one of this dimension's values (exact match).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Value descriptor stored in a variant's selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionValue {
    /// Machine value compared during matching (e.g., "L").
    pub value: String,
    /// Display label (e.g., "Large").
    #[serde(default)]
    pub name: Option<String>,
}

impl OptionValue {
    /// Create a value descriptor without a display label.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: None,
        }
    }
}

/// One customer choice: a value picked for a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    /// Dimension the value belongs to.
    pub dimension_id: DimensionId,
    /// Chosen value.
    pub value: String,
}

impl SelectedOption {
    /// Create a selected option.
    #[must_use]
    pub fn new(dimension_id: impl Into<DimensionId>, value: impl Into<String>) -> Self {
        Self {
            dimension_id: dimension_id.into(),
            value: value.into(),
        }
    }
}

/// The set of option dimensions that currently exist.
///
/// Dimensions keep their declaration order. A repeated id keeps its first
/// definition.
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    dimensions: Vec<OptionDimension>,
    index: HashMap<DimensionId, usize>,
}

impl OptionCatalog {
    /// Build a catalog from dimension definitions.
    #[must_use]
    pub fn new(dimensions: impl IntoIterator<Item = OptionDimension>) -> Self {
        dimensions.into_iter().collect()
    }

    /// Build a catalog that only knows dimension ids, without values.
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DimensionId>,
    {
        ids.into_iter()
            .map(|id| OptionDimension {
                id: id.into(),
                name: None,
                values: Vec::new(),
            })
            .collect()
    }

    /// Whether a dimension with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a dimension by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&OptionDimension> {
        self.index
            .get(id)
            .and_then(|&position| self.dimensions.get(position))
    }

    /// Whether `value` is a declared value of the dimension `id`.
    #[must_use]
    pub fn is_known_value(&self, id: &str, value: &str) -> bool {
        self.get(id).is_some_and(|dimension| dimension.has_value(value))
    }

    /// All dimensions in declaration order.
    #[must_use]
    pub fn dimensions(&self) -> &[OptionDimension] {
        &self.dimensions
    }

    /// Iterate over the ids of all dimensions in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &DimensionId> {
        self.dimensions.iter().map(|dimension| &dimension.id)
    }

    /// Number of dimensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    /// Whether the catalog has no dimensions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}

impl FromIterator<OptionDimension> for OptionCatalog {
    fn from_iter<T: IntoIterator<Item = OptionDimension>>(iter: T) -> Self {
        let mut catalog = Self::default();
        for dimension in iter {
            if catalog.index.contains_key(&dimension.id) {
                continue;
            }
            catalog
                .index
                .insert(dimension.id.clone(), catalog.dimensions.len());
            catalog.dimensions.push(dimension);
        }
        catalog
    }
}

// =============================================================================
// Product Types
// =============================================================================

/// One concrete, sellable option combination of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Variant ID, when the store assigns one.
    #[serde(default)]
    pub id: Option<VariantId>,
    /// Stock keeping unit.
    #[serde(default)]
    pub sku: Option<String>,
    /// Chosen value per dimension. May contain stale dimension ids.
    #[serde(default)]
    pub selection: BTreeMap<DimensionId, OptionValue>,
    /// Variant price in the store's base currency.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Remaining units on hand.
    #[serde(default)]
    pub quantity: i64,
    /// Whether `quantity` limits sales.
    #[serde(default)]
    pub track_inventory: bool,
    /// Stock status set by the merchant.
    #[serde(default)]
    pub stock_status: StockStatus,
}

impl Variant {
    /// Create an in-stock, untracked variant from `(dimension, value)` pairs.
    #[must_use]
    pub fn with_selection<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<DimensionId>,
        V: Into<String>,
    {
        Self {
            id: None,
            sku: None,
            selection: pairs
                .into_iter()
                .map(|(dimension, value)| (dimension.into(), OptionValue::new(value)))
                .collect(),
            price: None,
            quantity: 0,
            track_inventory: false,
            stock_status: StockStatus::InStock,
        }
    }
}

/// A product as fetched from the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    #[serde(default)]
    pub id: Option<ProductId>,
    /// Product title.
    #[serde(default)]
    pub title: Option<String>,
    /// Simple or variant product.
    #[serde(rename = "type", default)]
    pub product_type: ProductType,
    /// Price of a simple product.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Variants in declaration order (variant products only).
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Create a simple product with a price.
    #[must_use]
    pub const fn simple(price: Decimal) -> Self {
        Self {
            id: None,
            title: None,
            product_type: ProductType::Simple,
            price: Some(price),
            variants: Vec::new(),
        }
    }

    /// Create a variant product.
    #[must_use]
    pub fn with_variants(variants: Vec<Variant>) -> Self {
        Self {
            id: None,
            title: None,
            product_type: ProductType::Variant,
            price: None,
            variants,
        }
    }

    /// Variants that take part in option matching.
    ///
    /// Simple products expose none, even if the store left variant data behind.
    #[must_use]
    pub fn matchable_variants(&self) -> &[Variant] {
        match self.product_type {
            ProductType::Simple => &[],
            ProductType::Variant => &self.variants,
        }
    }
}
