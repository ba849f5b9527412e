//! Variant resolution.
//!
//! Maps a customer's option choices to one of a product's variants. Variant
//! selections are filtered against the live [`OptionCatalog`] before they are
//! compared, so a variant still carrying a value for a deleted dimension keeps
//! matching on the dimensions that remain.
//!
//! Matching is set equality over `(dimension, value)` pairs: order does not
//! matter, values compare exactly (case-sensitive, untrimmed), and the first
//! variant in declaration order wins when several are equal.

mod availability;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use shopfront_core::{DimensionId, OptionCatalog, Product, SelectedOption, Variant};

pub use availability::{
    Availability, RequiredQuantity, is_purchasable, list_purchasable, purchasable_values, resolve,
};

/// A variant's option values after discarding stale dimensions.
///
/// Serializes as a plain `{ "dimensionId": "value" }` object.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectiveSelection(BTreeMap<DimensionId, String>);

impl EffectiveSelection {
    /// Value chosen for a dimension, if any.
    #[must_use]
    pub fn get(&self, dimension_id: &str) -> Option<&str> {
        self.0.get(dimension_id).map(String::as_str)
    }

    /// Number of dimensions with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no dimension has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(dimension, value)` pairs ordered by dimension id.
    pub fn iter(&self) -> impl Iterator<Item = (&DimensionId, &str)> {
        self.0.iter().map(|(dimension, value)| (dimension, value.as_str()))
    }

    /// The selection as customer choices.
    #[must_use]
    pub fn to_selected_options(&self) -> Vec<SelectedOption> {
        self.0
            .iter()
            .map(|(dimension, value)| SelectedOption::new(dimension.clone(), value.clone()))
            .collect()
    }
}

impl<K: Into<DimensionId>, V: Into<String>> FromIterator<(K, V)> for EffectiveSelection {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(dimension, value)| (dimension.into(), value.into()))
                .collect(),
        )
    }
}

/// Build a variant's effective selection against the live catalog.
#[must_use]
pub fn effective_selection(variant: &Variant, catalog: &OptionCatalog) -> EffectiveSelection {
    variant
        .selection
        .iter()
        .filter(|(dimension, _)| catalog.contains(dimension.as_str()))
        .map(|(dimension, option)| (dimension.clone(), option.value.clone()))
        .collect()
}

/// Find the variant matching a customer's selection.
///
/// Returns `None` for simple products and when no variant's effective
/// selection holds exactly the requested pairs.
#[must_use]
pub fn find_variant<'a>(
    product: &'a Product,
    selection: &[SelectedOption],
    catalog: &OptionCatalog,
) -> Option<&'a Variant> {
    find_variant_index(product, selection, catalog).map(|(_, variant)| variant)
}

/// Like [`find_variant`], also returning the variant's declaration index.
#[must_use]
pub fn find_variant_index<'a>(
    product: &'a Product,
    selection: &[SelectedOption],
    catalog: &OptionCatalog,
) -> Option<(usize, &'a Variant)> {
    let wanted: BTreeSet<(&str, &str)> = selection
        .iter()
        .map(|option| (option.dimension_id.as_str(), option.value.as_str()))
        .collect();

    product
        .matchable_variants()
        .iter()
        .enumerate()
        .find(|(_, variant)| selection_matches(variant, &wanted, catalog))
}

/// Set equality between the variant's effective selection and `wanted`.
///
/// `wanted` is a set, so equal cardinality plus inclusion of every wanted
/// pair in the (single-valued) effective selection is equality.
fn selection_matches(
    variant: &Variant,
    wanted: &BTreeSet<(&str, &str)>,
    catalog: &OptionCatalog,
) -> bool {
    let effective_len = variant
        .selection
        .keys()
        .filter(|dimension| catalog.contains(dimension.as_str()))
        .count();

    effective_len == wanted.len()
        && wanted.iter().all(|(dimension, value)| {
            catalog.contains(dimension)
                && variant
                    .selection
                    .get(*dimension)
                    .is_some_and(|option| option.value == *value)
        })
}

/// Dimension ids referenced by the product's variants that the catalog no
/// longer defines.
///
/// Matching already ignores these; the result tells a cleanup job which
/// stored selections to rewrite.
#[must_use]
pub fn stale_dimensions(product: &Product, catalog: &OptionCatalog) -> BTreeSet<DimensionId> {
    product
        .variants
        .iter()
        .flat_map(|variant| variant.selection.keys())
        .filter(|dimension| !catalog.contains(dimension.as_str()))
        .cloned()
        .collect()
}
