//! Purchasability of variants.
//!
//! Answers "can this variant be sold right now, for N units". Reserving and
//! decrementing stock belongs to checkout; this module only reads the
//! inventory snapshot it is given.

use std::collections::BTreeSet;
use std::num::NonZeroU32;

use shopfront_core::{OptionCatalog, Product, ProductType, SelectedOption, StockStatus, Variant};

use super::{EffectiveSelection, effective_selection, find_variant};

/// Number of units a purchasability check must cover. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequiredQuantity(NonZeroU32);

impl RequiredQuantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Require `units`, treating zero as one.
    #[must_use]
    pub fn new(units: u32) -> Self {
        NonZeroU32::new(units).map_or(Self::ONE, Self)
    }

    /// The number of units.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for RequiredQuantity {
    fn default() -> Self {
        Self::ONE
    }
}

/// Outcome of resolving a selection for purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability<'a> {
    /// The selection names a variant that can be sold for the requested units.
    Purchasable(&'a Variant),
    /// The selection names a variant, but it cannot be sold right now.
    OutOfStock(&'a Variant),
    /// No variant has exactly this selection.
    InvalidSelection,
    /// Simple products have no variants to select.
    NotApplicable,
}

impl<'a> Availability<'a> {
    /// The resolved variant, whether or not it is in stock.
    #[must_use]
    pub const fn variant(&self) -> Option<&'a Variant> {
        match self {
            Self::Purchasable(variant) | Self::OutOfStock(variant) => Some(*variant),
            Self::InvalidSelection | Self::NotApplicable => None,
        }
    }

    /// Whether the selection can go into the cart.
    #[must_use]
    pub const fn is_purchasable(&self) -> bool {
        matches!(self, Self::Purchasable(_))
    }

    /// Stable snake_case label, e.g. for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Purchasable(_) => "purchasable",
            Self::OutOfStock(_) => "out_of_stock",
            Self::InvalidSelection => "invalid_selection",
            Self::NotApplicable => "not_applicable",
        }
    }
}

/// Whether a variant can be sold for `required` units.
///
/// The variant must be marked in stock; when inventory is tracked its
/// remaining quantity must cover the required units (`quantity >= required`).
#[must_use]
pub fn is_purchasable(variant: &Variant, required: RequiredQuantity) -> bool {
    variant.stock_status == StockStatus::InStock
        && (!variant.track_inventory || variant.quantity >= i64::from(required.get()))
}

/// Effective selections of every purchasable variant, in declaration order.
///
/// Returns `None` for simple products.
#[must_use]
pub fn list_purchasable(
    product: &Product,
    catalog: &OptionCatalog,
    required: RequiredQuantity,
) -> Option<Vec<EffectiveSelection>> {
    if product.product_type == ProductType::Simple {
        return None;
    }

    Some(
        product
            .variants
            .iter()
            .filter(|variant| is_purchasable(variant, required))
            .map(|variant| effective_selection(variant, catalog))
            .collect(),
    )
}

/// Values of `dimension_id` that still lead to a purchasable variant, given
/// the customer's choices on the other dimensions.
///
/// A choice for `dimension_id` itself in `chosen` is ignored. Unknown
/// dimensions yield an empty set.
#[must_use]
pub fn purchasable_values(
    product: &Product,
    catalog: &OptionCatalog,
    dimension_id: &str,
    chosen: &[SelectedOption],
    required: RequiredQuantity,
) -> BTreeSet<String> {
    if !catalog.contains(dimension_id) {
        return BTreeSet::new();
    }

    product
        .matchable_variants()
        .iter()
        .filter(|variant| is_purchasable(variant, required))
        .map(|variant| effective_selection(variant, catalog))
        .filter(|effective| {
            chosen
                .iter()
                .filter(|option| option.dimension_id.as_str() != dimension_id)
                .all(|option| effective.get(option.dimension_id.as_str()) == Some(option.value.as_str()))
        })
        .filter_map(|effective| effective.get(dimension_id).map(str::to_owned))
        .collect()
}

/// Resolve a selection and report whether it can be bought.
#[must_use]
pub fn resolve<'a>(
    product: &'a Product,
    selection: &[SelectedOption],
    catalog: &OptionCatalog,
    required: RequiredQuantity,
) -> Availability<'a> {
    if product.product_type == ProductType::Simple {
        return Availability::NotApplicable;
    }

    match find_variant(product, selection, catalog) {
        Some(variant) if is_purchasable(variant, required) => Availability::Purchasable(variant),
        Some(variant) => Availability::OutOfStock(variant),
        None => Availability::InvalidSelection,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;
    use shopfront_core::OptionDimension;

    use super::*;

    fn catalog() -> OptionCatalog {
        OptionCatalog::new([
            OptionDimension::new("size", ["S", "M", "L"]),
            OptionDimension::new("color", ["Red", "Blue"]),
        ])
    }

    fn variant(size: &str, color: &str, quantity: i64, track: bool, status: StockStatus) -> Variant {
        let mut variant = Variant::with_selection([("size", size), ("color", color)]);
        variant.quantity = quantity;
        variant.track_inventory = track;
        variant.stock_status = status;
        variant
    }

    fn hoodie() -> Product {
        Product::with_variants(vec![
            variant("S", "Red", 0, true, StockStatus::InStock),
            variant("M", "Red", 5, true, StockStatus::InStock),
            variant("M", "Blue", 0, false, StockStatus::InStock),
            variant("L", "Blue", 10, true, StockStatus::OutOfStock),
            variant("L", "Red", 2, true, StockStatus::OnBackorder),
        ])
    }

    #[test]
    fn test_required_quantity_never_zero() {
        assert_eq!(RequiredQuantity::new(0), RequiredQuantity::ONE);
        assert_eq!(RequiredQuantity::new(3).get(), 3);
        assert_eq!(RequiredQuantity::default().get(), 1);
    }

    #[test]
    fn test_is_purchasable_rules() {
        let one = RequiredQuantity::ONE;
        assert!(!is_purchasable(&variant("S", "Red", 0, true, StockStatus::InStock), one));
        assert!(is_purchasable(&variant("S", "Red", 1, true, StockStatus::InStock), one));
        assert!(is_purchasable(&variant("S", "Red", 0, false, StockStatus::InStock), one));
        assert!(!is_purchasable(&variant("S", "Red", 9, false, StockStatus::OutOfStock), one));
        assert!(!is_purchasable(&variant("S", "Red", 9, true, StockStatus::Unknown), one));
        assert!(!is_purchasable(&variant("S", "Red", -1, true, StockStatus::InStock), one));
    }

    #[test]
    fn test_required_quantity_compares_at_least() {
        let stock = variant("M", "Red", 5, true, StockStatus::InStock);
        assert!(is_purchasable(&stock, RequiredQuantity::new(5)));
        assert!(!is_purchasable(&stock, RequiredQuantity::new(6)));
    }

    #[test]
    fn test_list_purchasable_preserves_order() {
        let listed = list_purchasable(&hoodie(), &catalog(), RequiredQuantity::ONE).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].get("size"), Some("M"));
        assert_eq!(listed[0].get("color"), Some("Red"));
        assert_eq!(listed[1].get("color"), Some("Blue"));
    }

    #[test]
    fn test_list_purchasable_simple_not_applicable() {
        let product = Product::simple(Decimal::TEN);
        assert!(list_purchasable(&product, &catalog(), RequiredQuantity::ONE).is_none());
    }

    #[test]
    fn test_list_purchasable_drops_stale_keys() {
        let mut stale = variant("S", "Blue", 1, true, StockStatus::InStock);
        stale
            .selection
            .insert("material".into(), shopfront_core::OptionValue::new("Wool"));
        let product = Product::with_variants(vec![stale]);

        let listed = list_purchasable(&product, &catalog(), RequiredQuantity::ONE).unwrap();
        assert_eq!(listed[0].len(), 2);
        assert_eq!(listed[0].get("material"), None);
    }

    #[test]
    fn test_purchasable_values_respects_other_choices() {
        let product = hoodie();
        let catalog = catalog();

        let sizes = purchasable_values(
            &product,
            &catalog,
            "size",
            &[SelectedOption::new("color", "Red")],
            RequiredQuantity::ONE,
        );
        assert_eq!(sizes.into_iter().collect::<Vec<_>>(), ["M"]);

        let colors = purchasable_values(
            &product,
            &catalog,
            "color",
            &[SelectedOption::new("size", "M"), SelectedOption::new("color", "Red")],
            RequiredQuantity::ONE,
        );
        assert_eq!(colors.into_iter().collect::<Vec<_>>(), ["Blue", "Red"]);
    }

    #[test]
    fn test_purchasable_values_unknown_dimension() {
        let values = purchasable_values(&hoodie(), &catalog(), "material", &[], RequiredQuantity::ONE);
        assert!(values.is_empty());
    }

    #[test]
    fn test_resolve_outcomes() {
        let product = hoodie();
        let catalog = catalog();
        let pick = |size: &str, color: &str| {
            vec![SelectedOption::new("size", size), SelectedOption::new("color", color)]
        };

        assert!(resolve(&product, &pick("M", "Red"), &catalog, RequiredQuantity::ONE).is_purchasable());
        assert!(matches!(
            resolve(&product, &pick("S", "Red"), &catalog, RequiredQuantity::ONE),
            Availability::OutOfStock(_)
        ));
        assert_eq!(
            resolve(&product, &pick("S", "Blue"), &catalog, RequiredQuantity::ONE),
            Availability::InvalidSelection
        );
        assert_eq!(
            resolve(&Product::simple(Decimal::ONE), &[], &catalog, RequiredQuantity::ONE),
            Availability::NotApplicable
        );
    }

    #[test]
    fn test_resolve_out_of_stock_exposes_variant() {
        let product = hoodie();
        let outcome = resolve(
            &product,
            &[SelectedOption::new("size", "M"), SelectedOption::new("color", "Red")],
            &catalog(),
            RequiredQuantity::new(6),
        );
        assert_eq!(outcome.variant().unwrap().quantity, 5);
        assert!(!outcome.is_purchasable());
        assert_eq!(outcome.as_str(), "out_of_stock");
    }
}
