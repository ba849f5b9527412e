//! Integration tests for the product page flow.
//!
//! A product fetched from the store is resolved against the live option
//! catalog, checked for availability, and priced for display.

use rust_decimal::Decimal;
use shopfront_core::SelectedOption;
use shopfront_integration_tests::{euro, hoodie, option_catalog, tote_bag, us_dollar};
use shopfront_resolver::pricing::price_range;
use shopfront_resolver::variants::{
    find_variant_index, list_purchasable, purchasable_values, resolve, stale_dimensions,
};
use shopfront_resolver::{Availability, PriceFormatter, RequiredQuantity, find_variant};

fn pick(pairs: &[(&str, &str)]) -> Vec<SelectedOption> {
    pairs
        .iter()
        .map(|(dimension, value)| SelectedOption::new(*dimension, *value))
        .collect()
}

// ============================================================================
// Variant Matching
// ============================================================================

#[test]
fn test_match_ignores_deleted_dimension() {
    let product = hoodie();
    let catalog = option_catalog();

    let variant = find_variant(&product, &pick(&[("size", "M"), ("color", "Red")]), &catalog)
        .expect("M/Red should match despite the stale fit value");
    assert_eq!(variant.sku.as_deref(), Some("HOOD-M-RED"));
}

#[test]
fn test_match_is_order_independent() {
    let product = hoodie();
    let catalog = option_catalog();

    let forward = find_variant_index(&product, &pick(&[("size", "L"), ("color", "Red")]), &catalog);
    let reversed = find_variant_index(&product, &pick(&[("color", "Red"), ("size", "L")]), &catalog);
    assert_eq!(forward.map(|(index, _)| index), Some(2));
    assert_eq!(forward, reversed);
}

#[test]
fn test_selecting_deleted_dimension_never_matches() {
    let product = hoodie();
    let selection = pick(&[("size", "M"), ("color", "Red"), ("fit", "Relaxed")]);
    assert!(find_variant(&product, &selection, &option_catalog()).is_none());
}

#[test]
fn test_partial_selection_does_not_match() {
    let product = hoodie();
    assert!(find_variant(&product, &pick(&[("size", "M")]), &option_catalog()).is_none());
    assert!(find_variant(&product, &[], &option_catalog()).is_none());
}

#[test]
fn test_values_are_case_sensitive() {
    let product = hoodie();
    let selection = pick(&[("size", "m"), ("color", "red")]);
    assert!(find_variant(&product, &selection, &option_catalog()).is_none());
}

#[test]
fn test_simple_product_has_nothing_to_match() {
    let product = tote_bag();
    assert!(find_variant(&product, &[], &option_catalog()).is_none());
    assert_eq!(
        resolve(&product, &[], &option_catalog(), RequiredQuantity::ONE),
        Availability::NotApplicable
    );
}

#[test]
fn test_stale_dimensions_reported() {
    let stale = stale_dimensions(&hoodie(), &option_catalog());
    assert_eq!(stale.len(), 1);
    assert!(stale.iter().any(|dimension| dimension.as_str() == "fit"));
}

// ============================================================================
// Availability
// ============================================================================

#[test]
fn test_purchasable_combinations() {
    let product = hoodie();
    let catalog = option_catalog();

    let one = list_purchasable(&product, &catalog, RequiredQuantity::ONE).expect("variant product");
    let sizes: Vec<_> = one.iter().filter_map(|selection| selection.get("size")).collect();
    assert_eq!(sizes, ["M", "L"]);
    assert!(one.iter().all(|selection| selection.get("fit").is_none()));

    let four = list_purchasable(&product, &catalog, RequiredQuantity::new(4)).expect("variant product");
    assert_eq!(four.len(), 1);
    assert_eq!(four.first().and_then(|selection| selection.get("size")), Some("L"));
}

#[test]
fn test_greyed_out_swatches() {
    let product = hoodie();
    let catalog = option_catalog();

    let sizes = purchasable_values(&product, &catalog, "size", &pick(&[("color", "Red")]), RequiredQuantity::ONE);
    assert_eq!(sizes.into_iter().collect::<Vec<_>>(), ["L", "M"]);

    let colors = purchasable_values(&product, &catalog, "color", &pick(&[("size", "M")]), RequiredQuantity::ONE);
    assert_eq!(colors.into_iter().collect::<Vec<_>>(), ["Red"]);
}

#[test]
fn test_out_of_stock_is_distinct_from_invalid() {
    let product = hoodie();
    let catalog = option_catalog();

    let blue = resolve(&product, &pick(&[("size", "M"), ("color", "Blue")]), &catalog, RequiredQuantity::ONE);
    assert!(matches!(blue, Availability::OutOfStock(variant) if variant.quantity == 8));

    let missing = resolve(&product, &pick(&[("size", "S"), ("color", "Blue")]), &catalog, RequiredQuantity::ONE);
    assert_eq!(missing, Availability::InvalidSelection);
}

#[test]
fn test_quantity_boundary() {
    let product = hoodie();
    let catalog = option_catalog();
    let selection = pick(&[("size", "M"), ("color", "Red")]);

    assert!(resolve(&product, &selection, &catalog, RequiredQuantity::new(3)).is_purchasable());
    assert!(!resolve(&product, &selection, &catalog, RequiredQuantity::new(4)).is_purchasable());
}

// ============================================================================
// Price Display
// ============================================================================

#[test]
fn test_price_range_in_native_symbol() {
    let range = price_range(&hoodie()).expect("priced variants");
    let formatter = PriceFormatter::new(us_dollar());
    assert_eq!(range.display(&formatter), "$25.00 - $27.50");
}

#[test]
fn test_price_range_with_escaped_template_and_rate() {
    let range = price_range(&hoodie()).expect("priced variants");
    let formatter = PriceFormatter::new(euro()).with_exchange_rate(Decimal::new(92, 2));
    // 25.00 * 0.92 = 23.00, 27.50 * 0.92 = 25.30
    assert_eq!(range.display(&formatter), "23.00 \u{20ac} - 25.30 \u{20ac}");
}

#[test]
fn test_matched_variant_price() {
    let product = hoodie();
    let variant = find_variant(&product, &pick(&[("size", "L"), ("color", "Red")]), &option_catalog())
        .expect("L/Red");
    assert_eq!(PriceFormatter::new(us_dollar()).format_opt(variant.price), "$27.50");
}

#[test]
fn test_simple_product_price() {
    let range = price_range(&tote_bag()).expect("priced");
    assert!(range.is_single());
    assert_eq!(range.display(&PriceFormatter::new(euro())), "12.00 \u{20ac}");
}
