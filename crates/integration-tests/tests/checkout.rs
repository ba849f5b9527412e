//! Integration tests for checkout: shipping quotes for a cart, then a guest
//! access token for the placed order.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;
use shopfront_core::SelectedOption;
use shopfront_integration_tests::{hoodie, option_catalog, standard_shipping, test_secret, us_dollar};
use shopfront_resolver::pricing::{is_free_shipping_eligible, quote, quote_with_free_shipping};
use shopfront_resolver::{OrderTokenCodec, PriceFormatter, ResolverConfig, ShippingQuote, find_variant};

fn placed_at() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(1_760_000_000_000).expect("valid timestamp")
}

fn cart_subtotal(units: i64) -> Decimal {
    let product = hoodie();
    let selection = [SelectedOption::new("size", "M"), SelectedOption::new("color", "Red")];
    let variant = find_variant(&product, &selection, &option_catalog()).expect("M/Red");
    variant.price.expect("priced") * Decimal::from(units)
}

// ============================================================================
// Shipping
// ============================================================================

#[test]
fn test_cart_at_threshold_ships_free() {
    let method = standard_shipping();
    let subtotal = cart_subtotal(2);
    assert_eq!(subtotal, Decimal::new(50, 0));

    assert!(is_free_shipping_eligible(&method, subtotal));
    assert_eq!(quote_with_free_shipping(&method, subtotal), ShippingQuote::FREE);
    // The plain quote still charges; combining is the caller's decision.
    assert!(!quote(&method, subtotal).is_free());
}

#[test]
fn test_cart_below_threshold_pays_taxed_shipping() {
    let method = standard_shipping();
    let subtotal = cart_subtotal(1);
    assert!(!is_free_shipping_eligible(&method, subtotal));

    let charged = quote_with_free_shipping(&method, subtotal);
    assert_eq!(charged, quote(&method, subtotal));
    assert_eq!(charged.cost, Decimal::new(599, 2));
    assert_eq!(charged.tax, Decimal::new(1198, 3));
    assert_eq!(charged.total, Decimal::new(7188, 3));

    let formatter = PriceFormatter::new(us_dollar());
    assert_eq!(formatter.format(charged.tax), "$1.20");
    assert_eq!(formatter.format(charged.total), "$7.19");
}

#[test]
fn test_free_shipping_boundary() {
    let method = standard_shipping();
    assert!(is_free_shipping_eligible(&method, Decimal::new(5000, 2)));
    assert!(!is_free_shipping_eligible(&method, Decimal::new(4999, 2)));
}

// ============================================================================
// Order Access Tokens
// ============================================================================

#[test]
fn test_guest_token_grants_order_until_expiry() {
    let codec = OrderTokenCodec::from_config(&ResolverConfig::with_secret(test_secret()));
    let token = codec.sign_at("order-1001", placed_at());

    let grant = codec.verify_at(&token, placed_at() + Duration::days(29)).expect("valid token");
    assert_eq!(grant.order_id.as_str(), "order-1001");
    assert_eq!(grant.expires_at, placed_at() + Duration::days(30));

    assert!(codec.verify_at(&token, placed_at() + Duration::days(30)).is_none());
}

#[test]
fn test_token_from_another_store_rejected() {
    let ours = OrderTokenCodec::new(&test_secret());
    let theirs = OrderTokenCodec::new(&SecretString::from("Hj4&tY8!wQ1@zK5#eR9$uI3%oP7^aS2*"));

    let token = theirs.sign_at("order-1001", placed_at());
    assert!(ours.verify_at(&token, placed_at()).is_none());
    assert!(theirs.verify_at(&token, placed_at()).is_some());
}

#[test]
fn test_token_tamper_suite() {
    let codec = OrderTokenCodec::new(&test_secret());
    let token = codec.sign_at("order-1001", placed_at());

    for (index, c) in token.char_indices() {
        if c == ':' {
            continue;
        }
        let replacement = if c == 'f' { 'e' } else { 'f' };
        let mut tampered = token.clone();
        tampered.replace_range(index..=index, &replacement.to_string());
        assert!(
            codec.verify_at(&tampered, placed_at()).is_none(),
            "tampered token accepted at position {index}"
        );
    }
}

#[test]
fn test_swapped_components_rejected() {
    let codec = OrderTokenCodec::new(&test_secret());
    let first = codec.sign_at("order-1001", placed_at());
    let second = codec.sign_at("order-1002", placed_at());

    let (first_iv, _) = first.split_once(':').expect("two components");
    let (_, second_body) = second.split_once(':').expect("two components");
    assert!(codec.verify_at(&format!("{first_iv}:{second_body}"), placed_at()).is_none());
}
