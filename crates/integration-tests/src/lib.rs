//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - Product page flow: option selection, availability, price display
//! - `checkout` - Shipping quotes and order access tokens together
//! - `search_filters` - Query strings compiled into store filters
//! - `properties` - Property tests across components
//!
//! Fixtures below are shaped the way the document store returns them, so
//! the tests also exercise deserialization of the core types.

#![cfg_attr(not(test), forbid(unsafe_code))]

use secrecy::SecretString;
use serde_json::json;
use shopfront_core::{Currency, OptionCatalog, OptionDimension, Product, ShippingMethod};

/// Token secret that passes the strength checks.
pub const TEST_TOKEN_SECRET: &str = "q7Z!vR2#kW9$mT4%hN6^bX1&cJ8*pL3@";

/// Secret wrapper for [`TEST_TOKEN_SECRET`].
#[must_use]
pub fn test_secret() -> SecretString {
    SecretString::from(TEST_TOKEN_SECRET)
}

/// Live option dimensions: `size` and `color`. A former `fit` dimension has
/// been deleted.
///
/// # Panics
///
/// Panics if the fixture JSON no longer matches the core types.
#[must_use]
pub fn option_dimensions() -> Vec<OptionDimension> {
    serde_json::from_value(json!([
        {"id": "size", "name": "Size", "values": ["S", "M", "L"]},
        {"id": "color", "name": "Color", "values": ["Red", "Blue"]}
    ]))
    .expect("option dimension fixture")
}

/// Catalog over [`option_dimensions`].
#[must_use]
pub fn option_catalog() -> OptionCatalog {
    OptionCatalog::new(option_dimensions())
}

/// A hoodie with four variants. Every variant still carries a stale `fit`
/// value.
///
/// | size | color | price | stock |
/// |------|-------|-------|-------|
/// | S | Red  | 25.00 | tracked, 0 left |
/// | M | Red  | 25.00 | tracked, 3 left |
/// | L | Red  | 27.50 | untracked |
/// | M | Blue | 25.00 | out of stock |
///
/// # Panics
///
/// Panics if the fixture JSON no longer matches the core types.
#[must_use]
pub fn hoodie() -> Product {
    serde_json::from_value(json!({
        "id": "prod-hoodie",
        "title": "Pullover Hoodie",
        "type": "variant",
        "variants": [
            {
                "id": "var-s-red",
                "sku": "HOOD-S-RED",
                "selection": {"size": {"value": "S"}, "color": {"value": "Red"}, "fit": {"value": "Relaxed"}},
                "price": "25.00",
                "quantity": 0,
                "trackInventory": true,
                "stockStatus": "in_stock"
            },
            {
                "id": "var-m-red",
                "sku": "HOOD-M-RED",
                "selection": {"size": {"value": "M"}, "color": {"value": "Red", "name": "Crimson"}, "fit": {"value": "Relaxed"}},
                "price": "25.00",
                "quantity": 3,
                "trackInventory": true,
                "stockStatus": "in_stock"
            },
            {
                "id": "var-l-red",
                "sku": "HOOD-L-RED",
                "selection": {"size": {"value": "L"}, "color": {"value": "Red"}, "fit": {"value": "Relaxed"}},
                "price": "27.50",
                "quantity": 0,
                "trackInventory": false,
                "stockStatus": "in_stock"
            },
            {
                "id": "var-m-blue",
                "sku": "HOOD-M-BLUE",
                "selection": {"size": {"value": "M"}, "color": {"value": "Blue"}, "fit": {"value": "Relaxed"}},
                "price": "25.00",
                "quantity": 8,
                "trackInventory": true,
                "stockStatus": "out_of_stock"
            }
        ]
    }))
    .expect("hoodie fixture")
}

/// A simple product priced at 12.00.
///
/// # Panics
///
/// Panics if the fixture JSON no longer matches the core types.
#[must_use]
pub fn tote_bag() -> Product {
    serde_json::from_value(json!({
        "id": "prod-tote",
        "title": "Canvas Tote",
        "type": "simple",
        "price": "12.00"
    }))
    .expect("tote bag fixture")
}

/// Euro with an escaped template, as some currency feeds deliver it.
///
/// # Panics
///
/// Panics if the fixture JSON no longer matches the core types.
#[must_use]
pub fn euro() -> Currency {
    serde_json::from_value(json!({
        "code": "EUR",
        "symbol": "€",
        "symbolNative": "€",
        "decimalDigits": 2,
        "rounding": "0",
        "format": "{{amount}} \\u20AC"
    }))
    .expect("euro fixture")
}

/// US dollar without a template; renders via its native symbol.
///
/// # Panics
///
/// Panics if the fixture JSON no longer matches the core types.
#[must_use]
pub fn us_dollar() -> Currency {
    serde_json::from_value(json!({
        "code": "USD",
        "symbol": "US$",
        "symbolNative": "$"
    }))
    .expect("us dollar fixture")
}

/// Standard shipping: 5.99 plus 20% tax, free from 50.00.
///
/// # Panics
///
/// Panics if the fixture JSON no longer matches the core types.
#[must_use]
pub fn standard_shipping() -> ShippingMethod {
    serde_json::from_value(json!({
        "id": "ship-standard",
        "name": "Standard",
        "cost": "5.99",
        "taxable": true,
        "taxRate": "20",
        "freeThreshold": "50.00"
    }))
    .expect("standard shipping fixture")
}
