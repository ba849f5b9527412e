//! Shipping quote command.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Serialize;
use shopfront_core::ShippingMethod;
use shopfront_resolver::ShippingQuote;
use shopfront_resolver::pricing::{is_free_shipping_eligible, quote as quote_method, quote_with_free_shipping};

use super::{CliError, print_json, read_json};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteOutput {
    free_shipping_eligible: bool,
    #[serde(flatten)]
    quote: ShippingQuote,
}

/// Quote the method read from `method_path` for an order of `subtotal`.
pub fn quote(method_path: &Path, subtotal: Decimal, apply_free_shipping: bool) -> Result<(), CliError> {
    let method: ShippingMethod = read_json(method_path)?;
    let eligible = is_free_shipping_eligible(&method, subtotal);

    let quote = if apply_free_shipping {
        quote_with_free_shipping(&method, subtotal)
    } else {
        quote_method(&method, subtotal)
    };
    tracing::debug!(method = method.name.as_deref().unwrap_or_default(), eligible, "Quoted shipping");

    print_json(&QuoteOutput {
        free_shipping_eligible: eligible,
        quote,
    })
}
