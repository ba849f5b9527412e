//! Shipping quotes.
//!
//! [`quote`] always charges the method's cost; free shipping eligibility is a
//! separate predicate so checkout can decide how it combines with other
//! promotions. [`quote_with_free_shipping`] is the merged form for callers
//! that want the threshold applied directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::ShippingMethod;

/// Cost breakdown for one shipping method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// Shipping cost before tax.
    pub cost: Decimal,
    /// Tax charged on the shipping cost.
    pub tax: Decimal,
    /// `cost + tax`.
    pub total: Decimal,
}

impl ShippingQuote {
    /// A quote with nothing to pay.
    pub const FREE: Self = Self {
        cost: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: Decimal::ZERO,
    };

    /// Whether nothing is charged.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.total.is_zero()
    }
}

/// Quote a shipping method. The subtotal does not affect the result.
///
/// A cost too large to tax without overflowing is quoted untaxed.
#[must_use]
pub fn quote(method: &ShippingMethod, _order_subtotal: Decimal) -> ShippingQuote {
    let cost = method.cost.unwrap_or(Decimal::ZERO);
    let untaxed = ShippingQuote {
        cost,
        tax: Decimal::ZERO,
        total: cost,
    };
    if !method.taxable {
        return untaxed;
    }

    let rate = clamped_rate(method.tax_rate);
    let taxed = cost
        .checked_mul(rate)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .and_then(|tax| cost.checked_add(tax).map(|total| ShippingQuote { cost, tax, total }));

    taxed.unwrap_or_else(|| {
        tracing::debug!(%cost, %rate, "Shipping tax overflowed, quoting untaxed");
        untaxed
    })
}

/// Whether the order subtotal reaches the method's free shipping threshold.
///
/// A missing or non-positive threshold disables free shipping.
#[must_use]
pub fn is_free_shipping_eligible(method: &ShippingMethod, order_subtotal: Decimal) -> bool {
    method
        .free_threshold
        .is_some_and(|threshold| threshold > Decimal::ZERO && order_subtotal >= threshold)
}

/// Quote a shipping method with its free shipping threshold applied.
#[must_use]
pub fn quote_with_free_shipping(method: &ShippingMethod, order_subtotal: Decimal) -> ShippingQuote {
    if is_free_shipping_eligible(method, order_subtotal) {
        ShippingQuote::FREE
    } else {
        quote(method, order_subtotal)
    }
}

/// Tax rates are percentages; clamp malformed data into `0..=100`.
fn clamped_rate(rate: Decimal) -> Decimal {
    rate.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}
