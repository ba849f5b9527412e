//! Price display and shipping cost calculation.

mod currency;
mod shipping;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopfront_core::{Product, ProductType};

pub use currency::{PriceFormatter, format_price};
pub use shipping::{
    ShippingQuote, is_free_shipping_eligible, quote, quote_with_free_shipping,
};

/// Lowest and highest price a product sells for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Minimum price among all variants.
    pub min: Decimal,
    /// Maximum price among all variants.
    pub max: Decimal,
}

impl PriceRange {
    /// Whether every variant costs the same.
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.min == self.max
    }

    /// Render the range, e.g. `"$10.00"` or `"$10.00 - $15.00"`.
    ///
    /// Empty when the formatter cannot render prices.
    #[must_use]
    pub fn display(&self, formatter: &PriceFormatter) -> String {
        let min = formatter.format(self.min);
        if self.is_single() || min.is_empty() {
            return min;
        }
        format!("{min} - {}", formatter.format(self.max))
    }
}

/// Price range of a product.
///
/// Simple products use their own price; variant products span their priced
/// variants. `None` when nothing is priced.
#[must_use]
pub fn price_range(product: &Product) -> Option<PriceRange> {
    match product.product_type {
        ProductType::Simple => product.price.map(|price| PriceRange {
            min: price,
            max: price,
        }),
        ProductType::Variant => product
            .variants
            .iter()
            .filter_map(|variant| variant.price)
            .fold(None, |range: Option<PriceRange>, price| {
                Some(range.map_or(PriceRange { min: price, max: price }, |range| PriceRange {
                    min: range.min.min(price),
                    max: range.max.max(price),
                }))
            }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::{Currency, Variant};

    use super::*;

    fn priced(price: i64) -> Variant {
        let mut variant = Variant::with_selection([("size", price.to_string())]);
        variant.price = Some(Decimal::from(price));
        variant
    }

    #[test]
    fn test_price_range_variants() {
        let product = Product::with_variants(vec![priced(15), priced(10), priced(12)]);
        let range = price_range(&product).unwrap();
        assert_eq!(range.min, Decimal::from(10));
        assert_eq!(range.max, Decimal::from(15));

        let formatter = PriceFormatter::new(Currency::with_symbol("$"));
        assert_eq!(range.display(&formatter), "$10.00 - $15.00");
    }

    #[test]
    fn test_price_range_simple() {
        let range = price_range(&Product::simple(Decimal::from(8))).unwrap();
        assert!(range.is_single());
        let formatter = PriceFormatter::new(Currency::with_format("{{amount}} EUR"));
        assert_eq!(range.display(&formatter), "8.00 EUR");
    }

    #[test]
    fn test_price_range_unpriced() {
        let product = Product::with_variants(vec![Variant::with_selection([("size", "S")])]);
        assert!(price_range(&product).is_none());
        assert_eq!(
            price_range(&Product::simple(Decimal::ONE))
                .unwrap()
                .display(&PriceFormatter::default()),
            ""
        );
    }
}
