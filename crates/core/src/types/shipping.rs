//! Shipping method configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shipping method offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingMethod {
    /// Method ID.
    pub id: Option<String>,
    /// Display name (e.g., "Standard").
    pub name: Option<String>,
    /// Flat shipping cost. Missing means free.
    pub cost: Option<Decimal>,
    /// Whether tax is charged on the shipping cost.
    pub taxable: bool,
    /// Tax rate in percent (0-100).
    pub tax_rate: Decimal,
    /// Order subtotal that unlocks free shipping. `None` or zero disables it.
    pub free_threshold: Option<Decimal>,
}

impl ShippingMethod {
    /// A method with a flat, untaxed cost.
    #[must_use]
    pub fn flat(cost: Decimal) -> Self {
        Self {
            cost: Some(cost),
            ..Self::default()
        }
    }

    /// Set the tax rate (percent) and mark the method taxable.
    #[must_use]
    pub fn taxed(mut self, tax_rate: Decimal) -> Self {
        self.taxable = true;
        self.tax_rate = tax_rate;
        self
    }

    /// Set the free shipping threshold.
    #[must_use]
    pub fn free_over(mut self, threshold: Decimal) -> Self {
        self.free_threshold = Some(threshold);
        self
    }
}
