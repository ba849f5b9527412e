//! Currency display configuration.
//!
//! Currencies come from the store's currency collection. Every field is
//! optional because merchants can leave any of them blank; rendering code
//! degrades instead of failing when the data is incomplete.

use serde::{Deserialize, Serialize};

/// Placeholder that a currency format template must contain.
pub const AMOUNT_PLACEHOLDER: &str = "{{amount}}";

/// Currency display settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Currency {
    /// ISO 4217 currency code (e.g., "USD").
    pub code: Option<String>,
    /// International symbol (e.g., "US$").
    pub symbol: Option<String>,
    /// Symbol used in the currency's home locale (e.g., "$").
    pub symbol_native: Option<String>,
    /// Minor unit digits. Display always uses two decimals.
    pub decimal_digits: Option<u32>,
    /// Rounding increment published for the currency.
    pub rounding: Option<String>,
    /// Display template containing [`AMOUNT_PLACEHOLDER`], possibly with
    /// `\uXXXX` escapes (e.g., `"£{{amount}}"`).
    pub format: Option<String>,
}

impl Currency {
    /// A currency that renders through an explicit template.
    #[must_use]
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            ..Self::default()
        }
    }

    /// A currency that renders as its native symbol followed by the amount.
    #[must_use]
    pub fn with_symbol(symbol_native: impl Into<String>) -> Self {
        Self {
            symbol_native: Some(symbol_native.into()),
            ..Self::default()
        }
    }

    /// The configured template, if it contains the amount placeholder.
    #[must_use]
    pub fn usable_format(&self) -> Option<&str> {
        self.format
            .as_deref()
            .filter(|template| template.contains(AMOUNT_PLACEHOLDER))
    }
}
