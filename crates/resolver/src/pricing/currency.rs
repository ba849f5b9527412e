//! Currency display strings.
//!
//! Rendering never fails: when a currency has neither a usable template nor
//! a native symbol the result is an empty string, which callers treat as
//! "price unavailable". Amounts always use two decimals, a `.` separator and
//! no digit grouping, whatever the currency's own minor units are.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use shopfront_core::{AMOUNT_PLACEHOLDER, Currency};

/// `\uXXXX` (UTF-16 code unit) or `\u{X...}` (code point) escapes.
static UNICODE_ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\u\{([0-9A-Fa-f]{1,6})\}|\\u([0-9A-Fa-f]{4})").expect("Invalid regex")
});

const DISPLAY_DECIMALS: u32 = 2;

/// Render a price in `currency`, converted by `exchange_rate`.
///
/// A missing, zero or negative exchange rate counts as 1. The template is
/// the currency's `format` when it contains `{{amount}}`, otherwise its
/// native symbol followed by the amount.
///
/// ```
/// use rust_decimal::Decimal;
/// use shopfront_core::Currency;
/// use shopfront_resolver::format_price;
///
/// let usd = Currency::with_format("{{amount}} USD");
/// assert_eq!(format_price(Decimal::new(195, 1), &usd, None), "19.50 USD");
/// assert_eq!(format_price(Decimal::TEN, &Currency::default(), None), "");
/// ```
#[must_use]
pub fn format_price(raw_price: Decimal, currency: &Currency, exchange_rate: Option<Decimal>) -> String {
    let rate = effective_rate(exchange_rate);
    let Some(amount) = raw_price.checked_mul(rate) else {
        tracing::debug!(%raw_price, %rate, "Converted price overflows, rendering empty price");
        return String::new();
    };

    let Some(template) = select_template(currency) else {
        tracing::debug!(
            currency = currency.code.as_deref().unwrap_or("<none>"),
            "Currency has no usable format or native symbol, rendering empty price"
        );
        return String::new();
    };

    decode_unicode_escapes(&template).replacen(AMOUNT_PLACEHOLDER, &format_amount(amount), 1)
}

/// Exchange rates that are not strictly positive fall back to 1.
fn effective_rate(exchange_rate: Option<Decimal>) -> Decimal {
    exchange_rate
        .filter(|rate| rate.is_sign_positive() && !rate.is_zero())
        .unwrap_or(Decimal::ONE)
}

/// Pick the display template, or `None` when neither source yields one with
/// the amount placeholder.
fn select_template(currency: &Currency) -> Option<Cow<'_, str>> {
    if let Some(format) = currency.usable_format() {
        return Some(Cow::Borrowed(format));
    }

    currency
        .symbol_native
        .as_deref()
        .filter(|symbol| !symbol.is_empty())
        .map(|symbol| Cow::Owned(format!("{symbol}{AMOUNT_PLACEHOLDER}")))
}

/// Fixed two decimals, rounding half away from zero.
fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
    // Avoid "-0.00" for tiny negative amounts.
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{rounded:.2}")
}

/// Replace `\uXXXX` and `\u{X...}` escapes with the characters they name.
///
/// A high surrogate directly followed by a low surrogate escape combines into
/// one character. Escapes that do not name a valid character stay as written.
fn decode_unicode_escapes(template: &str) -> Cow<'_, str> {
    if !template.contains("\\u") {
        return Cow::Borrowed(template);
    }

    let mut decoded = String::with_capacity(template.len());
    let mut last_end = 0;
    let mut escapes = UNICODE_ESCAPE_RE.captures_iter(template).peekable();

    while let Some(caps) = escapes.next() {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        decoded.push_str(template.get(last_end..whole.start()).unwrap_or_default());
        last_end = whole.end();

        if let Some(code_point) = caps.get(1) {
            match u32::from_str_radix(code_point.as_str(), 16).ok().and_then(char::from_u32) {
                Some(c) => decoded.push(c),
                None => decoded.push_str(whole.as_str()),
            }
            continue;
        }

        let Some(unit) = caps
            .get(2)
            .and_then(|unit| u32::from_str_radix(unit.as_str(), 16).ok())
        else {
            decoded.push_str(whole.as_str());
            continue;
        };

        if (0xD800..=0xDBFF).contains(&unit) {
            let low = escapes.peek().and_then(|next| {
                let next_whole = next.get(0)?;
                let low = u32::from_str_radix(next.get(2)?.as_str(), 16).ok()?;
                (next_whole.start() == whole.end() && (0xDC00..=0xDFFF).contains(&low))
                    .then_some((low, next_whole.end()))
            });

            if let Some((low, end)) = low {
                let combined = 0x1_0000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                if let Some(c) = char::from_u32(combined) {
                    decoded.push(c);
                    last_end = end;
                    escapes.next();
                    continue;
                }
            }
            decoded.push_str(whole.as_str());
            continue;
        }

        match char::from_u32(unit) {
            Some(c) => decoded.push(c),
            None => decoded.push_str(whole.as_str()),
        }
    }

    decoded.push_str(template.get(last_end..).unwrap_or_default());
    Cow::Owned(decoded)
}

/// Renders prices in one currency and exchange rate.
///
/// Build one per request from the active currency instead of reading it from
/// global settings.
#[derive(Debug, Clone, Default)]
pub struct PriceFormatter {
    currency: Currency,
    exchange_rate: Option<Decimal>,
}

impl PriceFormatter {
    /// A formatter for `currency` at the store's base rate.
    #[must_use]
    pub const fn new(currency: Currency) -> Self {
        Self {
            currency,
            exchange_rate: None,
        }
    }

    /// Convert amounts by `rate` before rendering.
    #[must_use]
    pub fn with_exchange_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    /// The active currency.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Render a price.
    #[must_use]
    pub fn format(&self, raw_price: Decimal) -> String {
        format_price(raw_price, &self.currency, self.exchange_rate)
    }

    /// Render an optional price; a missing price renders empty.
    #[must_use]
    pub fn format_opt(&self, raw_price: Option<Decimal>) -> String {
        raw_price.map(|price| self.format(price)).unwrap_or_default()
    }
}
