//! Price preview command.

use std::path::Path;

use rust_decimal::Decimal;
use shopfront_core::Currency;
use shopfront_resolver::format_price;

use super::{CliError, read_json};

/// Render `amount` with the currency read from `currency_path`.
///
/// Prints an empty line when the currency cannot render prices.
#[allow(clippy::print_stdout)]
pub fn format(amount: Decimal, currency_path: &Path, rate: Option<Decimal>) -> Result<(), CliError> {
    let currency: Currency = read_json(currency_path)?;
    let rendered = format_price(amount, &currency, rate);
    if rendered.is_empty() {
        tracing::warn!(
            code = currency.code.as_deref().unwrap_or_default(),
            "Currency has no usable template or symbol"
        );
    }
    println!("{rendered}");
    Ok(())
}
