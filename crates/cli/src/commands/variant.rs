//! Variant resolution commands.

use std::path::Path;

use serde::Serialize;
use shopfront_core::{OptionCatalog, OptionDimension, Product, SelectedOption, Variant};
use shopfront_resolver::RequiredQuantity;
use shopfront_resolver::variants::{list_purchasable, resolve, stale_dimensions};

use super::{CliError, print_json, read_json};

#[derive(Serialize)]
struct MatchOutput<'a> {
    status: &'static str,
    variant: Option<&'a Variant>,
}

fn load(product_path: &Path, dimensions_path: &Path) -> Result<(Product, OptionCatalog), CliError> {
    let product: Product = read_json(product_path)?;
    let dimensions: Vec<OptionDimension> = read_json(dimensions_path)?;
    let catalog = OptionCatalog::new(dimensions);

    let stale = stale_dimensions(&product, &catalog);
    if !stale.is_empty() {
        tracing::warn!(?stale, "Product references option dimensions that no longer exist");
    }
    Ok((product, catalog))
}

/// Resolve `selection` and print the outcome with the matched variant.
pub fn find(
    product_path: &Path,
    dimensions_path: &Path,
    selection: &[SelectedOption],
    quantity: u32,
) -> Result<(), CliError> {
    let (product, catalog) = load(product_path, dimensions_path)?;
    let outcome = resolve(&product, selection, &catalog, RequiredQuantity::new(quantity));

    print_json(&MatchOutput {
        status: outcome.as_str(),
        variant: outcome.variant(),
    })
}

/// Print every purchasable option combination, or `null` for simple products.
pub fn available(product_path: &Path, dimensions_path: &Path, quantity: u32) -> Result<(), CliError> {
    let (product, catalog) = load(product_path, dimensions_path)?;
    let purchasable = list_purchasable(&product, &catalog, RequiredQuantity::new(quantity));
    if let Some(selections) = &purchasable {
        tracing::info!(count = selections.len(), "Listed purchasable variants");
    }
    print_json(&purchasable)
}
