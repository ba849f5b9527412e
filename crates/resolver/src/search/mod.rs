//! Catalog search filters.
//!
//! Compiles storefront query parameters into a [`FilterNode`] tree and a
//! [`SortKey`] for the document store to execute. Every parameter is
//! optional; missing, empty or unparseable values simply add no clause.
//!
//! Recognized parameters:
//! - `brand`, `collection` - one or more exact values
//! - `minPrice`, `maxPrice` - inclusive price bounds
//! - `opt_<dimensionId>` - one or more option values for a known dimension
//! - `sort` - see [`SortKey::parse`]

mod filter;
mod query;

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use shopfront_core::{OptionDimension, ProductType};
use tracing::instrument;

pub use filter::{Condition, FilterNode, FilterValue, Operator};
pub use query::{QueryValue, SearchQuery};

/// Store field names used in compiled filters.
pub mod fields {
    pub const BRAND: &str = "brand";
    pub const COLLECTION: &str = "collection";
    pub const PRODUCT_TYPE: &str = "type";
    pub const PRICE: &str = "price";
    pub const VARIANT_PRICE: &str = "variants.price";

    /// Field holding a variant's value for one option dimension.
    #[must_use]
    pub fn variant_option(dimension_id: &str) -> String {
        format!("variants.selection.{dimension_id}.value")
    }
}

/// Query parameter prefix for option dimension filters.
pub const OPTION_PARAM_PREFIX: &str = "opt_";

/// Sort order passed to the store.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    TitleAsc,
    TitleDesc,
    #[default]
    Newest,
    Oldest,
}

impl SortKey {
    /// Parse from the `sort` URL parameter. Unknown values sort newest first.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "name-asc" => Self::TitleAsc,
            "name-desc" => Self::TitleDesc,
            "oldest" => Self::Oldest,
            _ => Self::Newest,
        }
    }

    /// The store's sort expression (`-` prefix means descending).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceAsc => "price",
            Self::PriceDesc => "-price",
            Self::TitleAsc => "title",
            Self::TitleDesc => "-title",
            Self::Newest => "-createdAt",
            Self::Oldest => "createdAt",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A compiled search: filter tree plus sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogFilter {
    pub filter: FilterNode,
    pub sort: SortKey,
}

impl CatalogFilter {
    /// Top-level clauses of the filter.
    #[must_use]
    pub fn clauses(&self) -> &[FilterNode] {
        self.filter.children()
    }
}

/// Compile query parameters into a store filter and sort key.
///
/// `dimensions` lists the option dimensions that exist; `opt_` parameters for
/// anything else are ignored. `collection` is only honored when
/// `allow_collection_filter` is set.
#[must_use]
#[instrument(skip(query, dimensions), fields(dimensions = dimensions.len()))]
pub fn build_filter(
    query: &SearchQuery,
    dimensions: &[OptionDimension],
    allow_collection_filter: bool,
) -> CatalogFilter {
    let mut clauses = Vec::new();

    let brands = query.values("brand");
    if !brands.is_empty() {
        clauses.push(FilterNode::is_in(fields::BRAND, brands));
    }

    if allow_collection_filter {
        let collections = query.values("collection");
        if !collections.is_empty() {
            clauses.push(FilterNode::is_in(fields::COLLECTION, collections));
        }
    }

    if let Some(min) = parse_amount(query, "minPrice") {
        clauses.push(price_bound(min, |field, amount| FilterNode::at_least(field, amount)));
    }

    if let Some(max) = parse_amount(query, "maxPrice") {
        clauses.push(price_bound(max, |field, amount| FilterNode::at_most(field, amount)));
    }

    for dimension in dimensions {
        let key = format!("{OPTION_PARAM_PREFIX}{}", dimension.id);
        let values = query.values(&key);
        if values.is_empty() {
            continue;
        }
        let field = fields::variant_option(dimension.id.as_str());
        clauses.push(FilterNode::any(
            values
                .into_iter()
                .map(|value| FilterNode::equals(field.clone(), value))
                .collect(),
        ));
    }

    let sort = query.first("sort").map(SortKey::parse).unwrap_or_default();

    tracing::debug!(clauses = clauses.len(), %sort, "Compiled catalog filter");

    CatalogFilter {
        filter: FilterNode::all(clauses),
        sort,
    }
}

/// Price lives on the product for simple products and on each variant for
/// variant products, so a bound checks both shapes.
fn price_bound(amount: Decimal, compare: fn(&'static str, Decimal) -> FilterNode) -> FilterNode {
    FilterNode::any(vec![
        FilterNode::all(vec![
            FilterNode::equals(fields::PRODUCT_TYPE, ProductType::Simple.as_str()),
            compare(fields::PRICE, amount),
        ]),
        FilterNode::all(vec![
            FilterNode::equals(fields::PRODUCT_TYPE, ProductType::Variant.as_str()),
            compare(fields::VARIANT_PRICE, amount),
        ]),
    ])
}

fn parse_amount(query: &SearchQuery, key: &str) -> Option<Decimal> {
    let raw = query.first(key)?;
    match Decimal::from_str(raw.trim()) {
        Ok(amount) => Some(amount),
        Err(e) => {
            tracing::debug!(key, raw, error = %e, "Ignoring unparseable price filter");
            None
        }
    }
}
