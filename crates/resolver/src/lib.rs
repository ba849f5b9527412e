//! Shopfront resolution layer.
//!
//! Pure decision logic applied to catalog data already fetched from the
//! document store:
//!
//! - [`variants`] - Resolve option selections to variants and list what is purchasable
//! - [`pricing`] - Currency display strings and shipping quotes
//! - [`search`] - Compile query parameters into a store filter tree and sort key
//! - [`tokens`] - Encrypted capability tokens granting guest access to one order
//!
//! Nothing here performs I/O. Every function takes the currency, option
//! catalog or secret it needs as an argument, so all of it is safe to call
//! from any thread.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod pricing;
pub mod search;
pub mod tokens;
pub mod variants;

pub use config::{ConfigError, ResolverConfig};
pub use pricing::{PriceFormatter, ShippingQuote, format_price};
pub use search::{CatalogFilter, FilterNode, SearchQuery, SortKey, build_filter};
pub use tokens::{OrderGrant, OrderTokenCodec};
pub use variants::{Availability, EffectiveSelection, RequiredQuantity, find_variant};
