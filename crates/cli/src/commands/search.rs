//! Search filter compilation command.

use std::path::Path;

use shopfront_core::OptionDimension;
use shopfront_resolver::config::allow_collection_filter_from_env;
use shopfront_resolver::{SearchQuery, build_filter};

use super::{CliError, print_json, read_json};

/// Compile a query string and print `{"filter": ..., "sort": ...}`.
///
/// The `collection` parameter follows `SEARCH_ALLOW_COLLECTION_FILTER`
/// unless `no_collections` forces it off.
pub fn compile(query: &str, dimensions_path: Option<&Path>, no_collections: bool) -> Result<(), CliError> {
    let dimensions: Vec<OptionDimension> = match dimensions_path {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let allow_collection_filter = !no_collections && allow_collection_filter_from_env()?;

    let compiled = build_filter(
        &SearchQuery::from_query_string(query),
        &dimensions,
        allow_collection_filter,
    );
    print_json(&compiled)
}
