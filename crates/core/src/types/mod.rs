//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod currency;
pub mod id;
pub mod shipping;
pub mod status;

pub use catalog::{
    OptionCatalog, OptionDimension, OptionValue, Product, SelectedOption, Variant,
};
pub use currency::{AMOUNT_PLACEHOLDER, Currency};
pub use id::*;
pub use shipping::ShippingMethod;
pub use status::*;
