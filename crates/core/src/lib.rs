//! Shopfront Core - Shared types library.
//!
//! This crate provides the data model consumed by the resolution layer:
//! - `resolver` - Variant matching, availability, pricing, search filters and order tokens
//! - `cli` - Command-line tools that drive the resolver from JSON fixtures
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. Products, option dimensions, currencies and shipping
//! methods arrive from the document store as JSON and deserialize straight
//! into these types.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog types, currencies and shipping methods

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
