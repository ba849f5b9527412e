//! Identifier newtypes.
//!
//! The document store hands out opaque string identifiers. Wrapping each kind
//! in its own type keeps a dimension id from being passed where an order id
//! is expected.

/// Define a string identifier newtype.
///
/// The generated type has:
/// - transparent serde, so it reads and writes as a bare JSON string
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Borrow<str>` implementations
///
/// `Borrow<str>` lets maps keyed by the ID be queried with a plain `&str`.
///
/// # Example
///
/// ```rust
/// # use shopfront_core::define_id;
/// define_id!(WarehouseId);
/// define_id!(BinId);
///
/// let warehouse = WarehouseId::new("wh-1");
/// let bin = BinId::new("wh-1");
///
/// assert_eq!(warehouse.as_str(), bin.as_str());
/// // Distinct types: `let _: WarehouseId = bin;` is a type error.
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, out: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                out.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(DimensionId);
define_id!(ProductId);
define_id!(VariantId);
define_id!(OrderId);
