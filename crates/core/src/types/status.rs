//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Whether a product is sold as-is or through option variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// A single sellable item with its own price and no options.
    #[default]
    Simple,
    /// Sold through variants, one per option combination.
    Variant,
}

impl ProductType {
    /// The value stored in the document store's `type` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Variant => "variant",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock status of a variant as recorded by the store.
///
/// Values the store adds later deserialize as [`StockStatus::Unknown`] and are
/// never considered sellable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    OnBackorder,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InStock => write!(f, "in_stock"),
            Self::OutOfStock => write!(f, "out_of_stock"),
            Self::OnBackorder => write!(f, "on_backorder"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(Self::InStock),
            "out_of_stock" => Ok(Self::OutOfStock),
            "on_backorder" => Ok(Self::OnBackorder),
            _ => Err(format!("invalid stock status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_stock_status_deserializes() {
        let status: StockStatus = serde_json::from_str("\"preorder\"").unwrap();
        assert_eq!(status, StockStatus::Unknown);
    }

    #[test]
    fn test_stock_status_from_str() {
        assert_eq!("in_stock".parse::<StockStatus>().unwrap(), StockStatus::InStock);
        assert!("In Stock".parse::<StockStatus>().is_err());
    }

    #[test]
    fn test_product_type_serde() {
        let ty: ProductType = serde_json::from_str("\"variant\"").unwrap();
        assert_eq!(ty, ProductType::Variant);
        assert_eq!(serde_json::to_string(&ProductType::Simple).unwrap(), "\"simple\"");
    }
}
