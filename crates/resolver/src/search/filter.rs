//! Declarative filter tree handed to the document store.
//!
//! Serializes to the store's JSON shape:
//!
//! ```json
//! {"and": [
//!   {"field": "brand", "operator": "in", "value": ["b1", "b2"]},
//!   {"or": [
//!     {"and": [{"field": "type", "operator": "equals", "value": "simple"},
//!              {"field": "price", "operator": "greater_than_equal", "value": "10"}]},
//!     {"and": [{"field": "type", "operator": "equals", "value": "variant"},
//!              {"field": "variants.price", "operator": "greater_than_equal", "value": "10"}]}
//!   ]}
//! ]}
//! ```
//!
//! Amounts serialize as decimal strings to preserve precision.

use rust_decimal::Decimal;
use serde::Serialize;

/// Comparison operators understood by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    In,
    GreaterThanEqual,
    LessThanEqual,
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
    Amount(Decimal),
}

/// A leaf comparison: `field operator value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    pub value: FilterValue,
}

/// A node of the filter tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterNode {
    /// Every child must hold. An empty `and` matches everything.
    And { and: Vec<FilterNode> },
    /// At least one child must hold.
    Or { or: Vec<FilterNode> },
    /// A single field comparison.
    Condition(Condition),
}

impl FilterNode {
    /// `field equals value`.
    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::condition(field, Operator::Equals, FilterValue::Text(value.into()))
    }

    /// `field in values`.
    #[must_use]
    pub fn is_in<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::condition(
            field,
            Operator::In,
            FilterValue::List(values.into_iter().map(Into::into).collect()),
        )
    }

    /// `field >= amount`.
    #[must_use]
    pub fn at_least(field: impl Into<String>, amount: Decimal) -> Self {
        Self::condition(field, Operator::GreaterThanEqual, FilterValue::Amount(amount))
    }

    /// `field <= amount`.
    #[must_use]
    pub fn at_most(field: impl Into<String>, amount: Decimal) -> Self {
        Self::condition(field, Operator::LessThanEqual, FilterValue::Amount(amount))
    }

    /// Conjunction of `nodes`.
    #[must_use]
    pub const fn all(nodes: Vec<Self>) -> Self {
        Self::And { and: nodes }
    }

    /// Disjunction of `nodes`.
    #[must_use]
    pub const fn any(nodes: Vec<Self>) -> Self {
        Self::Or { or: nodes }
    }

    fn condition(field: impl Into<String>, operator: Operator, value: FilterValue) -> Self {
        Self::Condition(Condition {
            field: field.into(),
            operator,
            value,
        })
    }

    /// Children of an `and`/`or` node; empty for a condition.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::And { and: nodes } | Self::Or { or: nodes } => nodes,
            Self::Condition(_) => &[],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serializes_store_shape() {
        let node = FilterNode::all(vec![
            FilterNode::is_in("brand", ["acme"]),
            FilterNode::any(vec![FilterNode::at_least("price", Decimal::new(1050, 2))]),
        ]);

        assert_eq!(
            serde_json::to_value(&node).unwrap(),
            json!({"and": [
                {"field": "brand", "operator": "in", "value": ["acme"]},
                {"or": [{"field": "price", "operator": "greater_than_equal", "value": "10.50"}]}
            ]})
        );
    }

    #[test]
    fn test_children() {
        let node = FilterNode::any(vec![FilterNode::equals("a", "1"), FilterNode::equals("b", "2")]);
        assert_eq!(node.children().len(), 2);
        assert!(FilterNode::equals("a", "1").children().is_empty());
    }
}
