//! Raw search query parameters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One query parameter value: a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Many(Vec<String>),
}

impl QueryValue {
    /// Every value, in the order given.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for QueryValue {
    fn from(values: Vec<S>) -> Self {
        Self::Many(values.into_iter().map(Into::into).collect())
    }
}

/// Flat map of query parameters, as a storefront URL carries them.
///
/// Deserializes from a JSON object whose values are strings or string arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(BTreeMap<String, QueryValue>);

impl SearchQuery {
    /// An empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL query string (with or without the leading `?`).
    ///
    /// Repeated keys collect into a list, as do `key[]` and `key[0]` forms.
    ///
    /// ```
    /// use shopfront_resolver::SearchQuery;
    ///
    /// let query = SearchQuery::from_query_string("?brand[]=acme&brand[]=globex&sort=newest");
    /// assert_eq!(query.values("brand"), ["acme", "globex"]);
    /// assert_eq!(query.first("sort"), Some("newest"));
    /// ```
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            parsed.append(&key, value.into_owned());
        }
        parsed
    }

    /// Set `key` to `value`, replacing anything already there.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Add one value under `key`, turning an existing value into a list.
    pub fn append(&mut self, key: &str, value: String) {
        let (name, is_list) = normalize_key(key);
        match self.0.get_mut(name) {
            None if is_list => {
                self.0.insert(name.to_owned(), QueryValue::Many(vec![value]));
            }
            None => {
                self.0.insert(name.to_owned(), QueryValue::Single(value));
            }
            Some(existing) => {
                *existing = match std::mem::replace(existing, QueryValue::Many(Vec::new())) {
                    QueryValue::Single(first) => QueryValue::Many(vec![first, value]),
                    QueryValue::Many(mut values) => {
                        values.push(value);
                        QueryValue::Many(values)
                    }
                };
            }
        }
    }

    /// Raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.0.get(key)
    }

    /// Non-empty values for `key`, in the order given.
    #[must_use]
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .map(QueryValue::as_slice)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .collect()
    }

    /// First non-empty value for `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values(key).into_iter().next()
    }

    /// Whether `key` carries at least one non-empty value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.first(key).is_some()
    }
}

/// Strip `[]` / `[n]` suffixes; the flag reports whether one was present.
fn normalize_key(key: &str) -> (&str, bool) {
    key.strip_suffix(']')
        .and_then(|rest| rest.rsplit_once('['))
        .filter(|(name, index)| !name.is_empty() && index.chars().all(|c| c.is_ascii_digit()))
        .map_or((key, false), |(name, _)| (name, true))
}
