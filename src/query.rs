//! Listing query strings.
//!
//! [`QueryParams`] keeps keys in insertion order so that the same filter set
//! always serializes to the same string.

use rust_decimal::Decimal;
use url::form_urlencoded;

#[derive(Clone, Debug, PartialEq)]
pub enum QueryValue {
    Text(String),
    Number(i64),
    Decimal(Decimal),
    Bool(bool),
    Null,
}

impl QueryValue {
    /// `None` for values that are left out of the query.
    fn render(&self) -> Option<String> {
        match self {
            Self::Text(s) if s.is_empty() => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Decimal(d) => Some(d.normalize().to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self { Self::Text(value.to_string()) }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self { Self::Text(value) }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self { Self::Number(value) }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self { Self::Number(i64::from(value)) }
}

impl From<Decimal> for QueryValue {
    fn from(value: Decimal) -> Self { Self::Decimal(value) }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self { Self::Bool(value) }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self { value.map_or(Self::Null, Into::into) }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, QueryValue)>,
}

impl QueryParams {
    pub fn new() -> Self { Self::default() }

    /// Replaces an existing key in place, otherwise appends.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Serializes `params` as `key=value&...`, skipping null and empty values.
pub fn build_query(params: &QueryParams) -> String {
    params
        .iter()
        .filter_map(|(key, value)| value.render().map(|v| format!("{}={}", encode(key), encode(&v))))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(raw: &str) -> String { form_urlencoded::byte_serialize(raw.as_bytes()).collect() }
