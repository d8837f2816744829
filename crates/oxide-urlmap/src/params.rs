//! Route parameter maps.

use std::collections::hash_map::{self, HashMap};

use serde::{Deserialize, Serialize};

/// Parameters produced by a match, or supplied for URL generation.
///
/// Every key maps to an optional value. A key without a value is a named
/// placeholder that exists on the route but was neither matched nor
/// defaulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params {
    params: HashMap<String, Option<String>>,
}

impl Params {
    /// Creates new empty params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a parameter with a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), Some(value.into()));
    }

    /// Inserts a parameter that has no value.
    pub fn insert_unset(&mut self, key: impl Into<String>) {
        self.params.insert(key.into(), None);
    }

    /// Inserts a parameter with an optional value.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<String>) {
        self.params.insert(key.into(), value);
    }

    /// Gets a parameter value. Keys without a value return `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Option::as_deref)
    }

    /// Returns true if the key is present, with or without a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Returns true if the key is present and has a value.
    #[must_use]
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes a parameter, returning its entry if it existed.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.params.remove(key)
    }

    /// Parses a parameter as a specific type.
    #[must_use]
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.parse().ok())
    }

    /// Overlays `other` on top of these params. Keys in `other` win.
    pub fn merge(&mut self, other: &Self) {
        for (key, value) in &other.params {
            self.params.insert(key.clone(), value.clone());
        }
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Returns an iterator over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Applies `f` to every value that is set.
    pub(crate) fn map_values(&mut self, f: impl Fn(&str) -> String) {
        for value in self.params.values_mut().flatten() {
            *value = f(value.as_str());
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for Params {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<S: std::hash::BuildHasher> From<&HashMap<String, String, S>> for Params {
    fn from(map: &HashMap<String, String, S>) -> Self {
        map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }
}

impl IntoIterator for Params {
    type Item = (String, Option<String>);
    type IntoIter = hash_map::IntoIter<String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_unset() {
        let mut params = Params::new();
        params.insert("id", "123");
        params.insert_unset("format");

        assert_eq!(params.get("id"), Some("123"));
        assert_eq!(params.parse::<i64>("id"), Some(123));
        assert_eq!(params.get("format"), None);
        assert!(params.contains_key("format"));
        assert!(!params.is_set("format"));
        assert!(!params.contains_key("missing"));
    }

    #[test]
    fn test_merge_overwrites() {
        let mut base = Params::from([("action", "index"), ("format", "html")]);
        let mut over = Params::from([("action", "view")]);
        over.insert_unset("id");
        base.merge(&over);

        assert_eq!(base.get("action"), Some("view"));
        assert_eq!(base.get("format"), Some("html"));
        assert!(base.contains_key("id"));
        assert_eq!(base.len(), 3);
    }

    #[test]
    fn test_serializes_as_map() {
        let mut params = Params::from([("id", "7")]);
        params.insert_unset("slug");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value, serde_json::json!({"id": "7", "slug": null}));
    }
}
