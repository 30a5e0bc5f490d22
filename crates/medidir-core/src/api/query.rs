//! Query-string construction for list fetches.
//!
//! A [`FilterMap`] keeps keys in insertion order; absent values and empty
//! strings never reach the wire.

use std::fmt;

/// Scalar value of a single filter field.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl QueryValue {
    fn is_blank(&self) -> bool {
        matches!(self, QueryValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Text(s) => f.write_str(s),
            QueryValue::Int(n) => write!(f, "{}", n),
            QueryValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Int(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        QueryValue::Int(i64::from(value))
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        // ids above i64::MAX do not exist in the directory
        QueryValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// Insertion-ordered mapping from filter name to optional scalar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterMap {
    entries: Vec<(String, Option<QueryValue>)>,
}

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`. Re-inserting an existing key replaces its value in place.
    pub fn insert<V>(&mut self, key: &str, value: Option<V>) -> &mut Self
    where
        V: Into<QueryValue>,
    {
        let value = value.map(Into::into);
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
        self
    }

    /// Builder form of [`FilterMap::insert`].
    pub fn with<V>(mut self, key: &str, value: Option<V>) -> Self
    where
        V: Into<QueryValue>,
    {
        self.insert(key, value);
        self
    }

    /// Append every entry of `other` after the current ones.
    pub fn extend(&mut self, other: FilterMap) {
        for (key, value) in other.entries {
            self.insert(&key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Entries that would be emitted by [`build_query_string`].
    pub fn present(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().filter_map(|(k, v)| match v {
            Some(value) if !value.is_blank() => Some((k.as_str(), value)),
            _ => None,
        })
    }

    /// True when no entry carries a usable value.
    pub fn is_blank(&self) -> bool {
        self.present().next().is_none()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Encode a filter mapping as `k=v&k2=v2` without a leading `?`.
pub fn build_query_string(filters: &FilterMap) -> String {
    filters
        .present()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(&value.to_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Append a query string to a path, omitting `?` when there is nothing to add.
pub fn with_query(path: &str, filters: &FilterMap) -> String {
    let query = build_query_string(filters);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_maps_produce_empty_query() {
        let maps = vec![
            FilterMap::new(),
            FilterMap::new().with::<String>("name", None),
            FilterMap::new().with("name", Some("")),
            FilterMap::new()
                .with("name", Some(""))
                .with::<u64>("districtId", None)
                .with::<bool>("active", None),
        ];
        for map in maps {
            assert!(map.is_blank());
            assert_eq!(build_query_string(&map), "");
        }
    }

    #[test]
    fn test_only_present_keys_are_emitted() {
        let map = FilterMap::new()
            .with("name", Some("Sarah"))
            .with::<u64>("hospitalId", None)
            .with("degreeId", Some(7u64))
            .with("bmdcNo", Some(""))
            .with("verified", Some(false));

        let query = build_query_string(&map);
        let keys: Vec<&str> = query
            .split('&')
            .map(|pair| pair.split('=').next().unwrap())
            .collect();
        assert_eq!(keys, vec!["name", "degreeId", "verified"]);
        assert_eq!(query, "name=Sarah&degreeId=7&verified=false");
    }

    #[test]
    fn test_insertion_order_and_replacement() {
        let mut map = FilterMap::new();
        map.insert("page", Some(0u32))
            .insert("size", Some(10u32))
            .insert("name", Some("Sarah"));
        map.insert("page", Some(3u32));
        assert_eq!(build_query_string(&map), "page=3&size=10&name=Sarah");
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("page"), Some(&QueryValue::Int(3)));
    }

    #[test]
    fn test_values_are_url_encoded() {
        let map = FilterMap::new().with("name", Some("Dr. Rahman & Sons"));
        assert_eq!(build_query_string(&map), "name=Dr.%20Rahman%20%26%20Sons");
    }

    #[test]
    fn test_extend_keeps_prefix_first() {
        let mut map = FilterMap::new()
            .with("page", Some(0u32))
            .with("size", Some(10u32));
        map.extend(FilterMap::new().with("name", Some("Sarah")));
        assert_eq!(build_query_string(&map), "page=0&size=10&name=Sarah");
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/degrees", &FilterMap::new()), "/degrees");
        assert_eq!(
            with_query("/doctors", &FilterMap::new().with("page", Some(1u32))),
            "/doctors?page=1"
        );
    }
}
