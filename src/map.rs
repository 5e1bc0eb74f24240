//! Ordered table type.
//!
//! [`Table`] wraps an [`IndexMap`] so keys come back out in the order they
//! were read. The writer relies on that order, which keeps a document's layout
//! stable across a read-modify-write cycle.
//!
//! Besides plain key access, a table can be addressed with dotted paths
//! (`"server.tls.cert"`), which is how configuration layers usually talk to a
//! document:
//!
//! ```rust
//! use tomlite::{Table, Value};
//!
//! let mut table = Table::new();
//! table.insert_path("server.port", Value::from(8080)).unwrap();
//!
//! assert!(table.contains_path("server.port"));
//! assert_eq!(table.get_path("server.port").and_then(Value::as_i64), Some(8080));
//! ```

use crate::{Error, Result, Value};
use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to TOML values.
///
/// # Examples
///
/// ```rust
/// use tomlite::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("first".to_string(), Value::from(1));
/// table.insert("second".to_string(), Value::from(2));
///
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, Value>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Creates an empty `Table` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the table, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the table, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the entries of the table, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, Value> {
        self.0.iter_mut()
    }

    pub(crate) fn get_or_insert_with<F>(&mut self, key: &str, default: F) -> &mut Value
    where
        F: FnOnce() -> Value,
    {
        self.0.entry(key.to_string()).or_insert_with(default)
    }

    /// Borrows the underlying map.
    #[must_use]
    pub fn as_map(&self) -> &IndexMap<String, Value> {
        &self.0
    }

    /// Unwraps the underlying map.
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }

    /// Looks up a dotted path such as `"a.b.c"`.
    ///
    /// Every segment but the last must name a table.
    ///
    /// ```rust
    /// use tomlite::read;
    ///
    /// let doc = read("[owner]\nname = \"Tom\"\n").unwrap();
    /// assert_eq!(doc.get_path("owner.name").and_then(|v| v.as_str()), Some("Tom"));
    /// assert!(doc.get_path("owner.age").is_none());
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let (parents, last) = split_path(path);
        let mut table = self;
        for segment in parents {
            table = table.get(segment)?.as_table()?;
        }
        table.get(last)
    }

    /// Mutable counterpart of [`Table::get_path`].
    pub fn get_path_mut(&mut self, path: &str) -> Option<&mut Value> {
        let (parents, last) = split_path(path);
        let mut table = self;
        for segment in parents {
            table = table.get_mut(segment)?.as_table_mut()?;
        }
        table.get_mut(last)
    }

    /// Returns `true` if a value exists at the dotted path.
    #[must_use]
    pub fn contains_path(&self, path: &str) -> bool {
        self.get_path(path).is_some()
    }

    /// Inserts a value at a dotted path, creating missing intermediate tables.
    ///
    /// Returns the value previously stored at the path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathConflict`] if an intermediate segment holds a
    /// value that is not a table.
    pub fn insert_path(&mut self, path: &str, value: Value) -> Result<Option<Value>> {
        let (parents, last) = split_path(path);
        let mut table = self;
        let mut walked = String::new();
        for segment in parents {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);
            table = table
                .0
                .entry(segment.to_string())
                .or_insert_with(|| Value::Table(Table::new()))
                .as_table_mut()
                .ok_or_else(|| Error::PathConflict(walked.clone()))?;
        }
        Ok(table.insert(last.to_string(), value))
    }

    /// Removes and returns the value at a dotted path.
    ///
    /// Intermediate tables left empty by the removal are kept.
    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        let (parents, last) = split_path(path);
        let mut table = self;
        for segment in parents {
            table = table.get_mut(segment)?.as_table_mut()?;
        }
        table.remove(last)
    }
}

fn split_path(path: &str) -> (Vec<&str>, &str) {
    let mut segments: Vec<&str> = path.split('.').collect();
    // split always yields at least one segment
    let last = segments.pop().unwrap_or_default();
    (segments, last)
}

impl From<HashMap<String, Value>> for Table {
    fn from(map: HashMap<String, Value>) -> Self {
        Table(map.into_iter().collect())
    }
}

impl From<IndexMap<String, Value>> for Table {
    fn from(map: IndexMap<String, Value>) -> Self {
        Table(map)
    }
}

impl From<Table> for HashMap<String, Value> {
    fn from(table: Table) -> Self {
        table.0.into_iter().collect()
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_path_creates_tables() {
        let mut table = Table::new();
        assert_eq!(table.insert_path("a.b.c", Value::from(1)).unwrap(), None);
        assert!(table.get("a").unwrap().is_table());
        assert_eq!(table.get_path("a.b.c"), Some(&Value::from(1)));

        let previous = table.insert_path("a.b.c", Value::from(2)).unwrap();
        assert_eq!(previous, Some(Value::from(1)));
    }

    #[test]
    fn test_insert_path_conflict() {
        let mut table = Table::new();
        table.insert("a".to_string(), Value::from("scalar"));
        let err = table.insert_path("a.b", Value::from(1)).unwrap_err();
        assert_eq!(err, Error::PathConflict("a".to_string()));
    }

    #[test]
    fn test_remove_path_keeps_order() {
        let mut table = Table::new();
        table.insert_path("x.one", Value::from(1)).unwrap();
        table.insert_path("x.two", Value::from(2)).unwrap();
        table.insert_path("x.three", Value::from(3)).unwrap();

        assert_eq!(table.remove_path("x.two"), Some(Value::from(2)));
        assert_eq!(table.remove_path("x.two"), None);
        assert_eq!(table.remove_path("missing.key"), None);

        let inner = table.get("x").and_then(Value::as_table).unwrap();
        let keys: Vec<_> = inner.keys().cloned().collect();
        assert_eq!(keys, vec!["one", "three"]);
    }

    #[test]
    fn test_get_path_mut() {
        let mut table = Table::new();
        table.insert_path("a.b", Value::from(1)).unwrap();
        if let Some(value) = table.get_path_mut("a.b") {
            *value = Value::from("changed");
        }
        assert_eq!(table.get_path("a.b").and_then(Value::as_str), Some("changed"));
    }
}
