//! Immutable ordered collections.
//!
//! A [`Collection`] maps [`Key`]s to [`Value`]s and remembers insertion
//! order. Integer-keyed collections with keys `0..n` in order behave like
//! lists; anything else is associative. Every manipulating operation returns
//! a new collection and leaves the receiver untouched:
//!
//! ```
//! use primitive_wrappers::{Collection, Value};
//!
//! let list = Collection::from(vec![1i64, 2, 3]);
//! let doubled = list.map(|v| Value::from(v.as_i64().unwrap_or(0) * 2));
//!
//! assert_eq!(doubled.to_vec(), vec![Value::Int(2), Value::Int(4), Value::Int(6)]);
//! assert_eq!(list.len(), 3);
//! assert!(!list.is_associative());
//! ```

pub mod json;
mod value;

use core::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::util;
pub use json::JsonOptions;
pub use value::Value;

/// A collection key: an integer index or a name.
///
/// Collections store a `Name` spelling a canonical integer (`"42"`) as the
/// matching `Index`, so `Name("0")` and `Index(0)` address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl Key {
    /// The index, when this is an integer key.
    pub fn as_index(&self) -> Option<i64> {
        match self {
            Key::Index(i) => Some(*i),
            Key::Name(_) => None,
        }
    }

    /// Whether this is a named key.
    pub fn is_name(&self) -> bool {
        matches!(self, Key::Name(_))
    }

    fn canonical(self) -> Key {
        match self {
            Key::Name(s) => Key::from(s),
            index => index,
        }
    }
}

/// Parse `s` as an index only when it is the canonical decimal form.
fn canonical_index(s: &str) -> Option<i64> {
    s.parse::<i64>().ok().filter(|n| n.to_string() == s)
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Index(i64::from(i))
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

/// `"42"` becomes `Index(42)`; `"042"`, `"+1"` and `"-0"` stay names.
impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match canonical_index(s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s.to_owned()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_index(&s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(s) => f.write_str(s),
        }
    }
}

/// An immutable, insertion-ordered key/value collection.
#[derive(Clone, Default)]
pub struct Collection {
    entries: Arc<IndexMap<Key, Value>>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list with keys `0..n`.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        values.into_iter().map(Into::<Value>::into).collect()
    }

    /// Build from key/value pairs. A repeated key keeps its first position
    /// and takes the later value.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        entries
            .into_iter()
            .map(|(k, v)| -> (Key, Value) { (k.into(), v.into()) })
            .collect()
    }

    fn from_map(entries: IndexMap<Key, Value>) -> Self {
        Collection {
            entries: Arc::new(entries),
        }
    }

    /// Whether both collections share the same storage.
    pub fn ptr_eq(&self, other: &Collection) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The value stored under `key`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.entries.get(&key.into().canonical())
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.entries.contains_key(&key.into().canonical())
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.entries.keys()
    }

    /// Values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.values()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Key, Value> {
        self.entries.iter()
    }

    /// The first entry.
    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.entries.first()
    }

    /// The last entry.
    pub fn last(&self) -> Option<(&Key, &Value)> {
        self.entries.last()
    }

    /// The values, in order.
    pub fn to_vec(&self) -> Vec<Value> {
        self.entries.values().cloned().collect()
    }

    /// Nesting depth: 1 for a flat collection, plus one per nested level.
    pub fn depth(&self) -> usize {
        1 + self.values().map(Value::depth).max().unwrap_or(0)
    }

    /// Insert or replace `key`, keeping its position when it exists.
    pub fn with(&self, key: impl Into<Key>, value: impl Into<Value>) -> Collection {
        let mut entries = (*self.entries).clone();
        entries.insert(key.into().canonical(), value.into());
        Collection::from_map(entries)
    }

    /// Remove `key`; the remaining entries keep their keys and order.
    pub fn without(&self, key: impl Into<Key>) -> Collection {
        let mut entries = (*self.entries).clone();
        entries.shift_remove(&key.into().canonical());
        Collection::from_map(entries)
    }

    // =========================================================================
    // Manipulation
    // =========================================================================

    /// Append `other`.
    ///
    /// Integer-keyed entries of both sides are renumbered from 0. Named
    /// entries of `other` overwrite same-named entries in place; new names
    /// are appended.
    pub fn merge(&self, other: &Collection) -> Collection {
        renumbered(self.iter().chain(other.iter()))
    }

    /// Take a window of entries, renumbering integer keys from 0.
    ///
    /// A negative `offset` counts from the end. `length` of `None` runs to
    /// the end; a negative length stops that many entries before the end.
    pub fn slice(&self, offset: i64, length: Option<i64>) -> Collection {
        renumbered(self.window(offset, length))
    }

    /// Like [`slice`](Collection::slice) but every key is kept as is.
    pub fn slice_preserve_keys(&self, offset: i64, length: Option<i64>) -> Collection {
        self.window(offset, length)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn window(
        &self,
        offset: i64,
        length: Option<i64>,
    ) -> impl Iterator<Item = (&Key, &Value)> + '_ {
        let (from, to) = util::window(self.len(), offset, length.unwrap_or(i64::MAX));
        self.iter().skip(from).take(to - from)
    }

    /// Keep the entries whose value satisfies `predicate`; keys are kept.
    pub fn filter<F>(&self, mut predicate: F) -> Collection
    where
        F: FnMut(&Value) -> bool,
    {
        self.iter()
            .filter(|(_, v)| predicate(v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Transform every value; keys are kept.
    pub fn map<F>(&self, mut transform: F) -> Collection
    where
        F: FnMut(&Value) -> Value,
    {
        self.iter().map(|(k, v)| (k.clone(), transform(v))).collect()
    }

    /// Left fold over the values. A missing seed starts from `Value::Null`.
    pub fn reduce<F>(&self, combine: F, initial: Option<Value>) -> Value
    where
        F: FnMut(Value, &Value) -> Value,
    {
        self.values().fold(initial.unwrap_or_default(), combine)
    }

    /// Append `value` under the next free integer key.
    ///
    /// The key is one past the largest integer key, or 0 when there is
    /// none. Fails when that would overflow `i64`.
    pub fn push(&self, value: impl Into<Value>) -> Result<Collection> {
        let next = match self.keys().filter_map(Key::as_index).max() {
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| Error::arithmetic("next index would overflow"))?,
            None => 0,
        };
        let mut entries = (*self.entries).clone();
        entries.insert(Key::Index(next), value.into());
        Ok(Collection::from_map(entries))
    }

    /// Remove the last entry, returning the rest and the removed value.
    pub fn pop(&self) -> Result<(Collection, Value)> {
        let mut entries = (*self.entries).clone();
        let (_, value) = entries
            .pop()
            .ok_or_else(|| Error::empty_collection("cannot pop from an empty collection"))?;
        Ok((Collection::from_map(entries), value))
    }

    /// Remove the first entry and renumber integer keys from 0.
    pub fn shift(&self) -> Result<(Collection, Value)> {
        let mut rest = self.iter();
        let (_, first) = rest
            .next()
            .ok_or_else(|| Error::empty_collection("cannot shift from an empty collection"))?;
        Ok((renumbered(rest), first.clone()))
    }

    /// Prepend `value` and renumber integer keys from 0.
    pub fn unshift(&self, value: impl Into<Value>) -> Collection {
        let head = Key::Index(0);
        let value = value.into();
        renumbered(core::iter::once((&head, &value)).chain(self.iter()))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether the keys are anything other than `0, 1, ..., n-1` in order.
    ///
    /// An empty collection is not associative.
    pub fn is_associative(&self) -> bool {
        self.keys()
            .enumerate()
            .any(|(i, key)| key.as_index() != i64::try_from(i).ok())
    }

    /// Whether some value is strictly equal to `value`.
    pub fn contains(&self, value: &Value) -> bool {
        self.values().any(|v| v == value)
    }
}

/// Collect entries, giving integer keys fresh indices from 0.
fn renumbered<'a>(entries: impl Iterator<Item = (&'a Key, &'a Value)>) -> Collection {
    let mut next = 0i64;
    entries
        .map(|(key, value)| {
            let key = match key {
                Key::Index(_) => {
                    let key = Key::Index(next);
                    next += 1;
                    key
                }
                Key::Name(_) => key.clone(),
            };
            (key, value.clone())
        })
        .collect()
}

impl PartialEq for Collection {
    /// Same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.len() == other.len() && self.iter().eq(other.iter()))
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .enumerate()
            .map(|(i, v)| (Key::from(i), v))
            .collect();
        Collection::from_map(entries)
    }
}

impl FromIterator<(Key, Value)> for Collection {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Collection::from_map(iter.into_iter().map(|(k, v)| (k.canonical(), v)).collect())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Collection {
    fn from(values: Vec<T>) -> Self {
        Collection::from_values(values)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn list(values: &[i64]) -> Collection {
        Collection::from(values.to_vec())
    }

    fn keys(c: &Collection) -> Vec<Key> {
        c.keys().cloned().collect()
    }

    mod keys {
        use super::*;

        #[test]
        fn canonical_integers_become_indices() {
            assert_eq!(Key::from("42"), Key::Index(42));
            assert_eq!(Key::from("-7"), Key::Index(-7));
            assert_eq!(Key::from("0"), Key::Index(0));
        }

        #[test]
        fn other_strings_stay_names() {
            for s in ["007", "+1", "-0", "1.5", "", " 1", "99999999999999999999"] {
                assert_eq!(Key::from(s), Key::Name(s.to_owned()), "{:?}", s);
            }
        }

        #[test]
        fn display() {
            assert_eq!(Key::Index(-3).to_string(), "-3");
            assert_eq!(Key::from("name").to_string(), "name");
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn from_values_numbers_keys() {
            let c = Collection::from_values(["a", "b"]);
            assert_eq!(keys(&c), vec![Key::Index(0), Key::Index(1)]);
            assert_eq!(c.get(1), Some(&Value::from("b")));
        }

        #[test]
        fn duplicate_entry_keeps_first_position() {
            let c = Collection::from_entries([("a", 1), ("b", 2), ("a", 3)]);
            assert_eq!(keys(&c), vec![Key::from("a"), Key::from("b")]);
            assert_eq!(c.get("a"), Some(&Value::Int(3)));
        }

        #[test]
        fn numeric_names_share_the_index_slot() {
            let c = Collection::from_entries([
                (Key::Name("0".to_string()), Value::from("a")),
                (Key::Index(0), Value::from("b")),
            ]);
            assert_eq!(keys(&c), vec![Key::Index(0)]);
            assert_eq!(c.get(Key::Name("0".to_string())), Some(&Value::from("b")));

            let d = Collection::from_values(["x"]).with(Key::Name("1".to_string()), "y");
            assert_eq!(keys(&d), vec![Key::Index(0), Key::Index(1)]);
            assert!(!d.is_associative());
            assert!(d.without(Key::Name("0".to_string())).contains_key(1));
        }

        #[test]
        fn equality_is_order_sensitive() {
            let ab = Collection::from_entries([("a", 1), ("b", 2)]);
            let ba = Collection::from_entries([("b", 2), ("a", 1)]);
            assert_ne!(ab, ba);
            assert_eq!(ab, ab.clone());
        }
    }

    mod element_access {
        use super::*;

        #[test]
        fn with_replaces_in_place() {
            let c = Collection::from_entries([("a", 1), ("b", 2)]);
            let d = c.with("a", 9).with("c", 3);
            assert_eq!(keys(&d), vec![Key::from("a"), Key::from("b"), Key::from("c")]);
            assert_eq!(d.get("a"), Some(&Value::Int(9)));
            assert_eq!(c.get("a"), Some(&Value::Int(1)));
        }

        #[test]
        fn without_keeps_keys() {
            let c = list(&[10, 20, 30]).without(1);
            assert_eq!(keys(&c), vec![Key::Index(0), Key::Index(2)]);
            assert!(c.is_associative());
        }
    }

    mod manipulation {
        use super::*;

        #[test]
        fn merge_renumbers_and_overwrites() {
            let left = Collection::from_entries([
                (Key::Index(5), Value::from("x")),
                (Key::from("color"), Value::from("red")),
            ]);
            let right = Collection::from_entries([
                (Key::from("color"), Value::from("blue")),
                (Key::Index(9), Value::from("y")),
                (Key::from("size"), Value::from("L")),
            ]);
            let merged = left.merge(&right);
            assert_eq!(
                keys(&merged),
                vec![Key::Index(0), Key::from("color"), Key::Index(1), Key::from("size")]
            );
            assert_eq!(merged.get("color"), Some(&Value::from("blue")));
        }

        #[test]
        fn slice_windows() {
            let c = list(&[1, 2, 3, 4, 5]);
            assert_eq!(c.slice(1, Some(2)).to_vec(), vec![Value::Int(2), Value::Int(3)]);
            assert_eq!(keys(&c.slice(3, None)), vec![Key::Index(0), Key::Index(1)]);
            assert_eq!(c.slice(-2, None).to_vec(), vec![Value::Int(4), Value::Int(5)]);
            assert_eq!(c.slice(0, Some(-3)).len(), 2);
            assert!(c.slice(10, None).is_empty());
        }

        #[test]
        fn slice_preserving_keys() {
            let c = list(&[1, 2, 3, 4, 5]);
            assert_eq!(keys(&c.slice_preserve_keys(3, None)), vec![Key::Index(3), Key::Index(4)]);
        }

        #[test]
        fn slice_keeps_names() {
            let c = Collection::from_entries([
                (Key::Index(4), Value::Int(1)),
                (Key::from("n"), Value::Int(2)),
                (Key::Index(8), Value::Int(3)),
            ]);
            assert_eq!(keys(&c.slice(0, None)), vec![Key::Index(0), Key::from("n"), Key::Index(1)]);
        }

        #[test]
        fn filter_and_map_keep_keys() {
            let c = list(&[1, 2, 3, 4]);
            let even = c.filter(|v| v.as_i64().map_or(false, |n| n % 2 == 0));
            assert_eq!(keys(&even), vec![Key::Index(1), Key::Index(3)]);

            let named = Collection::from_entries([("a", 1)]);
            let mapped = named.map(|_| Value::from("x"));
            assert_eq!(keys(&mapped), vec![Key::from("a")]);
        }

        #[test]
        fn reduce_folds_left() {
            let c = list(&[1, 2, 3]);
            let sum = c.reduce(
                |acc, v| Value::Int(acc.as_i64().unwrap_or(0) + v.as_i64().unwrap_or(0)),
                Some(Value::Int(10)),
            );
            assert_eq!(sum, Value::Int(16));
            assert_eq!(Collection::new().reduce(|acc, _| acc, None), Value::Null);
        }

        #[test]
        fn push_uses_next_index() {
            let c = Collection::from_entries([(Key::Index(4), Value::Int(1)), (Key::from("a"), Value::Int(2))]);
            assert_eq!(c.push(3).unwrap().last(), Some((&Key::Index(5), &Value::Int(3))));
            assert_eq!(Collection::new().push(1).unwrap().first(), Some((&Key::Index(0), &Value::Int(1))));

            let full = Collection::from_entries([(Key::Index(i64::MAX), Value::Null)]);
            assert_eq!(full.push(1).unwrap_err().kind, ErrorKind::Arithmetic);
        }

        #[test]
        fn pop_and_shift() {
            let c = list(&[1, 2, 3]);
            let (rest, last) = c.pop().unwrap();
            assert_eq!(last, Value::Int(3));
            assert_eq!(rest, list(&[1, 2]));

            let (rest, first) = c.shift().unwrap();
            assert_eq!(first, Value::Int(1));
            assert_eq!(rest, list(&[2, 3]));
            assert_eq!(c.len(), 3);
        }

        #[test]
        fn removal_from_empty_fails() {
            let empty = Collection::new();
            assert_eq!(empty.pop().unwrap_err().kind, ErrorKind::EmptyCollection);
            assert_eq!(empty.shift().unwrap_err().kind, ErrorKind::EmptyCollection);
        }

        #[test]
        fn unshift_renumbers() {
            let c = Collection::from_entries([(Key::Index(3), Value::Int(1)), (Key::from("k"), Value::Int(2))]);
            let d = c.unshift(0);
            assert_eq!(keys(&d), vec![Key::Index(0), Key::Index(1), Key::from("k")]);
            assert_eq!(d.first(), Some((&Key::Index(0), &Value::Int(0))));
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn associativity() {
            assert!(!Collection::new().is_associative());
            assert!(!Collection::from_values(["a", "b"]).is_associative());
            assert!(Collection::from_entries([("k", "v")]).is_associative());
            assert!(Collection::from_entries([(1, "a"), (0, "b")]).is_associative());
        }

        #[test]
        fn contains_is_strict() {
            let c = Collection::from_values([Value::Int(1), Value::from("2")]);
            assert!(c.contains(&Value::Int(1)));
            assert!(!c.contains(&Value::Float(1.0)));
            assert!(!c.contains(&Value::Int(2)));
        }

        #[test]
        fn depth_counts_nesting() {
            let inner = Collection::from_values([1i64]);
            let outer = Collection::from_values([Value::from(inner), Value::Null]);
            assert_eq!(Collection::new().depth(), 1);
            assert_eq!(outer.depth(), 2);
        }
    }
}
