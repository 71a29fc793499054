//! Ordered associative arrays.
//!
//! An [`Array`] is an insertion-ordered map from [`Key`] to values plus an
//! append counter. Appending without a key uses the counter, which is always
//! one more than the largest integer key ever inserted (or 0).
//!
//! ## Renumbering
//!
//! `unshift`, `shift`, `reverse` and `reindex` renumber integer keys to
//! `0, 1, 2, ...` in position order. String keys survive unchanged, and the
//! counter is reset to the number of integer keys.

use indexmap::map::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};

use crate::element::Element;
use crate::error::{self, CollectionError};
use crate::key::Key;

/// An insertion-ordered map from keys to values.
#[derive(Clone)]
pub struct Array<V> {
    entries: IndexMap<Key, V>,
    next_index: i64,
}

impl<V> Default for Array<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Array<V> {
    /// Create an empty array.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            next_index: 0,
        }
    }

    /// Create an empty array with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            next_index: 0,
        }
    }

    /// Build a list keyed `0..n`.
    pub fn from_values<T: Into<V>>(values: impl IntoIterator<Item = T>) -> Self {
        let mut array = Self::new();
        for value in values {
            array.append(value.into());
        }
        array
    }

    /// Build from key/value pairs. Later duplicates overwrite earlier ones
    /// in place.
    pub fn from_pairs<K: Into<Key>, T: Into<V>>(pairs: impl IntoIterator<Item = (K, T)>) -> Self {
        let mut array = Self::new();
        for (key, value) in pairs {
            array.insert(key, value.into());
        }
        array
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The key the next [`push`](Array::push) will use.
    pub fn next_index(&self) -> i64 {
        self.next_index
    }

    pub fn get(&self, key: &Key) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut V> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Entry at a position.
    pub fn get_index(&self, index: usize) -> Option<(&Key, &V)> {
        self.entries.get_index(index)
    }

    /// Position of a key.
    pub fn position_of(&self, key: &Key) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    pub fn first(&self) -> Option<(&Key, &V)> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<(&Key, &V)> {
        self.entries.last()
    }

    /// Insert or overwrite. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<Key>, value: V) -> Option<V> {
        let key = key.into();
        self.advance_counter(&key);
        self.entries.insert(key, value)
    }

    fn advance_counter(&mut self, key: &Key) {
        if let Key::Int(i) = *key {
            if i >= self.next_index {
                self.next_index = i.saturating_add(1);
            }
        }
    }

    /// Append under the next integer key and return that key.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the counter is exhausted, that is the next key
    /// would be `i64::MAX` and that key is already taken.
    pub fn push(&mut self, value: V) -> error::Result<Key> {
        let key = Key::Int(self.next_index);
        if self.entries.contains_key(&key) {
            return Err(CollectionError::InvalidArgument(format!(
                "cannot append: next integer key {} is already taken",
                key
            )));
        }
        self.insert(key.clone(), value);
        Ok(key)
    }

    /// Append at the counter of an array being built up from an empty one,
    /// where the counter cannot run out.
    pub(crate) fn append(&mut self, value: V) {
        let key = self.next_index;
        self.next_index = key.saturating_add(1);
        self.entries.insert(Key::Int(key), value);
    }

    /// Get the value under `key`, inserting `default()` first if the key
    /// is absent.
    pub fn get_or_insert_with(
        &mut self,
        key: impl Into<Key>,
        default: impl FnOnce() -> V,
    ) -> &mut V {
        let key = key.into();
        self.advance_counter(&key);
        self.entries.entry(key).or_insert_with(default)
    }

    /// Remove a key, closing the gap. Other keys are untouched.
    pub fn remove(&mut self, key: &Key) -> Option<V> {
        self.entries.shift_remove(key)
    }

    /// Remove the last entry.
    ///
    /// Popping the most recently appended integer key gives that key back
    /// to the counter.
    pub fn pop(&mut self) -> Option<(Key, V)> {
        let (key, value) = self.entries.pop()?;
        if let Key::Int(i) = key {
            if i.checked_add(1) == Some(self.next_index) {
                self.next_index = i;
            }
        }
        Some((key, value))
    }

    /// Remove the first entry and renumber integer keys.
    pub fn shift(&mut self) -> Option<(Key, V)> {
        let (key, value) = self.entries.shift_remove_index(0)?;
        self.reindex();
        Some((key, value))
    }

    /// Prepend `value` at integer key 0 and renumber integer keys.
    pub fn unshift(&mut self, value: V) {
        let old = mem::take(&mut self.entries);
        self.rebuild(std::iter::once((Key::Int(0), value)).chain(old));
    }

    /// Reverse the order and renumber integer keys.
    pub fn reverse(&mut self) {
        let old = mem::take(&mut self.entries);
        self.rebuild(old.into_iter().rev());
    }

    /// Renumber integer keys `0..` in position order.
    pub fn reindex(&mut self) {
        let old = mem::take(&mut self.entries);
        self.rebuild(old);
    }

    fn rebuild(&mut self, entries: impl IntoIterator<Item = (Key, V)>) {
        self.next_index = 0;
        for (key, value) in entries {
            match key {
                Key::Int(_) => self.append(value),
                Key::Str(_) => {
                    self.entries.insert(key, value);
                }
            }
        }
    }

    /// Remove everything and reset the counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_index = 0;
    }

    /// Keep the entries for which `keep` returns true, in order.
    pub fn retain(&mut self, mut keep: impl FnMut(&Key, &mut V) -> bool) {
        self.entries.retain(|key, value| keep(key, value));
    }

    /// Whether the keys are exactly `0, 1, 2, ...` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(i, key)| matches!(key, Key::Int(k) if usize::try_from(*k) == Ok(i)))
    }

    /// Stable sort by value, keeping each value's key.
    pub fn sort_by(&mut self, mut cmp: impl FnMut(&V, &V) -> Ordering) {
        self.entries.sort_by(|_, a, _, b| cmp(a, b));
    }

    /// Stable sort by key.
    pub fn sort_keys_by(&mut self, mut cmp: impl FnMut(&Key, &Key) -> Ordering) {
        self.entries.sort_by(|a, _, b, _| cmp(a, b));
    }

    /// Stable sort by value, then discard every key and number `0..n`.
    pub fn sort_values_by(&mut self, cmp: impl FnMut(&V, &V) -> Ordering) {
        let mut values: Vec<V> = mem::take(&mut self.entries).into_values().collect();
        values.sort_by(cmp);
        self.next_index = 0;
        for value in values {
            self.append(value);
        }
    }

    pub fn keys(&self) -> Keys<'_, Key, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> Values<'_, Key, V> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, Key, V> {
        self.entries.values_mut()
    }

    pub fn iter(&self) -> Iter<'_, Key, V> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, Key, V> {
        self.entries.iter_mut()
    }
}

impl<V: Element> Array<V> {
    /// Dissolve nested values into their parent, up to `depth` levels.
    ///
    /// Each nested value is replaced, at its position, by its own entries
    /// (flattened with `depth - 1`). Hoisted string keys overwrite a parent
    /// entry with the same key. Hoisted integer keys that would collide with
    /// a parent integer key are appended under a fresh integer key instead.
    /// `depth == 0` is a no-op.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a colliding entry needs a fresh key and the
    /// counter is exhausted. The array is left unchanged.
    pub fn flatten(&mut self, depth: usize) -> error::Result<()> {
        if depth == 0 || !self.entries.values().any(Element::is_nested) {
            return Ok(());
        }

        let parent_ints: HashSet<i64> = self
            .entries
            .iter()
            .filter(|(_, value)| !value.is_nested())
            .filter_map(|(key, _)| key.as_int())
            .collect();

        let mut out: Array<V> = Array::with_capacity(self.entries.len());
        out.next_index = self.next_index;

        for (key, value) in self.entries.iter() {
            let (key, value) = (key.clone(), value.clone());
            match value.into_nested() {
                Ok(mut child) => {
                    child.flatten(depth - 1)?;
                    for (child_key, child_value) in child {
                        let collides = match &child_key {
                            Key::Int(i) => parent_ints.contains(i) || out.contains_key(&child_key),
                            Key::Str(_) => false,
                        };
                        if collides {
                            out.push(child_value)?;
                        } else {
                            out.insert(child_key, child_value);
                        }
                    }
                }
                Err(value) => {
                    // a hoisted entry already claimed this name
                    if key.is_str() && out.contains_key(&key) {
                        continue;
                    }
                    out.insert(key, value);
                }
            }
        }

        *self = out;
        Ok(())
    }
}

impl<V: PartialEq> PartialEq for Array<V> {
    /// Same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<V: fmt::Debug> fmt::Debug for Array<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<V, Q: Into<Key>> Index<Q> for Array<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is absent.
    fn index(&self, key: Q) -> &V {
        let key = key.into();
        match self.entries.get(&key) {
            Some(value) => value,
            None => panic!("key not found: {}", key),
        }
    }
}

impl<V: Default, Q: Into<Key>> IndexMut<Q> for Array<V> {
    /// An absent key is inserted with `V::default()` first, so
    /// `array[key] = value` upserts.
    fn index_mut(&mut self, key: Q) -> &mut V {
        self.get_or_insert_with(key, V::default)
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for Array<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut array = Array::new();
        array.extend(iter);
        array
    }
}

impl<K: Into<Key>, V> Extend<(K, V)> for Array<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> From<Vec<V>> for Array<V> {
    fn from(values: Vec<V>) -> Self {
        Array::from_values(values)
    }
}

impl<V> IntoIterator for Array<V> {
    type Item = (Key, V);
    type IntoIter = IntoIter<Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Array<V> {
    type Item = (&'a Key, &'a V);
    type IntoIter = Iter<'a, Key, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Serde: an ordered map
// ============================================================================

impl<V: Serialize> Serialize for Array<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct ArrayVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for ArrayVisitor<V> {
    type Value = Array<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map or a sequence")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Array<V>, A::Error> {
        let mut array = Array::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Key, V>()? {
            array.insert(key, value);
        }
        Ok(array)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Array<V>, A::Error> {
        let mut array = Array::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<V>()? {
            array.append(value);
        }
        Ok(array)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Array<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ArrayVisitor(PhantomData))
    }
}
