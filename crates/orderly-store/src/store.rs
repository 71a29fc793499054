//! The `Store`: an ordered key/value container over owned or aliased data.
//!
//! # Ownership
//!
//! The constructor decides the ownership contract:
//!
//! - [`Store::new`], [`Store::from_array`], [`Store::from_values`],
//!   [`Store::from_pairs`]: the store owns its data.
//! - [`Store::copied_from`], [`Store::copied_from_shared`]: the store owns a
//!   copy; later changes to the source are invisible to it.
//! - [`Store::alias`]: the store is a live view over a caller's
//!   [`SharedArray`]. Every mutation is visible to the caller immediately
//!   and vice versa; no operation on an aliased store copies the data.
//!
//! Operations that produce a *new* store (`copy`, `chunk`, `get_keys`, ...)
//! always produce an owned one that inherits the configuration.

use std::fmt;

use orderly_core::{Array, CollectionError, Element, Key, Result, Value};

use crate::config::StoreConfig;
use crate::cursor::Cursor;
use crate::shared::{ArrayMut, ArrayRef, Backing, Ownership, SharedArray};

/// An ordered associative container with mixed integer/string keys.
pub struct Store<V = Value> {
    pub(crate) backing: Backing<V>,
    pub(crate) cursor: Cursor,
    pub(crate) config: StoreConfig,
}

/// Anything with backing data that [`Store::unwrap`] can expose.
pub trait Unwrap<V> {
    /// Mutable view of the backing data.
    fn unwrap_array(&mut self) -> Result<ArrayMut<'_, V>>;
}

impl<V> Unwrap<V> for Array<V> {
    fn unwrap_array(&mut self) -> Result<ArrayMut<'_, V>> {
        Ok(ArrayMut::owned(self))
    }
}

impl<V> Unwrap<V> for SharedArray<V> {
    fn unwrap_array(&mut self) -> Result<ArrayMut<'_, V>> {
        Ok(ArrayMut::aliased(self.borrow_mut()))
    }
}

impl<V> Unwrap<V> for Store<V> {
    fn unwrap_array(&mut self) -> Result<ArrayMut<'_, V>> {
        Ok(self.write())
    }
}

impl Unwrap<Value> for Value {
    fn unwrap_array(&mut self) -> Result<ArrayMut<'_, Value>> {
        let found = self.type_name();
        match self.as_array_mut() {
            Some(array) => Ok(ArrayMut::owned(array)),
            None => Err(CollectionError::NotCollectionOrArray { found }),
        }
    }
}

impl<V> Store<V> {
    // ─────────────────────────────────────────────────────────────────────────
    // Construction
    // ─────────────────────────────────────────────────────────────────────────

    /// Create an empty owned store.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty owned store with a configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self::from_backing(Backing::Owned(Array::new()), config)
    }

    /// Take ownership of an array.
    pub fn from_array(array: Array<V>) -> Self {
        Self::from_backing(Backing::Owned(array), StoreConfig::default())
    }

    /// Build an owned list keyed `0..n`.
    pub fn from_values<T: Into<V>>(values: impl IntoIterator<Item = T>) -> Self {
        Self::from_array(Array::from_values(values))
    }

    /// Build an owned store from key/value pairs.
    pub fn from_pairs<K: Into<Key>, T: Into<V>>(pairs: impl IntoIterator<Item = (K, T)>) -> Self {
        Self::from_array(Array::from_pairs(pairs))
    }

    /// Create a live view over caller-owned data.
    pub fn alias(shared: &SharedArray<V>) -> Self {
        tracing::debug!("aliasing shared array ({} holders)", shared.holders() + 1);
        Self::from_backing(Backing::Aliased(shared.clone()), StoreConfig::default())
    }

    fn from_backing(backing: Backing<V>, config: StoreConfig) -> Self {
        Self {
            backing,
            cursor: Cursor::new(),
            config,
        }
    }

    /// Replace the configuration.
    pub fn configured(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Mutable view of the backing data of an array, a store, a shared
    /// array or an array-valued [`Value`].
    ///
    /// # Errors
    ///
    /// `NotCollectionOrArray` if `target` has no backing array.
    pub fn unwrap<T: Unwrap<V> + ?Sized>(target: &mut T) -> Result<ArrayMut<'_, V>> {
        target.unwrap_array()
    }

    /// An owned store over `array` carrying this store's configuration.
    pub(crate) fn derive<W>(&self, array: Array<W>) -> Store<W> {
        Store::from_backing(Backing::Owned(array), self.config.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Backing data
    // ─────────────────────────────────────────────────────────────────────────

    /// Read guard over the backing data.
    ///
    /// # Panics
    ///
    /// For aliased stores, panics if the shared data is mutably borrowed.
    pub fn read(&self) -> ArrayRef<'_, V> {
        self.backing.read()
    }

    /// Write guard over the backing data.
    ///
    /// # Panics
    ///
    /// For aliased stores, panics if the shared data is already borrowed.
    pub fn write(&mut self) -> ArrayMut<'_, V> {
        self.backing.write()
    }

    pub fn ownership(&self) -> Ownership {
        self.backing.ownership()
    }

    pub fn is_aliased(&self) -> bool {
        self.ownership() == Ownership::Aliased
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keys and counts
    // ─────────────────────────────────────────────────────────────────────────

    pub fn key_exists(&self, key: impl Into<Key>) -> bool {
        self.read().contains_key(&key.into())
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert or overwrite `key`.
    pub fn insert(&mut self, key: impl Into<Key>, value: V) -> &mut Self {
        self.write().insert(key, value);
        self
    }

    /// Append under the next synthetic integer key.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the key counter is exhausted. Nothing is
    /// overwritten.
    pub fn push(&mut self, value: V) -> Result<&mut Self> {
        let pushed = self.write().push(value);
        if let Err(err) = pushed {
            tracing::warn!("push refused: {}", err);
            return Err(err);
        }
        Ok(self)
    }

    /// Prepend at integer key 0, renumbering every integer key. String keys
    /// are kept.
    pub fn push_on_top(&mut self, value: V) -> &mut Self {
        self.write().unshift(value);
        self
    }

    /// Same as [`push_on_top`](Store::push_on_top).
    pub fn unshift(&mut self, value: V) -> &mut Self {
        self.push_on_top(value)
    }

    /// Remove `key`. Removing an absent key is a no-op.
    pub fn remove(&mut self, key: impl Into<Key>) -> &mut Self {
        self.write().remove(&key.into());
        self
    }

    /// Remove `key` and return its value.
    pub fn pull(&mut self, key: impl Into<Key>) -> Option<V> {
        self.write().remove(&key.into())
    }

    /// Remove and return the last value.
    pub fn pop(&mut self) -> Option<V> {
        self.write().pop().map(|(_, value)| value)
    }

    /// Remove and return the first value, renumbering integer keys.
    pub fn shift(&mut self) -> Option<V> {
        self.write().shift().map(|(_, value)| value)
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> &mut Self {
        self.write().clear();
        self.cursor = Cursor::new();
        self
    }

    /// Reverse the order, renumbering integer keys.
    pub fn reverse(&mut self) -> &mut Self {
        self.write().reverse();
        self
    }
}

impl<V: Clone> Store<V> {
    /// Own a copy of `array`.
    pub fn copied_from(array: &Array<V>) -> Self {
        Self::from_array(array.clone())
    }

    /// Own a copy of the current contents of `shared`.
    pub fn copied_from_shared(shared: &SharedArray<V>) -> Self {
        Self::from_array(shared.snapshot())
    }

    /// Value under `key`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent.
    pub fn get(&self, key: impl Into<Key>) -> Result<V> {
        let key = key.into();
        match self.read().get(&key) {
            Some(value) => Ok(value.clone()),
            None => Err(CollectionError::KeyNotFound(key)),
        }
    }

    /// Value under `key`, or `fallback` if absent.
    pub fn get_if_exists(&self, key: impl Into<Key>, fallback: V) -> V {
        self.read().get(&key.into()).cloned().unwrap_or(fallback)
    }

    pub fn first(&self) -> Option<V> {
        self.read().first().map(|(_, value)| value.clone())
    }

    pub fn last(&self) -> Option<V> {
        self.read().last().map(|(_, value)| value.clone())
    }

    /// Owned, independent copy with the same configuration.
    pub fn copy(&self) -> Store<V> {
        self.derive(self.get_array())
    }

    /// Copy of the backing data.
    pub fn get_array(&self) -> Array<V> {
        self.read().clone()
    }

    /// The backing data; a copy if the store is aliased.
    pub fn into_array(self) -> Array<V> {
        match self.backing {
            Backing::Owned(array) => array,
            Backing::Aliased(shared) => shared.snapshot(),
        }
    }

    /// Copy of every `(key, value)` pair in order.
    pub fn entries(&self) -> Vec<(Key, V)> {
        self.read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Keys in order, as a list.
    pub fn get_keys(&self) -> Store<Key> {
        self.derive(Array::from_values(self.read().keys().cloned()))
    }

    /// Values in order, as a list.
    pub fn get_values(&self) -> Store<V> {
        self.derive(Array::from_values(self.read().values().cloned()))
    }

    /// Insert every pair of `array`, reusing its keys. With
    /// `overwrite_keys == false`, keys already present are left alone.
    pub fn concat(&mut self, array: &Array<V>, overwrite_keys: bool) -> &mut Self {
        {
            let mut target = self.write();
            for (key, value) in array {
                if overwrite_keys || !target.contains_key(key) {
                    target.insert(key.clone(), value.clone());
                }
            }
        }
        self
    }

    /// [`concat`](Store::concat) with another store's data.
    ///
    /// The other store may alias the same data as this one.
    pub fn concat_store(&mut self, other: &Store<V>, overwrite_keys: bool) -> &mut Self {
        let snapshot = other.get_array();
        self.concat(&snapshot, overwrite_keys)
    }
}

impl<V: Element> Store<V> {
    /// Remove the first entry equal to `item` under the configured
    /// equality. Returns whether anything was removed.
    pub fn remove_item(&mut self, item: &V) -> bool {
        match self.index_of(item, self.config.equality) {
            Some(key) => {
                self.write().remove(&key);
                true
            }
            None => false,
        }
    }
}

impl<V> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for Store<V> {
    /// Owned stores are deep-copied. Aliased stores produce another view over
    /// the same data.
    fn clone(&self) -> Self {
        Self {
            backing: self.backing.clone(),
            cursor: self.cursor.clone(),
            config: self.config.clone(),
        }
    }
}

impl<V: PartialEq> PartialEq for Store<V> {
    /// Same entries in the same order, regardless of ownership.
    fn eq(&self, other: &Self) -> bool {
        *self.read() == *other.read()
    }
}

impl<V: fmt::Debug> fmt::Debug for Store<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("ownership", &self.ownership())
            .field("entries", &*self.read())
            .finish()
    }
}

impl<V> From<Array<V>> for Store<V> {
    fn from(array: Array<V>) -> Self {
        Store::from_array(array)
    }
}

impl<K: Into<Key>, V> FromIterator<(K, V)> for Store<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Store::from_array(iter.into_iter().collect())
    }
}

impl From<Store<Value>> for Value {
    fn from(store: Store<Value>) -> Self {
        Value::Array(store.into_array())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderly_core::Equality;

    #[test]
    fn test_insert_then_get() {
        let mut store: Store = Store::new();
        store.insert("name", Value::from("orderly"));
        store.insert(3, Value::Int(3));

        assert_eq!(store.get("name").unwrap(), Value::from("orderly"));
        assert_eq!(store.get("3").unwrap(), Value::Int(3));
    }

    #[test]
    fn test_get_missing_key_fails() {
        let store: Store = Store::new();
        assert_eq!(
            store.get("missing"),
            Err(CollectionError::KeyNotFound(Key::from("missing")))
        );
        assert_eq!(store.get_if_exists("missing", Value::Int(7)), Value::Int(7));
    }

    #[test]
    fn test_write_guard_subscript_upserts() {
        let mut store: Store<i64> = Store::new();
        store.write()["new"] = 5;
        store.write()[3] += 1;

        assert_eq!(store.get("new").unwrap(), 5);
        assert_eq!(store.get(3).unwrap(), 1);
        store.push(9).unwrap();
        assert_eq!(store.get(4).unwrap(), 9);
    }

    #[test]
    fn test_push_refuses_to_overwrite_last_key() {
        let mut store: Store<i64> = Store::new();
        store.insert(i64::MAX, 1);

        assert!(store.push(2).is_err());
        assert_eq!(store.entries(), vec![(Key::Int(i64::MAX), 1)]);
    }

    #[test]
    fn test_push_avoids_existing_integer_keys() {
        let mut store: Store<i64> = Store::new();
        store.insert(10, 1).push(2).unwrap();
        assert_eq!(store.get(11).unwrap(), 2);
    }

    #[test]
    fn test_push_on_top_renumbers() {
        let mut store: Store<i64> = Store::from_pairs([(Key::Int(4), 1), (Key::from("k"), 2)]);
        store.push_on_top(0);

        assert_eq!(
            store.entries(),
            vec![(Key::Int(0), 0), (Key::Int(1), 1), (Key::from("k"), 2)]
        );
    }

    #[test]
    fn test_pop_shift_empty() {
        let mut store: Store = Store::new();
        assert_eq!(store.pop(), None);
        assert_eq!(store.shift(), None);
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_pull_and_remove() {
        let mut store: Store<i64> = Store::from_values([1, 2, 3]);
        assert_eq!(store.pull(1), Some(2));
        assert_eq!(store.pull(1), None);
        store.remove(42);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_concat_reuses_keys() {
        let mut store: Store<i64> = Store::from_pairs([("a", 1), ("b", 2)]);
        let other: Array<i64> = Array::from_pairs([("b", 20), ("c", 30)]);

        store.concat(&other, false);
        assert_eq!(store.get("b").unwrap(), 2);
        assert_eq!(store.get("c").unwrap(), 30);

        store.concat(&other, true);
        assert_eq!(store.get("b").unwrap(), 20);
    }

    #[test]
    fn test_concat_store_with_shared_self() {
        let shared: SharedArray<i64> = SharedArray::new(Array::from_values([1, 2]));
        let mut a = Store::alias(&shared);
        let b = Store::alias(&shared);

        a.concat_store(&b, true);
        assert_eq!(a.count(), 2);
    }

    #[test]
    fn test_alias_sees_external_mutation() {
        let shared: SharedArray<i64> = SharedArray::new(Array::from_values([1]));
        let mut store = Store::alias(&shared);

        shared.borrow_mut().push(2).unwrap();
        assert_eq!(store.count(), 2);

        store.push(3).unwrap();
        assert_eq!(shared.borrow().len(), 3);
        assert!(store.is_aliased());
    }

    #[test]
    fn test_copied_from_is_independent() {
        let shared: SharedArray<i64> = SharedArray::new(Array::from_values([1]));
        let store = Store::copied_from_shared(&shared);
        shared.borrow_mut().push(2).unwrap();

        assert_eq!(store.count(), 1);
        assert_eq!(store.ownership(), Ownership::Owned);
    }

    #[test]
    fn test_clone_of_aliased_store_shares() {
        let shared: SharedArray<i64> = SharedArray::default();
        let store = Store::alias(&shared);
        let mut view = store.clone();
        view.push(1).unwrap();

        assert_eq!(store.count(), 1);
        assert_eq!(shared.holders(), 3);
    }

    #[test]
    fn test_copy_is_owned() {
        let shared: SharedArray<i64> = SharedArray::default();
        let store = Store::alias(&shared);
        let mut copy = store.copy();
        copy.push(1).unwrap();

        assert_eq!(store.count(), 0);
        assert_eq!(copy.ownership(), Ownership::Owned);
    }

    #[test]
    fn test_unwrap_targets() {
        let mut array: Array<i64> = Array::from_values([1]);
        Store::unwrap(&mut array).unwrap().push(2).unwrap();
        assert_eq!(array.len(), 2);

        let mut store: Store<i64> = Store::new();
        Store::unwrap(&mut store).unwrap().push(1).unwrap();
        assert_eq!(store.count(), 1);

        let mut value = Value::from(vec![1, 2]);
        Store::unwrap(&mut value).unwrap().push(Value::Int(3)).unwrap();
        assert_eq!(value.as_array().map(Array::len), Some(3));

        let mut scalar = Value::from("nope");
        assert_eq!(
            Store::unwrap(&mut scalar).err(),
            Some(CollectionError::NotCollectionOrArray { found: "String" })
        );
    }

    #[test]
    fn test_write_guard_subscript() {
        let mut store: Store = Store::from_pairs([("a", 1)]);
        store.write()["a"] = Value::Int(2);

        assert_eq!(store.read()["a"], Value::Int(2));
    }

    #[test]
    fn test_remove_item_uses_configured_equality() {
        let mut strict: Store = Store::from_values([Value::from("1"), Value::Int(1)]);
        assert!(strict.remove_item(&Value::Int(1)));
        assert_eq!(strict.entries(), vec![(Key::Int(0), Value::from("1"))]);

        let mut loose: Store = Store::from_values([Value::from("1"), Value::Int(1)])
            .configured(StoreConfig::default().with_equality(Equality::Loose));
        assert!(loose.remove_item(&Value::Int(1)));
        assert_eq!(loose.entries(), vec![(Key::Int(1), Value::Int(1))]);
        assert!(!loose.remove_item(&Value::from("x")));
    }

    #[test]
    fn test_get_keys_and_values() {
        let store: Store<i64> = Store::from_pairs([("a", 1), ("b", 2)]);
        assert_eq!(
            store.get_keys().get_array(),
            Array::from_values([Key::from("a"), Key::from("b")])
        );
        assert_eq!(store.get_values().entries(), vec![(Key::Int(0), 1), (Key::Int(1), 2)]);
    }
}
