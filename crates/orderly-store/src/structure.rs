//! Partitioning a store into stores of stores.

use orderly_core::{Array, CollectionError, Key, Result};

use crate::store::Store;

impl<V: Clone> Store<V> {
    /// Consecutive groups of up to `size` entries, each keeping its
    /// original keys. The groups are keyed `0..n`; the last may be shorter.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `size` is 0.
    pub fn chunk(&self, size: usize) -> Result<Store<Store<V>>> {
        if size == 0 {
            return Err(CollectionError::InvalidArgument(
                "chunk size must be at least 1".to_string(),
            ));
        }

        let mut chunks: Array<Store<V>> = Array::new();
        let mut current: Array<V> = Array::with_capacity(size);
        for (key, value) in self.read().iter() {
            current.insert(key.clone(), value.clone());
            if current.len() == size {
                chunks.push(self.derive(std::mem::take(&mut current)))?;
            }
        }
        if !current.is_empty() {
            chunks.push(self.derive(current))?;
        }

        tracing::trace!("chunk({}): {} groups", size, chunks.len());
        Ok(self.derive(chunks))
    }

    /// Partition into the entries matching `predicate(value, key)` and the
    /// rest, both keeping original keys, under the configured split labels.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the configured labels are the same key.
    pub fn split(&self, predicate: impl FnMut(&V, &Key) -> bool) -> Result<Store<Store<V>>> {
        let (left, right) = self.config.split_labels.clone();
        self.split_labeled(predicate, left, right)
    }

    /// [`split`](Store::split) with explicit labels for the two sides.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if both labels normalize to the same key, since
    /// one side would replace the other.
    pub fn split_labeled(
        &self,
        mut predicate: impl FnMut(&V, &Key) -> bool,
        left_label: impl Into<Key>,
        right_label: impl Into<Key>,
    ) -> Result<Store<Store<V>>> {
        let (left_label, right_label) = (left_label.into(), right_label.into());
        if left_label == right_label {
            return Err(CollectionError::InvalidArgument(format!(
                "split labels must differ, both are {}",
                left_label
            )));
        }

        let mut left: Array<V> = Array::new();
        let mut right: Array<V> = Array::new();
        for (key, value) in self.read().iter() {
            let side = if predicate(value, key) { &mut left } else { &mut right };
            side.insert(key.clone(), value.clone());
        }

        tracing::trace!("split: {} left, {} right", left.len(), right.len());
        let mut sides: Array<Store<V>> = Array::with_capacity(2);
        sides.insert(left_label, self.derive(left));
        sides.insert(right_label, self.derive(right));
        Ok(self.derive(sides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderly_core::Value;

    use crate::config::StoreConfig;

    #[test]
    fn test_chunk_sizes() {
        let store: Store<i64> = Store::from_values(1..=7);
        let chunks = store.chunk(2).unwrap();

        let sizes: Vec<usize> = chunks.read().values().map(Store::count).collect();
        assert_eq!(sizes, vec![2, 2, 2, 1]);
        assert!(chunks.read().is_list());
    }

    #[test]
    fn test_chunk_keeps_keys() {
        let store: Store<i64> = Store::from_pairs([("a", 1), ("b", 2), ("c", 3)]);
        let chunks = store.chunk(2).unwrap();

        let second = chunks.get(1).unwrap();
        assert_eq!(second.entries(), vec![(Key::from("c"), 3)]);
    }

    #[test]
    fn test_chunk_zero_is_invalid() {
        let store: Store<i64> = Store::from_values([1]);
        assert!(matches!(
            store.chunk(0),
            Err(CollectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_chunk_empty_store() {
        let store: Store<i64> = Store::new();
        assert!(store.chunk(3).unwrap().is_empty());
    }

    #[test]
    fn test_split_even_odd() {
        let store: Store<i64> = Store::from_values([1, 2, 3, 4, 5]);
        let sides = store.split(|value, _| value % 2 == 0).unwrap();

        let left = sides.get(0).unwrap();
        let right = sides.get("1").unwrap();
        assert_eq!(left.entries(), vec![(Key::Int(1), 2), (Key::Int(3), 4)]);
        assert_eq!(
            right.entries(),
            vec![(Key::Int(0), 1), (Key::Int(2), 3), (Key::Int(4), 5)]
        );
    }

    #[test]
    fn test_split_uses_configured_labels() {
        let store: Store = Store::from_values([Value::Int(1), Value::Int(2)])
            .configured(StoreConfig::default().with_split_labels("even", "odd"));
        let sides = store
            .split(|value, _| value.as_int().is_some_and(|i| i % 2 == 0))
            .unwrap();

        assert_eq!(sides.get("even").unwrap().count(), 1);
        assert_eq!(sides.get("odd").unwrap().count(), 1);
        // derived stores inherit the configuration
        assert_eq!(sides.get("odd").unwrap().config().split_labels.0, Key::from("even"));
    }

    #[test]
    fn test_split_labeled() {
        let store: Store<i64> = Store::from_values([1, 2]);
        let sides = store.split_labeled(|value, _| *value > 1, "big", "small").unwrap();
        assert_eq!(sides.get("big").unwrap().entries(), vec![(Key::Int(1), 2)]);
    }

    #[test]
    fn test_split_rejects_equal_labels() {
        let store: Store<i64> = Store::from_values([1, 2]);
        let err = store.split_labeled(|value, _| *value > 1, "7", 7).err();
        assert!(matches!(err, Some(CollectionError::InvalidArgument(_))));

        let store = store.configured(StoreConfig::default().with_split_labels("x", "x"));
        assert!(store.split(|value, _| *value > 1).is_err());
    }
}
