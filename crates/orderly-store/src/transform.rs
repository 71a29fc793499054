//! In-place rewrites and selections.
//!
//! `map`, `filter`, `flatten`, `flip` and `extract` mutate the store (and so
//! the caller's data when aliased). `only`, `nth`, `select` and `unique`
//! build new owned stores and leave the source alone.

use orderly_core::{Array, CollectionError, Element, Key, Result, SortFlags};

use crate::store::Store;

fn check_step(step: usize) -> Result<()> {
    if step == 0 {
        return Err(CollectionError::InvalidArgument("step must be at least 1".to_string()));
    }
    Ok(())
}

/// Keep the first of every group of values equal under `flags`.
///
/// Sorts positions by value, then keeps the earliest position of each run
/// of equal values. Survivors stay in their original order.
fn dedup_first<V: Element>(
    entries: impl IntoIterator<Item = (Key, V)>,
    flags: SortFlags,
) -> Array<V> {
    let entries: Vec<(Key, V)> = entries.into_iter().collect();
    let mut order: Vec<usize> = (0..entries.len()).collect();
    // stable, so each run starts at its first occurrence
    order.sort_by(|&a, &b| entries[a].1.compare(&entries[b].1, flags));

    let mut keep = vec![false; entries.len()];
    for (rank, &position) in order.iter().enumerate() {
        keep[position] = rank == 0
            || entries[order[rank - 1]].1.compare(&entries[position].1, flags).is_ne();
    }

    entries
        .into_iter()
        .zip(keep)
        .filter_map(|(entry, kept)| kept.then_some(entry))
        .collect()
}

impl<V> Store<V> {
    /// Rewrite every value with `f(value, key)`. Keys and order are kept.
    pub fn map(&mut self, mut f: impl FnMut(&V, &Key) -> V) -> &mut Self {
        for (key, value) in self.write().iter_mut() {
            *value = f(&*value, key);
        }
        self
    }

    /// Drop every entry for which `predicate(value, key)` is false. Survivors
    /// keep their keys and order.
    pub fn filter(&mut self, mut predicate: impl FnMut(&V, &Key) -> bool) -> &mut Self {
        self.write().retain(|key, value| predicate(&*value, key));
        self
    }

    /// Call `f(value, key, ordinal)` for every `step`-th entry, starting
    /// with the first.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `step` is 0.
    pub fn with_nth(&self, step: usize, mut f: impl FnMut(&V, &Key, usize)) -> Result<()> {
        check_step(step)?;
        for (ordinal, (key, value)) in self.read().iter().enumerate() {
            if ordinal % step == 0 {
                f(value, key, ordinal);
            }
        }
        Ok(())
    }

    /// Move the values under `keys` into a new store. Keys that are absent
    /// map to `None`.
    pub fn extract<K: Into<Key>>(
        &mut self,
        keys: impl IntoIterator<Item = K>,
    ) -> Store<Option<V>> {
        let mut extracted: Array<Option<V>> = Array::new();
        {
            let mut source = self.write();
            for key in keys {
                let key = key.into();
                if extracted.contains_key(&key) {
                    continue;
                }
                let value = source.remove(&key);
                extracted.insert(key, value);
            }
        }
        self.derive(extracted)
    }
}

impl<V: Clone> Store<V> {
    /// Every `step`-th entry as a new store, keyed `0..n` unless
    /// `keep_keys`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `step` is 0.
    pub fn nth(&self, step: usize, keep_keys: bool) -> Result<Store<V>> {
        let mut picked: Vec<(Key, V)> = Vec::new();
        self.with_nth(step, |value, key, _| picked.push((key.clone(), value.clone())))?;
        let picked = if keep_keys {
            Array::from_pairs(picked)
        } else {
            Array::from_values(picked.into_iter().map(|(_, value)| value))
        };
        Ok(self.derive(picked))
    }

    /// The values under `keys` as a new store. Absent keys are skipped.
    pub fn only<K: Into<Key>>(&self, keys: impl IntoIterator<Item = K>) -> Store<V> {
        let mut picked: Array<V> = Array::new();
        {
            let source = self.read();
            for key in keys {
                let key = key.into();
                if let Some(value) = source.get(&key) {
                    picked.insert(key, value.clone());
                }
            }
        }
        self.derive(picked)
    }

    /// A window of `limit` entries starting at position `offset`, as a new
    /// store. `None` means unbounded. Integer keys are renumbered from 0;
    /// string keys are kept.
    pub fn select(&self, limit: Option<usize>, offset: Option<usize>) -> Store<V> {
        let mut window: Array<V> = self
            .read()
            .iter()
            .skip(offset.unwrap_or(0))
            .take(limit.unwrap_or(usize::MAX))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        window.reindex();
        self.derive(window)
    }
}

impl<V: Element> Store<V> {
    /// Dissolve nested values into this level, up to `depth` levels deep.
    ///
    /// Hoisted string keys overwrite same-named entries. Hoisted integer
    /// keys that collide with an integer key of this level get fresh keys.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a fresh key is needed and the key counter is
    /// exhausted. The store is left unchanged.
    pub fn flatten(&mut self, depth: usize) -> Result<&mut Self> {
        self.write().flatten(depth)?;
        Ok(self)
    }

    /// Swap keys and values. Later duplicates win. Values that cannot be
    /// keys are skipped.
    pub fn flip(&mut self) -> &mut Self {
        let mut flipped: Array<V> = Array::new();
        {
            let mut array = self.write();
            for (key, value) in array.iter() {
                let Some(new_key) = value.to_key() else {
                    tracing::warn!("flip: skipping value that cannot be a key: {:?}", value);
                    continue;
                };
                match V::from_key(key.clone()) {
                    Some(new_value) => {
                        flipped.insert(new_key, new_value);
                    }
                    None => {
                        tracing::warn!("flip: skipping key that cannot be a value: {}", key);
                    }
                }
            }
            *array = flipped;
        }
        self
    }

    /// Values as text, joined by `separator`.
    pub fn join(&self, separator: &str) -> String {
        let array = self.read();
        let parts: Vec<_> = array.values().map(Element::to_text).collect();
        parts.join(separator)
    }

    /// [`join`](Store::join) with the configured separator.
    pub fn join_default(&self) -> String {
        self.join(&self.config.join_separator)
    }

    /// First occurrence of every distinct value under `flags`, with its key.
    pub fn unique(&self, flags: SortFlags) -> Store<V> {
        let unique = dedup_first(self.entries(), flags);
        self.derive(unique)
    }

    /// [`unique`](Store::unique) with the configured comparison.
    pub fn unique_default(&self) -> Store<V> {
        self.unique(self.config.unique_flags)
    }

    /// Distinct values of the sub-field `field` across record-like entries.
    ///
    /// Entries that are not records, or lack the field, are ignored. The
    /// projected values are listed `0..n` and the first of every group of
    /// equal values is kept with its list key.
    pub fn unique_by_key(&self, field: impl Into<Key>, flags: SortFlags) -> Store<V> {
        let field = field.into();
        let projected: Array<V> = Array::from_values(
            self.read()
                .values()
                .filter(|value| value.is_record())
                .filter_map(|value| value.field(&field).cloned()),
        );
        self.derive(dedup_first(projected, flags))
    }
}
