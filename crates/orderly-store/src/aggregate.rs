//! Folds over a store's values.

use orderly_core::{CollectionError, Element, Key, Result};

use crate::store::Store;

impl<V> Store<V> {
    /// Left fold of `f(accumulator, value, key)` from `0.0`.
    pub fn accumulate(&self, mut f: impl FnMut(f64, &V, &Key) -> f64) -> f64 {
        self.read()
            .iter()
            .fold(0.0, |accumulator, (key, value)| f(accumulator, value, key))
    }

    /// Smallest projection. Entries projecting to `None` are skipped; `None`
    /// if every entry is skipped.
    pub fn min_custom(&self, mut project: impl FnMut(&V, &Key) -> Option<f64>) -> Option<f64> {
        self.read()
            .iter()
            .filter_map(|(key, value)| project(value, key))
            .reduce(f64::min)
    }

    /// Largest projection. Entries projecting to `None` are skipped; `None`
    /// if every entry is skipped.
    pub fn max_custom(&self, mut project: impl FnMut(&V, &Key) -> Option<f64>) -> Option<f64> {
        self.read()
            .iter()
            .filter_map(|(key, value)| project(value, key))
            .reduce(f64::max)
    }

    /// Whether `predicate(value, key)` holds for some entry.
    pub fn test_any(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> bool {
        self.read().iter().any(|(key, value)| predicate(value, key))
    }

    /// Whether `predicate(value, key)` holds for every entry. True for an
    /// empty store.
    pub fn test_all(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> bool {
        self.read().iter().all(|(key, value)| predicate(value, key))
    }
}

impl<V: Element> Store<V> {
    /// Sum of the numeric casts of all values.
    pub fn sum(&self) -> f64 {
        self.accumulate(|accumulator, value, _| accumulator + value.to_number())
    }

    /// [`sum`](Store::sum) truncated to an integer.
    pub fn sum_int(&self) -> i64 {
        self.sum() as i64
    }

    /// Arithmetic mean of the numeric casts of all values.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` if the store is empty.
    pub fn average(&self) -> Result<f64> {
        let count = self.count();
        if count == 0 {
            return Err(CollectionError::DivisionByZero("average of an empty store"));
        }
        Ok(self.sum() / count as f64)
    }

    pub fn min(&self) -> Option<f64> {
        self.min_custom(|value, _| Some(value.to_number()))
    }

    pub fn max(&self) -> Option<f64> {
        self.max_custom(|value, _| Some(value.to_number()))
    }

    /// Smallest numeric cast of the sub-field `field`, over the entries
    /// that have it.
    pub fn min_sub(&self, field: impl Into<Key>) -> Option<f64> {
        let field = field.into();
        self.min_custom(|value, _| value.field(&field).map(Element::to_number))
    }

    /// Largest numeric cast of the sub-field `field`, over the entries that
    /// have it.
    pub fn max_child(&self, field: impl Into<Key>) -> Option<f64> {
        let field = field.into();
        self.max_custom(|value, _| value.field(&field).map(Element::to_number))
    }
}
