//! The sort family.
//!
//! Every sort is stable and mutates the store in place. Value sorts come in
//! two flavours:
//!
//! - re-keying (`sort_alphabetically`, ...): keys are discarded and the
//!   sorted values are numbered `0..n`, string keys included;
//! - key-keeping (`..._keep_keys`): every value keeps its key.
//!
//! The built-in policies are total orders over every value, NaN and mixed
//! kinds included. Custom comparators must be total orders too; the
//! standard library's sort may panic otherwise.

use std::cmp::Ordering;

use orderly_core::{CollectionError, Direction, Element, Key, Result, SortFlags};

use crate::store::Store;

/// Compare an optional field, treating a missing field as smallest.
fn compare_fields<V: Element>(a: Option<&V>, b: Option<&V>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(b, SortFlags::Regular),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl<V> Store<V> {
    // ─────────────────────────────────────────────────────────────────────────
    // Custom comparators
    // ─────────────────────────────────────────────────────────────────────────

    /// Sort values with `cmp` and re-key `0..n`.
    pub fn sort_custom(&mut self, cmp: impl FnMut(&V, &V) -> Ordering) -> &mut Self {
        tracing::debug!("re-keying {} entries after sort", self.count());
        self.write().sort_values_by(cmp);
        self
    }

    /// Sort values with `cmp`, keeping keys.
    pub fn sort_custom_keep_keys(&mut self, cmp: impl FnMut(&V, &V) -> Ordering) -> &mut Self {
        self.write().sort_by(cmp);
        self
    }

    /// Sort entries by key with `cmp`.
    pub fn sort_keys_custom(&mut self, cmp: impl FnMut(&Key, &Key) -> Ordering) -> &mut Self {
        self.write().sort_keys_by(cmp);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Key sorts
    // ─────────────────────────────────────────────────────────────────────────

    pub fn sort_keys_alphabetical(&mut self) -> &mut Self {
        self.sort_keys_custom(|a, b| a.compare(b, SortFlags::Regular))
    }

    pub fn sort_keys_alphabetical_desc(&mut self) -> &mut Self {
        self.sort_keys_custom(|a, b| b.compare(a, SortFlags::Regular))
    }

    pub fn sort_keys_numerical(&mut self) -> &mut Self {
        self.sort_keys_custom(|a, b| a.compare(b, SortFlags::Numeric))
    }

    pub fn sort_keys_numerical_desc(&mut self) -> &mut Self {
        self.sort_keys_custom(|a, b| b.compare(a, SortFlags::Numeric))
    }
}

impl<V: Element> Store<V> {
    // ─────────────────────────────────────────────────────────────────────────
    // Value sorts
    // ─────────────────────────────────────────────────────────────────────────

    pub fn sort_alphabetically(&mut self) -> &mut Self {
        self.sort_custom(|a, b| a.compare(b, SortFlags::Regular))
    }

    pub fn sort_alphabetically_keep_keys(&mut self) -> &mut Self {
        self.sort_custom_keep_keys(|a, b| a.compare(b, SortFlags::Regular))
    }

    pub fn sort_alphabetically_desc(&mut self) -> &mut Self {
        self.sort_custom(|a, b| b.compare(a, SortFlags::Regular))
    }

    pub fn sort_alphabetically_desc_keep_keys(&mut self) -> &mut Self {
        self.sort_custom_keep_keys(|a, b| b.compare(a, SortFlags::Regular))
    }

    pub fn sort_numerical(&mut self) -> &mut Self {
        self.sort_custom(|a, b| a.compare(b, SortFlags::Numeric))
    }

    pub fn sort_numerical_keep_keys(&mut self) -> &mut Self {
        self.sort_custom_keep_keys(|a, b| a.compare(b, SortFlags::Numeric))
    }

    pub fn sort_numerical_desc(&mut self) -> &mut Self {
        self.sort_custom(|a, b| b.compare(a, SortFlags::Numeric))
    }

    pub fn sort_numerical_desc_keep_keys(&mut self) -> &mut Self {
        self.sort_custom_keep_keys(|a, b| b.compare(a, SortFlags::Numeric))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Record sorts
    // ─────────────────────────────────────────────────────────────────────────

    /// Sort records by one field, keeping keys.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any entry is not record-like.
    pub fn sort_by_field(&mut self, field: impl Into<Key>, ascending: bool) -> Result<&mut Self> {
        self.sort_by_fields(&[(field.into(), Direction::from_ascending(ascending))])
    }

    /// Sort records by several fields, keeping keys.
    ///
    /// Fields are compared in order and the first unequal one decides;
    /// records equal on every field keep their relative order. A record
    /// missing a field sorts before records that have it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if any entry is not record-like.
    pub fn sort_by_fields(&mut self, fields: &[(Key, Direction)]) -> Result<&mut Self> {
        if let Some(key) = self.find_index(|value, _| !value.is_record()) {
            return Err(CollectionError::InvalidArgument(format!(
                "cannot sort by fields: entry {} is not a record",
                key
            )));
        }

        self.sort_custom_keep_keys(|a, b| {
            fields
                .iter()
                .map(|(field, direction)| {
                    direction.apply(compare_fields(a.field(field), b.field(field)))
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        Ok(self)
    }
}
