//! Search and predicate operations.
//!
//! Every "nothing found" outcome is an `Option`, so a stored `false`, `0`
//! or null is never mistaken for a miss.

use serde::{Deserialize, Serialize};

use orderly_core::distance::{levenshtein, within};
use orderly_core::{Array, Element, Equality, Key};

use crate::store::Store;

/// One `find_closest` hit: an entry and its edit distance to the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Closest<V> {
    pub score: usize,
    pub entry: V,
}

impl<V: Element> Store<V> {
    /// First value, in order, matching `predicate(value, key)`.
    pub fn find(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> Option<V> {
        self.read()
            .iter()
            .find(|&(key, value)| predicate(value, key))
            .map(|(_, value)| value.clone())
    }

    /// Key of the first value matching `predicate(value, key)`.
    pub fn find_index(&self, mut predicate: impl FnMut(&V, &Key) -> bool) -> Option<Key> {
        self.read()
            .iter()
            .find(|&(key, value)| predicate(value, key))
            .map(|(key, _)| key.clone())
    }

    /// Key of the first value equal to `value`.
    pub fn index_of(&self, value: &V, equality: Equality) -> Option<Key> {
        self.find_index(|candidate, _| candidate.equals(value, equality))
    }

    /// Key of the last value equal to `value`.
    pub fn last_index_of(&self, value: &V, equality: Equality) -> Option<Key> {
        let mut found = None;
        for (key, candidate) in self.read().iter() {
            if candidate.equals(value, equality) {
                found = Some(key.clone());
            }
        }
        found
    }

    /// Whether any value equals `value` under the configured equality.
    pub fn contains(&self, value: &V) -> bool {
        self.index_of(value, self.config.equality).is_some()
    }

    /// Entries within `max_distance` edits of `target`, closest first.
    ///
    /// With `field`, each entry is measured by that sub-field (an entry
    /// without it is measured as the empty string); otherwise by its own
    /// text. `None` for `max_distance` keeps every entry. Ties keep their
    /// original order. The result is keyed `0..n`.
    pub fn find_closest(
        &self,
        field: Option<&Key>,
        target: &str,
        max_distance: Option<usize>,
    ) -> Store<Closest<V>> {
        let mut hits: Vec<Closest<V>> = Vec::new();
        for entry in self.read().values() {
            let score = {
                let measured = match field {
                    Some(name) => entry.field(name),
                    None => Some(entry),
                };
                let text = measured.map(|value| value.to_text());
                levenshtein(target, text.as_deref().unwrap_or(""))
            };
            if within(score, max_distance) {
                hits.push(Closest {
                    score,
                    entry: entry.clone(),
                });
            }
        }
        hits.sort_by_key(|hit| hit.score);

        tracing::trace!("find_closest({:?}): {} hits", target, hits.len());
        self.derive(Array::from_values(hits))
    }

    /// The closest entry, or `None` if nothing qualifies.
    pub fn find_closest_one(
        &self,
        field: Option<&Key>,
        target: &str,
        max_distance: Option<usize>,
    ) -> Option<V> {
        self.find_closest(field, target, max_distance)
            .read()
            .first()
            .map(|(_, hit)| hit.entry.clone())
    }
}
