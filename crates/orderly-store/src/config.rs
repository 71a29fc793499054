//! Store configuration.

use orderly_core::{Equality, Key, SortFlags};
use serde::{Deserialize, Serialize};

/// Defaults a store applies when an operation is not given an explicit
/// policy. Stores derived from a store (chunks, splits, copies, ...)
/// inherit its configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Equality used by `contains` and `remove_item`.
    pub equality: Equality,
    /// Separator used by `join_default`.
    pub join_separator: String,
    /// Keys of the two sides returned by `split`.
    pub split_labels: (Key, Key),
    /// Comparison used by `unique_default`.
    pub unique_flags: SortFlags,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            equality: Equality::Strict,
            join_separator: ",".to_string(),
            split_labels: (Key::from("0"), Key::from("1")),
            unique_flags: SortFlags::Regular,
        }
    }
}

impl StoreConfig {
    pub fn with_equality(mut self, equality: Equality) -> Self {
        self.equality = equality;
        self
    }

    pub fn with_join_separator(mut self, separator: impl Into<String>) -> Self {
        self.join_separator = separator.into();
        self
    }

    pub fn with_split_labels(mut self, left: impl Into<Key>, right: impl Into<Key>) -> Self {
        self.split_labels = (left.into(), right.into());
        self
    }

    pub fn with_unique_flags(mut self, flags: SortFlags) -> Self {
        self.unique_flags = flags;
        self
    }
}
