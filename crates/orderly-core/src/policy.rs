//! Comparison policies shared by search, de-duplication and sorting.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CollectionError;

/// How two values are ordered when sorting or de-duplicating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortFlags {
    /// Loose comparison: numbers and numeric strings numerically,
    /// other strings bytewise. Kinds that cannot be compared that way are
    /// ranked, so the order stays total.
    #[default]
    Regular,
    /// Both sides cast to numbers.
    Numeric,
    /// Both sides cast to text and compared bytewise.
    String,
}

/// How two values are tested for equality when searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equality {
    /// Same type and same payload.
    #[default]
    Strict,
    /// Equal under the regular loose comparison.
    Loose,
}

/// Sort direction of one field in a multi-field sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ordering,
            Direction::Descending => ordering.reverse(),
        }
    }

    /// `Ascending` when `ascending` is true.
    pub fn from_ascending(ascending: bool) -> Self {
        if ascending {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }
}

impl FromStr for Direction {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Direction::Ascending)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Direction::Descending)
        } else {
            Err(CollectionError::InvalidArgument(format!(
                "sort direction must be \"asc\" or \"desc\", got {:?}",
                s
            )))
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => write!(f, "asc"),
            Direction::Descending => write!(f, "desc"),
        }
    }
}

/// Total ordering over floats for sorting.
///
/// NaN sorts after every number, including infinity, and all NaNs are equal
/// to each other. `-0.0` and `0.0` are equal.
pub fn number_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Equal,
    }
}
