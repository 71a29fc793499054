//! # Orderly Core
//!
//! Pure primitives for orderly collections: keys, dynamic values and the
//! ordered backing array.
//!
//! This crate holds no shared state and does no logging. The store, its
//! aliasing model and the collection operations live in `orderly-store`.
//!
//! ## Key Types
//!
//! - [`Key`] - Integer-or-string key with canonical integer normalization
//! - [`Array`] - Insertion-ordered map with an append counter
//! - [`Value`] - Dynamically typed element (null, bool, int, float, string, array)
//! - [`Element`] - What value-aware operations need from an element type
//!
//! ## Policies
//!
//! Searching, de-duplication and sorting are parameterized by
//! [`Equality`] and [`SortFlags`]; multi-field sorts by [`Direction`].

pub mod array;
pub mod distance;
pub mod element;
pub mod error;
pub mod key;
pub mod numeric;
pub mod policy;
pub mod value;

pub use array::Array;
pub use distance::levenshtein;
pub use element::Element;
pub use error::{CollectionError, Result};
pub use key::Key;
pub use numeric::{format_float, is_numeric, leading_number, parse_numeric};
pub use policy::{number_cmp, Direction, Equality, SortFlags};
pub use value::Value;
