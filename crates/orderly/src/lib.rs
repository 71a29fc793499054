//! # Orderly
//!
//! Ordered associative collections with mixed integer/string keys.
//!
//! ## Overview
//!
//! A [`Store`] keeps entries in insertion order, addresses them by integer
//! or string [`Key`], and hands out fresh integer keys on append. It offers
//! a large operation library (search, map/filter, flatten, chunk/split,
//! aggregation, a family of stable sorts) and an aliasing mode in which the
//! store is a live view over data the caller owns.
//!
//! ## Key Concepts
//!
//! - **Owned store**: exclusively owns its data; copies are independent.
//! - **Aliased store**: a view over a [`SharedArray`]; mutations are seen by
//!   every holder immediately.
//! - **Synthetic key**: the integer key `push` assigns, always one past the
//!   largest integer key ever inserted.
//! - **Cursor**: the single external-iteration position of a store.
//!
//! ## Usage
//!
//! ```rust
//! use orderly::prelude::*;
//!
//! let mut store: Store = Store::from_values([3, 1, 2]);
//! store.insert("label", Value::from("three"));
//!
//! assert_eq!(store.get(0).unwrap(), Value::Int(3));
//! assert_eq!(store.find_index(|value, _| value.as_int() == Some(2)), Some(Key::Int(2)));
//!
//! store.remove("label").sort_numerical();
//! assert_eq!(store.join(","), "1,2,3");
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `orderly::core` - Keys, values, the backing array and policies
//! - `orderly::store` - The store, its ownership modes and operations

pub mod prelude;

// Re-export component crates
pub use orderly_core as core;
pub use orderly_store as store;

// Re-export main types for convenience
pub use orderly_core::{
    Array, CollectionError, Direction, Element, Equality, Key, Result, SortFlags, Value,
};
pub use orderly_store::{Closest, Ownership, SharedArray, Store, StoreConfig};
