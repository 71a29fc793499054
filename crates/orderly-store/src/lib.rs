//! # Orderly Store
//!
//! The [`Store`]: an ordered key/value container with mixed integer/string
//! keys, a cursor, and a library of search, transform, aggregation and sort
//! operations.
//!
//! ## Overview
//!
//! A store either owns its data or is an aliased view over a caller-owned
//! [`SharedArray`]. The constructor decides which, so unintended sharing
//! cannot happen by accident. Operations read and write through the same
//! guards in both modes.
//!
//! ## Key Types
//!
//! - [`Store`] - The container and its operations
//! - [`SharedArray`] - Caller-owned data that aliased stores view
//! - [`Ownership`] - Whether a store owns or aliases its data
//! - [`StoreConfig`] - Default policies, inherited by derived stores
//! - [`Closest`] - A `find_closest` hit
//!
//! ## Usage
//!
//! ```rust
//! use orderly_core::{Array, Value};
//! use orderly_store::{SharedArray, Store};
//!
//! let shared = SharedArray::new(Array::from_values([1, 2, 3]));
//! let mut view: Store = Store::alias(&shared);
//!
//! view.push(Value::Int(4)).unwrap();
//! assert_eq!(shared.borrow().len(), 4);
//!
//! let evens = view
//!     .split(|value, _| value.as_int().is_some_and(|i| i % 2 == 0))
//!     .unwrap();
//! assert_eq!(evens.get(0).unwrap().count(), 2);
//! ```
//!
//! ## Design Notes
//!
//! - **Explicit results**: "nothing found" is `None`, never a sentinel
//! - **Explicit cursor**: iteration state is a position, not a stored value
//! - **Stable sorts**: ties keep their relative order
//! - **Single-threaded**: aliased stores hold an `Rc` and are `!Send`

pub mod aggregate;
pub mod config;
pub mod cursor;
pub mod search;
pub mod shared;
pub mod sort;
pub mod store;
pub mod structure;
pub mod transform;

pub use config::StoreConfig;
pub use cursor::{Cursor, CursorIter, CursorState};
pub use search::Closest;
pub use shared::{ArrayMut, ArrayRef, Ownership, SharedArray};
pub use store::{Store, Unwrap};
