//! Everything needed for everyday use: `use orderly::prelude::*;`

pub use orderly_core::{
    Array, CollectionError, Direction, Element, Equality, Key, SortFlags, Value,
};
pub use orderly_store::{Closest, Ownership, SharedArray, Store, StoreConfig};
