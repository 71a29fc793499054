//! Error types for orderly collections.

use thiserror::Error;

use crate::key::Key;

/// Errors that can occur during collection operations.
///
/// Operations that can legitimately find nothing (`find`, `index_of`,
/// `min`, ...) return `Option` instead; these variants are reserved for
/// calls that cannot produce a meaningful result at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectionError {
    /// Strict lookup of a key that is not present.
    #[error("key not found: {0}")]
    KeyNotFound(Key),

    /// `unwrap` was given something that has no backing array.
    #[error("can only unwrap collections and arrays, got {found}")]
    NotCollectionOrArray { found: &'static str },

    /// An aggregate would divide by the size of an empty collection.
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),

    /// An argument is outside the domain of the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
