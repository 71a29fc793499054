//! # Orderly Testkit
//!
//! Testing utilities for orderly.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known key-normalization and numeric-cast cases with
//!   expected outputs
//! - **Generators**: Proptest strategies for keys, values and arrays
//! - **Fixtures**: Helper structs for setting up owned and aliased stores
//!
//! ## Golden Vectors
//!
//! ```rust
//! use orderly_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{}: got {}", name, actual);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use orderly_testkit::generators::{store_from_params, StoreParams};
//!
//! proptest! {
//!     #[test]
//!     fn copy_is_equal(params: StoreParams) {
//!         let store = store_from_params(&params);
//!         prop_assert_eq!(store.copy(), store);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use orderly_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_values([1, 2, 3]);
//! let store = fixture.aliased();
//! fixture.shared.borrow_mut().push(4.into()).unwrap();
//! assert_eq!(store.count(), 4);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{people, person, words, TestFixture};
pub use generators::{store_from_params, StoreParams};
pub use vectors::{key_vectors, numeric_vectors, verify_all_vectors, KeyVector, NumericVector};
