//! Proptest generators for property-based testing.

use proptest::prelude::*;

use orderly_core::{Array, Key, Value};
use orderly_store::{SharedArray, Store};

/// Generate a key: a small integer, a numeric string that stays a string,
/// or a short name.
pub fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        3 => (-20i64..100).prop_map(Key::Int),
        1 => "[0-9]{1,2}\\.[0-9]".prop_map(Key::from),
        3 => "[a-z]{1,6}".prop_map(Key::from),
    ]
}

/// Generate a float, now and then NaN or infinite.
pub fn float() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -1.0e6f64..1.0e6,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

/// Generate a non-array value.
pub fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(Value::Int),
        float().prop_map(Value::Float),
        "[a-z0-9 ]{0,8}".prop_map(Value::from),
    ]
}

/// Generate a value, nesting arrays up to three levels deep.
pub fn value() -> impl Strategy<Value = Value> {
    scalar_value().prop_recursive(3, 32, 4, |inner| {
        prop::collection::vec((key(), inner), 0..4)
            .prop_map(|pairs| Value::from(Array::<Value>::from_pairs(pairs)))
    })
}

/// Generate an array with mixed keys.
pub fn array(max_len: usize) -> impl Strategy<Value = Array<Value>> {
    prop::collection::vec((key(), value()), 0..=max_len).prop_map(Array::<Value>::from_pairs)
}

/// Generate a list of values keyed `0..n`.
pub fn list(max_len: usize) -> impl Strategy<Value = Array<Value>> {
    prop::collection::vec(value(), 0..=max_len).prop_map(Array::<Value>::from_values)
}

/// Generate a list of integers keyed `0..n`.
pub fn int_list(max_len: usize) -> impl Strategy<Value = Array<i64>> {
    prop::collection::vec(-1000i64..1000, 0..=max_len).prop_map(Array::<i64>::from_values)
}

/// Generate a record with an `n` field drawn from a small domain, so that
/// sorts see plenty of ties.
pub fn tied_record() -> impl Strategy<Value = Value> {
    (0i64..4).prop_map(|n| {
        let mut record: Array<Value> = Array::new();
        record.insert("n", Value::Int(n));
        Value::from(record)
    })
}

/// Generate a record whose `n` field holds any value, or is missing.
pub fn loose_record() -> impl Strategy<Value = Value> {
    (prop::option::of(value()), "[a-z]{1,3}").prop_map(|(n, name)| {
        let mut record: Array<Value> = Array::new();
        record.insert("name", Value::from(name));
        if let Some(n) = n {
            record.insert("n", n);
        }
        Value::from(record)
    })
}

/// Parameters for generating a store.
#[derive(Debug, Clone)]
pub struct StoreParams {
    pub entries: Array<Value>,
    /// View the entries through a shared array instead of owning them.
    pub aliased: bool,
}

impl Arbitrary for StoreParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (array(16), any::<bool>())
            .prop_map(|(entries, aliased)| StoreParams { entries, aliased })
            .boxed()
    }
}

/// Generate a store from parameters.
pub fn store_from_params(params: &StoreParams) -> Store {
    if params.aliased {
        Store::alias(&SharedArray::new(params.entries.clone()))
    } else {
        Store::copied_from(&params.entries)
    }
}
