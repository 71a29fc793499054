//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use orderly_core::{Array, Value};
use orderly_store::{SharedArray, Store};

/// Caller-owned data that stores can alias or copy.
pub struct TestFixture {
    pub shared: SharedArray<Value>,
}

impl TestFixture {
    /// Create an empty fixture.
    pub fn new() -> Self {
        Self {
            shared: SharedArray::default(),
        }
    }

    /// Create a fixture holding `values` keyed `0..n`.
    pub fn with_values<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Self {
            shared: SharedArray::new(Array::from_values(values)),
        }
    }

    /// Create a fixture from a JSON document.
    ///
    /// Objects and arrays become the fixture's entries; any other document
    /// becomes a one-entry list.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let array = match serde_json::from_str::<Value>(json)? {
            Value::Array(array) => array,
            scalar => Array::from_values([scalar]),
        };
        Ok(Self {
            shared: SharedArray::new(array),
        })
    }

    /// A store viewing the fixture's data.
    pub fn aliased(&self) -> Store {
        Store::alias(&self.shared)
    }

    /// A store owning a copy of the fixture's current data.
    pub fn owned(&self) -> Store {
        Store::copied_from_shared(&self.shared)
    }

    pub fn len(&self) -> usize {
        self.shared.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A `{name, age, city}` record.
pub fn person(name: &str, age: i64, city: &str) -> Value {
    let mut record: Array<Value> = Array::new();
    record.insert("name", Value::from(name));
    record.insert("age", Value::Int(age));
    record.insert("city", Value::from(city));
    Value::from(record)
}

/// Five records with repeated ages and cities.
pub fn people() -> Store {
    Store::from_values([
        person("dana", 30, "kiel"),
        person("alex", 25, "bonn"),
        person("cory", 30, "bonn"),
        person("bo", 41, "kiel"),
        person("eli", 25, "kiel"),
    ])
}

/// `["test", "abc", "bla"]`.
pub fn words() -> Store {
    Store::from_values(["test", "abc", "bla"])
}
