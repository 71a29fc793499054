//! Dynamic values.
//!
//! `Value` is the default element type of a store: null, booleans,
//! integers, floats, strings and nested arrays, mixed freely.
//!
//! ## Equality
//!
//! - `strict_eq` (also `PartialEq`): same variant, same payload.
//!   `Int(1) != Float(1.0)`, floats follow IEEE-754 (`NaN != NaN`).
//! - `loose_eq`: `Int(1)`, `Float(1.0)`, `String("1")` and `Bool(true)`
//!   are all equal; `Null` equals `false` and `""`.
//!
//! ## Ordering
//!
//! `compare_regular` is a total order, so any mix of values sorts. It
//! agrees with `loose_eq` on numbers and strings but ranks kinds apart:
//! `Null < Bool < numbers < strings < arrays`.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::array::Array;
use crate::element::Element;
use crate::key::Key;
use crate::numeric::{format_float, is_numeric, leading_number, parse_numeric, Number};
use crate::policy::SortFlags;

/// A dynamically typed collection value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Nested ordered array
    Array(Array<Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is an array value
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as f64 if this is an Int or Float value.
    ///
    /// Booleans, strings and null are not numbers here; use
    /// [`to_number`](Value::to_number) for the cast.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &Array if this is an Array value
    pub fn as_array(&self) -> Option<&Array<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &mut Array if this is an Array value
    pub fn as_array_mut(&mut self) -> Option<&mut Array<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Truthiness: null, `false`, `0`, `0.0`, `""`, `"0"` and empty arrays
    /// are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !(s.is_empty() || s == "0"),
            Value::Array(a) => !a.is_empty(),
        }
    }

    /// Numeric cast.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            Value::String(s) => leading_number(s),
            Value::Array(a) => {
                if a.is_empty() {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    /// Text cast.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Value::Null => Cow::Borrowed(""),
            Value::Bool(true) => Cow::Borrowed("1"),
            Value::Bool(false) => Cow::Borrowed(""),
            Value::Int(i) => Cow::Owned(i.to_string()),
            Value::Float(f) => Cow::Owned(format_float(*f)),
            Value::String(s) => Cow::Borrowed(s),
            Value::Array(_) => Cow::Borrowed("Array"),
        }
    }

    /// Whether this is a NaN float.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Float(f) if f.is_nan())
    }

    /// Strict equality: same variant and same payload.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va.strict_eq(vb))
            }
            _ => false,
        }
    }

    /// Loose equality.
    ///
    /// Null equals the empty string. Otherwise a null or boolean side
    /// compares by truthiness. Numbers and numeric strings compare by
    /// value, anything else by text. Arrays are equal when they hold loosely
    /// equal values under the same keys, in any order. NaN equals nothing.
    pub fn loose_eq(&self, other: &Value) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }
        match (self, other) {
            (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
            (Value::Null | Value::Bool(_), _) | (_, Value::Null | Value::Bool(_)) => {
                self.is_truthy() == other.is_truthy()
            }
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(key, va)| b.get(key).is_some_and(|vb| va.loose_eq(vb)))
            }
            (Value::Array(_), _) | (_, Value::Array(_)) => false,
            _ => match (self.number(), other.number()) {
                (Some(a), Some(b)) => a.compare(b) == Ordering::Equal,
                _ => self.to_text() == other.to_text(),
            },
        }
    }

    /// Loose three-way comparison, a total order.
    ///
    /// Values are ranked by kind first: null, booleans, numbers together
    /// with numeric strings, other strings, arrays. Within a rank, booleans
    /// put `false` first, numbers compare by exact value with NaN last,
    /// strings compare bytewise. Arrays compare by length, then entry by
    /// entry in key order.
    pub fn compare_regular(&self, other: &Value) -> Ordering {
        let by_rank = self.rank().cmp(&other.rank());
        if by_rank != Ordering::Equal {
            return by_rank;
        }
        if let (Some(a), Some(b)) = (self.number(), other.number()) {
            return a.compare(b);
        }
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Value::Array(a), Value::Array(b)) => compare_arrays(a, b),
            _ => Ordering::Equal,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::String(s) if is_numeric(s) => 2,
            Value::String(_) => 3,
            Value::Array(_) => 4,
        }
    }

    fn number(&self) -> Option<Number> {
        match self {
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::String(s) => parse_numeric(s).map(Number::Float),
            _ => None,
        }
    }
}

fn compare_arrays(a: &Array<Value>, b: &Array<Value>) -> Ordering {
    let by_len = a.len().cmp(&b.len());
    if by_len != Ordering::Equal {
        return by_len;
    }
    let (left, right) = (entries_by_key(a), entries_by_key(b));
    left.iter()
        .zip(&right)
        .map(|((ka, va), (kb, vb))| key_order(ka, kb).then_with(|| va.compare_regular(vb)))
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn entries_by_key(array: &Array<Value>) -> Vec<(&Key, &Value)> {
    let mut entries: Vec<(&Key, &Value)> = array.iter().collect();
    entries.sort_by(|(a, _), (b, _)| key_order(a, b));
    entries
}

/// Regular key order, refined so that distinct keys never tie.
fn key_order(a: &Key, b: &Key) -> Ordering {
    a.compare(b, SortFlags::Regular)
        .then_with(|| a.is_str().cmp(&b.is_str()))
        .then_with(|| a.to_text().cmp(&b.to_text()))
}

impl Element for Value {
    fn strict_eq(&self, other: &Self) -> bool {
        Value::strict_eq(self, other)
    }

    fn compare_regular(&self, other: &Self) -> Ordering {
        Value::compare_regular(self, other)
    }

    fn loose_eq(&self, other: &Self) -> bool {
        Value::loose_eq(self, other)
    }

    fn to_number(&self) -> f64 {
        Value::to_number(self)
    }

    fn to_text(&self) -> Cow<'_, str> {
        Value::to_text(self)
    }

    fn to_key(&self) -> Option<Key> {
        match self {
            Value::Int(i) => Some(Key::Int(*i)),
            Value::String(s) => Some(Key::from(s.as_str())),
            _ => None,
        }
    }

    fn from_key(key: Key) -> Option<Self> {
        Some(Value::from(key))
    }

    fn is_record(&self) -> bool {
        self.is_array()
    }

    fn field(&self, name: &Key) -> Option<&Self> {
        self.as_array()?.get(name)
    }

    fn is_nested(&self) -> bool {
        self.is_array()
    }

    fn into_nested(self) -> Result<Array<Self>, Self> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::String(s),
        }
    }
}

impl From<Array<Value>> for Value {
    fn from(a: Array<Value>) -> Self {
        Value::Array(a)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Array(Array::from_values(values))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

// ============================================================================
// Serde: lists as JSON arrays, keyed arrays as JSON objects
// ============================================================================

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(a) if a.is_list() => {
                let mut seq = serializer.serialize_seq(Some(a.len()))?;
                for value in a.values() {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Value::Array(a) => a.serialize(serializer),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a null, boolean, number, string, sequence or map")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(v as f64),
        })
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut array = Array::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element::<Value>()? {
            array.append(value);
        }
        Ok(Value::Array(array))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut array = Array::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<Key, Value>()? {
            array.insert(key, value);
        }
        Ok(Value::Array(array))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}
