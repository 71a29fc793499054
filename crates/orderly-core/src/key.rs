//! Collection keys: a tagged union of integers and strings.
//!
//! Strings that spell a canonical decimal integer are stored as integer
//! keys, so `"2"` and `2` address the same slot. `"02"`, `"+2"`, `"-0"` and
//! `"2.0"` are not canonical and stay strings.

use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::numeric::{leading_number, parse_numeric, Number};
use crate::policy::{number_cmp, SortFlags};

/// A collection key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Check if this is an integer key.
    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    /// Check if this is a string key.
    pub fn is_str(&self) -> bool {
        matches!(self, Key::Str(_))
    }

    /// Get the integer if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(i) => Some(*i),
            Key::Str(_) => None,
        }
    }

    /// Get the string if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }

    /// Numeric cast of the key.
    pub fn to_number(&self) -> f64 {
        match self {
            Key::Int(i) => *i as f64,
            Key::Str(s) => leading_number(s),
        }
    }

    /// Text form of the key.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Key::Int(i) => Cow::Owned(i.to_string()),
            Key::Str(s) => Cow::Borrowed(s),
        }
    }

    /// Compare two keys under a sort policy.
    pub fn compare(&self, other: &Key, flags: SortFlags) -> Ordering {
        match flags {
            SortFlags::Regular => self.compare_regular(other),
            SortFlags::Numeric => number_cmp(self.to_number(), other.to_number()),
            SortFlags::String => self.to_text().as_bytes().cmp(other.to_text().as_bytes()),
        }
    }

    /// Integers and numeric strings come first, ordered by value; other
    /// strings follow, ordered bytewise.
    fn compare_regular(&self, other: &Key) -> Ordering {
        match (self.number(), other.number()) {
            (Some(a), Some(b)) => a.compare(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_text().as_bytes().cmp(other.to_text().as_bytes()),
        }
    }

    fn number(&self) -> Option<Number> {
        match self {
            Key::Int(i) => Some(Number::Int(*i)),
            Key::Str(s) => parse_numeric(s).map(Number::Float),
        }
    }
}

/// Parse a canonical decimal integer: no sign other than a leading `-`,
/// no leading zeros, no `-0`, within `i64`.
fn parse_int_key(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let bytes = digits.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes[0] == b'0' && (bytes.len() > 1 || digits.len() != s.len()) {
        return None;
    }
    s.parse::<i64>().ok()
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(i) => write!(f, "{}", i),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i as i64)
    }
}

impl From<u32> for Key {
    fn from(i: u32) -> Self {
        Key::Int(i as i64)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match parse_int_key(s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match parse_int_key(&s) {
            Some(i) => Key::Int(i),
            None => Key::Str(s),
        }
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::from(s.as_str())
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

// ============================================================================
// Serde: bare integers and strings
// ============================================================================

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Int(i) => serializer.serialize_i64(*i),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or string key")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Key, E> {
        Ok(Key::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Key, E> {
        i64::try_from(v)
            .map(Key::Int)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Key, E> {
        Ok(Key::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Key, E> {
        Ok(Key::from(v))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}
