//! The `Element` trait: what value-aware operations need from a value.
//!
//! Key/value bookkeeping (insert, remove, cursor, chunk, ...) works for any
//! value type. Searching by value, sorting, aggregating and flattening need
//! to compare, cast and look inside values, which is what this trait
//! provides. [`Value`](crate::Value) implements all of it; the primitive
//! impls below cover the common homogeneous cases.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

use crate::array::Array;
use crate::key::Key;
use crate::numeric::{format_float, leading_number, parse_numeric};
use crate::policy::{number_cmp, Equality, SortFlags};

/// Capabilities of a collection element.
pub trait Element: Clone + fmt::Debug {
    /// Identity/type-exact equality.
    fn strict_eq(&self, other: &Self) -> bool;

    /// Loose ordering used by the `Regular` sort policy. Must be a total
    /// order, since sorting relies on it.
    fn compare_regular(&self, other: &Self) -> Ordering;

    /// Loose equality.
    fn loose_eq(&self, other: &Self) -> bool {
        self.compare_regular(other) == Ordering::Equal
    }

    /// Numeric cast.
    fn to_number(&self) -> f64;

    /// Text cast.
    fn to_text(&self) -> Cow<'_, str>;

    /// The key this value becomes when keys and values are swapped.
    ///
    /// `None` for values that cannot be keys.
    fn to_key(&self) -> Option<Key> {
        None
    }

    /// Build a value from a key, if this type can hold one.
    fn from_key(_key: Key) -> Option<Self> {
        None
    }

    /// Whether the value is record-like (has named sub-fields).
    fn is_record(&self) -> bool {
        false
    }

    /// Named sub-field of a record-like value.
    fn field(&self, _name: &Key) -> Option<&Self> {
        None
    }

    /// Whether the value is a nested sequence that `flatten` dissolves.
    fn is_nested(&self) -> bool {
        false
    }

    /// Take the nested entries out of the value, or give the value back.
    fn into_nested(self) -> Result<Array<Self>, Self> {
        Err(self)
    }

    /// Compare under a sort policy.
    fn compare(&self, other: &Self, flags: SortFlags) -> Ordering {
        match flags {
            SortFlags::Regular => self.compare_regular(other),
            SortFlags::Numeric => number_cmp(self.to_number(), other.to_number()),
            SortFlags::String => self.to_text().as_bytes().cmp(other.to_text().as_bytes()),
        }
    }

    /// Test equality under an equality policy.
    fn equals(&self, other: &Self, equality: Equality) -> bool {
        match equality {
            Equality::Strict => self.strict_eq(other),
            Equality::Loose => self.loose_eq(other),
        }
    }
}

impl Element for i64 {
    fn strict_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn compare_regular(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn to_number(&self) -> f64 {
        *self as f64
    }

    fn to_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn to_key(&self) -> Option<Key> {
        Some(Key::Int(*self))
    }

    fn from_key(key: Key) -> Option<Self> {
        key.as_int()
    }
}

impl Element for f64 {
    fn strict_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn compare_regular(&self, other: &Self) -> Ordering {
        number_cmp(*self, *other)
    }

    fn loose_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn to_number(&self) -> f64 {
        *self
    }

    fn to_text(&self) -> Cow<'_, str> {
        Cow::Owned(format_float(*self))
    }

    fn from_key(key: Key) -> Option<Self> {
        key.as_int().map(|i| i as f64)
    }
}

impl Element for String {
    fn strict_eq(&self, other: &Self) -> bool {
        self == other
    }

    /// Numeric strings sort first, by value; the rest follow bytewise.
    fn compare_regular(&self, other: &Self) -> Ordering {
        match (parse_numeric(self), parse_numeric(other)) {
            (Some(a), Some(b)) => number_cmp(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.as_bytes().cmp(other.as_bytes()),
        }
    }

    fn to_number(&self) -> f64 {
        leading_number(self)
    }

    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn to_key(&self) -> Option<Key> {
        Some(Key::from(self.as_str()))
    }

    fn from_key(key: Key) -> Option<Self> {
        Some(key.to_string())
    }
}

impl Element for Key {
    fn strict_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn compare_regular(&self, other: &Self) -> Ordering {
        self.compare(other, SortFlags::Regular)
    }

    fn to_number(&self) -> f64 {
        Key::to_number(self)
    }

    fn to_text(&self) -> Cow<'_, str> {
        Key::to_text(self)
    }

    fn to_key(&self) -> Option<Key> {
        Some(self.clone())
    }

    fn from_key(key: Key) -> Option<Self> {
        Some(key)
    }
}
