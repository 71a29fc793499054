//! Numeric-string helpers.
//!
//! Strings take part in numeric comparisons and casts. A string is
//! *numeric* when, after optional surrounding whitespace, it is a decimal
//! number with optional sign, fraction and exponent (`"12"`, `" -1.5"`,
//! `"3e2 "`). Hexadecimal, octal and `inf`/`nan` spellings are not numeric.

use std::cmp::Ordering;

use crate::policy::number_cmp;

/// Whitespace accepted around numeric strings.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Scan the longest numeric prefix of `s`.
///
/// Returns the parsed value and the byte offset just past the prefix.
fn scan_prefix(s: &str) -> Option<(f64, usize)> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len && is_space(bytes[i]) {
        i += 1;
    }
    let start = i;

    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < len && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        let frac = j - frac_start;
        if digits + frac > 0 {
            i = j;
            digits += frac;
        }
    }

    if digits == 0 {
        return None;
    }

    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    s[start..i].parse::<f64>().ok().map(|value| (value, i))
}

/// Parse `s` as a whole numeric string.
///
/// Returns `None` if anything other than whitespace follows the number.
pub fn parse_numeric(s: &str) -> Option<f64> {
    let (value, end) = scan_prefix(s)?;
    if s.as_bytes()[end..].iter().all(|&b| is_space(b)) {
        Some(value)
    } else {
        None
    }
}

/// Whether `s` is a numeric string.
pub fn is_numeric(s: &str) -> bool {
    parse_numeric(s).is_some()
}

/// Cast `s` to a number using its numeric prefix, `0.0` if there is none.
pub fn leading_number(s: &str) -> f64 {
    scan_prefix(s).map(|(value, _)| value).unwrap_or(0.0)
}

/// An exact number: integers are compared without rounding through `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Total order consistent with [`number_cmp`]; NaN sorts last.
    pub(crate) fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Float(a), Number::Float(b)) => number_cmp(a, b),
            (Number::Int(a), Number::Float(b)) => int_float_cmp(a, b),
            (Number::Float(a), Number::Int(b)) => int_float_cmp(b, a).reverse(),
        }
    }
}

/// Compare an integer with a float by exact value.
fn int_float_cmp(i: i64, f: f64) -> Ordering {
    // 2^63, the first float above every i64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() || f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    // in range, so the cast is exact
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => number_cmp(whole, f),
        ordering => ordering,
    }
}

/// Format a float the way it is rendered as text.
///
/// Integral values within the exactly-representable range print without a
/// fractional part; non-finite values use upper-case names.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return format!("{}", f as i64);
    }
    format!("{}", f)
}
