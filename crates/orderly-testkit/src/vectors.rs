//! Golden test vectors for key normalization and numeric casts.
//!
//! These pin down how strings become keys and numbers, the two conversions
//! every comparison, sort and aggregate depends on.

use orderly_core::{leading_number, parse_numeric, Key};

/// A string used as a key.
#[derive(Debug, Clone)]
pub struct KeyVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub input: &'static str,
    /// The integer key `input` normalizes to, `None` if it stays a string.
    pub expected_int: Option<i64>,
}

/// A string cast to a number.
#[derive(Debug, Clone)]
pub struct NumericVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub input: &'static str,
    /// Value as a whole numeric string, `None` if it is not one.
    pub expected_numeric: Option<f64>,
    /// Value of the numeric cast (leading-number rule).
    pub expected_cast: f64,
}

/// Get all key-normalization vectors.
pub fn key_vectors() -> Vec<KeyVector> {
    vec![
        KeyVector {
            name: "plain decimal",
            input: "42",
            expected_int: Some(42),
        },
        KeyVector {
            name: "negative decimal",
            input: "-7",
            expected_int: Some(-7),
        },
        KeyVector {
            name: "zero",
            input: "0",
            expected_int: Some(0),
        },
        KeyVector {
            name: "leading zero",
            input: "007",
            expected_int: None,
        },
        KeyVector {
            name: "negative zero",
            input: "-0",
            expected_int: None,
        },
        KeyVector {
            name: "explicit plus",
            input: "+3",
            expected_int: None,
        },
        KeyVector {
            name: "fraction",
            input: "1.5",
            expected_int: None,
        },
        KeyVector {
            name: "surrounding space",
            input: " 5",
            expected_int: None,
        },
        KeyVector {
            name: "overflow",
            input: "9223372036854775808",
            expected_int: None,
        },
        KeyVector {
            name: "empty",
            input: "",
            expected_int: None,
        },
    ]
}

/// Get all numeric-cast vectors.
pub fn numeric_vectors() -> Vec<NumericVector> {
    vec![
        NumericVector {
            name: "integer",
            input: "12",
            expected_numeric: Some(12.0),
            expected_cast: 12.0,
        },
        NumericVector {
            name: "signed fraction with space",
            input: " -1.5",
            expected_numeric: Some(-1.5),
            expected_cast: -1.5,
        },
        NumericVector {
            name: "exponent with trailing space",
            input: "3e2 ",
            expected_numeric: Some(300.0),
            expected_cast: 300.0,
        },
        NumericVector {
            name: "numeric prefix",
            input: "1.5abc",
            expected_numeric: None,
            expected_cast: 1.5,
        },
        NumericVector {
            name: "dangling exponent",
            input: "1e",
            expected_numeric: None,
            expected_cast: 1.0,
        },
        NumericVector {
            name: "hexadecimal",
            input: "0x1A",
            expected_numeric: None,
            expected_cast: 0.0,
        },
        NumericVector {
            name: "infinity spelling",
            input: "inf",
            expected_numeric: None,
            expected_cast: 0.0,
        },
        NumericVector {
            name: "lone dot",
            input: ".",
            expected_numeric: None,
            expected_cast: 0.0,
        },
        NumericVector {
            name: "empty",
            input: "",
            expected_numeric: None,
            expected_cast: 0.0,
        },
    ]
}

fn normalized_int(input: &str) -> Option<i64> {
    match Key::from(input) {
        Key::Int(i) => Some(i),
        Key::Str(_) => None,
    }
}

/// Verify every vector, reporting `(name, matches, actual)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let keys = key_vectors().into_iter().map(|v| {
        let actual = normalized_int(v.input);
        (
            format!("key: {}", v.name),
            actual == v.expected_int,
            format!("{:?}", actual),
        )
    });

    let numbers = numeric_vectors().into_iter().map(|v| {
        let numeric = parse_numeric(v.input);
        let cast = leading_number(v.input);
        (
            format!("numeric: {}", v.name),
            numeric == v.expected_numeric && cast == v.expected_cast,
            format!("{:?} / {}", numeric, cast),
        )
    });

    keys.chain(numbers).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderly_core::Value;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, actual) in verify_all_vectors() {
            assert!(matches, "Vector '{}' produced {}", name, actual);
        }
    }

    #[test]
    fn test_string_values_cast_like_vectors() {
        for vector in numeric_vectors() {
            assert_eq!(
                Value::from(vector.input).to_number(),
                vector.expected_cast,
                "Vector '{}' cast differently through Value",
                vector.name
            );
        }
    }

    #[test]
    fn test_integer_keys_render_back_to_input() {
        for vector in key_vectors().iter().filter(|v| v.expected_int.is_some()) {
            assert_eq!(Key::from(vector.input).to_text(), vector.input);
        }
    }
}
