// envlayer: Layered environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Value parsing for typed accessors.
//!
//! ```text
//! parse_int    [+-] 0x.. | 0o.. | 0b.. | 0.. (octal) | decimal  -> i64
//! parse_float  f64::from_str                                    -> f64
//! split_list   "a\:b:c" --(delimiter ':')--> ["a:b", "c"]
//! ```

use crate::error::ParseError;

/// Character that escapes a following list delimiter.
pub const ESCAPE: char = '\\';

/// Default list delimiter.
pub const DEFAULT_DELIMITER: char = ':';

/// Parses an integer, detecting the base from its prefix.
///
/// An optional sign is followed by `0x`/`0X` (hex), `0o`/`0O` (octal),
/// `0b`/`0B` (binary), a bare leading `0` (octal), or decimal digits.
///
/// # Errors
///
/// Returns [`ParseError::Int`] for empty or invalid digits and values outside
/// the `i64` range, and [`ParseError::Sign`] for a second sign.
pub fn parse_int(value: &str) -> Result<i64, ParseError> {
    let (negative, unsigned) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let (radix, digits) = split_radix(unsigned);

    if digits.starts_with(['+', '-']) {
        return Err(ParseError::Sign {
            value: value.to_owned(),
        });
    }

    let parsed = if negative {
        i64::from_str_radix(&format!("-{digits}"), radix)
    } else {
        i64::from_str_radix(digits, radix)
    };

    parsed.map_err(|source| ParseError::Int {
        value: value.to_owned(),
        source,
    })
}

/// Splits off a base prefix, returning the radix and the remaining digits.
fn split_radix(unsigned: &str) -> (u32, &str) {
    let bytes = unsigned.as_bytes();
    match bytes {
        [b'0', b'x' | b'X', ..] => (16, &unsigned[2..]),
        [b'0', b'o' | b'O', ..] => (8, &unsigned[2..]),
        [b'0', b'b' | b'B', ..] => (2, &unsigned[2..]),
        [b'0', _, ..] => (8, &unsigned[1..]),
        _ => (10, unsigned),
    }
}

/// Parses a floating-point value.
///
/// # Errors
///
/// Returns [`ParseError::Float`] if `value` is not a valid float literal.
pub fn parse_float(value: &str) -> Result<f64, ParseError> {
    value.parse::<f64>().map_err(|source| ParseError::Float {
        value: value.to_owned(),
        source,
    })
}

/// Splits a list on unescaped `delimiter` characters.
///
/// A delimiter directly preceded by [`ESCAPE`] does not split, and the escape
/// is dropped from the segment. Other escapes are kept as written. The
/// trailing segment is always included, so `"a:"` yields `["a", ""]`. An
/// empty input yields an empty list.
#[must_use]
pub fn split_list(value: &str, delimiter: char) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESCAPE && chars.peek() == Some(&delimiter) {
            current.push(delimiter);
            chars.next();
        } else if c == delimiter {
            items.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    items.push(current);

    items
}
