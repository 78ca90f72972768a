use core::hash::Hash;
use core::hash::Hasher;
use serde::Serialize;
use serde::Serializer;
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

// This provides Eq for f64.
#[derive(Copy, Clone, Debug)]
pub struct JsNumber(pub f64);

impl Display for JsNumber {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl PartialEq for JsNumber {
  fn eq(&self, other: &Self) -> bool {
    if self.0.is_nan() {
      return other.0.is_nan();
    };
    self.0.eq(&other.0)
  }
}

impl Eq for JsNumber {}

impl Ord for JsNumber {
  fn cmp(&self, other: &Self) -> Ordering {
    // Only NaNs cannot be compared, and we treat them as equal.
    self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
  }
}

impl PartialOrd for JsNumber {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Hash for JsNumber {
  fn hash<H: Hasher>(&self, state: &mut H) {
    if !self.0.is_nan() {
      self.0.to_bits().hash(state);
    };
  }
}

impl Serialize for JsNumber {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}

/// The radix of a numeric literal, as determined by its prefix.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NumRadix {
  Binary,
  Octal,
  LegacyOctal,
  Decimal,
  Hex,
}

impl NumRadix {
  pub fn base(&self) -> u32 {
    match self {
      NumRadix::Binary => 2,
      NumRadix::Octal | NumRadix::LegacyOctal => 8,
      NumRadix::Decimal => 10,
      NumRadix::Hex => 16,
    }
  }
}

/// Splits a numeric literal into its radix and digit text. Returns `None` for
/// an empty or malformed prefix (e.g. bare `0x`).
pub fn split_radix(raw: &str) -> Option<(NumRadix, &str)> {
  let bytes = raw.as_bytes();
  if bytes.len() >= 2 && bytes[0] == b'0' {
    let digits = &raw[2..];
    match bytes[1] {
      b'x' | b'X' => return (!digits.is_empty()).then_some((NumRadix::Hex, digits)),
      b'o' | b'O' => return (!digits.is_empty()).then_some((NumRadix::Octal, digits)),
      b'b' | b'B' => return (!digits.is_empty()).then_some((NumRadix::Binary, digits)),
      _ => {}
    }
    // Legacy octal: `0` followed only by octal digits. `08`/`09` and anything
    // with a dot or exponent is decimal.
    if raw[1..].bytes().all(|b| (b'0'..=b'7').contains(&b)) {
      return Some((NumRadix::LegacyOctal, &raw[1..]));
    }
  }
  if raw.is_empty() {
    return None;
  }
  Some((NumRadix::Decimal, raw))
}

/// Parses a numeric literal's raw source text into its value.
///
/// Handles decimal (with optional fraction and exponent), `0x`/`0X` hex,
/// `0o`/`0O` octal, legacy octal, and `0b`/`0B` binary forms. Returns `None`
/// for malformed text; callers surface that as a diagnostic.
pub fn parse_numeric_literal(raw: &str) -> Option<JsNumber> {
  let (radix, digits) = split_radix(raw)?;
  match radix {
    NumRadix::Decimal => parse_decimal(digits),
    _ => {
      let base = radix.base();
      let mut value = 0f64;
      for ch in digits.chars() {
        let digit = ch.to_digit(base)?;
        value = value * base as f64 + digit as f64;
      }
      Some(JsNumber(value))
    }
  }
}

fn parse_decimal(digits: &str) -> Option<JsNumber> {
  if digits.is_empty() {
    return None;
  }
  // Rust's float grammar is a superset of the JS one apart from signs, infs,
  // and NaN, none of which appear in literal tokens.
  if digits.starts_with('+') || digits.starts_with('-') {
    return None;
  }
  let lower = digits.to_ascii_lowercase();
  if lower.contains("inf") || lower.contains("nan") {
    return None;
  }
  digits.parse::<f64>().ok().map(JsNumber)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_radix_prefixed_literals() {
    assert_eq!(parse_numeric_literal("0x10"), Some(JsNumber(16.0)));
    assert_eq!(parse_numeric_literal("0XFF"), Some(JsNumber(255.0)));
    assert_eq!(parse_numeric_literal("0o17"), Some(JsNumber(15.0)));
    assert_eq!(parse_numeric_literal("0b101"), Some(JsNumber(5.0)));
    assert_eq!(parse_numeric_literal("017"), Some(JsNumber(15.0)));
  }

  #[test]
  fn parses_decimal_forms() {
    assert_eq!(parse_numeric_literal("42"), Some(JsNumber(42.0)));
    assert_eq!(parse_numeric_literal("1.5e2"), Some(JsNumber(150.0)));
    assert_eq!(parse_numeric_literal("08"), Some(JsNumber(8.0)));
    assert_eq!(parse_numeric_literal(".5"), Some(JsNumber(0.5)));
  }

  #[test]
  fn rejects_malformed_literals() {
    assert_eq!(parse_numeric_literal(""), None);
    assert_eq!(parse_numeric_literal("0x"), None);
    assert_eq!(parse_numeric_literal("0xG1"), None);
    assert_eq!(parse_numeric_literal("1.2.3"), None);
    assert_eq!(parse_numeric_literal("1e"), None);
  }

  #[test]
  fn js_number_nan_is_self_equal() {
    assert_eq!(JsNumber(f64::NAN), JsNumber(f64::NAN));
    assert_ne!(JsNumber(f64::NAN), JsNumber(0.0));
  }
}
