//! Numeric conversions.
//!
//! Text is trimmed and must then parse exactly as the target type using
//! Rust's locale-independent grammar: `.` as decimal point, optional leading
//! sign, no grouping separators. Values outside the target range fall back to
//! the default; nothing is rounded or saturated.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ConversionError;
use crate::source::{parse_or, RawValue};

/// Parse trimmed text as any `FromStr` number, reporting failures.
pub fn parse_number<T: FromStr>(text: &str, expected_type: &'static str) -> Result<T, ConversionError> {
    text.trim()
        .parse::<T>()
        .map_err(|_| ConversionError::unparseable(text, expected_type))
}

/// Parse a decimal in plain or scientific notation.
pub fn parse_decimal(text: &str) -> Result<Decimal, ConversionError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ConversionError::unparseable(text, "decimal"))
}

/// Convert to [`Decimal`], accepting plain and scientific notation.
pub fn to_decimal<V: RawValue + ?Sized>(value: &V, default: Decimal) -> Decimal {
    parse_or(value, default, parse_decimal)
}

/// Convert to a 16-bit integer.
pub fn to_i16<V: RawValue + ?Sized>(value: &V, default: i16) -> i16 {
    parse_or(value, default, |text| parse_number(text, "i16"))
}

/// Convert to a 32-bit integer.
pub fn to_i32<V: RawValue + ?Sized>(value: &V, default: i32) -> i32 {
    parse_or(value, default, |text| parse_number(text, "i32"))
}

/// Convert to a 64-bit integer.
pub fn to_i64<V: RawValue + ?Sized>(value: &V, default: i64) -> i64 {
    parse_or(value, default, |text| parse_number(text, "i64"))
}

/// Convert to a 32-bit float.
pub fn to_f32<V: RawValue + ?Sized>(value: &V, default: f32) -> f32 {
    parse_or(value, default, |text| parse_number(text, "f32"))
}

/// Convert to a 64-bit float.
pub fn to_f64<V: RawValue + ?Sized>(value: &V, default: f64) -> f64 {
    parse_or(value, default, |text| parse_number(text, "f64"))
}

/// Convert to an optional 32-bit integer.
///
/// A failed parse yields `default`, which may itself be `None`.
pub fn to_i32_nullable<V: RawValue + ?Sized>(value: &V, default: Option<i32>) -> Option<i32> {
    parse_or(value, default, |text| parse_number(text, "i32").map(Some))
}

#[cfg(test)]
mod tests {
    use super::*;
    use row_core::CellValue;

    #[test]
    fn test_integers() {
        assert_eq!(to_i32("42", -1), 42);
        assert_eq!(to_i32(" -17 ", -1), -17);
        assert_eq!(to_i32("+8", -1), 8);
        assert_eq!(to_i64("9876543210", -1), 9_876_543_210);
        assert_eq!(to_i16(&CellValue::Int32(123), -1), 123);
    }

    #[test]
    fn test_integers_reject_without_rounding_or_saturation() {
        assert_eq!(to_i32("7.5", -1), -1);
        assert_eq!(to_i32("1,000", -1), -1);
        assert_eq!(to_i16("40000", -1), -1);
        assert_eq!(to_i32("2147483648", 0), 0);
        assert_eq!(to_i64("abc", 5), 5);
        assert_eq!(to_i32("", 3), 3);
        assert_eq!(to_i32(&CellValue::Bool(true), -1), -1);
    }

    #[test]
    fn test_absent_returns_default() {
        assert_eq!(to_i32(&CellValue::Null, 11), 11);
        assert_eq!(to_f64(&None::<&str>, 2.5), 2.5);
        assert_eq!(to_decimal(&CellValue::Null, Decimal::ONE), Decimal::ONE);
        assert_eq!(to_i32_nullable(&CellValue::Null, None), None);
    }

    #[test]
    fn test_floats() {
        assert_eq!(to_f64("3.25", -1.0), 3.25);
        assert_eq!(to_f64("1e3", -1.0), 1000.0);
        assert_eq!(to_f32(&CellValue::Float32(0.5), -1.0), 0.5);
        assert_eq!(to_f64(&CellValue::Float64(1.0e-7), -1.0), 1.0e-7);
        assert_eq!(to_f64("3,25", -1.0), -1.0);
    }

    #[test]
    fn test_decimal() {
        assert_eq!(to_decimal("123.45", Decimal::ZERO), Decimal::new(12345, 2));
        assert_eq!(to_decimal("1.5e2", Decimal::ZERO), Decimal::new(150, 0));
        assert_eq!(
            to_decimal(&CellValue::Decimal(Decimal::new(-5, 1)), Decimal::ZERO),
            Decimal::new(-5, 1)
        );
        assert_eq!(to_decimal("twelve", Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_nullable_integer() {
        assert_eq!(to_i32_nullable("5", None), Some(5));
        assert_eq!(to_i32_nullable("x", None), None);
        assert_eq!(to_i32_nullable("x", Some(9)), Some(9));
    }

    #[test]
    fn test_integer_round_trip_is_idempotent() {
        for input in ["0", "-12", "junk", "2147483647"] {
            let once = to_i32(input, -1);
            let twice = to_i32(&CellValue::Int32(once), -1);
            assert_eq!(once, twice, "input: {input}");
        }
    }
}
