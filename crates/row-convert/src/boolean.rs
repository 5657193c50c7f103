//! Boolean conversions.
//!
//! A fixed token table is consulted before the generic `true`/`false`
//! literal parse. The table match is exact (no trimming) and ignores case.

use crate::error::ConversionError;
use crate::source::{parse_or, RawValue};

/// Tokens read as `true`.
pub const AFFIRMATIVE_TOKENS: &[&str] = &["YES", "TRUE", "ON", "ENABLE", "ENABLED", "OK", "1"];

/// Tokens read as `false` by [`to_bool`].
pub const NEGATIVE_TOKENS: &[&str] = &["NO", "FALSE", "OFF", "DISABLE", "DISABLED", "CANCEL", "0"];

fn matches_token(text: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| token.eq_ignore_ascii_case(text))
}

fn parse_literal(text: &str) -> Result<bool, ConversionError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ConversionError::unparseable(text, "bool"))
    }
}

/// Parse a boolean through both token tables, then the literal form.
pub fn parse_bool(text: &str) -> Result<bool, ConversionError> {
    if matches_token(text, AFFIRMATIVE_TOKENS) {
        return Ok(true);
    }
    if matches_token(text, NEGATIVE_TOKENS) {
        return Ok(false);
    }
    parse_literal(text)
}

/// Convert to `bool` using both token tables, then the literal parse.
pub fn to_bool<V: RawValue + ?Sized>(value: &V, default: bool) -> bool {
    parse_or(value, default, parse_bool)
}

/// Convert to an optional `bool`.
///
/// Only [`AFFIRMATIVE_TOKENS`] are consulted before the literal parse, so
/// `"no"` or `"0"` yield `default` here while `"false"` still yields
/// `Some(false)`. This asymmetry with [`to_bool`] is long-standing behavior
/// and is kept until its intent is confirmed.
pub fn to_bool_nullable<V: RawValue + ?Sized>(value: &V, default: Option<bool>) -> Option<bool> {
    parse_or(value, default, |text| {
        if matches_token(text, AFFIRMATIVE_TOKENS) {
            return Ok(Some(true));
        }
        parse_literal(text).map(Some)
    })
}
