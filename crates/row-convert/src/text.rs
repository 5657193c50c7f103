//! String and GUID conversions.

use uuid::Uuid;

use crate::error::ConversionError;
use crate::source::{parse_or, RawValue};

/// Convert to a string.
///
/// Text that is empty or only whitespace counts as a failed conversion and
/// yields `default`, so callers can tell "no meaningful text" apart from
/// "has text".
pub fn to_text<V: RawValue + ?Sized>(value: &V, default: impl Into<String>) -> String {
    let default = default.into();
    parse_or(value, default, |text| {
        if text.trim().is_empty() {
            Err(ConversionError::Blank)
        } else {
            Ok(text.to_string())
        }
    })
}

/// Parse a GUID in hyphenated, simple, braced or parenthesized form.
pub fn parse_uuid(text: &str) -> Result<Uuid, ConversionError> {
    let trimmed = text.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);
    Uuid::parse_str(inner).map_err(|_| ConversionError::unparseable(text, "uuid"))
}

/// Convert to a [`Uuid`].
///
/// Accepts hyphenated, simple (32 hex digits), braced, parenthesized and
/// URN forms, in either case.
pub fn to_uuid<V: RawValue + ?Sized>(value: &V, default: Uuid) -> Uuid {
    parse_or(value, default, parse_uuid)
}
