//! Inputs accepted by the conversion functions.

use row_core::CellValue;
use std::borrow::Cow;

use crate::error::ConversionError;

/// Anything the conversion engine can read a value from.
///
/// `None` and [`CellValue::Null`] are both "absent": every conversion returns
/// its default for them without attempting a parse.
pub trait RawValue {
    /// Canonical text of the value, or `None` when absent.
    fn raw_text(&self) -> Option<Cow<'_, str>>;

    /// Binary payload, for values that carry one.
    fn raw_bytes(&self) -> Option<&[u8]> {
        None
    }
}

impl RawValue for CellValue {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        self.canonical_text()
    }

    fn raw_bytes(&self) -> Option<&[u8]> {
        self.as_bytes()
    }
}

impl RawValue for str {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self))
    }
}

impl RawValue for String {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(self.as_str()))
    }
}

impl<T: RawValue + ?Sized> RawValue for &T {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        (**self).raw_text()
    }

    fn raw_bytes(&self) -> Option<&[u8]> {
        (**self).raw_bytes()
    }
}

impl<T: RawValue> RawValue for Option<T> {
    fn raw_text(&self) -> Option<Cow<'_, str>> {
        self.as_ref()?.raw_text()
    }

    fn raw_bytes(&self) -> Option<&[u8]> {
        self.as_ref()?.raw_bytes()
    }
}

/// Parse the text of `value`, folding absence and failure into `default`.
pub(crate) fn parse_or<V, T, F>(value: &V, default: T, parse: F) -> T
where
    V: RawValue + ?Sized,
    F: FnOnce(&str) -> Result<T, ConversionError>,
{
    match value.raw_text() {
        Some(text) => or_default(parse(&text), default),
        None => default,
    }
}

/// Collapse an internal conversion result into "value or default".
pub(crate) fn or_default<T>(result: Result<T, ConversionError>, default: T) -> T {
    match result {
        Ok(converted) => converted,
        Err(err) => {
            tracing::trace!(error = %err, "Conversion failed, using default");
            default
        }
    }
}
