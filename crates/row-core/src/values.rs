//! Cell value representation.
//!
//! `CellValue` is the raw, untyped content of one column in one row, as handed
//! over by whatever executed the query. The conversion engine never looks at
//! the variant directly except for binary payloads; everything else goes
//! through [`CellValue::canonical_text`].

use base64::Engine;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::fmt::Write;
use uuid::Uuid;

/// Format used for the canonical text of naive timestamps.
pub const TIMESTAMP_TEXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Format used for the canonical text of dates.
pub const DATE_TEXT_FORMAT: &str = "%Y-%m-%d";

/// Format used for the canonical text of times of day.
pub const TIME_TEXT_FORMAT: &str = "%H:%M:%S%.f";

/// Raw value of a single cell.
///
/// `Null` is the null-marker: the column exists in the row but holds no data.
/// This is distinct from the column being absent from the row altogether.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Null-marker
    Null,

    /// Boolean value
    Bool(bool),

    /// 16-bit signed integer
    Int16(i16),

    /// 32-bit signed integer
    Int32(i32),

    /// 64-bit signed integer
    Int64(i64),

    /// 32-bit floating point
    Float32(f32),

    /// 64-bit floating point
    Float64(f64),

    /// Exact decimal
    Decimal(Decimal),

    /// Text
    String(String),

    /// Binary payload
    Bytes(Vec<u8>),

    /// UUID / GUID
    Uuid(Uuid),

    /// Calendar date
    Date(NaiveDate),

    /// Time of day
    Time(NaiveTime),

    /// Date and time without an offset
    Timestamp(NaiveDateTime),

    /// Date and time in UTC
    TimestampTz(DateTime<Utc>),

    /// Elapsed time
    Interval(TimeDelta),

    /// Symbol of a database-side enumeration, by name
    Enum(String),
}

impl CellValue {
    /// Create a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Check if this cell is the null-marker.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get the binary payload of this cell.
    ///
    /// Only `Bytes` cells carry one; no other variant is reinterpreted.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Culture-stable text form of the cell, or `None` for the null-marker.
    ///
    /// Every form produced here is accepted back by the matching parser of
    /// the conversion engine.
    pub fn canonical_text(&self) -> Option<Cow<'_, str>> {
        let text = match self {
            Self::Null => return None,
            Self::String(s) | Self::Enum(s) => return Some(Cow::Borrowed(s)),
            Self::Bool(b) => b.to_string(),
            Self::Int16(i) => i.to_string(),
            Self::Int32(i) => i.to_string(),
            Self::Int64(i) => i.to_string(),
            Self::Float32(f) => f.to_string(),
            Self::Float64(f) => f.to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Bytes(b) => base64::engine::general_purpose::STANDARD.encode(b),
            Self::Uuid(u) => u.hyphenated().to_string(),
            Self::Date(d) => d.format(DATE_TEXT_FORMAT).to_string(),
            Self::Time(t) => t.format(TIME_TEXT_FORMAT).to_string(),
            Self::Timestamp(ts) => ts.format(TIMESTAMP_TEXT_FORMAT).to_string(),
            Self::TimestampTz(ts) => ts.to_rfc3339(),
            Self::Interval(delta) => format_interval(delta),
        };
        Some(Cow::Owned(text))
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<u8>> for CellValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Uuid> for CellValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Render an interval as `[-][d.]hh:mm:ss[.fffffff]`.
///
/// The fraction is expressed in 100ns ticks and omitted when zero.
pub fn format_interval(delta: &TimeDelta) -> String {
    let negative = *delta < TimeDelta::zero();
    let magnitude = delta.abs();
    let total_secs = magnitude.num_seconds();
    let ticks = magnitude.subsec_nanos() / 100;

    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if days > 0 {
        let _ = write!(out, "{days}.");
    }
    let _ = write!(out, "{hours:02}:{minutes:02}:{seconds:02}");
    if ticks > 0 {
        let _ = write!(out, ".{ticks:07}");
    }
    out
}
