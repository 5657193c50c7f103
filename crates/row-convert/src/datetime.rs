//! Date-time and time-span conversions.
//!
//! Parsing follows one fixed culture. Accepted date-time shapes, tried in
//! order:
//!
//! - RFC 3339 and ISO 8601 with an explicit offset (`Z`, `+02:00`), with `T` or
//!   a space between date and time; normalized to UTC and tagged
//!   [`DateTimeKind::Utc`]
//! - ISO 8601 without offset, seconds and fraction optional
//! - `MM/dd/yyyy HH:mm[:ss]`
//! - date only (`yyyy-MM-dd`, `yyyy/MM/dd`, `MM/dd/yyyy`), at midnight
//!
//! Time spans use `[-]d` or `[-][d.]hh:mm[:ss[.fffffff]]`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::source::{parse_or, RawValue};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// How the clock value of a [`KindedDateTime`] is to be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateTimeKind {
    /// No time zone information
    #[default]
    Unspecified,
    /// Coordinated Universal Time
    Utc,
    /// The local time zone of whoever reads the value
    Local,
}

/// A date-time paired with the kind of clock it was read on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KindedDateTime {
    /// Clock value
    pub value: NaiveDateTime,
    /// Interpretation of `value`
    pub kind: DateTimeKind,
}

impl KindedDateTime {
    /// Create a date-time with the given kind.
    pub fn new(value: NaiveDateTime, kind: DateTimeKind) -> Self {
        Self { value, kind }
    }

    /// Create a date-time of unspecified kind.
    pub fn unspecified(value: NaiveDateTime) -> Self {
        Self::new(value, DateTimeKind::Unspecified)
    }

    /// Replace the kind, leaving the clock value untouched.
    pub fn with_kind(self, kind: DateTimeKind) -> Self {
        Self { kind, ..self }
    }
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Parse a date-time in any of the accepted layouts.
pub fn parse_date_time(text: &str) -> Result<KindedDateTime, ConversionError> {
    let trimmed = text.trim();

    let with_offset = DateTime::parse_from_rfc3339(trimmed).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(trimmed, format).ok())
    });
    if let Some(dt) = with_offset {
        return Ok(KindedDateTime::new(dt.naive_utc(), DateTimeKind::Utc));
    }

    // Zulu suffix on any of the naive shapes
    if let Some(ndt) = trimmed.strip_suffix(&['Z', 'z'][..]).and_then(parse_naive) {
        return Ok(KindedDateTime::new(ndt, DateTimeKind::Utc));
    }

    if let Some(ndt) = parse_naive(trimmed) {
        return Ok(KindedDateTime::unspecified(ndt));
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .map(|date| KindedDateTime::unspecified(date.and_time(NaiveTime::MIN)))
        .ok_or_else(|| ConversionError::unparseable(text, "date-time"))
}

/// Convert to a date-time.
pub fn to_date_time<V: RawValue + ?Sized>(value: &V, default: KindedDateTime) -> KindedDateTime {
    parse_or(value, default, parse_date_time)
}

/// Convert to a date-time and stamp `kind` on it.
///
/// The kind applies to a successfully parsed value only, never to `default`.
pub fn to_date_time_with_kind<V: RawValue + ?Sized>(
    value: &V,
    kind: DateTimeKind,
    default: KindedDateTime,
) -> KindedDateTime {
    parse_or(value, default, |text| {
        parse_date_time(text).map(|dt| dt.with_kind(kind))
    })
}

/// Convert to an optional date-time.
pub fn to_date_time_nullable<V: RawValue + ?Sized>(
    value: &V,
    default: Option<KindedDateTime>,
) -> Option<KindedDateTime> {
    parse_or(value, default, |text| parse_date_time(text).map(Some))
}

/// Convert to an optional date-time and stamp `kind` on a parsed value.
pub fn to_date_time_nullable_with_kind<V: RawValue + ?Sized>(
    value: &V,
    kind: DateTimeKind,
    default: Option<KindedDateTime>,
) -> Option<KindedDateTime> {
    parse_or(value, default, |text| {
        parse_date_time(text).map(|dt| Some(dt.with_kind(kind)))
    })
}

/// Convert to a date-time using caller-supplied chrono formats, in order.
///
/// Formats may carry an offset (`%z`, `%:z`); such values are normalized to
/// UTC. Otherwise the result is of unspecified kind. Date-only formats yield
/// midnight.
pub fn to_date_time_with_formats<V: RawValue + ?Sized>(
    value: &V,
    formats: &[&str],
    default: KindedDateTime,
) -> KindedDateTime {
    parse_or(value, default, |text| {
        let trimmed = text.trim();
        formats
            .iter()
            .find_map(|format| {
                DateTime::parse_from_str(trimmed, format)
                    .map(|dt| KindedDateTime::new(dt.naive_utc(), DateTimeKind::Utc))
                    .or_else(|_| {
                        NaiveDateTime::parse_from_str(trimmed, format)
                            .map(KindedDateTime::unspecified)
                    })
                    .or_else(|_| {
                        NaiveDate::parse_from_str(trimmed, format).map(|date| {
                            KindedDateTime::unspecified(date.and_time(NaiveTime::MIN))
                        })
                    })
                    .ok()
            })
            .ok_or_else(|| ConversionError::unparseable(text, "date-time"))
    })
}

/// Earliest value representable by a SQL Server `datetime`.
pub fn sql_date_time_min() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1753, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Latest value representable by a SQL Server `datetime`.
pub fn sql_date_time_max() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(9999, 12, 31)
        .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 997))
        .unwrap_or(NaiveDateTime::MAX)
}

/// Convert to a date-time that fits a SQL Server `datetime` column.
///
/// Parsed values outside 1753-01-01 .. 9999-12-31 23:59:59.997 fall back to
/// `default`.
pub fn to_sql_date_time<V: RawValue + ?Sized>(
    value: &V,
    default: KindedDateTime,
) -> KindedDateTime {
    parse_or(value, default, |text| {
        let parsed = parse_date_time(text)?;
        if parsed.value < sql_date_time_min() || parsed.value > sql_date_time_max() {
            return Err(ConversionError::out_of_range(text, "SQL datetime"));
        }
        Ok(parsed)
    })
}

fn parse_component(
    part: &str,
    text: &str,
    max: Option<i64>,
) -> Result<i64, ConversionError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConversionError::unparseable(text, "time span"));
    }
    let parsed: i64 = part
        .parse()
        .map_err(|_| ConversionError::out_of_range(text, "time span"))?;
    match max {
        Some(max) if parsed > max => Err(ConversionError::out_of_range(text, "time span")),
        _ => Ok(parsed),
    }
}

/// Parse `[-]d` or `[-][d.]hh:mm[:ss[.fffffff]]`.
pub fn parse_time_span(text: &str) -> Result<TimeDelta, ConversionError> {
    let trimmed = text.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let overflow = || ConversionError::out_of_range(text, "time span");

    let magnitude = if !body.contains(':') {
        let days = parse_component(body, text, None)?;
        TimeDelta::try_days(days).ok_or_else(overflow)?
    } else {
        let mut parts = body.split(':');
        let head = parts.next().unwrap_or_default();
        let (days, hours) = match head.split_once('.') {
            Some((days, hours)) => (parse_component(days, text, None)?, hours),
            None => (0, head),
        };
        let hours = parse_component(hours, text, Some(23))?;
        let minutes = parse_component(parts.next().unwrap_or_default(), text, Some(59))?;

        let (seconds, ticks) = match parts.next() {
            None => (0, 0),
            Some(sec_part) => match sec_part.split_once('.') {
                None => (parse_component(sec_part, text, Some(59))?, 0),
                Some((secs, fraction)) => {
                    if fraction.len() > 7 {
                        return Err(ConversionError::out_of_range(text, "time span"));
                    }
                    let secs = parse_component(secs, text, Some(59))?;
                    let digits = parse_component(fraction, text, None)?;
                    let scale = 10_i64.pow(7 - fraction.len() as u32);
                    (secs, digits * scale)
                }
            },
        };
        if parts.next().is_some() {
            return Err(ConversionError::unparseable(text, "time span"));
        }

        let whole = days
            .checked_mul(86_400)
            .and_then(|s| s.checked_add(hours * 3_600 + minutes * 60 + seconds))
            .ok_or_else(overflow)?;
        TimeDelta::try_seconds(whole)
            .and_then(|d| d.checked_add(&TimeDelta::nanoseconds(ticks * 100)))
            .ok_or_else(overflow)?
    };

    Ok(if negative { -magnitude } else { magnitude })
}

/// Convert to a time span.
pub fn to_time_span<V: RawValue + ?Sized>(value: &V, default: TimeDelta) -> TimeDelta {
    parse_or(value, default, parse_time_span)
}
