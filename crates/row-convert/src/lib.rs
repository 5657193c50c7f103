//! Default-on-failure conversions from row cells to typed values.
//!
//! Every `to_*` function takes the value to convert and a default, and is
//! total: an absent value (`None` or [`row_core::CellValue::Null`]) or one that
//! does not parse as the target type yields the default unchanged. Failures
//! are logged at `trace` level and otherwise invisible to the caller.
//!
//! The only operation allowed to fail is [`to_base36`], which has no sensible
//! default for negative input, and [`to_flat_document`], which reports
//! serialization errors.
//!
//! The error-reporting parsers behind the conversions are exported from
//! [`strict`] for callers that must reject bad input, such as configuration
//! loaders.
//!
//! # Modules
//!
//! - [`numeric`] - decimal, i16, i32, i64, f32, f64, nullable i32
//! - [`boolean`] - token-table booleans
//! - [`datetime`] - date-time with kind stamping, time spans
//! - [`text`] - strings and GUIDs
//! - [`binary`] - byte payloads and streams
//! - [`enums`] - enumerated symbols and flag sets
//! - [`document`] - structured documents
//! - [`base36`] - base-36 encoding
//!
//! # Example
//!
//! ```rust
//! use row_convert::{to_bool, to_i32, to_text};
//! use row_core::CellValue;
//!
//! assert_eq!(to_i32(&CellValue::text("7"), -1), 7);
//! assert_eq!(to_i32("seven", -1), -1);
//! assert!(to_bool("Enabled", false));
//! assert_eq!(to_text("   ", "fallback"), "fallback");
//! ```

pub mod base36;
pub mod binary;
pub mod boolean;
pub mod datetime;
pub mod document;
pub mod enums;
pub mod error;
pub mod numeric;
pub mod source;
pub mod text;

pub use base36::to_base36;
pub use binary::{read_to_bytes, to_bytes};
pub use boolean::{to_bool, to_bool_nullable};
pub use datetime::{
    to_date_time, to_date_time_nullable, to_date_time_nullable_with_kind,
    to_date_time_with_formats, to_date_time_with_kind, to_sql_date_time, to_time_span,
    DateTimeKind, KindedDateTime,
};
pub use document::{to_document, to_flat_document};
pub use enums::{to_enum, to_enum_ex, EnumSymbol};
pub use error::ConversionError;
pub use numeric::{to_decimal, to_f32, to_f64, to_i16, to_i32, to_i32_nullable, to_i64};
pub use source::RawValue;
pub use text::{to_text, to_uuid};

/// Parsers that report failures instead of falling back to a default.
pub mod strict {
    pub use crate::boolean::parse_bool;
    pub use crate::datetime::{parse_date_time, parse_time_span};
    pub use crate::document::parse_document;
    pub use crate::numeric::{parse_decimal, parse_number};
    pub use crate::text::parse_uuid;
}
