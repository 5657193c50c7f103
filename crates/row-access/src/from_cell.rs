//! Target types readable from a cell.

use chrono::TimeDelta;
use row_convert::KindedDateTime;
use row_core::CellValue;
use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

/// A type the column access layer can produce from a raw cell.
///
/// Implementations delegate to the matching `row_convert` function, so the
/// same fallback rules apply whether a value is read by column name or
/// converted directly.
pub trait FromCell: Sized {
    /// Convert `cell`, returning `default` when it cannot be converted.
    fn from_cell(cell: &CellValue, default: Self) -> Self;
}

/// Fallback used by `read_or_builtin` when the caller supplies none.
pub trait BuiltinDefault {
    fn builtin_default() -> Self;
}

impl FromCell for Decimal {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_decimal(cell, default)
    }
}

impl FromCell for i16 {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_i16(cell, default)
    }
}

impl FromCell for i32 {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_i32(cell, default)
    }
}

impl FromCell for i64 {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_i64(cell, default)
    }
}

impl FromCell for f32 {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_f32(cell, default)
    }
}

impl FromCell for f64 {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_f64(cell, default)
    }
}

impl FromCell for Option<i32> {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_i32_nullable(cell, default)
    }
}

impl FromCell for String {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_text(cell, default)
    }
}

impl FromCell for bool {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_bool(cell, default)
    }
}

impl FromCell for Option<bool> {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_bool_nullable(cell, default)
    }
}

impl FromCell for KindedDateTime {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_date_time(cell, default)
    }
}

impl FromCell for Option<KindedDateTime> {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_date_time_nullable(cell, default)
    }
}

impl FromCell for TimeDelta {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_time_span(cell, default)
    }
}

impl FromCell for Uuid {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_uuid(cell, default)
    }
}

impl FromCell for Vec<u8> {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_bytes(cell, default)
    }
}

impl FromCell for Value {
    fn from_cell(cell: &CellValue, default: Self) -> Self {
        row_convert::to_document(cell, default)
    }
}

impl BuiltinDefault for i16 {
    fn builtin_default() -> Self {
        -1
    }
}

impl BuiltinDefault for i32 {
    fn builtin_default() -> Self {
        -1
    }
}

impl BuiltinDefault for i64 {
    fn builtin_default() -> Self {
        -1
    }
}

impl BuiltinDefault for f32 {
    fn builtin_default() -> Self {
        -1.0
    }
}

impl BuiltinDefault for f64 {
    fn builtin_default() -> Self {
        -1.0
    }
}

impl BuiltinDefault for Decimal {
    fn builtin_default() -> Self {
        Decimal::NEGATIVE_ONE
    }
}

impl BuiltinDefault for String {
    fn builtin_default() -> Self {
        String::new()
    }
}

impl BuiltinDefault for bool {
    fn builtin_default() -> Self {
        false
    }
}

impl<T> BuiltinDefault for Option<T> {
    fn builtin_default() -> Self {
        None
    }
}

impl BuiltinDefault for Value {
    fn builtin_default() -> Self {
        Value::Null
    }
}
