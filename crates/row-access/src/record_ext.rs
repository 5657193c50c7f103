//! Reading typed values from rows by column name.
//!
//! Every reader looks the column up and checks for the null-marker before
//! any conversion is attempted. Result sets are routinely reused by callers
//! that select different column subsets, so a missing column is an ordinary
//! outcome here, not an error.

use row_convert::{DateTimeKind, EnumSymbol, KindedDateTime};
use row_core::{CellValue, DataRecord};
use serde_json::Value;

use crate::from_cell::{BuiltinDefault, FromCell};

fn read_with<R, T, F>(record: &R, name: &str, default: T, convert: F) -> T
where
    R: DataRecord + ?Sized,
    F: FnOnce(&CellValue, T) -> T,
{
    match record.read_cell(name) {
        Some(cell) => convert(cell, default),
        None => default,
    }
}

/// Column-name based readers for any [`DataRecord`].
///
/// None of these methods fail: an absent row, a blank name, a missing column
/// or a null-marked cell all yield the caller's default unchanged.
pub trait RecordExt: DataRecord {
    /// Whether a column named `name` (ignoring case) exists.
    fn column_exists(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Ordinal of the first column named `name` (ignoring case).
    fn column_index(&self, name: &str) -> Option<usize> {
        if name.trim().is_empty() {
            return None;
        }
        self.ordinal(name)
    }

    /// Raw cell of column `name`, or `None` when absent or null-marked.
    fn read_cell(&self, name: &str) -> Option<&CellValue> {
        let Some(ordinal) = self.column_index(name) else {
            tracing::trace!(column = name, "Column not present, using default");
            return None;
        };
        match self.value(ordinal) {
            Some(cell) if !cell.is_null() => Some(cell),
            _ => {
                tracing::trace!(column = name, ordinal, "Column is null, using default");
                None
            }
        }
    }

    /// Read column `name` as `T`, falling back to `default`.
    fn read_as<T: FromCell>(&self, name: &str, default: T) -> T {
        read_with(self, name, default, T::from_cell)
    }

    /// Read column `name` as `T`, falling back to `T`'s built-in default.
    fn read_or_builtin<T: FromCell + BuiltinDefault>(&self, name: &str) -> T {
        self.read_as(name, T::builtin_default())
    }

    /// Read a date-time and stamp `kind` on it; `default` keeps its own kind.
    fn read_date_time_with_kind(
        &self,
        name: &str,
        kind: DateTimeKind,
        default: KindedDateTime,
    ) -> KindedDateTime {
        read_with(self, name, default, |cell, default| {
            row_convert::to_date_time_with_kind(cell, kind, default)
        })
    }

    /// Read an optional date-time and stamp `kind` on a parsed value.
    fn read_date_time_nullable_with_kind(
        &self,
        name: &str,
        kind: DateTimeKind,
        default: Option<KindedDateTime>,
    ) -> Option<KindedDateTime> {
        read_with(self, name, default, |cell, default| {
            row_convert::to_date_time_nullable_with_kind(cell, kind, default)
        })
    }

    /// Read a date-time within the SQL Server `datetime` range.
    fn read_sql_date_time(&self, name: &str, default: KindedDateTime) -> KindedDateTime {
        read_with(self, name, default, |cell, default| {
            row_convert::to_sql_date_time(cell, default)
        })
    }

    /// Read an enumerated symbol.
    fn read_enum<T: EnumSymbol>(&self, name: &str, default: T) -> T {
        read_with(self, name, default, |cell, default| {
            row_convert::to_enum(cell, default)
        })
    }

    /// Read an enumerated symbol through the error-reporting parse path.
    fn read_enum_ex<T: EnumSymbol>(&self, name: &str, default: T) -> T {
        read_with(self, name, default, |cell, default| {
            row_convert::to_enum_ex(cell, default)
        })
    }

    /// Read column `name` as a structured document.
    ///
    /// Malformed documents yield `default`; the parse error is not surfaced.
    fn read_document(&self, name: &str, default: Value) -> Value {
        self.read_as(name, default)
    }
}

impl<R: DataRecord + ?Sized> RecordExt for R {}
