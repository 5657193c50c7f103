//! Row contract and an in-memory row.
//!
//! `DataRecord` is the only thing the column access layer needs from the
//! component that executes queries: a column count, a name per ordinal and a
//! raw cell per ordinal. `MemoryRow` is the owned implementation used by the
//! CSV row source and by tests.

use crate::values::CellValue;

/// A row whose cells are addressable by zero-based ordinal.
pub trait DataRecord {
    /// Number of columns in the row's schema.
    fn field_count(&self) -> usize;

    /// Name of the column at `ordinal`, if the ordinal is in range.
    fn name(&self, ordinal: usize) -> Option<&str>;

    /// Raw cell at `ordinal`, if the ordinal is in range.
    fn value(&self, ordinal: usize) -> Option<&CellValue>;

    /// Ordinal of the first column whose name matches `name` ignoring case.
    ///
    /// Plain linear scan over the schema; rows are small and transient.
    fn ordinal(&self, name: &str) -> Option<usize> {
        (0..self.field_count()).find(|&ix| self.name(ix).is_some_and(|n| names_match(n, name)))
    }
}

/// Case-insensitive column name comparison.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_uppercase)
        .eq(b.chars().flat_map(char::to_uppercase))
}

impl<R: DataRecord + ?Sized> DataRecord for &R {
    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn name(&self, ordinal: usize) -> Option<&str> {
        (**self).name(ordinal)
    }

    fn value(&self, ordinal: usize) -> Option<&CellValue> {
        (**self).value(ordinal)
    }

    fn ordinal(&self, name: &str) -> Option<usize> {
        (**self).ordinal(name)
    }
}

/// An absent row behaves as a row without columns.
impl<R: DataRecord> DataRecord for Option<R> {
    fn field_count(&self) -> usize {
        self.as_ref().map_or(0, DataRecord::field_count)
    }

    fn name(&self, ordinal: usize) -> Option<&str> {
        self.as_ref()?.name(ordinal)
    }

    fn value(&self, ordinal: usize) -> Option<&CellValue> {
        self.as_ref()?.value(ordinal)
    }

    fn ordinal(&self, name: &str) -> Option<usize> {
        self.as_ref()?.ordinal(name)
    }
}

/// Owned row: column names and cells in schema order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRow {
    columns: Vec<String>,
    cells: Vec<CellValue>,
}

impl MemoryRow {
    /// Create a row from parallel name and cell vectors.
    ///
    /// Cells beyond the number of names are dropped; missing cells are
    /// filled with the null-marker.
    pub fn new(columns: Vec<String>, mut cells: Vec<CellValue>) -> Self {
        cells.resize(columns.len(), CellValue::Null);
        Self { columns, cells }
    }

    /// Start building a row column by column.
    pub fn builder() -> MemoryRowBuilder {
        MemoryRowBuilder {
            columns: Vec::new(),
            cells: Vec::new(),
        }
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Cells in schema order.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }
}

impl DataRecord for MemoryRow {
    fn field_count(&self) -> usize {
        self.columns.len()
    }

    fn name(&self, ordinal: usize) -> Option<&str> {
        self.columns.get(ordinal).map(String::as_str)
    }

    fn value(&self, ordinal: usize) -> Option<&CellValue> {
        self.cells.get(ordinal)
    }
}

/// Builder for `MemoryRow`.
pub struct MemoryRowBuilder {
    columns: Vec<String>,
    cells: Vec<CellValue>,
}

impl MemoryRowBuilder {
    /// Append a column to the row.
    pub fn column(mut self, name: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.columns.push(name.into());
        self.cells.push(value.into());
        self
    }

    /// Append a null-marked column to the row.
    pub fn null(self, name: impl Into<String>) -> Self {
        self.column(name, CellValue::Null)
    }

    /// Build the row.
    pub fn build(self) -> MemoryRow {
        MemoryRow {
            columns: self.columns,
            cells: self.cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryRow {
        MemoryRow::builder()
            .column("Id", "7")
            .null("Name")
            .column("id", 99)
            .build()
    }

    #[test]
    fn test_builder() {
        let row = sample();
        assert_eq!(row.field_count(), 3);
        assert_eq!(row.name(1), Some("Name"));
        assert_eq!(row.value(1), Some(&CellValue::Null));
        assert_eq!(row.value(3), None);
    }

    #[test]
    fn test_ordinal_ignores_case_and_takes_first_match() {
        let row = sample();
        assert_eq!(row.ordinal("ID"), Some(0));
        assert_eq!(row.ordinal("name"), Some(1));
        assert_eq!(row.ordinal("missing"), None);
        // Stable across calls for an unchanged schema
        assert_eq!(row.ordinal("iD"), row.ordinal("Id"));
    }

    #[test]
    fn test_names_match_non_ascii() {
        assert!(names_match("Straße", "STRASSE"));
        assert!(names_match("ÄRGER", "ärger"));
        assert!(!names_match("Id", "Ids"));
    }

    #[test]
    fn test_absent_row_has_no_columns() {
        let row: Option<&MemoryRow> = None;
        assert_eq!(row.field_count(), 0);
        assert_eq!(row.ordinal("Id"), None);
        assert_eq!(row.value(0), None);
    }

    #[test]
    fn test_new_pads_missing_cells() {
        let row = MemoryRow::new(
            vec!["a".to_string(), "b".to_string()],
            vec![CellValue::Int32(1)],
        );
        assert_eq!(row.cells(), &[CellValue::Int32(1), CellValue::Null]);
    }
}
