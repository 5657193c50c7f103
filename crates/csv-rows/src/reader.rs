//! CSV decoding into rows.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use row_core::{CellValue, MemoryRow};
use tracing::{debug, warn};

use crate::error::CsvRowError;
use crate::source::RowSource;

/// How a CSV file is laid out.
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Whether the first record holds the column names (default: true)
    pub has_headers: bool,

    /// Field delimiter (default: ',')
    pub delimiter: u8,

    /// Column names to use when `has_headers` is false.
    /// Without them, columns are named `column_0`, `column_1`, ...
    pub column_names: Option<Vec<String>>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: b',',
            column_names: None,
        }
    }
}

/// Decode every record of `reader` into a row.
///
/// Empty fields become [`CellValue::Null`]; everything else is kept as text.
pub fn read_rows<R: Read>(reader: R, config: &CsvConfig) -> Result<Vec<MemoryRow>, CsvRowError> {
    if config.has_headers && config.column_names.is_some() {
        return Err(CsvRowError::ConflictingColumnNames);
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(config.delimiter)
        .from_reader(reader);

    let mut headers: Option<Vec<String>> = if config.has_headers {
        Some(csv_reader.headers()?.iter().map(str::to_string).collect())
    } else {
        config.column_names.clone()
    };

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Generated names follow the width of the first record.
        let columns = headers.get_or_insert_with(|| {
            (0..record.len()).map(|i| format!("column_{i}")).collect()
        });
        if record.len() != columns.len() {
            return Err(CsvRowError::ColumnCountMismatch {
                row: index + 1,
                expected: columns.len(),
                found: record.len(),
            });
        }

        let cells = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    CellValue::Null
                } else {
                    CellValue::text(field)
                }
            })
            .collect();
        rows.push(MemoryRow::new(columns.clone(), cells));
    }

    if rows.is_empty() {
        warn!("CSV contained no records");
    }
    Ok(rows)
}

/// Rows read from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    path: PathBuf,
    config: CsvConfig,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, CsvConfig::default())
    }

    pub fn with_config(path: impl Into<PathBuf>, config: CsvConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for CsvRowSource {
    type Error = CsvRowError;

    fn read_rows(&self) -> Result<Vec<MemoryRow>, Self::Error> {
        debug!("Reading rows from: {}", self.path.display());
        let file = File::open(&self.path).map_err(|source| CsvRowError::Open {
            path: self.path.clone(),
            source,
        })?;
        let rows = read_rows(file, &self.config)?;
        debug!("Read {} rows from {}", rows.len(), self.path.display());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use row_core::DataRecord;

    #[test]
    fn test_headers_and_empty_fields() {
        let data = "Id,Name,Email\n1,Alice,\n2,,bob@example.com\n";
        let rows = read_rows(data.as_bytes(), &CsvConfig::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].columns(), ["Id", "Name", "Email"]);
        assert_eq!(rows[0].value(0), Some(&CellValue::text("1")));
        assert_eq!(rows[0].value(2), Some(&CellValue::Null));
        assert_eq!(rows[1].value(1), Some(&CellValue::Null));
        assert_eq!(rows[1].value(2), Some(&CellValue::text("bob@example.com")));
    }

    #[test]
    fn test_generated_column_names() {
        let config = CsvConfig {
            has_headers: false,
            ..Default::default()
        };
        let rows = read_rows("a,b\nc,d\n".as_bytes(), &config).unwrap();
        assert_eq!(rows[1].columns(), ["column_0", "column_1"]);
        assert_eq!(rows[1].ordinal("COLUMN_1"), Some(1));
    }

    #[test]
    fn test_explicit_column_names_and_delimiter() {
        let config = CsvConfig {
            has_headers: false,
            delimiter: b';',
            column_names: Some(vec!["Id".to_string(), "Name".to_string()]),
        };
        let rows = read_rows("7;Ada\n".as_bytes(), &config).unwrap();
        assert_eq!(rows[0].name(1), Some("Name"));
        assert_eq!(rows[0].value(0), Some(&CellValue::text("7")));
    }

    #[test]
    fn test_column_count_mismatch() {
        let config = CsvConfig {
            has_headers: false,
            column_names: Some(vec!["Id".to_string()]),
            ..Default::default()
        };
        let err = read_rows("1,2\n".as_bytes(), &config).unwrap_err();
        assert!(matches!(
            err,
            CsvRowError::ColumnCountMismatch {
                row: 1,
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_conflicting_column_names() {
        let config = CsvConfig {
            column_names: Some(vec!["Id".to_string()]),
            ..Default::default()
        };
        assert!(matches!(
            read_rows("Id\n1\n".as_bytes(), &config),
            Err(CsvRowError::ConflictingColumnNames)
        ));
    }

    #[test]
    fn test_missing_file() {
        let source = CsvRowSource::new("/nonexistent/rowcast/users.csv");
        let err = source.read_rows().unwrap_err();
        assert!(matches!(err, CsvRowError::Open { .. }));
        assert!(err
            .to_string()
            .starts_with("Failed to open CSV file /nonexistent/rowcast/users.csv"));
    }
}
