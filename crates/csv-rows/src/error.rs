use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvRowError {
    #[error("Failed to open CSV file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(
        "Column count mismatch in CSV row {row}: expected {expected} columns, but found {found} columns"
    )]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Column names given for a CSV with headers")]
    ConflictingColumnNames,
}
