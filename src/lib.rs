//! rowcast library
//!
//! Reads typed values out of tabular rows without ever failing on bad data:
//! missing columns, null cells and malformed text all yield the caller's
//! default.
//!
//! # Crates
//!
//! - `row_core` - cell values and the `DataRecord` row contract
//! - `row_convert` - default-on-failure conversions
//! - `row_access` - name-based readers over any `DataRecord`
//! - `csv_rows` - CSV-backed row sources
//!
//! # CLI Usage
//!
//! ```bash
//! # Print the users of a CSV export as JSON lines
//! rowcast users --file users.csv
//!
//! # Project rows through a column mapping
//! rowcast read --file users.csv --mapping mapping.yaml
//!
//! # Base-36 encode a number
//! rowcast base36 1295
//! ```

use clap::Parser;
use std::path::PathBuf;

pub mod mapping;
pub mod repository;
pub mod service;

pub use mapping::{MappingError, RowMapping, TargetType};
pub use repository::{User, UserRepository, UserStatus};
pub use service::UserService;

#[derive(Parser, Clone, Debug)]
pub struct CsvOpts {
    /// CSV file to read rows from
    #[arg(long, env = "ROWCAST_FILE")]
    pub file: PathBuf,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Treat the first record as data rather than column names
    #[arg(long)]
    pub no_headers: bool,

    /// Column names for a file without headers (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub column_names: Option<Vec<String>>,
}

// CLI options → row source configuration
impl From<&CsvOpts> for csv_rows::CsvConfig {
    fn from(opts: &CsvOpts) -> Self {
        Self {
            has_headers: !opts.no_headers,
            delimiter: opts.delimiter as u8,
            column_names: opts.column_names.clone(),
        }
    }
}

impl CsvOpts {
    pub fn row_source(&self) -> csv_rows::CsvRowSource {
        csv_rows::CsvRowSource::with_config(&self.file, self.into())
    }
}
