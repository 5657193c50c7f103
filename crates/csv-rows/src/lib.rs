//! Row sources for rowcast.
//!
//! [`RowSource`] is the boundary the repository layer reads through. The
//! CSV-backed [`CsvRowSource`] turns each record into a
//! [`row_core::MemoryRow`], with empty fields carried as the null-marker.

pub mod error;
pub mod reader;
pub mod source;

pub use error::CsvRowError;
pub use reader::{read_rows, CsvConfig, CsvRowSource};
pub use source::{MemoryRowSource, RowSource};
