//! Core types for rowcast.
//!
//! This crate provides the foundational types shared by the conversion
//! engine and the column access layer:
//!
//! - [`CellValue`] - Raw, untyped content of a single cell
//! - [`DataRecord`] - What a row must expose to be read by column name
//! - [`MemoryRow`] - Owned row built column by column
//!
//! # Architecture
//!
//! ```text
//! row-core (this crate)
//!    │
//!    ├─── row-convert   (CellValue → typed value, with defaults)
//!    ├─── row-access    (DataRecord + column name → typed value)
//!    └─── csv-rows      (CSV file → MemoryRow)
//! ```
//!
//! # Example
//!
//! ```rust
//! use row_core::{CellValue, DataRecord, MemoryRow};
//!
//! let row = MemoryRow::builder()
//!     .column("Id", "7")
//!     .null("Name")
//!     .build();
//!
//! assert_eq!(row.ordinal("id"), Some(0));
//! assert_eq!(row.value(1), Some(&CellValue::Null));
//! ```

pub mod record;
pub mod values;

pub use record::{names_match, DataRecord, MemoryRow, MemoryRowBuilder};
pub use values::{format_interval, CellValue};
