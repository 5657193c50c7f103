//! Column access layer.
//!
//! [`RecordExt`] adds name-based, default-on-failure readers to every
//! [`row_core::DataRecord`]. A read resolves the column by case-insensitive
//! name, checks the null-marker, and hands the raw cell to `row_convert`.
//!
//! ```rust
//! use row_access::RecordExt;
//! use row_core::MemoryRow;
//!
//! let row = MemoryRow::builder()
//!     .column("Id", "7")
//!     .null("Name")
//!     .build();
//!
//! assert_eq!(row.read_as::<i32>("Id", -1), 7);
//! assert_eq!(row.read_as("Name", "n/a".to_string()), "n/a");
//! assert_eq!(row.read_or_builtin::<i32>("Missing"), -1);
//! ```

pub mod from_cell;
pub mod record_ext;

pub use from_cell::{BuiltinDefault, FromCell};
pub use record_ext::RecordExt;
