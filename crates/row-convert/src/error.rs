//! Conversion failures.
//!
//! Apart from [`ConversionError::NegativeBase36`] and the flat document
//! serialization error, these never reach callers of the `to_*` functions:
//! they are folded into the caller's default at the crate boundary.

use thiserror::Error;

/// Errors that can occur while coercing a cell into a target type.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The text does not match the target type's grammar
    #[error("Failed to parse '{value}' as {expected_type}")]
    Unparseable {
        value: String,
        expected_type: &'static str,
    },

    /// The text parsed but lies outside the target type's range
    #[error("Value '{value}' is out of range for {expected_type}")]
    OutOfRange {
        value: String,
        expected_type: &'static str,
    },

    /// The text contains no meaningful characters
    #[error("Empty or whitespace-only text")]
    Blank,

    /// The cell does not hold a binary payload
    #[error("Cell does not hold binary data")]
    NotBinary,

    /// A name in an enum expression matches no member
    #[error("'{name}' is not a member of {enum_name} (members: {members})")]
    UnknownMember {
        name: String,
        enum_name: &'static str,
        members: String,
    },

    /// A numeric enum value is neither a member nor a flag combination
    #[error("{value} is not a defined value of {enum_name}")]
    UndefinedEnumValue { value: i64, enum_name: &'static str },

    /// Reading a byte stream failed
    #[error("Failed to read byte stream: {0}")]
    Io(#[from] std::io::Error),

    /// Structured text could not be parsed or produced
    #[error("Invalid document: {0}")]
    Document(#[from] serde_json::Error),

    /// The record did not serialize to an object
    #[error("Expected a record with named fields, got {0}")]
    NotARecord(&'static str),

    /// Base-36 encoding is only defined for non-negative values
    #[error("Value cannot be negative: {0}")]
    NegativeBase36(i64),
}

impl ConversionError {
    pub(crate) fn unparseable(value: &str, expected_type: &'static str) -> Self {
        Self::Unparseable {
            value: value.to_string(),
            expected_type,
        }
    }

    pub(crate) fn out_of_range(value: &str, expected_type: &'static str) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            expected_type,
        }
    }
}
