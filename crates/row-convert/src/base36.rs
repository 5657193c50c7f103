//! Base-36 encoding.

use crate::error::ConversionError;

const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Encode a non-negative integer as uppercase base-36 (`0-9`, then `A-Z`).
///
/// Negative input has no encoding and is reported as
/// [`ConversionError::NegativeBase36`] rather than folded into a default.
pub fn to_base36(value: i64) -> Result<String, ConversionError> {
    if value < 0 {
        return Err(ConversionError::NegativeBase36(value));
    }

    let mut remaining = value as u64;
    let mut encoded = Vec::new();
    loop {
        encoded.push(DIGITS[(remaining % 36) as usize]);
        remaining /= 36;
        if remaining == 0 {
            break;
        }
    }
    encoded.reverse();
    Ok(encoded.into_iter().map(char::from).collect())
}
