//! Byte sequence conversions.

use std::io::Read;

use crate::error::ConversionError;
use crate::source::{or_default, RawValue};

const READ_BUFFER_SIZE: usize = 16 * 1024;

/// Convert to a byte vector.
///
/// Only values that already carry a binary payload are accepted; they are
/// copied verbatim without any text round-trip. Everything else, including
/// text that happens to look like base64, yields `default`.
pub fn to_bytes<V: RawValue + ?Sized>(value: &V, default: Vec<u8>) -> Vec<u8> {
    // The payload is checked first so binary cells never render their text.
    if let Some(bytes) = value.raw_bytes() {
        return bytes.to_vec();
    }
    if value.raw_text().is_none() {
        return default;
    }
    or_default(Err(ConversionError::NotBinary), default)
}

fn drain<R: Read>(mut reader: R) -> Result<Vec<u8>, ConversionError> {
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    let mut accumulated = Vec::new();
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        accumulated.extend_from_slice(&buffer[..read]);
    }
    Ok(accumulated)
}

/// Read a stream to its end into memory.
///
/// The whole stream is accumulated regardless of its length. An absent
/// reader or a read error yields `default`.
pub fn read_to_bytes<R: Read>(reader: Option<R>, default: Vec<u8>) -> Vec<u8> {
    match reader {
        Some(reader) => or_default(drain(reader), default),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use row_core::CellValue;
    use std::io::Cursor;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("boom"))
        }
    }

    #[test]
    fn test_binary_cell_is_used_verbatim() {
        let cell = CellValue::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(to_bytes(&cell, vec![]), vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(to_bytes(&CellValue::Bytes(vec![]), vec![1]), Vec::<u8>::new());
    }

    struct CountingPayload {
        bytes: Vec<u8>,
        text_calls: std::cell::Cell<usize>,
    }

    impl RawValue for CountingPayload {
        fn raw_text(&self) -> Option<std::borrow::Cow<'_, str>> {
            self.text_calls.set(self.text_calls.get() + 1);
            Some(std::borrow::Cow::Borrowed("payload"))
        }

        fn raw_bytes(&self) -> Option<&[u8]> {
            Some(&self.bytes)
        }
    }

    #[test]
    fn test_binary_payload_skips_text_form() {
        let value = CountingPayload {
            bytes: vec![1, 2, 3],
            text_calls: std::cell::Cell::new(0),
        };
        assert_eq!(to_bytes(&value, vec![]), vec![1, 2, 3]);
        assert_eq!(value.text_calls.get(), 0);
    }

    #[test]
    fn test_non_binary_falls_back() {
        assert_eq!(to_bytes("3q2+7w==", vec![9]), vec![9]);
        assert_eq!(to_bytes(&CellValue::Int32(5), vec![9]), vec![9]);
        assert_eq!(to_bytes(&CellValue::Null, vec![9]), vec![9]);
    }

    #[test]
    fn test_read_to_bytes_spans_many_buffers() {
        let payload: Vec<u8> = (0..(READ_BUFFER_SIZE * 3 + 17)).map(|i| i as u8).collect();
        let read = read_to_bytes(Some(Cursor::new(payload.clone())), vec![]);
        assert_eq!(read, payload);
    }

    #[test]
    fn test_read_to_bytes_fallbacks() {
        assert_eq!(read_to_bytes(None::<Cursor<Vec<u8>>>, vec![1, 2]), vec![1, 2]);
        assert_eq!(read_to_bytes(Some(FailingReader), vec![3]), vec![3]);
        assert_eq!(read_to_bytes(Some(Cursor::new(Vec::new())), vec![3]), Vec::<u8>::new());
    }
}
