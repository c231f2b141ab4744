// ============================================================================
// Encode Buffer
// Caller-owned byte span with a write cursor
// ============================================================================

use crate::domain::config::FormatConfig;
use crate::engine::writer;
use crate::numeric::{CodecError, CodecResult};

/// A caller-supplied byte span that formatted numbers are appended to.
///
/// The buffer never grows. A write that does not fit fails with
/// `BufferTooSmall` and leaves both the bytes and the cursor unchanged.
#[derive(Debug)]
pub struct EncodeBuffer<'a> {
    bytes: &'a mut [u8],
    position: usize,
}

impl<'a> EncodeBuffer<'a> {
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// The written prefix of the span.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.position]
    }

    /// Rewind the cursor. Previously written bytes stay in the span.
    #[inline]
    pub fn clear(&mut self) {
        self.position = 0;
    }

    /// Append the shortest round-trip form of `value` in ECMAScript layout.
    pub fn write_f64(&mut self, value: f64) -> CodecResult<usize> {
        self.write_f64_with(value, &FormatConfig::ecmascript())
    }

    /// Append the shortest round-trip form of `value` laid out per `config`.
    pub fn write_f64_with(&mut self, value: f64, config: &FormatConfig) -> CodecResult<usize> {
        let written = writer::write_shortest_with(value, config, self.bytes, self.position)?;
        self.position += written;
        Ok(written)
    }

    /// Append raw bytes, such as separators between numbers.
    pub fn write_bytes(&mut self, data: &[u8]) -> CodecResult<usize> {
        if data.len() > self.remaining() {
            return Err(CodecError::BufferTooSmall {
                needed: data.len(),
                available: self.remaining(),
            });
        }
        self.bytes[self.position..self.position + data.len()].copy_from_slice(data);
        self.position += data.len();
        Ok(data.len())
    }

    pub fn push_byte(&mut self, byte: u8) -> CodecResult<()> {
        self.write_bytes(&[byte]).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_writes() {
        let mut storage = [0u8; 32];
        let mut out = EncodeBuffer::new(&mut storage);

        out.write_f64(1.5).unwrap();
        out.push_byte(b',').unwrap();
        out.write_f64(-0.25).unwrap();

        assert_eq!(out.as_bytes(), b"1.5,-0.25");
        assert_eq!(out.position(), 9);
        assert_eq!(out.remaining(), 23);
    }

    #[test]
    fn test_rejected_write_keeps_cursor() {
        let mut storage = [b'#'; 6];
        let mut out = EncodeBuffer::new(&mut storage);
        out.write_bytes(b"[").unwrap();

        let err = out.write_f64(3.1234567).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                needed: 9,
                available: 5
            }
        );
        assert_eq!(out.position(), 1);
        assert_eq!(storage, *b"[#####");
    }

    #[test]
    fn test_clear_rewinds() {
        let mut storage = [0u8; 8];
        let mut out = EncodeBuffer::new(&mut storage);
        out.write_f64_with(2.0, &FormatConfig::jdk()).unwrap();
        assert_eq!(out.as_bytes(), b"2.0");

        out.clear();
        assert_eq!(out.position(), 0);
        assert_eq!(out.capacity(), 8);
        assert!(out.as_bytes().is_empty());
    }
}
