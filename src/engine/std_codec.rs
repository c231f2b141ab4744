// ============================================================================
// Standard Library Codec
// Baseline reader/writer built on `str::parse` and `core::fmt`
// ============================================================================

use crate::domain::EncodeBuffer;
use crate::engine::scanner;
use crate::interfaces::{FloatFormat, FloatParser};
use crate::numeric::{CodecError, CodecResult};
use arrayvec::ArrayString;
use std::fmt::Write;

/// `{:?}` of any finite f64 fits comfortably.
const FORMAT_CAPACITY: usize = 32;

/// Reference implementation for comparisons in tests and benchmarks.
///
/// Literal boundaries come from the same scanner as `Codec`; only the
/// conversion and formatting go through the standard library.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdCodec;

impl FloatParser for StdCodec {
    fn parse_f64(&self, bytes: &[u8], start: usize) -> CodecResult<(f64, usize)> {
        let (_, next) = scanner::scan(bytes, start)?;
        let invalid = CodecError::InvalidNumberLiteral { offset: start };
        let text = std::str::from_utf8(&bytes[start..next]).map_err(|_| invalid)?;
        let value = text.parse::<f64>().map_err(|_| invalid)?;
        Ok((value, next))
    }

    fn name(&self) -> &'static str {
        "Std"
    }
}

impl FloatFormat for StdCodec {
    fn write_f64(&self, value: f64, out: &mut EncodeBuffer<'_>) -> CodecResult<usize> {
        if !value.is_finite() {
            return Err(CodecError::NonFinite);
        }
        let mut text = ArrayString::<FORMAT_CAPACITY>::new();
        write!(text, "{:?}", value).map_err(|_| CodecError::BufferTooSmall {
            needed: FORMAT_CAPACITY + 1,
            available: FORMAT_CAPACITY,
        })?;
        out.write_bytes(text.as_bytes())
    }

    fn name(&self) -> &'static str {
        "Std"
    }
}
