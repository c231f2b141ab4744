// ============================================================================
// Shortest Codec
// Scanner + converter for reading, Ryū writer for output
// ============================================================================

use crate::domain::{DecodedDouble, EncodeBuffer, FormatConfig};
use crate::engine::{converter, scanner, writer};
use crate::interfaces::{FloatFormat, FloatParser};
use crate::numeric::CodecResult;

/// Correctly rounded reader and shortest round-trip writer sharing one
/// layout configuration.
///
/// Stateless apart from the configuration, so a single instance can be
/// shared across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Codec {
    config: FormatConfig,
}

impl Codec {
    /// Create a codec with an already-validated configuration.
    /// Use `CodecBuilder` or `create_from_config` to validate first.
    pub fn new(config: FormatConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Scan and convert the literal at `start`, keeping the precision
    /// classification.
    pub fn decode(&self, bytes: &[u8], start: usize) -> CodecResult<(DecodedDouble, usize)> {
        let (literal, next) = scanner::scan(bytes, start)?;
        Ok((converter::decode(&literal), next))
    }

    /// Write `value` at `buffer[offset..]`, returning the byte count.
    pub fn write(&self, value: f64, buffer: &mut [u8], offset: usize) -> CodecResult<usize> {
        writer::write_shortest_with(value, &self.config, buffer, offset)
    }
}

impl FloatParser for Codec {
    fn parse_f64(&self, bytes: &[u8], start: usize) -> CodecResult<(f64, usize)> {
        self.decode(bytes, start)
            .map(|(decoded, next)| (decoded.value, next))
    }

    fn name(&self) -> &'static str {
        "Shortest"
    }
}

impl FloatFormat for Codec {
    fn write_f64(&self, value: f64, out: &mut EncodeBuffer<'_>) -> CodecResult<usize> {
        out.write_f64_with(value, &self.config)
    }

    fn name(&self) -> &'static str {
        "Shortest"
    }
}
