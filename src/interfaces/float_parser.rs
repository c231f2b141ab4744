// ============================================================================
// Float Parser Interface
// Defines the contract for pluggable decimal-to-double readers
// ============================================================================

use crate::numeric::CodecResult;

/// Reads one number literal from a byte span.
/// Implementations: Codec (Eisel-Lemire), StdCodec (`str::parse` baseline)
pub trait FloatParser: Send + Sync {
    /// Parse the literal starting at `start`
    ///
    /// # Returns
    /// The decoded value and the offset of the first byte after the literal
    fn parse_f64(&self, bytes: &[u8], start: usize) -> CodecResult<(f64, usize)>;

    /// Get the parser name for logging/benchmarks
    fn name(&self) -> &'static str;

    /// Parse a sequence of literals separated by single bytes (commas,
    /// spaces), appending the values to `out`. Returns the count parsed.
    fn parse_separated(&self, bytes: &[u8], out: &mut Vec<f64>) -> CodecResult<usize> {
        let mut pos = 0;
        let mut count = 0;
        while pos < bytes.len() {
            let (value, next) = self.parse_f64(bytes, pos)?;
            out.push(value);
            count += 1;
            // Skip the separator
            pos = next + 1;
        }
        Ok(count)
    }
}
