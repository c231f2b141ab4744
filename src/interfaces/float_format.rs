// ============================================================================
// Float Format Interface
// Defines the contract for pluggable double-to-decimal writers
// ============================================================================

use crate::domain::EncodeBuffer;
use crate::numeric::CodecResult;

/// Appends the decimal text of a double to an encode buffer.
/// Implementations: Codec (Ryū, configurable layout), StdCodec (`{:?}`)
pub trait FloatFormat: Send + Sync {
    /// Write `value` at the buffer's cursor
    ///
    /// # Returns
    /// Number of bytes written. On error the buffer is unchanged.
    fn write_f64(&self, value: f64, out: &mut EncodeBuffer<'_>) -> CodecResult<usize>;

    /// Get the formatter name for logging/benchmarks
    fn name(&self) -> &'static str;

    /// Write every value in `values`, each followed by `separator`.
    /// Returns total bytes written.
    fn write_separated(
        &self,
        values: &[f64],
        separator: u8,
        out: &mut EncodeBuffer<'_>,
    ) -> CodecResult<usize> {
        let mut total = 0;
        for &value in values {
            total += self.write_f64(value, out)?;
            out.push_byte(separator)?;
            total += 1;
        }
        Ok(total)
    }
}
