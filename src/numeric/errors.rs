// ============================================================================
// Codec Errors
// Error types for decimal scanning and shortest-form writing
// ============================================================================

use std::fmt;

/// Errors that can occur while scanning or writing decimal text.
///
/// The converter itself never fails: out-of-range magnitudes degrade to a
/// signed infinity or a signed zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecError {
    /// No mantissa digits, a dangling exponent marker, or a start offset
    /// past the end of the input
    InvalidNumberLiteral {
        /// Byte offset where scanning gave up
        offset: usize,
    },
    /// The formatted value does not fit in the caller's span
    BufferTooSmall {
        /// Bytes the value needs
        needed: usize,
        /// Bytes left in the span after the requested offset
        available: usize,
    },
    /// NaN or infinity handed to the writer
    NonFinite,
    /// Value is too large for the requested exact representation
    Overflow,
    /// Literal carried more significant digits than the accumulator kept
    PrecisionLoss,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::InvalidNumberLiteral { offset } => {
                write!(f, "invalid number literal at byte {}", offset)
            },
            CodecError::BufferTooSmall { needed, available } => write!(
                f,
                "buffer too small: need {} bytes, {} available",
                needed, available
            ),
            CodecError::NonFinite => write!(f, "cannot write a non-finite value"),
            CodecError::Overflow => {
                write!(f, "overflow: value exceeds the exact decimal range")
            },
            CodecError::PrecisionLoss => write!(
                f,
                "precision loss: literal has more significant digits than were retained"
            ),
        }
    }
}

impl std::error::Error for CodecError {}

/// Result type alias for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CodecError::InvalidNumberLiteral { offset: 3 }.to_string(),
            "invalid number literal at byte 3"
        );
        assert_eq!(
            CodecError::BufferTooSmall {
                needed: 9,
                available: 4
            }
            .to_string(),
            "buffer too small: need 9 bytes, 4 available"
        );
        assert_eq!(
            CodecError::NonFinite.to_string(),
            "cannot write a non-finite value"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(CodecError::Overflow, CodecError::Overflow);
        assert_ne!(
            CodecError::InvalidNumberLiteral { offset: 0 },
            CodecError::InvalidNumberLiteral { offset: 1 }
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CodecError::PrecisionLoss);
        assert!(err.to_string().starts_with("precision loss"));
    }
}
