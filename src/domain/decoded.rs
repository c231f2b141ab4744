// ============================================================================
// Decoded Double
// Result of converting a scanned literal to binary64
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the decoded value relates to the literal's mathematical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Precision {
    /// The double equals the literal exactly
    Exact,
    /// The double is the nearest representable value (ties to even),
    /// including underflow to zero
    Rounded,
    /// The magnitude exceeded the binary64 range; the value is a signed
    /// infinity
    OverflowToInfinity,
}

/// A binary64 value together with its precision classification.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodedDouble {
    pub value: f64,
    pub precision: Precision,
}

impl DecodedDouble {
    #[inline]
    pub const fn new(value: f64, precision: Precision) -> Self {
        Self { value, precision }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        self.precision == Precision::Exact
    }

    #[inline]
    pub fn overflowed(&self) -> bool {
        self.precision == Precision::OverflowToInfinity
    }

    /// Raw IEEE-754 bit pattern of the value.
    #[inline]
    pub fn to_bits(&self) -> u64 {
        self.value.to_bits()
    }
}

impl From<DecodedDouble> for f64 {
    fn from(decoded: DecodedDouble) -> Self {
        decoded.value
    }
}
