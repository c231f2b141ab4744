// ============================================================================
// IEEE-754 Binary64 Layout
// Bit-level constants and helpers shared by the converter and the writer
// ============================================================================

/// The number of bits in the significand, *excluding* the hidden bit.
pub const MANTISSA_EXPLICIT_BITS: u32 = 52;

/// Exponent bias of binary64.
pub const EXPONENT_BIAS: i32 = 1023;

/// Minimum exponent value `-(1 << (EXP_BITS - 1)) + 1`.
pub const MINIMUM_EXPONENT: i32 = -1023;

/// Biased exponent of infinity and NaN.
pub const INFINITE_POWER: i32 = 0x7FF;

pub const SIGN_MASK: u64 = 1 << 63;
pub const MANTISSA_MASK: u64 = (1 << MANTISSA_EXPLICIT_BITS) - 1;
pub const INFINITY_BITS: u64 = (INFINITE_POWER as u64) << MANTISSA_EXPLICIT_BITS;

// Ties can only occur for decimal exponents in [-4, 23]: outside that range
// 5^|q| no longer fits next to a 53-bit significand in 64 bits.
pub const MIN_EXPONENT_ROUND_TO_EVEN: i64 = -4;
pub const MAX_EXPONENT_ROUND_TO_EVEN: i64 = 23;

// Powers of ten up to 10^22 are exact in binary64.
pub const MIN_EXPONENT_FAST_PATH: i64 = -22;
pub const MAX_EXPONENT_FAST_PATH: i64 = 22;

/// Largest significand the fast path accepts (`2^53`).
pub const MAX_MANTISSA_FAST_PATH: u64 = 2 << MANTISSA_EXPLICIT_BITS;

/// Smallest decimal exponent for a non-zero value.
pub const SMALLEST_POWER_OF_TEN: i64 = -342;

/// Largest decimal exponent for a non-infinite value.
pub const LARGEST_POWER_OF_TEN: i64 = 308;

/// Exact powers of ten, `10^0` through `10^22`.
pub fn pow10_fast_path(exponent: usize) -> f64 {
    const TABLE: [f64; 32] = [
        1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15,
        1e16, 1e17, 1e18, 1e19, 1e20, 1e21, 1e22, 0., 0., 0., 0., 0., 0., 0., 0., 0.,
    ];
    TABLE[exponent & 31]
}

/// A binary64 magnitude split into explicit mantissa bits and biased exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BiasedFp {
    /// Significand bits, hidden bit excluded
    pub f: u64,
    /// Biased binary exponent
    pub e: i32,
}

impl BiasedFp {
    #[inline]
    pub const fn zero_pow2(e: i32) -> Self {
        Self { f: 0, e }
    }

    #[inline]
    pub const fn to_bits(self) -> u64 {
        self.f | ((self.e as u64) << MANTISSA_EXPLICIT_BITS)
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.to_bits())
    }
}

/// Returns `(m, e)` with `value = m × 2^e` for the non-negative finite
/// double whose bits (sign cleared) are `bits`.
#[inline]
pub fn integer_decode(bits: u64) -> (u64, i32) {
    let biased = ((bits >> MANTISSA_EXPLICIT_BITS) & INFINITE_POWER as u64) as i32;
    let fraction = bits & MANTISSA_MASK;
    if biased == 0 {
        (fraction, 1 - EXPONENT_BIAS - MANTISSA_EXPLICIT_BITS as i32)
    } else {
        (
            fraction | (1 << MANTISSA_EXPLICIT_BITS),
            biased - EXPONENT_BIAS - MANTISSA_EXPLICIT_BITS as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pow10_table_is_exact() {
        let mut power = 1u128;
        for exponent in 0..=22 {
            assert_eq!(pow10_fast_path(exponent) as u128, power);
            power *= 10;
        }
    }

    #[test]
    fn test_biased_fp_bits() {
        let one = BiasedFp { f: 0, e: 1023 };
        assert_eq!(one.to_f64(), 1.0);
        assert_eq!(BiasedFp::zero_pow2(INFINITE_POWER).to_f64(), f64::INFINITY);
        assert_eq!(BiasedFp::zero_pow2(0).to_bits(), 0);
    }

    #[test]
    fn test_integer_decode() {
        assert_eq!(integer_decode(1.0f64.to_bits()), (1 << 52, -52));
        assert_eq!(integer_decode(1), (1, -1074));
        let (m, e) = integer_decode(f64::MAX.to_bits());
        assert_eq!(m, (1 << 53) - 1);
        assert_eq!(e, 971);
    }
}
