// ============================================================================
// Eisel-Lemire Conversion
// Decimal-to-binary rounding from a 128-bit truncated power of five
// ============================================================================
//
// The product w × 5^q is approximated by multiplying the normalized
// significand with the top 128 bits of 5^q. For almost every input the
// truncated product is enough to round correctly; the rare undecidable
// products are flagged and resolved by the big-integer slow path.

use crate::numeric::float_bits::{
    BiasedFp, INFINITE_POWER, MANTISSA_EXPLICIT_BITS, MAX_EXPONENT_ROUND_TO_EVEN,
    MINIMUM_EXPONENT, MIN_EXPONENT_ROUND_TO_EVEN,
};
use crate::numeric::pow5_table::{
    LARGEST_POWER_OF_FIVE, POWER_OF_FIVE_128, SMALLEST_POWER_OF_FIVE,
};

/// Outcome of the 128-bit approximation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Approximation {
    /// Rounded result. When `conclusive` is false this is only a close
    /// estimate and seeds the exact search.
    pub fp: BiasedFp,
    /// The truncated product was precise enough to decide rounding.
    pub conclusive: bool,
}

impl Approximation {
    #[inline]
    fn exact(fp: BiasedFp) -> Self {
        Self { fp, conclusive: true }
    }
}

/// Compute `w × 10^q` rounded to nearest, ties to even.
///
/// `w` must be non-zero for a meaningful result; zero maps to `+0.0`.
pub fn compute_float(q: i64, mut w: u64) -> Approximation {
    let fp_zero = BiasedFp::zero_pow2(0);
    let fp_inf = BiasedFp::zero_pow2(INFINITE_POWER);

    if w == 0 || q < SMALLEST_POWER_OF_FIVE {
        return Approximation::exact(fp_zero);
    } else if q > LARGEST_POWER_OF_FIVE {
        return Approximation::exact(fp_inf);
    }

    let lz = w.leading_zeros();
    w <<= lz;
    let (lo, hi) = compute_product_approx(q, w, MANTISSA_EXPLICIT_BITS as usize + 3);

    // The low word saturated: the true product may carry into `hi`. Inside
    // [-27, 55] the table entry is exact enough that this cannot happen.
    let conclusive = !(lo == u64::MAX && !(-27..=55).contains(&q));

    let upperbit = (hi >> 63) as i32;
    let shift = upperbit + 64 - MANTISSA_EXPLICIT_BITS as i32 - 3;
    let mut mantissa = hi >> shift;
    let mut power2 = power(q as i32) + upperbit - lz as i32 - MINIMUM_EXPONENT;

    if power2 <= 0 {
        if -power2 + 1 >= 64 {
            return Approximation { fp: fp_zero, conclusive };
        }
        // Subnormal: shift down to the fixed exponent, then round.
        mantissa >>= -power2 + 1;
        mantissa += mantissa & 1;
        mantissa >>= 1;
        // Rounding may carry into the smallest normal.
        power2 = (mantissa >= (1 << MANTISSA_EXPLICIT_BITS)) as i32;
        return Approximation {
            fp: BiasedFp { f: mantissa, e: power2 },
            conclusive,
        };
    }

    // Exactly halfway between two doubles: the bit just below the kept
    // mantissa is set and nothing below it. Round down so the carry below
    // lands on an even mantissa.
    if lo <= 1
        && q >= MIN_EXPONENT_ROUND_TO_EVEN
        && q <= MAX_EXPONENT_ROUND_TO_EVEN
        && mantissa & 3 == 1
        && (mantissa << shift) == hi
    {
        mantissa &= !1_u64;
    }

    mantissa += mantissa & 1;
    mantissa >>= 1;
    if mantissa >= (2_u64 << MANTISSA_EXPLICIT_BITS) {
        mantissa = 1_u64 << MANTISSA_EXPLICIT_BITS;
        power2 += 1;
    }
    mantissa &= !(1_u64 << MANTISSA_EXPLICIT_BITS);

    if power2 >= INFINITE_POWER {
        return Approximation { fp: fp_inf, conclusive };
    }
    Approximation {
        fp: BiasedFp { f: mantissa, e: power2 },
        conclusive,
    }
}

/// `floor(log2(10^q)) + 63`, valid for `q` in `[-1300, 1300]`.
#[inline]
fn power(q: i32) -> i32 {
    (q.wrapping_mul(152_170 + 65536) >> 16) + 63
}

#[inline]
fn full_multiplication(a: u64, b: u64) -> (u64, u64) {
    let r = (a as u128) * (b as u128);
    (r as u64, (r >> 64) as u64)
}

/// Truncated product of `w` with 5^q, wide enough for `precision` result
/// bits. Only reads the low table word when the high product is ambiguous.
fn compute_product_approx(q: i64, w: u64, precision: usize) -> (u64, u64) {
    debug_assert!(q >= SMALLEST_POWER_OF_FIVE);
    debug_assert!(q <= LARGEST_POWER_OF_FIVE);
    debug_assert!(precision <= 64);

    let mask = if precision < 64 {
        0xFFFF_FFFF_FFFF_FFFF_u64 >> precision
    } else {
        0xFFFF_FFFF_FFFF_FFFF_u64
    };

    let index = (q - SMALLEST_POWER_OF_FIVE) as usize;
    let (hi5, lo5) = POWER_OF_FIVE_128[index];
    let (mut first_lo, mut first_hi) = full_multiplication(w, hi5);
    if first_hi & mask == mask {
        let (_, second_hi) = full_multiplication(w, lo5);
        first_lo = first_lo.wrapping_add(second_hi);
        if second_hi > first_lo {
            first_hi += 1;
        }
    }
    (first_lo, first_hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compute(q: i64, w: u64) -> f64 {
        let approx = compute_float(q, w);
        assert!(approx.conclusive, "{}e{} inconclusive", w, q);
        approx.fp.to_f64()
    }

    #[test]
    fn test_simple_values() {
        assert_eq!(compute(0, 1), 1.0);
        assert_eq!(compute(-7, 31_234_567), 3.1234567);
        assert_eq!(compute(-14, 31_234_567), 3.1234567e-7);
        assert_eq!(compute(23, 1), 1e23);
        assert_eq!(compute(-1, 1), 0.1);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(compute(292, 17_976_931_348_623_157), f64::MAX);
        assert_eq!(compute(308, 17_976_931_348_623_157), f64::INFINITY);
        assert_eq!(compute(-324, 5), 5e-324);
        assert_eq!(compute(-343, 1), 0.0);
        assert_eq!(compute(309, 1), f64::INFINITY);
        assert_eq!(compute(-325, 2), 0.0);
    }

    #[test]
    fn test_halfway_rounds_to_even() {
        // 2^53 + 1 sits halfway between 2^53 and 2^53 + 2
        assert_eq!(compute(0, 9_007_199_254_740_993), 9_007_199_254_740_992.0);
        // 2^53 + 3 rounds up to 2^53 + 4
        assert_eq!(compute(0, 9_007_199_254_740_995), 9_007_199_254_740_996.0);
    }

    #[test]
    fn test_subnormal_carry_to_normal() {
        assert_eq!(compute(-324, 22_250_738_585_072_014), f64::MIN_POSITIVE);
        // Just below the smallest normal: rounding carries into it
        assert_eq!(compute(-324, 22_250_738_585_072_012), f64::MIN_POSITIVE);
        assert_eq!(
            compute(-324, 22_250_738_585_072_011).to_bits(),
            f64::MIN_POSITIVE.to_bits() - 1
        );
    }

    #[test]
    fn test_power() {
        assert_eq!(power(0), 63);
        assert_eq!(power(1), 66);
        assert_eq!(power(-1), 59);
    }
}
