// ============================================================================
// Exact Slow Path
// Big-integer midpoint comparison for products the 128-bit path cannot decide
// ============================================================================

use crate::numeric::bignum::Bignum;
use crate::numeric::float_bits::{integer_decode, INFINITY_BITS};
use std::cmp::Ordering;

/// Correctly round `w × 10^q` starting from a nearby candidate bit pattern.
///
/// The candidate moves up while the value lies above the midpoint to its
/// successor and down while it lies below the midpoint to its predecessor.
/// An exact midpoint goes to the candidate with an even mantissa.
pub fn round_exact(q: i64, w: u64, seed: u64) -> u64 {
    let mut bits = seed.min(INFINITY_BITS);

    while bits < INFINITY_BITS && rounds_past_upper_half(q, w, bits) {
        bits += 1;
    }
    while bits > 0 && !rounds_past_upper_half(q, w, bits - 1) {
        bits -= 1;
    }
    bits
}

/// Does `w × 10^q` round to something above the double with these bits?
fn rounds_past_upper_half(q: i64, w: u64, bits: u64) -> bool {
    match compare_with_upper_half(q, w, bits) {
        Ordering::Greater => true,
        Ordering::Equal => bits & 1 == 1,
        Ordering::Less => false,
    }
}

/// Compare `w × 10^q` with the midpoint between `bits` and its successor.
fn compare_with_upper_half(q: i64, w: u64, bits: u64) -> Ordering {
    let (m, e) = integer_decode(bits);
    // (2m + 1) × 2^(e - 1); 2m + 1 needs at most 54 bits
    let half_mantissa = 2 * m + 1;
    let half_exponent = e as i64 - 1;

    let mut value = Bignum::from_u64(w);
    let mut midpoint = Bignum::from_u64(half_mantissa);

    // Split 10^q = 5^q × 2^q so both sides stay integers.
    if q >= 0 {
        value.mul_pow5(q as u32);
    } else {
        midpoint.mul_pow5((-q) as u32);
    }

    let shift = q - half_exponent;
    if shift >= 0 {
        value.mul_pow2(shift as u32);
    } else {
        midpoint.mul_pow2((-shift) as u32);
    }

    value.cmp(&midpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_from_distant_seed() {
        let target = 0.1f64.to_bits();
        assert_eq!(round_exact(-1, 1, target + 2), target);
        assert_eq!(round_exact(-1, 1, target - 2), target);
    }

    #[test]
    fn test_exact_ties_go_to_even() {
        // 2^53 + 1 is halfway; 2^53 has the even mantissa
        let low = 9_007_199_254_740_992f64.to_bits();
        assert_eq!(round_exact(0, 9_007_199_254_740_993, low + 1), low);

        // 2^53 + 3 is halfway between 2^53 + 2 (odd) and 2^53 + 4 (even)
        let high = 9_007_199_254_740_996f64.to_bits();
        assert_eq!(round_exact(0, 9_007_199_254_740_995, high - 1), high);
    }

    #[test]
    fn test_subnormal_boundary() {
        // Half of the smallest subnormal is 2.4703282292062327208...e-324
        assert_eq!(round_exact(-340, 24_703_282_292_062_327, 1), 0);
        assert_eq!(round_exact(-340, 24_703_282_292_062_328, 0), 1);
    }

    #[test]
    fn test_clamps_at_infinity() {
        assert_eq!(round_exact(309, 1, INFINITY_BITS), INFINITY_BITS);
        assert_eq!(round_exact(292, 17_976_931_348_623_159, f64::MAX.to_bits()), INFINITY_BITS);
    }
}
