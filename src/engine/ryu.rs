// ============================================================================
// Shortest Digit Generation
// Ryū: minimal decimal digits that round-trip to the same double
// ============================================================================
//
// The rounding interval of a double is scaled by a 125-bit power of five so
// that its bounds (vm, vr, vp) become integers carrying a few more digits
// than needed. Digits are then stripped while the bounds still differ,
// which leaves the shortest digit string inside the interval. The last
// removed digit decides rounding of the kept digits.

use crate::numeric::float_bits::{EXPONENT_BIAS, INFINITE_POWER, MANTISSA_EXPLICIT_BITS, MANTISSA_MASK};
use crate::numeric::ryu_table::{
    DOUBLE_POW5_BITCOUNT, DOUBLE_POW5_INV_BITCOUNT, DOUBLE_POW5_INV_SPLIT, DOUBLE_POW5_SPLIT,
};

/// Shortest decimal form `mantissa × 10^exponent` of a positive double.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalDigits {
    /// Digits without trailing zeros
    pub mantissa: u64,
    /// Power of ten applied to `mantissa`
    pub exponent: i32,
}

impl DecimalDigits {
    /// Number of decimal digits in `mantissa`.
    #[inline]
    pub fn len(&self) -> usize {
        decimal_length(self.mantissa)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mantissa == 0
    }

    /// Exponent in scientific form, `d.ddd × 10^k`.
    #[inline]
    pub fn scientific_exponent(&self) -> i32 {
        self.exponent + self.len() as i32 - 1
    }
}

/// Number of decimal digits in `v` (at least 1).
#[inline]
pub fn decimal_length(v: u64) -> usize {
    match v.checked_ilog10() {
        Some(log) => log as usize + 1,
        None => 1,
    }
}

/// Shortest round-trip digits for the finite, non-zero double with the
/// given bits. The sign bit is ignored.
pub fn shortest(bits: u64) -> DecimalDigits {
    let ieee_mantissa = bits & MANTISSA_MASK;
    let ieee_exponent = ((bits >> MANTISSA_EXPLICIT_BITS) & INFINITE_POWER as u64) as u32;
    debug_assert!(ieee_exponent != INFINITE_POWER as u32);
    debug_assert!(ieee_mantissa != 0 || ieee_exponent != 0);

    // Two extra bits leave room for the interval half-widths.
    let (e2, m2) = if ieee_exponent == 0 {
        (
            1 - EXPONENT_BIAS - MANTISSA_EXPLICIT_BITS as i32 - 2,
            ieee_mantissa,
        )
    } else {
        (
            ieee_exponent as i32 - EXPONENT_BIAS - MANTISSA_EXPLICIT_BITS as i32 - 2,
            (1u64 << MANTISSA_EXPLICIT_BITS) | ieee_mantissa,
        )
    };
    let accept_bounds = m2 & 1 == 0;

    let mv = 4 * m2;
    // The lower neighbour is closer when the mantissa is a power of two
    let mm_shift = (ieee_mantissa != 0 || ieee_exponent <= 1) as u64;

    let mut vr: u64;
    let mut vp: u64;
    let mut vm: u64;
    let e10: i32;
    let mut vm_is_trailing_zeros = false;
    let mut vr_is_trailing_zeros = false;

    if e2 >= 0 {
        let q = log10_pow2(e2) - (e2 > 3) as u32;
        e10 = q as i32;
        let k = DOUBLE_POW5_INV_BITCOUNT + pow5bits(q as i32) - 1;
        let i = -e2 + q as i32 + k;
        let mul = &DOUBLE_POW5_INV_SPLIT[q as usize];
        vr = mul_shift_64(4 * m2, mul, i as u32);
        vp = mul_shift_64(4 * m2 + 2, mul, i as u32);
        vm = mul_shift_64(4 * m2 - 1 - mm_shift, mul, i as u32);
        if q <= 21 {
            // Only one of mv, mv - 1 - mm_shift, mv + 2 can be a multiple of 5
            if mv % 5 == 0 {
                vr_is_trailing_zeros = multiple_of_power_of_5(mv, q);
            } else if accept_bounds {
                vm_is_trailing_zeros = multiple_of_power_of_5(mv - 1 - mm_shift, q);
            } else {
                vp -= multiple_of_power_of_5(mv + 2, q) as u64;
            }
        }
    } else {
        let q = log10_pow5(-e2) - (-e2 > 1) as u32;
        e10 = q as i32 + e2;
        let i = -e2 - q as i32;
        let k = pow5bits(i) - DOUBLE_POW5_BITCOUNT;
        let j = q as i32 - k;
        let mul = &DOUBLE_POW5_SPLIT[i as usize];
        vr = mul_shift_64(4 * m2, mul, j as u32);
        vp = mul_shift_64(4 * m2 + 2, mul, j as u32);
        vm = mul_shift_64(4 * m2 - 1 - mm_shift, mul, j as u32);
        if q <= 1 {
            // mv has at least q trailing binary zeros
            vr_is_trailing_zeros = true;
            if accept_bounds {
                vm_is_trailing_zeros = mm_shift == 1;
            } else {
                vp -= 1;
            }
        } else if q < 63 {
            vr_is_trailing_zeros = multiple_of_power_of_2(mv, q);
        }
    }

    let mut removed = 0i32;
    let mut last_removed_digit = 0u64;
    let output = if vm_is_trailing_zeros || vr_is_trailing_zeros {
        // Rare: exact bounds need the full bookkeeping
        while vp / 10 > vm / 10 {
            vm_is_trailing_zeros &= vm % 10 == 0;
            vr_is_trailing_zeros &= last_removed_digit == 0;
            last_removed_digit = vr % 10;
            vr /= 10;
            vp /= 10;
            vm /= 10;
            removed += 1;
        }
        if vm_is_trailing_zeros {
            while vm % 10 == 0 {
                vr_is_trailing_zeros &= last_removed_digit == 0;
                last_removed_digit = vr % 10;
                vr /= 10;
                vp /= 10;
                vm /= 10;
                removed += 1;
            }
        }
        if vr_is_trailing_zeros && last_removed_digit == 5 && vr % 2 == 0 {
            // Exactly halfway: round to even
            last_removed_digit = 4;
        }
        let round_up = (vr == vm && (!accept_bounds || !vm_is_trailing_zeros))
            || last_removed_digit >= 5;
        vr + round_up as u64
    } else {
        let mut round_up = false;
        if vp / 100 > vm / 100 {
            round_up = vr % 100 >= 50;
            vr /= 100;
            vp /= 100;
            vm /= 100;
            removed += 2;
        }
        while vp / 10 > vm / 10 {
            round_up = vr % 10 >= 5;
            vr /= 10;
            vp /= 10;
            vm /= 10;
            removed += 1;
        }
        vr + (vr == vm || round_up) as u64
    };

    DecimalDigits {
        mantissa: output,
        exponent: e10 + removed,
    }
}

/// `ceil(log2(5^e))` for `e` in `[0, 3528]`, with 0 mapping to 1.
#[inline]
fn pow5bits(e: i32) -> i32 {
    (((e as u32) * 1_217_359) >> 19) as i32 + 1
}

/// `floor(log10(2^e))` for `e` in `[0, 1650]`.
#[inline]
fn log10_pow2(e: i32) -> u32 {
    ((e as u32) * 78_913) >> 18
}

/// `floor(log10(5^e))` for `e` in `[0, 2620]`.
#[inline]
fn log10_pow5(e: i32) -> u32 {
    ((e as u32) * 732_923) >> 20
}

#[inline]
fn pow5_factor(mut value: u64) -> u32 {
    let mut count = 0;
    while value % 5 == 0 {
        value /= 5;
        count += 1;
    }
    count
}

#[inline]
fn multiple_of_power_of_5(value: u64, p: u32) -> bool {
    pow5_factor(value) >= p
}

#[inline]
fn multiple_of_power_of_2(value: u64, p: u32) -> bool {
    value & ((1u64 << p) - 1) == 0
}

/// `(m × mul) >> j` for a 128-bit `mul` stored as `(low, high)`, with
/// `j >= 64`.
#[inline]
fn mul_shift_64(m: u64, mul: &(u64, u64), j: u32) -> u64 {
    let b0 = m as u128 * mul.0 as u128;
    let b2 = m as u128 * mul.1 as u128;
    (((b0 >> 64) + b2) >> (j - 64)) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::SplitMix64;
    use quickcheck::{quickcheck, TestResult};

    fn digits(value: f64) -> (u64, i32) {
        let d = shortest(value.to_bits());
        (d.mantissa, d.exponent)
    }

    /// Digit count of Rust's own shortest formatting.
    fn std_digit_count(value: f64) -> usize {
        let text = format!("{:e}", value.abs());
        let mantissa = text.split('e').next().unwrap_or("");
        mantissa.bytes().filter(u8::is_ascii_digit).count()
    }

    #[test]
    fn test_known_values() {
        assert_eq!(digits(1.0), (1, 0));
        assert_eq!(digits(0.3), (3, -1));
        assert_eq!(digits(3.1234567), (31_234_567, -7));
        assert_eq!(digits(31_234_567.0), (31_234_567, 0));
        assert_eq!(digits(3.1234567e-7), (31_234_567, -14));
        assert_eq!(digits(1e23), (1, 23));
        assert_eq!(digits(9_007_199_254_740_992.0), (9_007_199_254_740_992, 0));
        assert_eq!(digits(-2.5), (25, -1));
    }

    #[test]
    fn test_range_limits() {
        assert_eq!(digits(f64::MAX), (17_976_931_348_623_157, 292));
        assert_eq!(digits(f64::MIN_POSITIVE), (22_250_738_585_072_014, -324));
        assert_eq!(digits(5e-324), (5, -324));
        assert_eq!(digits(f64::from_bits(2)), (1, -323));
    }

    #[test]
    fn test_scientific_exponent() {
        let d = shortest(3.1234567e-7f64.to_bits());
        assert_eq!(d.len(), 8);
        assert_eq!(d.scientific_exponent(), -7);
        assert!(!d.is_empty());
        assert_eq!(decimal_length(0), 1);
        assert_eq!(decimal_length(u64::MAX), 20);
    }

    #[test]
    fn test_digits_round_trip_sweep() {
        let mut rng = SplitMix64::new(42);
        for _ in 0..100_000 {
            let value = rng.next_finite_f64().abs();
            if value == 0.0 {
                continue;
            }
            let d = shortest(value.to_bits());
            let back: f64 = format!("{}e{}", d.mantissa, d.exponent).parse().unwrap();
            assert_eq!(back.to_bits(), value.to_bits(), "{:e}", value);
            assert_ne!(d.mantissa % 10, 0, "trailing zero for {:e}", value);
        }
    }

    #[test]
    fn test_length_matches_std() {
        fn prop(bits: u64) -> TestResult {
            let value = f64::from_bits(bits);
            if !value.is_finite() || value == 0.0 {
                return TestResult::discard();
            }
            TestResult::from_bool(shortest(bits).len() == std_digit_count(value))
        }
        quickcheck(prop as fn(u64) -> TestResult);
    }
}
