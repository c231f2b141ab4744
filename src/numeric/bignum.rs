// ============================================================================
// Stack Big Integer
// Fixed-capacity arbitrary-precision unsigned integer for exact comparisons
// ============================================================================

use arrayvec::ArrayVec;
use std::cmp::Ordering;

/// Number of 32-bit limbs: 1280 bits.
///
/// The converter's slow path compares `w × 10^q` against a binary midpoint.
/// With `q` in `[-342, 308]` both sides stay below ~900 bits.
const LIMBS: usize = 40;

/// Largest power of five that fits in a `u32` limb multiplier.
const POW5_13: u32 = 1_220_703_125;

/// Unsigned big integer stored as little-endian 32-bit limbs.
///
/// Invariant: the most significant limb is never zero, so zero is the
/// empty limb vector and limb counts compare like magnitudes.
#[derive(Debug, Clone, Default)]
pub struct Bignum {
    limbs: ArrayVec<u32, LIMBS>,
}

impl Bignum {
    pub fn from_u64(value: u64) -> Self {
        let mut limbs = ArrayVec::new();
        if value != 0 {
            limbs.push(value as u32);
            if value >> 32 != 0 {
                limbs.push((value >> 32) as u32);
            }
        }
        Self { limbs }
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    /// Number of significant bits.
    pub fn bit_length(&self) -> usize {
        match self.limbs.last() {
            Some(top) => self.limbs.len() * 32 - top.leading_zeros() as usize,
            None => 0,
        }
    }

    /// Multiply in place by a non-zero 32-bit value.
    pub fn mul_small(&mut self, factor: u32) -> &mut Self {
        debug_assert!(factor != 0);
        let mut carry = 0u64;
        for limb in self.limbs.iter_mut() {
            let product = (*limb as u64) * (factor as u64) + carry;
            *limb = product as u32;
            carry = product >> 32;
        }
        if carry != 0 {
            self.limbs.push(carry as u32);
        }
        self
    }

    /// Multiply in place by `5^exponent`.
    pub fn mul_pow5(&mut self, mut exponent: u32) -> &mut Self {
        while exponent >= 13 {
            self.mul_small(POW5_13);
            exponent -= 13;
        }
        if exponent > 0 {
            self.mul_small(5u32.pow(exponent));
        }
        self
    }

    /// Multiply in place by `2^exponent`.
    pub fn mul_pow2(&mut self, exponent: u32) -> &mut Self {
        if self.is_zero() {
            return self;
        }
        let limb_shift = (exponent / 32) as usize;
        let bit_shift = exponent % 32;

        if bit_shift != 0 {
            let mut carry = 0u32;
            for limb in self.limbs.iter_mut() {
                let spill = *limb >> (32 - bit_shift);
                *limb = (*limb << bit_shift) | carry;
                carry = spill;
            }
            if carry != 0 {
                self.limbs.push(carry);
            }
        }

        if limb_shift > 0 {
            let len = self.limbs.len();
            for _ in 0..limb_shift {
                self.limbs.push(0);
            }
            self.limbs.copy_within(0..len, limb_shift);
            for limb in &mut self.limbs[..limb_shift] {
                *limb = 0;
            }
        }
        self
    }
}

impl PartialEq for Bignum {
    fn eq(&self, other: &Self) -> bool {
        self.limbs == other.limbs
    }
}

impl Eq for Bignum {}

impl PartialOrd for Bignum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bignum {
    fn cmp(&self, other: &Self) -> Ordering {
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_u128(value: &Bignum) -> u128 {
        value
            .limbs
            .iter()
            .rev()
            .fold(0u128, |acc, &limb| (acc << 32) | limb as u128)
    }

    #[test]
    fn test_from_u64() {
        assert!(Bignum::from_u64(0).is_zero());
        assert_eq!(Bignum::from_u64(7).limbs.len(), 1);
        assert_eq!(to_u128(&Bignum::from_u64(u64::MAX)), u64::MAX as u128);
        assert_eq!(Bignum::from_u64(u64::MAX).bit_length(), 64);
    }

    #[test]
    fn test_mul_small() {
        let mut x = Bignum::from_u64(u64::MAX);
        x.mul_small(10);
        assert_eq!(to_u128(&x), u64::MAX as u128 * 10);
    }

    #[test]
    fn test_mul_pow5() {
        let mut x = Bignum::from_u64(3);
        x.mul_pow5(27);
        assert_eq!(to_u128(&x), 3 * 5u128.pow(27));
    }

    #[test]
    fn test_mul_pow2() {
        let mut x = Bignum::from_u64(0x1234_5678_9abc_def0);
        x.mul_pow2(37);
        assert_eq!(to_u128(&x), 0x1234_5678_9abc_def0u128 << 37);

        let mut y = Bignum::from_u64(1);
        y.mul_pow2(64);
        assert_eq!(to_u128(&y), 1u128 << 64);
        assert_eq!(y.bit_length(), 65);

        let mut zero = Bignum::from_u64(0);
        zero.mul_pow2(100);
        assert!(zero.is_zero());
    }

    #[test]
    fn test_ordering() {
        let mut a = Bignum::from_u64(10);
        a.mul_pow5(300);
        let mut b = Bignum::from_u64(2);
        b.mul_pow5(301);
        assert_eq!(a.cmp(&b), Ordering::Equal);

        b.mul_small(3);
        assert!(a < b);
        assert!(Bignum::from_u64(0) < Bignum::from_u64(1));
    }

    #[test]
    fn test_worst_case_fits() {
        // A full 64-bit significand scaled by 5^342 and a further 2^160 still fits.
        let mut x = Bignum::from_u64(u64::MAX);
        x.mul_pow5(342).mul_pow2(160);
        assert!(x.bit_length() <= LIMBS * 32);
    }
}
