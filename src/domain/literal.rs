// ============================================================================
// Numeric Literal Domain Model
// A scanned decimal literal, borrowed from the input bytes
// ============================================================================

use crate::numeric::{CodecError, CodecResult};
use rust_decimal::Decimal;

/// Largest scale `rust_decimal::Decimal` can carry.
const MAX_DECIMAL_SCALE: i32 = 28;

/// A decimal literal as produced by the scanner.
///
/// The literal's value is `±significand × 10^(-scale())`. `fraction_digits`
/// and `exponent` are bookkeeping for that scale and are not meaningful on
/// their own: a literal whose integer part overflowed the accumulator has a
/// negative `fraction_digits`.
///
/// # Example
/// ```
/// use decimal_codec::engine::scan;
///
/// let (literal, next) = scan(b"3.1234567 ", 0).unwrap();
/// assert_eq!(literal.significand, 31_234_567);
/// assert_eq!(literal.scale(), 7);
/// assert_eq!(next, 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericLiteral<'a> {
    /// Leading `-` was present
    pub negative: bool,

    /// Accumulated digits, decimal point ignored
    pub significand: u64,

    /// Raw mantissa text (digits and at most one `.`, no sign, no exponent)
    pub digits: &'a [u8],

    /// Fractional digits accumulated, minus integer digits dropped once the
    /// accumulator was full
    pub fraction_digits: i32,

    /// Explicit `e`/`E` exponent, 0 if absent
    pub exponent: i32,

    /// A non-zero digit was dropped after the accumulator filled up
    pub truncated: bool,
}

impl<'a> NumericLiteral<'a> {
    /// Net power-of-ten divisor: `fraction_digits - exponent`.
    #[inline]
    pub fn scale(&self) -> i32 {
        self.fraction_digits.saturating_sub(self.exponent)
    }

    /// Check if the literal denotes zero (of either sign).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.significand == 0
    }

    /// Exact decimal value of the literal, without passing through binary
    /// floating point.
    ///
    /// # Errors
    /// - `PrecisionLoss` if the scanner dropped non-zero digits
    /// - `Overflow` if the value needs more than 96 bits or a scale above 28
    pub fn to_decimal(&self) -> CodecResult<Decimal> {
        if self.truncated {
            return Err(CodecError::PrecisionLoss);
        }

        let mut mantissa = self.significand;
        let mut scale = self.scale();

        // Trailing zeros can absorb an otherwise unrepresentable scale
        while scale > MAX_DECIMAL_SCALE && mantissa != 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        if mantissa == 0 {
            scale = scale.clamp(0, MAX_DECIMAL_SCALE);
        }
        if scale > MAX_DECIMAL_SCALE {
            return Err(CodecError::Overflow);
        }

        let signed = if self.negative {
            -(mantissa as i128)
        } else {
            mantissa as i128
        };

        if scale >= 0 {
            Decimal::try_from_i128_with_scale(signed, scale as u32)
                .map_err(|_| CodecError::Overflow)
        } else {
            let factor = 10i128
                .checked_pow(scale.unsigned_abs())
                .ok_or(CodecError::Overflow)?;
            let scaled = signed.checked_mul(factor).ok_or(CodecError::Overflow)?;
            Decimal::try_from_i128_with_scale(scaled, 0).map_err(|_| CodecError::Overflow)
        }
    }
}
