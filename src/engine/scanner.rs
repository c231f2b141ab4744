// ============================================================================
// Decimal Text Scanner
// Splits a JSON-style number literal into significand and scale
// ============================================================================
//
// Grammar: [+-]? digits* ('.' digits*)? ([eE] [+-]? digits+)?
// with at least one mantissa digit. Scanning stops at the first byte that
// cannot continue the literal, or at the end of the slice.
//
// The significand is a plain u64 accumulator. Once the next digit would
// overflow it, that digit and every later mantissa digit are dropped:
// dropped integer digits still shift the magnitude (fraction_digits is
// decremented), dropped fractional digits are simply ignored. Literals
// with more than 19 significant digits therefore decode from their leading
// 19-20 digits only.

use crate::domain::NumericLiteral;
use crate::numeric::{CodecError, CodecResult};
use crate::simd::digits::{is_eight_digits, parse_eight_digits, read_u64};

/// Magnitude at which the explicit exponent saturates.
pub const MAX_EXPONENT: i32 = 99_999;

/// Eight more digits always fit while the accumulator is below `10^11`.
const SWAR_LIMIT: u64 = 100_000_000_000;

/// Running state of the mantissa while digits are consumed.
#[derive(Debug, Default)]
struct Accumulator {
    significand: u64,
    fraction_digits: i32,
    full: bool,
    truncated: bool,
}

impl Accumulator {
    #[inline]
    fn has_room_for_eight(&self) -> bool {
        self.significand < SWAR_LIMIT
    }

    #[inline]
    fn push(&mut self, digit: u8, fractional: bool) {
        if !self.full {
            let next = self
                .significand
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit as u64));
            match next {
                Some(value) => {
                    self.significand = value;
                    if fractional {
                        self.fraction_digits = self.fraction_digits.saturating_add(1);
                    }
                    return;
                },
                None => self.full = true,
            }
        }

        if digit != 0 {
            self.truncated = true;
        }
        if !fractional {
            self.fraction_digits = self.fraction_digits.saturating_sub(1);
        }
    }

    /// Append eight digits at once. Caller checks `has_room_for_eight`.
    #[inline]
    fn push_eight(&mut self, value: u64, fractional: bool) {
        self.significand = self.significand * 100_000_000 + value;
        if fractional {
            self.fraction_digits = self.fraction_digits.saturating_add(8);
        }
    }
}

/// Consume a run of digits starting at `pos`, returning the offset of the
/// first non-digit byte.
fn consume_digits(bytes: &[u8], mut pos: usize, acc: &mut Accumulator, fractional: bool) -> usize {
    loop {
        while acc.has_room_for_eight() && pos + 8 <= bytes.len() {
            let word = read_u64(&bytes[pos..]);
            if !is_eight_digits(word) {
                break;
            }
            acc.push_eight(parse_eight_digits(word), fractional);
            pos += 8;
        }

        match bytes.get(pos) {
            Some(&b) if b.is_ascii_digit() => {
                acc.push(b - b'0', fractional);
                pos += 1;
            },
            _ => return pos,
        }
    }
}

/// Scan the exponent digits starting at `pos` (just past the marker and
/// optional sign). Returns the saturated magnitude and the next offset.
fn consume_exponent(bytes: &[u8], mut pos: usize) -> CodecResult<(i32, usize)> {
    match bytes.get(pos) {
        Some(b) if b.is_ascii_digit() => {},
        _ => return Err(CodecError::InvalidNumberLiteral { offset: pos }),
    }

    let mut magnitude = 0i32;
    while let Some(&b) = bytes.get(pos) {
        if !b.is_ascii_digit() {
            break;
        }
        if magnitude < MAX_EXPONENT {
            magnitude = (magnitude * 10 + (b - b'0') as i32).min(MAX_EXPONENT);
        }
        pos += 1;
    }
    Ok((magnitude, pos))
}

/// Scan one number literal from `bytes` beginning at `start`.
///
/// Returns the literal and the offset of the first byte after it.
///
/// # Errors
/// `InvalidNumberLiteral` when `start` is out of bounds, when the literal
/// has no mantissa digits, or when an exponent marker is not followed by
/// at least one digit.
///
/// # Example
/// ```
/// use decimal_codec::engine::scan;
///
/// let (literal, next) = scan(b"[-1.5e3,", 1).unwrap();
/// assert!(literal.negative);
/// assert_eq!(literal.significand, 15);
/// assert_eq!(literal.scale(), -2);
/// assert_eq!(next, 7);
/// ```
pub fn scan(bytes: &[u8], start: usize) -> CodecResult<(NumericLiteral<'_>, usize)> {
    let mut pos = start;
    let negative = match bytes.get(pos) {
        None => return Err(CodecError::InvalidNumberLiteral { offset: start }),
        Some(b'-') => {
            pos += 1;
            true
        },
        Some(b'+') => {
            pos += 1;
            false
        },
        Some(_) => false,
    };

    let mantissa_start = pos;
    let mut acc = Accumulator::default();

    pos = consume_digits(bytes, pos, &mut acc, false);
    let mut digit_count = pos - mantissa_start;

    if bytes.get(pos) == Some(&b'.') {
        let fraction_start = pos + 1;
        pos = consume_digits(bytes, fraction_start, &mut acc, true);
        digit_count += pos - fraction_start;
    }

    if digit_count == 0 {
        return Err(CodecError::InvalidNumberLiteral { offset: start });
    }
    let digits = &bytes[mantissa_start..pos];

    let mut exponent = 0;
    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        let negative_exponent = match bytes.get(pos) {
            Some(b'-') => {
                pos += 1;
                true
            },
            Some(b'+') => {
                pos += 1;
                false
            },
            _ => false,
        };
        let (magnitude, next) = consume_exponent(bytes, pos)?;
        exponent = if negative_exponent { -magnitude } else { magnitude };
        pos = next;
    }

    let literal = NumericLiteral {
        negative,
        significand: acc.significand,
        digits,
        fraction_digits: acc.fraction_digits,
        exponent,
        truncated: acc.truncated,
    };
    Ok((literal, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(text: &str) -> NumericLiteral<'_> {
        let (literal, next) = scan(text.as_bytes(), 0).unwrap();
        assert_eq!(next, text.len(), "literal {:?} not fully consumed", text);
        literal
    }

    #[test]
    fn test_corpus_literals() {
        let cases = [
            ("3.1234567", 31_234_567, 7),
            ("31234567", 31_234_567, 0),
            ("0.31234567", 31_234_567, 8),
            ("312.34567", 31_234_567, 5),
            ("3.1234567e7", 31_234_567, 0),
            ("3.1234567E-7", 31_234_567, 14),
            ("0", 0, 0),
            ("1.0", 10, 1),
        ];
        for (text, significand, scale) in cases {
            let literal = scan_all(text);
            assert_eq!(literal.significand, significand, "{}", text);
            assert_eq!(literal.scale(), scale, "{}", text);
            assert!(!literal.negative);
            assert!(!literal.truncated);
        }
    }

    #[test]
    fn test_stops_at_terminator() {
        let input = b"[12.5,-7e+2]";
        let (first, next) = scan(input, 1).unwrap();
        assert_eq!(first.significand, 125);
        assert_eq!(first.digits, b"12.5");
        assert_eq!(next, 5);

        let (second, next) = scan(input, 6).unwrap();
        assert!(second.negative);
        assert_eq!(second.significand, 7);
        assert_eq!(second.exponent, 2);
        assert_eq!(second.scale(), -2);
        assert_eq!(next, 11);
    }

    #[test]
    fn test_leading_plus_and_bare_dot_forms() {
        let plus = scan_all("+.5");
        assert!(!plus.negative);
        assert_eq!(plus.significand, 5);
        assert_eq!(plus.scale(), 1);

        let trailing = scan_all("7.");
        assert_eq!(trailing.significand, 7);
        assert_eq!(trailing.scale(), 0);
    }

    #[test]
    fn test_swar_and_bytewise_agree() {
        let text = "1234567890123456.78901";
        let literal = scan_all(text);
        assert_eq!(literal.significand, 12_345_678_901_234_567_890);
        assert_eq!(literal.fraction_digits, 4);
        assert!(literal.truncated);

        let long_fraction = scan_all("0.000000000000000000001");
        assert_eq!(long_fraction.significand, 1);
        assert_eq!(long_fraction.scale(), 21);
    }

    #[test]
    fn test_accumulator_overflow_keeps_magnitude() {
        // 25 integer digits: accumulation stops at 20 digits
        let literal = scan_all("1844674407370955161500000");
        assert_eq!(literal.significand, 18_446_744_073_709_551_615);
        assert_eq!(literal.scale(), -5);
        assert!(!literal.truncated);

        let dropped = scan_all("18446744073709551616");
        assert_eq!(dropped.significand, 1_844_674_407_370_955_161);
        assert_eq!(dropped.scale(), -1);
        assert!(dropped.truncated);
    }

    #[test]
    fn test_exponent_saturates() {
        let big = scan_all("1e123456789");
        assert_eq!(big.exponent, MAX_EXPONENT);

        let small = scan_all("1e-123456789");
        assert_eq!(small.exponent, -MAX_EXPONENT);
    }

    #[test]
    fn test_invalid_literals() {
        let cases: [(&[u8], usize, usize); 7] = [
            (b"", 0, 0),
            (b"1", 1, 1),
            (b"-", 0, 0),
            (b".", 0, 0),
            (b"-x", 0, 0),
            (b"1e", 0, 2),
            (b"1e+,", 0, 3),
        ];
        for (input, start, offset) in cases {
            assert_eq!(
                scan(input, start),
                Err(CodecError::InvalidNumberLiteral { offset }),
                "{:?}",
                std::str::from_utf8(input)
            );
        }
    }

    #[test]
    fn test_negative_zero() {
        let literal = scan_all("-0.000");
        assert!(literal.negative);
        assert!(literal.is_zero());
        assert_eq!(literal.scale(), 3);
    }
}
