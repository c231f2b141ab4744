// ============================================================================
// Scientific-to-Binary Converter
// Correctly rounded significand × 10^(-scale) to binary64
// ============================================================================
//
// Three tiers, cheapest first:
// 1. Clinger fast path: both operands exact in binary64, one IEEE operation.
// 2. Eisel-Lemire with 128-bit powers of five.
// 3. Big-integer midpoint comparison, seeded by tier 2.
//
// The converter never fails. Out-of-range magnitudes saturate to infinity
// or flush to zero; the caller sees this through `Precision`.

use crate::domain::{DecodedDouble, NumericLiteral, Precision};
use crate::engine::{lemire, scanner, slow_path};
use crate::numeric::float_bits::{
    pow10_fast_path, MAX_EXPONENT_FAST_PATH, MAX_MANTISSA_FAST_PATH, MIN_EXPONENT_FAST_PATH,
};
use crate::numeric::CodecResult;
use tracing::trace;

/// Largest `k` with `5^k < 2^64`.
const MAX_POW5_IN_U64: u32 = 27;

/// Convert `significand × 10^(-scale)` to the nearest double, ties to even.
///
/// The result is always non-negative; apply the sign afterwards so that a
/// negative zero survives.
///
/// # Example
/// ```
/// use decimal_codec::engine::to_double;
///
/// assert_eq!(to_double(31_234_567, 7), 3.1234567);
/// assert_eq!(to_double(1, -400), f64::INFINITY);
/// assert_eq!(to_double(1, 400), 0.0);
/// ```
pub fn to_double(significand: u64, scale: i32) -> f64 {
    if significand == 0 {
        return 0.0;
    }
    let q = -(scale as i64);

    if let Some(value) = fast_path(significand, q) {
        return value;
    }

    let approx = lemire::compute_float(q, significand);
    if approx.conclusive {
        return approx.fp.to_f64();
    }

    trace!(significand, q, "128-bit product inconclusive, using exact comparison");
    f64::from_bits(slow_path::round_exact(q, significand, approx.fp.to_bits()))
}

/// Clinger's fast path: `w` and `10^|q|` are both exact doubles, so a single
/// correctly rounded multiply or divide gives the answer.
#[inline]
fn fast_path(w: u64, q: i64) -> Option<f64> {
    if w > MAX_MANTISSA_FAST_PATH || !(MIN_EXPONENT_FAST_PATH..=MAX_EXPONENT_FAST_PATH).contains(&q)
    {
        return None;
    }
    let value = w as f64;
    if q < 0 {
        Some(value / pow10_fast_path((-q) as usize))
    } else {
        Some(value * pow10_fast_path(q as usize))
    }
}

/// Convert a scanned literal, applying its sign last and classifying how
/// the result relates to the literal's exact value.
pub fn decode(literal: &NumericLiteral<'_>) -> DecodedDouble {
    let magnitude = to_double(literal.significand, literal.scale());
    let precision = classify(literal, magnitude);
    let value = if literal.negative { -magnitude } else { magnitude };
    DecodedDouble::new(value, precision)
}

/// Scan a literal at the start of `bytes` and decode it. Bytes after the
/// literal are ignored.
///
/// # Example
/// ```
/// use decimal_codec::engine::parse_f64;
///
/// assert_eq!(parse_f64(b"-0").unwrap().to_bits(), (-0.0f64).to_bits());
/// assert_eq!(parse_f64(b"3.1234567E-7]").unwrap(), 3.1234567e-7);
/// ```
pub fn parse_f64(bytes: &[u8]) -> CodecResult<f64> {
    let (literal, _) = scanner::scan(bytes, 0)?;
    Ok(decode(&literal).value)
}

fn classify(literal: &NumericLiteral<'_>, magnitude: f64) -> Precision {
    if magnitude.is_infinite() {
        Precision::OverflowToInfinity
    } else if literal.truncated {
        Precision::Rounded
    } else if literal.significand == 0
        || is_exactly_representable(literal.significand, -(literal.scale() as i64))
    {
        Precision::Exact
    } else {
        Precision::Rounded
    }
}

/// Is `w × 10^q` (w non-zero, finite result) exactly a double?
///
/// The value is `odd × 2^n` for some odd integer `odd`; it is representable
/// iff `odd` fits in 53 bits. Exponent range is not a concern here: any
/// input passing these checks lies far inside the normal range.
fn is_exactly_representable(w: u64, q: i64) -> bool {
    let odd_w = w >> w.trailing_zeros();
    if q >= 0 {
        if q > MAX_EXPONENT_FAST_PATH {
            return false;
        }
        let odd = odd_w as u128 * 5u128.pow(q as u32);
        odd < (MAX_MANTISSA_FAST_PATH as u128)
    } else {
        let k = -q;
        if k > MAX_POW5_IN_U64 as i64 {
            return false;
        }
        let pow5 = 5u64.pow(k as u32);
        odd_w % pow5 == 0 && odd_w / pow5 < MAX_MANTISSA_FAST_PATH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scan;
    use crate::engine::testing::SplitMix64;
    use proptest::prelude::*;

    fn decode_str(text: &str) -> DecodedDouble {
        let (literal, _) = scan(text.as_bytes(), 0).unwrap();
        decode(&literal)
    }

    #[test]
    fn test_corpus_matches_std() {
        let corpus = [
            "3.1234567",
            "31234567",
            "0.31234567",
            "312.34567",
            "3.1234567e7",
            "3.1234567E-7",
            "0",
            "1.0",
        ];
        for text in corpus {
            let expected: f64 = text.parse().unwrap();
            assert_eq!(decode_str(text).to_bits(), expected.to_bits(), "{}", text);
        }
    }

    #[test]
    fn test_sign_applied_last() {
        let negative_zero = decode_str("-0.0e5");
        assert_eq!(negative_zero.to_bits(), (-0.0f64).to_bits());
        assert!(negative_zero.is_exact());

        let underflow = decode_str("-1e-400");
        assert_eq!(underflow.to_bits(), (-0.0f64).to_bits());
        assert_eq!(underflow.precision, Precision::Rounded);

        let overflow = decode_str("-1e400");
        assert_eq!(overflow.value, f64::NEG_INFINITY);
        assert!(overflow.overflowed());
    }

    #[test]
    fn test_precision_classification() {
        assert!(decode_str("0.5").is_exact());
        assert!(decode_str("1e22").is_exact());
        assert!(decode_str("9007199254740992").is_exact());
        assert!(decode_str("4.76837158203125e-7").is_exact());
        assert!(decode_str("1.00000000000000000000000").is_exact());

        let rounded = [
            "0.1",
            "1e23",
            "9007199254740993",
            "0.000000000000000000000000001220703125",
            "123456789012345678901234",
            "12345678901234567890000",
            "1.7976931348623157e308",
        ];
        for text in rounded {
            assert_eq!(decode_str(text).precision, Precision::Rounded, "{}", text);
        }

        assert!(decode_str("1.7976931348623159e308").overflowed());
    }

    #[test]
    fn test_boundary_cases() {
        // Halfway and near-halfway inputs at the edges of the range
        let cases = [
            "2.4703282292062327e-324",
            "2.4703282292062328e-324",
            "7.4109846876186982e-323",
            "9007199254740993e-340",
            "2.2250738585072011e-308",
            "8.988465674311579e307",
            "9007199254740993e3",
        ];
        for text in cases {
            let expected: f64 = text.parse().unwrap();
            assert_eq!(decode_str(text).to_bits(), expected.to_bits(), "{}", text);
        }
    }

    #[test]
    fn test_fast_path_bounds() {
        assert_eq!(fast_path(1 << 53, 22), Some(9_007_199_254_740_992.0 * 1e22));
        assert_eq!(fast_path((1 << 53) + 1, 0), None);
        assert_eq!(fast_path(1, 23), None);
        assert_eq!(fast_path(1, -23), None);
    }

    #[test]
    fn test_random_literals_match_std() {
        let mut rng = SplitMix64::new(0x5EED);
        for _ in 0..50_000 {
            let digits = rng.next_in(1, 19) as u32;
            let w = rng.next_u64() % 10u64.pow(digits);
            let q = rng.next_in(-360, 330);
            let text = format!("{}e{}", w, q);
            let expected: f64 = text.parse().unwrap();
            assert_eq!(
                parse_f64(text.as_bytes()).unwrap().to_bits(),
                expected.to_bits(),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_random_plain_literals_match_std() {
        let mut rng = SplitMix64::new(0xD1617);
        for _ in 0..20_000 {
            let integer = rng.next_u64() % 1_000_000_000;
            let fraction = rng.next_u64() % 10_000_000_000;
            let text = format!("{}.{:010}", integer, fraction);
            let expected: f64 = text.parse().unwrap();
            assert_eq!(parse_f64(text.as_bytes()).unwrap(), expected, "{}", text);
        }
    }

    proptest! {
        #[test]
        fn decode_agrees_with_std(w in any::<u64>(), q in -360i32..330) {
            // Every u64 fits the accumulator, so nothing is truncated
            let text = format!("{}e{}", w, q);
            let expected: f64 = text.parse().unwrap();
            prop_assert_eq!(parse_f64(text.as_bytes()).unwrap().to_bits(), expected.to_bits());
        }

        #[test]
        fn integer_exactness_matches_arithmetic(w in 1u64..(1 << 53), q in 0i64..=22) {
            let exact = w as u128 * 10u128.pow(q as u32);
            let value = to_double(w, -(q as i32));
            prop_assert_eq!(is_exactly_representable(w, q), value as u128 == exact);
        }
    }
}
