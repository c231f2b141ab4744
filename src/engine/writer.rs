// ============================================================================
// Binary-to-Decimal Writer
// Shortest round-trip text for a double, into a caller-owned span
// ============================================================================
//
// Writing is two-phase: the layout (and so the exact byte count) is decided
// first, then bytes are emitted. A span that is too small is rejected
// before anything is touched.

use crate::domain::FormatConfig;
use crate::engine::ryu::{self, DecimalDigits};
use crate::numeric::{CodecError, CodecResult};
use tracing::debug;

/// Longest output in the ECMAScript layout: sign, `0.`, five zeros and 17
/// digits. Wider plain ranges need more, at most 327 bytes.
pub const MAX_DEFAULT_LEN: usize = 25;

/// `00` through `99`, two bytes per entry.
const DIGIT_PAIRS: &[u8; 200] = b"\
    0001020304050607080910111213141516171819\
    2021222324252627282930313233343536373839\
    4041424344454647484950515253545556575859\
    6061626364656667686970717273747576777879\
    8081828384858687888990919293949596979899";

/// How the digits of one value are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    /// `0`, `0.0`
    Zero,
    /// `0.000ddd`
    LeadingZeros { zeros: usize },
    /// `ddd000`, `ddd000.0`
    TrailingZeros { zeros: usize },
    /// `dd.ddd`
    Split { integer_digits: usize },
    /// `d.ddde±k`
    Exponential { exponent: i32 },
}

/// A fully decided output: sign, digits and their arrangement.
#[derive(Debug, Clone, Copy)]
struct Layout {
    negative: bool,
    digits: DecimalDigits,
    digit_count: usize,
    form: Form,
}

impl Layout {
    fn new(value: f64, config: &FormatConfig) -> Self {
        let negative = value.is_sign_negative();
        if value == 0.0 {
            return Self {
                negative,
                digits: DecimalDigits {
                    mantissa: 0,
                    exponent: 0,
                },
                digit_count: 1,
                form: Form::Zero,
            };
        }

        let digits = ryu::shortest(value.to_bits());
        let digit_count = digits.len();
        let k = digits.scientific_exponent();

        let form = if !config.is_plain(k) {
            Form::Exponential { exponent: k }
        } else if k < 0 {
            Form::LeadingZeros {
                zeros: (-k - 1) as usize,
            }
        } else if k as usize + 1 >= digit_count {
            Form::TrailingZeros {
                zeros: k as usize + 1 - digit_count,
            }
        } else {
            Form::Split {
                integer_digits: k as usize + 1,
            }
        };

        Self {
            negative,
            digits,
            digit_count,
            form,
        }
    }

    /// Exact number of bytes `write` will emit.
    fn len(&self, config: &FormatConfig) -> usize {
        let fraction_suffix = if config.always_fraction { 2 } else { 0 };
        let n = self.digit_count;
        let body = match self.form {
            Form::Zero => 1 + fraction_suffix,
            Form::LeadingZeros { zeros } => 2 + zeros + n,
            Form::TrailingZeros { zeros } => n + zeros + fraction_suffix,
            Form::Split { .. } => n + 1,
            Form::Exponential { exponent } => {
                let mantissa = if n > 1 { n + 1 } else { 1 + fraction_suffix };
                let sign = (exponent < 0 || config.exponent_plus_sign) as usize;
                mantissa + 1 + sign + ryu::decimal_length(exponent.unsigned_abs() as u64)
            },
        };
        self.negative as usize + body
    }

    /// Emit into `out`, which is exactly `self.len(config)` bytes long.
    fn write(&self, config: &FormatConfig, out: &mut [u8]) {
        let mut pos = 0;
        if self.negative {
            out[0] = b'-';
            pos = 1;
        }

        let n = self.digit_count;
        match self.form {
            Form::Zero => {
                out[pos] = b'0';
                if config.always_fraction {
                    out[pos + 1..pos + 3].copy_from_slice(b".0");
                }
            },
            Form::LeadingZeros { zeros } => {
                out[pos..pos + 2].copy_from_slice(b"0.");
                pos += 2;
                out[pos..pos + zeros].fill(b'0');
                pos += zeros;
                format_base10(&mut out[pos..pos + n], self.digits.mantissa);
            },
            Form::TrailingZeros { zeros } => {
                format_base10(&mut out[pos..pos + n], self.digits.mantissa);
                pos += n;
                out[pos..pos + zeros].fill(b'0');
                pos += zeros;
                if config.always_fraction {
                    out[pos..pos + 2].copy_from_slice(b".0");
                }
            },
            Form::Split { integer_digits } => {
                // Format one byte to the right, then pull the integer part
                // left over the gap.
                format_base10(&mut out[pos + 1..pos + 1 + n], self.digits.mantissa);
                out.copy_within(pos + 1..pos + 1 + integer_digits, pos);
                out[pos + integer_digits] = b'.';
            },
            Form::Exponential { exponent } => {
                format_base10(&mut out[pos + 1..pos + 1 + n], self.digits.mantissa);
                out[pos] = out[pos + 1];
                pos += 1;
                if n > 1 {
                    out[pos] = b'.';
                    pos += n;
                } else if config.always_fraction {
                    out[pos..pos + 2].copy_from_slice(b".0");
                    pos += 2;
                }

                out[pos] = config.exponent_marker();
                pos += 1;
                if exponent < 0 {
                    out[pos] = b'-';
                    pos += 1;
                } else if config.exponent_plus_sign {
                    out[pos] = b'+';
                    pos += 1;
                }
                let magnitude = exponent.unsigned_abs() as u64;
                let width = ryu::decimal_length(magnitude);
                format_base10(&mut out[pos..pos + width], magnitude);
            },
        }
    }
}

/// Write the decimal digits of `u` right-aligned into `a`, padding with
/// leading zeros if `a` is longer than the number.
fn format_base10(a: &mut [u8], mut u: u64) {
    let mut nd = a.len();
    while nd >= 2 {
        let pair = (u % 100) as usize * 2;
        u /= 100;
        a[nd - 2..nd].copy_from_slice(&DIGIT_PAIRS[pair..pair + 2]);
        nd -= 2;
    }
    if nd == 1 {
        a[0] = b'0' + (u % 10) as u8;
    }
}

/// Write the shortest round-trip form of `value` at `buffer[offset..]` in
/// ECMAScript layout (`JSON.stringify`).
///
/// Returns the number of bytes written.
///
/// # Errors
/// - `NonFinite` for NaN and infinities
/// - `BufferTooSmall` if the text does not fit; the buffer is unchanged
///
/// # Example
/// ```
/// use decimal_codec::engine::write_shortest;
///
/// let mut buffer = [0u8; 32];
/// let written = write_shortest(3.1234567e-7, &mut buffer, 0).unwrap();
/// assert_eq!(&buffer[..written], b"3.1234567e-7");
/// ```
pub fn write_shortest(value: f64, buffer: &mut [u8], offset: usize) -> CodecResult<usize> {
    write_shortest_with(value, &FormatConfig::ecmascript(), buffer, offset)
}

/// Write the shortest round-trip form of `value` at `buffer[offset..]`,
/// laid out per `config`.
pub fn write_shortest_with(
    value: f64,
    config: &FormatConfig,
    buffer: &mut [u8],
    offset: usize,
) -> CodecResult<usize> {
    if !value.is_finite() {
        return Err(CodecError::NonFinite);
    }

    let layout = Layout::new(value, config);
    let needed = layout.len(config);
    let available = buffer.len().saturating_sub(offset);
    if needed > available {
        debug!(needed, available, offset, "rejecting write, span too small");
        return Err(CodecError::BufferTooSmall { needed, available });
    }

    layout.write(config, &mut buffer[offset..offset + needed]);
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::parse_f64;
    use crate::engine::testing::SplitMix64;
    use proptest::prelude::*;

    fn render(value: f64, config: &FormatConfig) -> String {
        let mut buffer = [0u8; 400];
        let written = write_shortest_with(value, config, &mut buffer, 0).unwrap();
        String::from_utf8(buffer[..written].to_vec()).unwrap()
    }

    const CORPUS: [f64; 8] = [
        3.1234567,
        31234567.0,
        0.31234567,
        312.34567,
        3.1234567e7,
        3.1234567e-7,
        0.0,
        1.0,
    ];

    #[test]
    fn test_corpus_ecmascript() {
        let config = FormatConfig::ecmascript();
        let rendered: Vec<String> = CORPUS.iter().map(|&v| render(v, &config)).collect();
        assert_eq!(
            rendered,
            [
                "3.1234567",
                "31234567",
                "0.31234567",
                "312.34567",
                "31234567",
                "3.1234567e-7",
                "0",
                "1"
            ]
        );
        assert_eq!(rendered.iter().map(String::len).sum::<usize>(), 58);
    }

    #[test]
    fn test_corpus_plain_json() {
        let config = FormatConfig::plain_json();
        let rendered: Vec<String> = CORPUS.iter().map(|&v| render(v, &config)).collect();
        assert_eq!(
            rendered,
            [
                "3.1234567",
                "31234567.0",
                "0.31234567",
                "312.34567",
                "31234567.0",
                "3.1234567e-7",
                "0.0",
                "1.0"
            ]
        );
        assert_eq!(rendered.iter().map(String::len).sum::<usize>(), 66);
    }

    #[test]
    fn test_corpus_jdk() {
        let config = FormatConfig::jdk();
        let rendered: Vec<String> = CORPUS.iter().map(|&v| render(v, &config)).collect();
        assert_eq!(
            rendered,
            [
                "3.1234567",
                "3.1234567E7",
                "0.31234567",
                "312.34567",
                "3.1234567E7",
                "3.1234567E-7",
                "0.0",
                "1.0"
            ]
        );
        assert_eq!(rendered.iter().map(String::len).sum::<usize>(), 68);
    }

    #[test]
    fn test_ecmascript_thresholds() {
        let config = FormatConfig::ecmascript();
        assert_eq!(render(1e21, &config), "1e+21");
        assert_eq!(render(1e20, &config), "100000000000000000000");
        assert_eq!(render(1e-6, &config), "0.000001");
        assert_eq!(render(1e-7, &config), "1e-7");
        assert_eq!(render(1.5e300, &config), "1.5e+300");
        assert_eq!(render(5e-324, &config), "5e-324");
        assert_eq!(render(f64::MAX, &config), "1.7976931348623157e+308");
        assert_eq!(render(-0.0, &config), "-0");
        assert_eq!(render(-123.456, &config), "-123.456");
    }

    #[test]
    fn test_jdk_layout() {
        let config = FormatConfig::jdk();
        assert_eq!(render(1e-3, &config), "0.001");
        assert_eq!(render(1e-4, &config), "1.0E-4");
        assert_eq!(render(1e7, &config), "1.0E7");
        assert_eq!(render(9999999.0, &config), "9999999.0");
        assert_eq!(render(-0.0, &config), "-0.0");
        assert_eq!(render(1.0e100, &config), "1.0E100");
    }

    #[test]
    fn test_buffer_too_small_leaves_buffer_untouched() {
        let mut buffer = [b'x'; 10];
        let err = write_shortest(3.1234567e-7, &mut buffer, 0).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                needed: 12,
                available: 10
            }
        );
        assert_eq!(buffer, [b'x'; 10]);

        let err = write_shortest(1.0, &mut buffer, 11).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                needed: 1,
                available: 0
            }
        );
    }

    #[test]
    fn test_exact_fit_at_offset() {
        let mut buffer = [b'x'; 12];
        let written = write_shortest(-2.5, &mut buffer, 8).unwrap();
        assert_eq!(written, 4);
        assert_eq!(&buffer, b"xxxxxxxx-2.5");
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut buffer = [0u8; 32];
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                write_shortest(value, &mut buffer, 0),
                Err(CodecError::NonFinite)
            );
        }
    }

    #[test]
    fn test_default_length_bound() {
        let config = FormatConfig::ecmascript();
        for value in [-1.2345678901234567e-7, -1.2345678901234567e-6, -f64::MAX, -5e-324] {
            assert!(render(value, &config).len() <= MAX_DEFAULT_LEN, "{:e}", value);
        }
    }

    #[test]
    fn test_round_trip_sweep() {
        let presets = [
            FormatConfig::ecmascript(),
            FormatConfig::jdk(),
            FormatConfig::plain_json(),
        ];
        let mut rng = SplitMix64::new(0xC0DEC);
        let mut buffer = [0u8; 64];
        for i in 0..200_000 {
            let value = rng.next_finite_f64();
            let config = &presets[i % presets.len()];
            let written = write_shortest_with(value, config, &mut buffer, 0).unwrap();
            let back = parse_f64(&buffer[..written]).unwrap();
            assert_eq!(back.to_bits(), value.to_bits(), "{:?}", &buffer[..written]);
        }
    }

    #[test]
    #[ignore = "long-running sweep"]
    fn test_round_trip_sweep_ten_million() {
        let mut rng = SplitMix64::new(0x10_000_000);
        let mut buffer = [0u8; 64];
        for _ in 0..10_000_000 {
            let value = rng.next_finite_f64();
            let written = write_shortest(value, &mut buffer, 0).unwrap();
            let back = parse_f64(&buffer[..written]).unwrap();
            assert_eq!(back.to_bits(), value.to_bits());
        }
    }

    #[test]
    fn test_wide_plain_range() {
        let config = FormatConfig::ecmascript().with_plain_range(-324, 309);
        assert_eq!(render(1e22, &config), "10000000000000000000000");
        let tiny = render(5e-324, &config);
        assert_eq!(tiny.len(), 2 + 323 + 1);
        assert_eq!(parse_f64(tiny.as_bytes()).unwrap(), 5e-324);
    }

    proptest! {
        #[test]
        fn round_trip_any_finite(bits in any::<u64>()) {
            let value = f64::from_bits(bits);
            prop_assume!(value.is_finite());
            let mut buffer = [0u8; 32];
            let written = write_shortest(value, &mut buffer, 0).unwrap();
            let back = parse_f64(&buffer[..written]).unwrap();
            prop_assert_eq!(back.to_bits(), bits);
        }

        #[test]
        fn matches_std_shortest_digits(bits in any::<u64>()) {
            let value = f64::from_bits(bits);
            prop_assume!(value.is_finite());
            let config = FormatConfig::ecmascript().with_plain_range(0, 0);
            let ours = render(value, &config);
            let std = format!("{:e}", value);
            // Both use the shortest digits; only the exponent syntax differs
            let ours_mantissa = ours.split('e').next().unwrap_or("");
            let std_mantissa = std.split('e').next().unwrap_or("");
            prop_assert_eq!(ours_mantissa, std_mantissa);
        }
    }
}
