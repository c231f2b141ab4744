// ============================================================================
// Decimal Codec Library
// Correctly rounded decimal text <-> IEEE-754 binary64 conversion
// ============================================================================

//! # Decimal Codec
//!
//! Fast, exact number handling for JSON-style decimal text.
//!
//! ## Features
//!
//! - **Scanner** splitting a literal into significand and scale, with
//!   eight-digit SWAR acceleration
//! - **Correctly rounded conversion** (Clinger fast path, Eisel-Lemire,
//!   exact big-integer fallback)
//! - **Shortest round-trip output** (Ryū) into caller-owned buffers, with
//!   ECMAScript, JDK and plain-JSON layouts
//! - **Exact decimal view** of scanned literals via `rust_decimal`
//! - No heap allocation and no shared mutable state on any path
//!
//! ## Example
//!
//! ```rust
//! use decimal_codec::prelude::*;
//!
//! // Scan and convert a literal embedded in a larger document
//! let input = b"[3.1234567E-7,1.0]";
//! let (literal, next) = scan(input, 1).unwrap();
//! let decoded = decode(&literal);
//! assert_eq!(decoded.value, 3.1234567e-7);
//! assert_eq!(next, 13);
//!
//! // Write it back in the shortest form
//! let mut storage = [0u8; 32];
//! let mut out = EncodeBuffer::new(&mut storage);
//! out.write_f64(decoded.value).unwrap();
//! assert_eq!(out.as_bytes(), b"3.1234567e-7");
//!
//! // Or with a different layout
//! let codec = CodecBuilder::jdk().build().unwrap();
//! let written = codec.write(31234567.0, &mut storage, 0).unwrap();
//! assert_eq!(&storage[..written], b"3.1234567E7");
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod simd;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        DecodedDouble, EncodeBuffer, FormatConfig, FormatPreset, NumericLiteral, Precision,
    };
    pub use crate::engine::{
        create_codec, create_from_config, decode, parse_f64, scan, to_double, write_shortest,
        write_shortest_with, Codec, CodecBuilder, CodecKind, StdCodec,
    };
    pub use crate::interfaces::{FloatFormat, FloatParser};
    pub use crate::numeric::{CodecError, CodecResult};
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const CORPUS: [&[u8]; 8] = [
        b"3.1234567 ",
        b"31234567 ",
        b"0.31234567 ",
        b"312.34567 ",
        b"3.1234567e7 ",
        b"3.1234567E-7 ",
        b"0 ",
        b"1.0 ",
    ];

    #[test]
    fn test_corpus_digests() {
        let codec = Codec::new(FormatConfig::plain_json());

        let mut sum = 0.0;
        let mut values = Vec::new();
        for bytes in CORPUS {
            let (value, next) = codec.parse_f64(bytes, 0).unwrap();
            assert_eq!(bytes[next], b' ');
            let text = std::str::from_utf8(&bytes[..next]).unwrap();
            assert_eq!(value, text.parse::<f64>().unwrap());
            sum += value;
            values.push(value);
        }
        assert_eq!(sum, 62469450.78147268);

        let mut storage = [0u8; 512];
        let mut total = 0;
        for &value in &values {
            let mut out = EncodeBuffer::new(&mut storage);
            total += codec.write_f64(value, &mut out).unwrap();
        }
        assert_eq!(total, 66);
    }

    #[test]
    fn test_end_to_end_round_trip() {
        let samples = [
            0.1,
            -0.0,
            1e21,
            1e-7,
            123456789.125,
            f64::MAX,
            f64::MIN_POSITIVE,
            5e-324,
            -2.2250738585072009e-308,
        ];
        for preset in [FormatPreset::EcmaScript, FormatPreset::Jdk, FormatPreset::PlainJson] {
            let codec = create_codec(preset);
            let mut storage = [0u8; 512];
            let mut out = EncodeBuffer::new(&mut storage);
            codec.write_separated(&samples, b',', &mut out).unwrap();

            let mut parsed = Vec::new();
            let text = out.as_bytes();
            // Drop the trailing separator
            codec
                .parse_separated(&text[..text.len() - 1], &mut parsed)
                .unwrap_or_else(|e| panic!("{:?}: {}", preset, e));

            let bits: Vec<u64> = parsed.iter().map(|v| v.to_bits()).collect();
            let expected: Vec<u64> = samples.iter().map(|v| v.to_bits()).collect();
            assert_eq!(bits, expected, "{:?}", preset);
        }
    }

    #[test]
    fn test_codecs_agree_on_values() {
        let shortest = create_codec(FormatPreset::EcmaScript);
        let inputs: [&[u8]; 6] = [
            b"2.2250738585072011e-308",
            b"1.7976931348623157e308",
            b"-9007199254740993",
            b"0.30000000000000004",
            b"1e-400",
            b"4.9e-324",
        ];
        for input in inputs {
            let (ours, _) = shortest.parse_f64(input, 0).unwrap();
            let (std, _) = StdCodec.parse_f64(input, 0).unwrap();
            assert_eq!(ours.to_bits(), std.to_bits());
        }
    }

    #[test]
    fn test_exact_decimal_view() {
        let (literal, _) = scan(b"312.34567 ", 0).unwrap();
        assert_eq!(
            literal.to_decimal().unwrap(),
            Decimal::from_str("312.34567").unwrap()
        );

        let (huge, _) = scan(b"1e40", 0).unwrap();
        assert_eq!(huge.to_decimal(), Err(CodecError::Overflow));
    }

    #[test]
    fn test_concurrent_use() {
        let codec = CodecBuilder::plain_json().build().unwrap();
        let inputs: Vec<f64> = (1..=2_000)
            .map(|i| (i as f64).powi(7) / 3.0_f64.powi(i % 40))
            .collect();

        let outputs: Vec<Vec<u8>> = crossbeam::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|_| {
                        let mut storage = vec![0u8; inputs.len() * 32];
                        let mut out = EncodeBuffer::new(&mut storage);
                        codec.write_separated(&inputs, b',', &mut out).unwrap();
                        let written = out.position();
                        storage.truncate(written);

                        let mut parsed = Vec::new();
                        codec
                            .parse_separated(&storage[..written - 1], &mut parsed)
                            .unwrap();
                        assert_eq!(parsed, inputs);
                        storage
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        })
        .unwrap();

        assert!(outputs.windows(2).all(|pair| pair[0] == pair[1]));
    }
}
