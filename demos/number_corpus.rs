// ============================================================================
// Number Corpus Example
// ============================================================================
//
// Runs the eight-literal JSON number corpus through every reader and writer
// and prints the digests: the sum of parsed values and the total bytes
// written per pass.
//
// Run with `cargo run --example number_corpus --features logging` to see
// the codec's debug events.

use decimal_codec::engine::factory::{create_formatter, create_parser};
use decimal_codec::prelude::*;
use std::time::Instant;

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

const PASSES: usize = 1_000_000;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Decimal Codec Corpus ===\n");

    let kinds = [
        CodecKind::Std,
        CodecKind::Shortest(FormatPreset::EcmaScript),
        CodecKind::Shortest(FormatPreset::Jdk),
        CodecKind::Shortest(FormatPreset::PlainJson),
    ];

    // Readers
    for kind in &kinds[..2] {
        let parser = create_parser(*kind);
        let start = Instant::now();
        let mut sum = 0.0;
        for _ in 0..PASSES {
            for bytes in CORPUS {
                let (value, _) = parser.parse_f64(bytes, 0)?;
                sum += value;
            }
        }
        println!(
            "{:>10}Reader: {:15.6} ({} ms)",
            parser.name(),
            sum,
            start.elapsed().as_millis()
        );
    }

    // Writers
    let mut values = Vec::with_capacity(CORPUS.len());
    for bytes in CORPUS {
        values.push(parse_f64(bytes)?);
    }

    let mut storage = [0u8; 512];
    for kind in kinds {
        let formatter = create_formatter(kind);
        let start = Instant::now();
        let mut total = 0usize;
        for _ in 0..PASSES {
            for &value in &values {
                let mut out = EncodeBuffer::new(&mut storage);
                total += formatter.write_f64(value, &mut out)?;
            }
        }
        println!(
            "{:>10}Writer: {} ({} ms) {:?}",
            formatter.name(),
            total,
            start.elapsed().as_millis(),
            kind
        );
    }

    // One pass, shown
    println!("\nPlainJson layout:");
    let codec = CodecBuilder::plain_json().build()?;
    let mut out = EncodeBuffer::new(&mut storage);
    codec.write_separated(&values, b' ', &mut out)?;
    println!("  {}", String::from_utf8_lossy(out.as_bytes()));

    // Precision classification
    println!("\nPrecision:");
    for text in ["0.5", "0.1", "1e400", "123456789012345678901234"] {
        let (decoded, _) = codec.decode(text.as_bytes(), 0)?;
        println!("  {:>26} -> {:?} ({:?})", text, decoded.value, decoded.precision);
    }

    Ok(())
}
