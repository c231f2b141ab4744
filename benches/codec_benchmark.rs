// ============================================================================
// Decimal Codec Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Reader - Corpus literals through each FloatParser
// 2. Writer - Corpus values through each FloatFormat
// 3. Converter - Fast path, Eisel-Lemire and exact fallback in isolation
// 4. Round trip - Random bit patterns written then read back
//
// The corpus is the eight literals of the classic JSON number benchmark;
// each iteration processes all eight.
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use decimal_codec::engine::factory::{create_formatter, create_parser};
use decimal_codec::prelude::*;
use std::hint::black_box;

const CORPUS_BYTES: [&[u8]; 8] = [
    b"3.1234567 ",
    b"31234567 ",
    b"0.31234567 ",
    b"312.34567 ",
    b"3.1234567e7 ",
    b"3.1234567E-7 ",
    b"0 ",
    b"1.0 ",
];

const CORPUS_VALUES: [f64; 8] = [
    3.1234567,
    31234567.0,
    0.31234567,
    312.34567,
    3.1234567e7,
    3.1234567e-7,
    0.0,
    1.0,
];

fn kinds() -> [CodecKind; 4] {
    [
        CodecKind::Std,
        CodecKind::Shortest(FormatPreset::EcmaScript),
        CodecKind::Shortest(FormatPreset::Jdk),
        CodecKind::Shortest(FormatPreset::PlainJson),
    ]
}

fn label(kind: CodecKind) -> String {
    match kind {
        CodecKind::Std => "Std".to_string(),
        CodecKind::Shortest(preset) => format!("{:?}", preset),
    }
}

// ============================================================================
// Reader Benchmarks
// ============================================================================

fn benchmark_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("reader");
    group.throughput(Throughput::Elements(CORPUS_BYTES.len() as u64));

    for kind in [CodecKind::Std, CodecKind::Shortest(FormatPreset::EcmaScript)] {
        let parser = create_parser(kind);
        group.bench_function(BenchmarkId::new("corpus", parser.name()), |b| {
            b.iter(|| {
                let mut sum = 0.0;
                for bytes in CORPUS_BYTES {
                    if let Ok((value, _)) = parser.parse_f64(black_box(bytes), 0) {
                        sum += value;
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// ============================================================================
// Writer Benchmarks
// ============================================================================

fn benchmark_writer(c: &mut Criterion) {
    let mut group = c.benchmark_group("writer");
    group.throughput(Throughput::Elements(CORPUS_VALUES.len() as u64));

    for kind in kinds() {
        let formatter = create_formatter(kind);
        let mut storage = [0u8; 512];
        group.bench_function(BenchmarkId::new("corpus", label(kind)), |b| {
            b.iter(|| {
                let mut total = 0;
                for value in CORPUS_VALUES {
                    let mut out = EncodeBuffer::new(&mut storage);
                    if let Ok(written) = formatter.write_f64(black_box(value), &mut out) {
                        total += written;
                    }
                }
                black_box(total)
            });
        });
    }

    group.finish();
}

// ============================================================================
// Converter Benchmarks
// ============================================================================

fn benchmark_converter(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_double");

    let cases: [(&str, u64, i32); 4] = [
        ("fast_path", 31_234_567, 7),
        ("lemire", 17_976_931_348_623_157, -292),
        ("subnormal", 49_406_564_584_124_654, 340),
        ("exact_fallback", 24_703_282_292_062_327, 340),
    ];

    for (name, significand, scale) in cases {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &(significand, scale),
            |b, &(significand, scale)| {
                b.iter(|| black_box(to_double(black_box(significand), black_box(scale))));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Round Trip Benchmarks
// ============================================================================

fn benchmark_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("round_trip");

    // Fixed pseudo-random finite doubles
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    let values: Vec<f64> = std::iter::from_fn(|| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        Some(f64::from_bits(state))
    })
    .filter(|v| v.is_finite())
    .take(1024)
    .collect();

    group.throughput(Throughput::Elements(values.len() as u64));
    group.bench_function("shortest", |b| {
        let mut buffer = [0u8; 32];
        b.iter(|| {
            let mut sum = 0.0;
            for &value in &values {
                if let Ok(written) = write_shortest(value, &mut buffer, 0) {
                    if let Ok(back) = parse_f64(&buffer[..written]) {
                        sum += back;
                    }
                }
            }
            black_box(sum)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_reader,
    benchmark_writer,
    benchmark_converter,
    benchmark_round_trip
);
criterion_main!(benches);
