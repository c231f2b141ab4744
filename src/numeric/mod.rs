// ============================================================================
// Numeric Module
// Low-level arithmetic shared by the decode and encode paths
// ============================================================================
//
// This module provides:
// - CodecError: Error type for scanning and writing
// - BiasedFp and binary64 layout constants
// - Bignum: stack-allocated big integer for exact midpoint comparisons
// - Precomputed power tables (immutable, safe for concurrent reads)
//
// Design principles:
// - No heap allocation
// - No shared mutable state
// - Tables are generated offline and checked by unit tests

mod errors;

pub mod bignum;
pub mod float_bits;
pub mod pow5_table;
pub mod ryu_table;

pub use errors::{CodecError, CodecResult};
