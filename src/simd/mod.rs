// ============================================================================
// SIMD Optimizations Module
// Register-level digit parsing for the scanner
//
// Eight ASCII digits are validated and converted inside one u64, which is
// portable across x86_64, aarch64 and every other target.
// ============================================================================

pub mod digits;

pub use digits::{is_eight_digits, parse_eight_digits};
