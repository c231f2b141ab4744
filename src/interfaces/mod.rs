// ============================================================================
// Interfaces Module
// Contains the reader and writer trait definitions
// ============================================================================

mod float_format;
mod float_parser;

pub use float_format::FloatFormat;
pub use float_parser::FloatParser;
