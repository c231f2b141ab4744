// ============================================================================
// Domain Models Module
// Value types exchanged between the scanner, converter and writer
// ============================================================================

pub mod config;
pub mod decoded;
pub mod encode_buffer;
pub mod literal;

pub use config::{FormatConfig, FormatPreset};
pub use decoded::{DecodedDouble, Precision};
pub use encode_buffer::EncodeBuffer;
pub use literal::NumericLiteral;
