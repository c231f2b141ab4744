// ============================================================================
// Engine Module
// Contains the scanning, conversion and formatting logic
// ============================================================================

mod codec;
mod lemire;
mod slow_path;
mod std_codec;

pub mod converter;
pub mod factory;
pub mod ryu;
pub mod scanner;
pub mod writer;

#[cfg(test)]
mod testing;

pub use codec::Codec;
pub use converter::{decode, parse_f64, to_double};
pub use factory::{create_codec, create_from_config, CodecBuilder, CodecKind};
pub use scanner::scan;
pub use std_codec::StdCodec;
pub use writer::{write_shortest, write_shortest_with};
