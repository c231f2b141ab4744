// ============================================================================
// Codec Factory
// Creates codecs with validated configuration
// ============================================================================

use crate::domain::config::{FormatConfig, FormatPreset};
use crate::engine::{Codec, StdCodec};
use crate::interfaces::{FloatFormat, FloatParser};
use tracing::debug;

// ============================================================================
// Factory Functions
// ============================================================================

/// Which implementation to instantiate behind the reader/writer traits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// Eisel-Lemire reader and Ryū writer with a preset layout
    Shortest(FormatPreset),
    /// Standard library baseline
    Std,
}

/// Creates a codec from configuration
///
/// # Arguments
/// * `config` - Layout configuration for the writer
///
/// # Returns
/// * `Result<Codec, String>` - Configured codec or validation error
///
/// # Example
/// ```
/// use decimal_codec::prelude::*;
/// use decimal_codec::engine::factory::create_from_config;
///
/// let codec = create_from_config(FormatConfig::jdk()).unwrap();
/// assert!(codec.config().always_fraction);
/// ```
pub fn create_from_config(config: FormatConfig) -> Result<Codec, String> {
    if let Err(reason) = config.validate() {
        debug!(%reason, ?config, "rejecting format configuration");
        return Err(reason);
    }
    Ok(Codec::new(config))
}

/// Creates a shortest codec for a named preset
pub fn create_codec(preset: FormatPreset) -> Codec {
    Codec::new(FormatConfig::from_preset(preset))
}

/// Creates the reader for a codec kind
pub fn create_parser(kind: CodecKind) -> Box<dyn FloatParser> {
    match kind {
        CodecKind::Shortest(preset) => Box::new(create_codec(preset)),
        CodecKind::Std => Box::new(StdCodec),
    }
}

/// Creates the writer for a codec kind
pub fn create_formatter(kind: CodecKind) -> Box<dyn FloatFormat> {
    match kind {
        CodecKind::Shortest(preset) => Box::new(create_codec(preset)),
        CodecKind::Std => Box::new(StdCodec),
    }
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating codecs with fluent API
///
/// # Example
/// ```
/// use decimal_codec::engine::factory::CodecBuilder;
///
/// let codec = CodecBuilder::new()
///     .with_plain_range(-3, 7)
///     .with_uppercase_exponent(true)
///     .build()
///     .unwrap();
///
/// let mut buffer = [0u8; 16];
/// let written = codec.write(1e7, &mut buffer, 0).unwrap();
/// assert_eq!(&buffer[..written], b"1E+7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodecBuilder {
    config: FormatConfig,
}

impl CodecBuilder {
    /// Create a new builder with the ECMAScript layout
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Layout Configuration
    // ========================================================================

    /// Set the plain-notation exponent range
    pub fn with_plain_range(mut self, min: i32, max: i32) -> Self {
        self.config = self.config.with_plain_range(min, max);
        self
    }

    /// Force a fractional part on integral values
    pub fn with_always_fraction(mut self, always: bool) -> Self {
        self.config = self.config.with_always_fraction(always);
        self
    }

    /// Choose `E` over `e`
    pub fn with_uppercase_exponent(mut self, uppercase: bool) -> Self {
        self.config = self.config.with_uppercase_exponent(uppercase);
        self
    }

    /// Write `+` before non-negative exponents
    pub fn with_exponent_plus_sign(mut self, plus: bool) -> Self {
        self.config = self.config.with_exponent_plus_sign(plus);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Start from a named preset
    pub fn from_preset(preset: FormatPreset) -> Self {
        Self {
            config: FormatConfig::from_preset(preset),
        }
    }

    /// Apply `JSON.stringify`-style configuration
    pub fn ecmascript() -> Self {
        Self::from_preset(FormatPreset::EcmaScript)
    }

    /// Apply `Double.toString`-style configuration
    pub fn jdk() -> Self {
        Self::from_preset(FormatPreset::Jdk)
    }

    /// Apply ECMAScript thresholds with an always-present fraction
    pub fn plain_json() -> Self {
        Self::from_preset(FormatPreset::PlainJson)
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the codec
    pub fn build(self) -> Result<Codec, String> {
        create_from_config(self.config)
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &FormatConfig {
        &self.config
    }
}
