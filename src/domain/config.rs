// ============================================================================
// Format Configuration
// Notation and layout policy for the shortest-form writer
// ============================================================================

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest `plain_min_exponent` accepted by `validate`.
pub const MIN_PLAIN_EXPONENT: i32 = -324;

/// Highest `plain_max_exponent` accepted by `validate`.
pub const MAX_PLAIN_EXPONENT: i32 = 309;

// ============================================================================
// Format Preset
// ============================================================================

/// Named layout conventions used by common JSON writers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FormatPreset {
    /// `JSON.stringify` layout
    /// - Plain for 1e-6 <= |x| < 1e21
    /// - No forced fraction: `1`, `0`, `31234567`
    /// - Exponent written as `e+21`, `e-7`
    #[default]
    EcmaScript,

    /// `Double.toString` layout
    /// - Plain for 1e-3 <= |x| < 1e7
    /// - Always a fraction: `1.0`, `0.0`, `1.0E10`
    /// - Exponent written as `E7`, `E-7`
    Jdk,

    /// ECMAScript thresholds with an always-present fraction
    /// - `31234567.0`, `3.1234567e-7`, `0.0`, `1.0`
    PlainJson,
}

// ============================================================================
// Format Configuration
// ============================================================================

/// Layout policy for writing a double.
///
/// Digit selection is fixed (shortest round-trip); the configuration only
/// decides how those digits are laid out. With `k` the decimal exponent in
/// scientific form (`d.ddd × 10^k`), plain notation is used iff
/// `plain_min_exponent <= k < plain_max_exponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormatConfig {
    /// Smallest scientific exponent written in plain notation (inclusive)
    pub plain_min_exponent: i32,

    /// Scientific exponent from which exponential notation is used (exclusive
    /// bound of the plain range)
    pub plain_max_exponent: i32,

    /// Write a fractional part even for integral values (`1.0`, `0.0`,
    /// `1.0e21`)
    pub always_fraction: bool,

    /// Use `E` instead of `e`
    pub uppercase_exponent: bool,

    /// Write `+` before non-negative exponents
    pub exponent_plus_sign: bool,
}

impl FormatConfig {
    /// Create a configuration from explicit values
    pub fn new(
        plain_min_exponent: i32,
        plain_max_exponent: i32,
        always_fraction: bool,
    ) -> Self {
        Self {
            plain_min_exponent,
            plain_max_exponent,
            always_fraction,
            uppercase_exponent: false,
            exponent_plus_sign: false,
        }
    }

    /// Builder method: Set the plain-notation exponent range
    pub fn with_plain_range(mut self, min: i32, max: i32) -> Self {
        self.plain_min_exponent = min;
        self.plain_max_exponent = max;
        self
    }

    /// Builder method: Force a fractional part on integral values
    pub fn with_always_fraction(mut self, always: bool) -> Self {
        self.always_fraction = always;
        self
    }

    /// Builder method: Choose `E` over `e`
    pub fn with_uppercase_exponent(mut self, uppercase: bool) -> Self {
        self.uppercase_exponent = uppercase;
        self
    }

    /// Builder method: Write `+` before non-negative exponents
    pub fn with_exponent_plus_sign(mut self, plus: bool) -> Self {
        self.exponent_plus_sign = plus;
        self
    }

    /// Whether a value with scientific exponent `k` is written plainly
    #[inline]
    pub fn is_plain(&self, k: i32) -> bool {
        self.plain_min_exponent <= k && k < self.plain_max_exponent
    }

    /// Exponent marker byte
    #[inline]
    pub fn exponent_marker(&self) -> u8 {
        if self.uppercase_exponent {
            b'E'
        } else {
            b'e'
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.plain_min_exponent > self.plain_max_exponent {
            return Err("Plain range minimum cannot exceed its maximum".to_string());
        }

        if self.plain_min_exponent < MIN_PLAIN_EXPONENT {
            return Err(format!(
                "Plain range minimum must be at least {}",
                MIN_PLAIN_EXPONENT
            ));
        }

        if self.plain_max_exponent > MAX_PLAIN_EXPONENT {
            return Err(format!(
                "Plain range maximum must be at most {}",
                MAX_PLAIN_EXPONENT
            ));
        }

        Ok(())
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::ecmascript()
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl FormatConfig {
    /// `JSON.stringify`-style configuration
    pub fn ecmascript() -> Self {
        Self::new(-6, 21, false).with_exponent_plus_sign(true)
    }

    /// `Double.toString`-style configuration
    pub fn jdk() -> Self {
        Self::new(-3, 7, true).with_uppercase_exponent(true)
    }

    /// ECMAScript thresholds, fraction always written
    pub fn plain_json() -> Self {
        Self::new(-6, 21, true)
    }

    /// Configuration for a named preset
    pub fn from_preset(preset: FormatPreset) -> Self {
        match preset {
            FormatPreset::EcmaScript => Self::ecmascript(),
            FormatPreset::Jdk => Self::jdk(),
            FormatPreset::PlainJson => Self::plain_json(),
        }
    }
}

#[cfg(feature = "serde")]
impl FormatConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON
    pub fn to_json_string(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| e.to_string())
    }
}
