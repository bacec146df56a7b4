//! Codec configuration.
//!
//! The packed 1-bit alpha format needs a cut-off to decide which source
//! alphas become opaque. It is carried as an explicit value instead of
//! process-wide state.
//!
//! ```rust
//! use texel_core::CodecConfig;
//!
//! let config = CodecConfig::default().with_alpha_threshold(128);
//! assert_eq!(config.alpha_threshold, 128);
//! ```

/// Default 1-bit alpha cut-off (out of 255).
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 50;

/// Parameters of pixel encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// R5G5B5A1 alpha bit is set iff source alpha is strictly above this.
    pub alpha_threshold: u8,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
        }
    }
}

impl CodecConfig {
    /// Returns a copy with a different 1-bit alpha cut-off.
    #[inline]
    pub fn with_alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    /// Cut-off as a normalized value.
    #[inline]
    pub fn alpha_threshold_normalized(&self) -> f32 {
        self.alpha_threshold as f32 / 255.0
    }
}
