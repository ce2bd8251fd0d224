//! Canvas configuration.
//!
//! Every field has a default, so a host can pass an empty JSON object (or
//! nothing at all) and override only what it cares about.

use crate::animation::{DEFAULT_DURATION_MS, DEFAULT_TICK_MS, Timing};
use crate::easing::Easing;
use crate::error::ConfigError;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Minimum pointer travel, in device units, before a press becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 5.0;

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for a `Canvas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Pointer displacement (either axis) that turns a press into a drag.
    /// Default: **5.0**.
    pub drag_threshold: f64,

    /// Tick interval requested by the built-in animations. Default: **16 ms**.
    pub tick_interval_ms: u32,

    /// Length of the built-in animations when the caller has no
    /// preference. Default: **250 ms**.
    pub default_duration_ms: u32,

    /// Easing of the built-in animations when the caller has no
    /// preference. Default: **linear**.
    pub default_easing: Easing,

    /// Background colour as RGBA bytes. Default: **opaque black**.
    pub background: [u8; 4],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            tick_interval_ms: DEFAULT_TICK_MS,
            default_duration_ms: DEFAULT_DURATION_MS,
            default_easing: Easing::Linear,
            background: [0, 0, 0, 255],
        }
    }
}

impl CanvasConfig {
    /// Parse a JSON config, filling unspecified fields with defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] on malformed JSON or out-of-range values.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "drag_threshold",
                expected: "a finite, non-negative number",
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::OutOfRange {
                field: "tick_interval_ms",
                expected: "at least 1",
            });
        }
        Ok(())
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b, a] = self.background;
        Color::from_rgba8(r, g, b, a)
    }

    /// Tick interval, length and easing for the built-in animations.
    pub fn timing(&self) -> Timing {
        Timing {
            tick_interval_ms: self.tick_interval_ms,
            duration_ms: self.default_duration_ms,
            easing: self.default_easing,
        }
    }
}
