//! Mascot configuration
//!
//! Configuration is parsed from TOML text; reading the file (and applying
//! environment overrides) is the host surface's job, the core never touches
//! the filesystem.
//!
//! # Example Configuration
//!
//! ```toml
//! [timing]
//! cover_cycle_ms = 3200
//! eye_blink_ms = 4000
//!
//! [defaults]
//! size = "md"
//! floating = false
//! accent = "emerald"
//!
//! [surface]
//! fps = 24
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mascot::{AccentTone, MascotSize};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Sections
// =============================================================================

/// Cycle durations for every named animation, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Whole-robot breathing pulse
    pub breathe_ms: u64,
    /// Outer float wrapper
    pub soft_float_ms: u64,
    /// Idle head float
    pub head_float_ms: u64,
    /// Happy head wobble
    pub head_happy_ms: u64,
    /// Sad head tilt
    pub head_sad_ms: u64,
    /// Eye glow pulse
    pub eye_glow_ms: u64,
    /// Blink cycle while uncovered
    pub eye_blink_ms: u64,
    /// Shared cycle of the covering hands and covered eyes
    pub cover_cycle_ms: u64,
    /// Chest panel glow
    pub chest_glow_ms: u64,
    /// Body sway
    pub body_sway_ms: u64,
    /// Leg bounce
    pub leg_bounce_ms: u64,
    /// Delay of the right leg relative to the left
    pub leg_phase_offset_ms: u64,
    /// Resting arm swing
    pub arm_swing_ms: u64,
    /// Happy wave
    pub arm_wave_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            breathe_ms: 3000,
            soft_float_ms: 6000,
            head_float_ms: 4000,
            head_happy_ms: 600,
            head_sad_ms: 3000,
            eye_glow_ms: 2000,
            eye_blink_ms: 5000,
            cover_cycle_ms: 4000,
            chest_glow_ms: 2000,
            body_sway_ms: 5000,
            leg_bounce_ms: 2800,
            leg_phase_offset_ms: 250,
            arm_swing_ms: 5000,
            arm_wave_ms: 800,
        }
    }
}

impl TimingConfig {
    fn cycles(&self) -> [(&'static str, u64); 13] {
        [
            ("breathe_ms", self.breathe_ms),
            ("soft_float_ms", self.soft_float_ms),
            ("head_float_ms", self.head_float_ms),
            ("head_happy_ms", self.head_happy_ms),
            ("head_sad_ms", self.head_sad_ms),
            ("eye_glow_ms", self.eye_glow_ms),
            ("eye_blink_ms", self.eye_blink_ms),
            ("cover_cycle_ms", self.cover_cycle_ms),
            ("chest_glow_ms", self.chest_glow_ms),
            ("body_sway_ms", self.body_sway_ms),
            ("leg_bounce_ms", self.leg_bounce_ms),
            ("arm_swing_ms", self.arm_swing_ms),
            ("arm_wave_ms", self.arm_wave_ms),
        ]
    }
}

/// Defaults applied to newly created instances
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Default size
    pub size: MascotSize,
    /// Whether the float wrapper is on
    pub floating: bool,
    /// Default accent tone
    pub accent: AccentTone,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            size: MascotSize::Lg,
            floating: true,
            accent: AccentTone::Primary,
        }
    }
}

/// Host surface settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Target frames per second
    pub fps: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self { fps: 30 }
    }
}

/// Top-level configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MascotConfig {
    /// Animation cycle durations
    pub timing: TimingConfig,
    /// Instance defaults
    pub defaults: DefaultsConfig,
    /// Host surface settings
    pub surface: SurfaceConfig,
}

impl MascotConfig {
    /// Parse and validate TOML text; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`] for malformed TOML and
    /// [`ConfigError::ValidationError`] for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some((key, _)) = self.timing.cycles().into_iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::ValidationError(format!(
                "timing.{key} must be greater than zero"
            )));
        }

        if self.timing.leg_phase_offset_ms >= self.timing.leg_bounce_ms {
            return Err(ConfigError::ValidationError(format!(
                "timing.leg_phase_offset_ms ({}) must be shorter than timing.leg_bounce_ms ({})",
                self.timing.leg_phase_offset_ms, self.timing.leg_bounce_ms
            )));
        }

        if !(1..=120).contains(&self.surface.fps) {
            return Err(ConfigError::ValidationError(format!(
                "surface.fps must be between 1 and 120, got {}",
                self.surface.fps
            )));
        }

        Ok(())
    }
}
