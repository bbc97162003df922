//! Frame Timing Abstraction
//!
//! Easing curves and the per-instance animation clock. The clock is advanced
//! by the host surface; nothing in here reads wall-clock time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Easing functions for keyframe segments
///
/// The named curves match the CSS timing keywords so that timelines keep
/// the feel of the original stylesheet on every surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EasingFunction {
    /// No easing (constant speed)
    #[default]
    Linear,
    /// CSS `ease`
    Ease,
    /// CSS `ease-in`
    EaseIn,
    /// CSS `ease-out`
    EaseOut,
    /// CSS `ease-in-out`
    EaseInOut,
    /// `cubic-bezier(0.4, 0, 0.2, 1)`, used by the blink cycle
    Standard,
}

impl EasingFunction {
    /// Control points of the equivalent cubic bezier
    #[must_use]
    pub const fn control_points(self) -> (f32, f32, f32, f32) {
        match self {
            Self::Linear => (0.0, 0.0, 1.0, 1.0),
            Self::Ease => (0.25, 0.1, 0.25, 1.0),
            Self::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Self::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Self::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Self::Standard => (0.4, 0.0, 0.2, 1.0),
        }
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if self == Self::Linear {
            return t;
        }
        let (x1, y1, x2, y2) = self.control_points();
        cubic_bezier(x1, y1, x2, y2, t)
    }
}

fn bezier_axis(p1: f32, p2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

/// Solve x(s) = t by bisection, then evaluate y(s)
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    let mut s = t;
    for _ in 0..24 {
        let x = bezier_axis(x1, x2, s);
        if (x - t).abs() < 1e-5 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_axis(y1, y2, s)
}

/// Per-instance animation clock
///
/// Every layer of one mascot samples its timeline from the same clock, so
/// resetting it restarts all looping animations together at phase 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationClock {
    elapsed: Duration,
    resets: u64,
}

impl AnimationClock {
    /// A clock at phase 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one host frame
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Restart at phase 0
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.resets += 1;
    }

    /// Time since the last reset
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of resets since creation
    #[must_use]
    pub fn resets(&self) -> u64 {
        self.resets
    }
}

/// Phase (0.0 to 1.0) of an infinitely looping cycle
///
/// Returns `None` while the start delay has not yet elapsed.
#[must_use]
pub fn cycle_phase(elapsed: Duration, duration: Duration, delay: Duration) -> Option<f32> {
    let active = elapsed.checked_sub(delay)?;
    if duration.is_zero() {
        return Some(0.0);
    }
    let cycle = duration.as_nanos();
    let within = active.as_nanos() % cycle;
    #[allow(clippy::cast_precision_loss)]
    let phase = within as f64 / cycle as f64;
    #[allow(clippy::cast_possible_truncation)]
    Some(phase as f32)
}
