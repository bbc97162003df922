//! Animation System - Surface-Agnostic Animation Abstractions
//!
//! The composition describes WHAT each layer plays; surfaces decide HOW to
//! draw it. A terminal surface samples poses from the clock every frame, a
//! stylesheet surface can emit the same keyframes as CSS.
//!
//! ```text
//! Mascot (owns AnimationClock)
//!     │
//!     ├─→ Composition: layer → [AnimationBinding]
//!     │
//!     └─→ Timelines: AnimationName → keyframes + configured duration
//! ```

mod keyframes;
mod timing;

pub use keyframes::{
    AnimationName, Keyframe, Pose, Timeline, Timelines, EYE_SHUT, HAND_REST_DROP,
};
pub use timing::{cycle_phase, AnimationClock, EasingFunction};

use std::time::Duration;

use serde::Serialize;

/// A looping animation attached to one layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct AnimationBinding {
    /// Which animation plays
    pub animation: AnimationName,
    /// Start delay relative to phase 0
    pub delay: Duration,
}

impl AnimationBinding {
    /// Binding that starts at phase 0
    #[must_use]
    pub const fn new(animation: AnimationName) -> Self {
        Self {
            animation,
            delay: Duration::ZERO,
        }
    }

    /// Binding that starts after `delay`
    #[must_use]
    pub const fn delayed(animation: AnimationName, delay: Duration) -> Self {
        Self { animation, delay }
    }
}

/// Combined pose of several bindings at one instant
#[must_use]
pub fn sample_bindings(
    timelines: &Timelines,
    bindings: &[AnimationBinding],
    elapsed: Duration,
) -> Pose {
    bindings.iter().fold(Pose::IDENTITY, |pose, binding| {
        pose.overlay(timelines.get(binding.animation).sample(elapsed, binding.delay))
    })
}
