//! Keyframe tables for every named mascot animation
//!
//! Each animation is a fixed list of percentage offsets within one cycle.
//! Cycle durations come from [`TimingConfig`]; offsets never do, so phase
//! boundaries stay the same whatever the configured speed.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::timing::{cycle_phase, EasingFunction};
use crate::config::TimingConfig;

/// Visual parameters a keyframe can drive
///
/// Translation is in stylesheet pixels at 1.0x scale, rotation in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Horizontal offset
    pub dx: f32,
    /// Vertical offset (positive = down)
    pub dy: f32,
    /// Rotation in degrees (positive = clockwise)
    pub rotate: f32,
    /// Uniform scale
    pub scale: f32,
    /// Eye openness (1.0 = open, near 0.0 = shut)
    pub openness: f32,
    /// Layer opacity
    pub opacity: f32,
    /// Glow intensity (0.0 = resting, 1.0 = brightest)
    pub glow: f32,
}

impl Pose {
    /// The rest pose
    pub const IDENTITY: Pose = Pose {
        dx: 0.0,
        dy: 0.0,
        rotate: 0.0,
        scale: 1.0,
        openness: 1.0,
        opacity: 1.0,
        glow: 0.0,
    };

    /// Rest pose translated by (dx, dy)
    #[must_use]
    pub const fn translate(dx: f32, dy: f32) -> Self {
        let mut pose = Self::IDENTITY;
        pose.dx = dx;
        pose.dy = dy;
        pose
    }

    /// Set rotation
    #[must_use]
    pub const fn rotated(mut self, degrees: f32) -> Self {
        self.rotate = degrees;
        self
    }

    /// Set scale
    #[must_use]
    pub const fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set eye openness
    #[must_use]
    pub const fn open(mut self, openness: f32) -> Self {
        self.openness = openness;
        self
    }

    /// Set glow
    #[must_use]
    pub const fn glowing(mut self, glow: f32) -> Self {
        self.glow = glow;
        self
    }

    /// Linear interpolation between two poses
    #[must_use]
    pub fn lerp(self, to: Pose, t: f32) -> Pose {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            dx: mix(self.dx, to.dx),
            dy: mix(self.dy, to.dy),
            rotate: mix(self.rotate, to.rotate),
            scale: mix(self.scale, to.scale),
            openness: mix(self.openness, to.openness),
            opacity: mix(self.opacity, to.opacity),
            glow: mix(self.glow, to.glow),
        }
    }

    /// Stack another animation's pose on top of this one
    ///
    /// Offsets and rotations add, scale/openness/opacity multiply, glow takes
    /// the brighter of the two.
    #[must_use]
    pub fn overlay(self, other: Pose) -> Pose {
        Pose {
            dx: self.dx + other.dx,
            dy: self.dy + other.dy,
            rotate: self.rotate + other.rotate,
            scale: self.scale * other.scale,
            openness: self.openness * other.openness,
            opacity: self.opacity * other.opacity,
            glow: self.glow.max(other.glow),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One keyframe: a pose at a fixed offset within the cycle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    /// Offset within the cycle (0.0 to 1.0)
    pub offset: f32,
    /// Pose at that offset
    pub pose: Pose,
}

const fn kf(offset: f32, pose: Pose) -> Keyframe {
    Keyframe { offset, pose }
}

const REST: Pose = Pose::IDENTITY;

/// Eye height when shut, relative to open (2px of 16px)
pub const EYE_SHUT: f32 = 0.125;

/// Distance the covering hands travel from rest up to the eyes
pub const HAND_REST_DROP: f32 = 60.0;

const ROBOT_BREATHE: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.5, REST.scaled(1.02)),
    kf(1.0, REST),
];

const SOFT_FLOAT: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.5, Pose::translate(0.0, -8.0)),
    kf(1.0, REST),
];

const HEAD_FLOAT: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.5, Pose::translate(0.0, -3.0).rotated(1.0)),
    kf(1.0, REST),
];

const HEAD_HAPPY: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.5, Pose::translate(0.0, -5.0).rotated(-2.0)),
    kf(1.0, REST),
];

const HEAD_SAD: &[Keyframe] = &[
    kf(0.0, REST.rotated(-2.0)),
    kf(0.5, Pose::translate(0.0, 2.0).rotated(-4.0)),
    kf(1.0, REST.rotated(-2.0)),
];

const GLOW: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.5, REST.glowing(1.0)),
    kf(1.0, REST),
];

const EYE_BLINK: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.82, REST),
    kf(0.86, REST.open(EYE_SHUT)),
    kf(0.88, REST.open(EYE_SHUT)),
    kf(0.90, REST),
    kf(1.0, REST),
];

/// Shut while the hands cover, released once they are fully retracted
/// (75%), shut again before the hands come back.
const EYE_COVERED: &[Keyframe] = &[
    kf(0.0, REST.open(EYE_SHUT)),
    kf(0.75, REST.open(EYE_SHUT)),
    kf(0.78, REST),
    kf(0.84, REST),
    kf(0.87, REST.open(EYE_SHUT)),
    kf(1.0, REST.open(EYE_SHUT)),
];

/// Entrance 0–15%, hold 15–60%, retract 60–75%, peek 75–90%, rest to 100%.
const HAND_COVER: &[Keyframe] = &[
    kf(0.0, Pose::translate(0.0, HAND_REST_DROP)),
    kf(0.15, REST),
    kf(0.60, REST),
    kf(0.75, Pose::translate(0.0, HAND_REST_DROP)),
    kf(0.82, Pose::translate(0.0, HAND_REST_DROP * 0.4)),
    kf(0.90, Pose::translate(0.0, HAND_REST_DROP)),
    kf(1.0, Pose::translate(0.0, HAND_REST_DROP)),
];

const BODY_SWAY: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.5, Pose::translate(0.0, 2.0).rotated(0.5)),
    kf(1.0, REST),
];

const LEG_BOUNCE: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.5, Pose::translate(0.0, 3.0)),
    kf(1.0, REST),
];

const ARM_SWING: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.5, REST.rotated(3.0)),
    kf(1.0, REST),
];

const ARM_WAVE: &[Keyframe] = &[
    kf(0.0, REST),
    kf(0.25, REST.rotated(-25.0)),
    kf(0.5, REST.rotated(10.0)),
    kf(0.75, REST.rotated(-25.0)),
    kf(1.0, REST),
];

/// Every animation the mascot knows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationName {
    /// Whole robot breathes (scale pulse)
    RobotBreathe,
    /// Outer wrapper floats when `floating` is on
    SoftFloat,
    /// Idle head float
    HeadFloat,
    /// Fast upward wobble (happy)
    HeadHappy,
    /// Slow downward tilt (sad)
    HeadSad,
    /// Eye glow pulse
    EyeGlow,
    /// Periodic blink while uncovered
    EyeBlink,
    /// Two-phase shut/release cycle while covered
    EyeCovered,
    /// Chest panel glow pulse
    ChestGlow,
    /// Idle body sway
    BodySway,
    /// Leg bounce (right leg runs delayed)
    LegBounce,
    /// Resting arm swing
    ArmSwing,
    /// Waving overlay (happy)
    ArmWave,
    /// Covering-hand sequence
    HandCover,
}

impl AnimationName {
    /// Keyframe name as it appears in stylesheet-based surfaces
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RobotBreathe => "robotBreathe",
            Self::SoftFloat => "softFloat",
            Self::HeadFloat => "headFloat",
            Self::HeadHappy => "headHappy",
            Self::HeadSad => "headSad",
            Self::EyeGlow => "eyeGlow",
            Self::EyeBlink => "eyeBlink",
            Self::EyeCovered => "eyeCovered",
            Self::ChestGlow => "chestGlow",
            Self::BodySway => "bodySway",
            Self::LegBounce => "legBounce",
            Self::ArmSwing => "armSwing",
            Self::ArmWave => "armWave",
            Self::HandCover => "handCover",
        }
    }

    fn keyframes(self) -> &'static [Keyframe] {
        match self {
            Self::RobotBreathe => ROBOT_BREATHE,
            Self::SoftFloat => SOFT_FLOAT,
            Self::HeadFloat => HEAD_FLOAT,
            Self::HeadHappy => HEAD_HAPPY,
            Self::HeadSad => HEAD_SAD,
            Self::EyeGlow | Self::ChestGlow => GLOW,
            Self::EyeBlink => EYE_BLINK,
            Self::EyeCovered => EYE_COVERED,
            Self::BodySway => BODY_SWAY,
            Self::LegBounce => LEG_BOUNCE,
            Self::ArmSwing => ARM_SWING,
            Self::ArmWave => ARM_WAVE,
            Self::HandCover => HAND_COVER,
        }
    }

    fn easing(self) -> EasingFunction {
        match self {
            Self::HeadHappy => EasingFunction::Ease,
            Self::EyeBlink => EasingFunction::Standard,
            _ => EasingFunction::EaseInOut,
        }
    }
}

/// A named animation resolved against the configured cycle durations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    /// Which animation this is
    pub name: AnimationName,
    /// Length of one cycle
    pub duration: Duration,
    /// Easing applied within each keyframe segment
    pub easing: EasingFunction,
    /// Keyframes sorted by offset, first at 0.0 and last at 1.0
    pub keyframes: &'static [Keyframe],
}

impl Timeline {
    /// Pose at `elapsed` since phase 0, for a binding started after `delay`
    ///
    /// Before the delay elapses the layer sits in its rest pose.
    #[must_use]
    pub fn sample(&self, elapsed: Duration, delay: Duration) -> Pose {
        match cycle_phase(elapsed, self.duration, delay) {
            Some(phase) => self.pose_at(phase),
            None => Pose::IDENTITY,
        }
    }

    /// Pose at a phase (0.0 to 1.0) within the cycle
    #[must_use]
    pub fn pose_at(&self, phase: f32) -> Pose {
        let phase = phase.clamp(0.0, 1.0);
        let frames = self.keyframes;

        let Some(first) = frames.first() else {
            return Pose::IDENTITY;
        };
        if phase <= first.offset {
            return first.pose;
        }

        for pair in frames.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if phase <= to.offset {
                let span = to.offset - from.offset;
                if span <= f32::EPSILON {
                    return to.pose;
                }
                let local = self.easing.apply((phase - from.offset) / span);
                return from.pose.lerp(to.pose, local);
            }
        }

        frames.last().map_or(Pose::IDENTITY, |last| last.pose)
    }
}

/// Resolves animation names into timelines using the configured durations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timelines {
    timing: TimingConfig,
}

impl Timelines {
    /// Build from timing configuration
    #[must_use]
    pub fn new(timing: TimingConfig) -> Self {
        Self { timing }
    }

    /// Timeline for a named animation
    #[must_use]
    pub fn get(&self, name: AnimationName) -> Timeline {
        let t = &self.timing;
        let ms = match name {
            AnimationName::RobotBreathe => t.breathe_ms,
            AnimationName::SoftFloat => t.soft_float_ms,
            AnimationName::HeadFloat => t.head_float_ms,
            AnimationName::HeadHappy => t.head_happy_ms,
            AnimationName::HeadSad => t.head_sad_ms,
            AnimationName::EyeGlow => t.eye_glow_ms,
            AnimationName::EyeBlink => t.eye_blink_ms,
            AnimationName::EyeCovered | AnimationName::HandCover => t.cover_cycle_ms,
            AnimationName::ChestGlow => t.chest_glow_ms,
            AnimationName::BodySway => t.body_sway_ms,
            AnimationName::LegBounce => t.leg_bounce_ms,
            AnimationName::ArmSwing => t.arm_swing_ms,
            AnimationName::ArmWave => t.arm_wave_ms,
        };

        Timeline {
            name,
            duration: Duration::from_millis(ms),
            easing: name.easing(),
            keyframes: name.keyframes(),
        }
    }

    /// Timing configuration in use
    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }
}
