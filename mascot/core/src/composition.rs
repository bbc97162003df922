//! Composite Renderer
//!
//! Turns (mood, gesture sub-state, scale, floating) into the layered visual
//! tree of the robot and the animations bound to each layer. Composition is
//! a pure function driven by three declarative tables:
//!
//! - [`SKELETON`]: every body layer, its parent, z-order and base animations
//! - [`MOOD_OVERLAYS`]: extra animations per mood
//! - the gesture rules in [`compose`]: covered eyes, hidden arms, hands
//!
//! The composition never tracks time. Surfaces sample it with
//! [`Composition::sample`] at the elapsed time of the instance's clock.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::animation::{sample_bindings, AnimationBinding, AnimationName, Pose, Timelines};
use crate::gesture::HandCoverMode;
use crate::mood::{lookup, Mood};
use crate::render_key::RenderKey;

/// A drawable part of the robot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    /// Root of the robot; every other layer moves with it
    Robot,
    /// Head with ears and faceplate
    Head,
    /// Left eye
    EyeLeft,
    /// Right eye
    EyeRight,
    /// Mouth
    Mouth,
    /// Body
    Body,
    /// Glowing chest panel
    ChestPanel,
    /// Left arm
    ArmLeft,
    /// Right arm
    ArmRight,
    /// Left leg
    LegLeft,
    /// Right leg
    LegRight,
    /// Left covering hand
    HandLeft,
    /// Right covering hand
    HandRight,
}

impl Layer {
    /// Class name used by stylesheet-based surfaces
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Robot => "robot-simple",
            Self::Head => "robot-head",
            Self::EyeLeft => "robot-eye-left",
            Self::EyeRight => "robot-eye-right",
            Self::Mouth => "robot-mouth",
            Self::Body => "robot-body",
            Self::ChestPanel => "robot-chest-panel",
            Self::ArmLeft => "robot-arm-left",
            Self::ArmRight => "robot-arm-right",
            Self::LegLeft => "robot-leg-left",
            Self::LegRight => "robot-leg-right",
            Self::HandLeft => "robot-hand-left",
            Self::HandRight => "robot-hand-right",
        }
    }

    /// Whether this is one of the regular arms
    #[must_use]
    pub fn is_arm(self) -> bool {
        matches!(self, Self::ArmLeft | Self::ArmRight)
    }

    /// Whether this is one of the covering hands
    #[must_use]
    pub fn is_hand(self) -> bool {
        matches!(self, Self::HandLeft | Self::HandRight)
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Which way the mouth bends
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MouthPolarity {
    /// Corners up
    Smile,
    /// Flat cat "w"
    Neutral,
    /// Corners down
    Frown,
}

/// Static mouth curvature
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MouthShape {
    /// Preset curvature; negative smiles, positive frowns
    pub curve: f32,
}

impl MouthShape {
    /// Direction of the curve
    #[must_use]
    pub fn polarity(self) -> MouthPolarity {
        if self.curve < 0.0 {
            MouthPolarity::Smile
        } else if self.curve > 0.0 {
            MouthPolarity::Frown
        } else {
            MouthPolarity::Neutral
        }
    }
}

/// Static, non-animated parameters of a layer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerDetail {
    /// Nothing beyond its animations
    Plain,
    /// Eye drawn at a mood-dependent scale
    Eye {
        /// Size multiplier from the mood preset
        scale: f32,
    },
    /// Mouth with a mood-dependent curve
    Mouth(MouthShape),
}

/// One layer of the composition
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LayerNode {
    /// Which part
    pub layer: Layer,
    /// Layer this one moves with
    pub parent: Option<Layer>,
    /// Draw order (higher = on top)
    pub z_index: i32,
    /// Static parameters
    pub detail: LayerDetail,
    /// Looping animations, overlaid in order
    pub bindings: Vec<AnimationBinding>,
}

struct LayerSpec {
    layer: Layer,
    parent: Option<Layer>,
    z_index: i32,
    base: &'static [AnimationName],
}

const fn part(
    layer: Layer,
    parent: Option<Layer>,
    z_index: i32,
    base: &'static [AnimationName],
) -> LayerSpec {
    LayerSpec {
        layer,
        parent,
        z_index,
        base,
    }
}

/// Body layers, parents before children
const SKELETON: &[LayerSpec] = &[
    part(Layer::Robot, None, 0, &[AnimationName::RobotBreathe]),
    part(Layer::LegLeft, Some(Layer::Robot), 0, &[AnimationName::LegBounce]),
    part(Layer::LegRight, Some(Layer::Robot), 0, &[AnimationName::LegBounce]),
    part(Layer::Body, Some(Layer::Robot), 1, &[AnimationName::BodySway]),
    part(Layer::ChestPanel, Some(Layer::Body), 2, &[AnimationName::ChestGlow]),
    part(Layer::ArmLeft, Some(Layer::Body), 2, &[AnimationName::ArmSwing]),
    part(Layer::ArmRight, Some(Layer::Body), 2, &[AnimationName::ArmSwing]),
    part(Layer::Head, Some(Layer::Robot), 3, &[AnimationName::HeadFloat]),
    part(Layer::EyeLeft, Some(Layer::Head), 4, &[AnimationName::EyeGlow]),
    part(Layer::EyeRight, Some(Layer::Head), 4, &[AnimationName::EyeGlow]),
    part(Layer::Mouth, Some(Layer::Head), 4, &[]),
];

/// Extra animations layered on top of the skeleton for each mood
const MOOD_OVERLAYS: &[(Mood, &[(Layer, AnimationName)])] = &[
    (
        Mood::Happy,
        &[
            (Layer::Head, AnimationName::HeadHappy),
            (Layer::ArmRight, AnimationName::ArmWave),
        ],
    ),
    (Mood::Sad, &[(Layer::Head, AnimationName::HeadSad)]),
];

const HAND_Z_INDEX: i32 = 6;

fn mood_overlays(mood: Mood) -> &'static [(Layer, AnimationName)] {
    MOOD_OVERLAYS
        .iter()
        .find(|(m, _)| *m == mood)
        .map_or(&[], |(_, overlays)| *overlays)
}

fn eye_cycle(layer: Layer, mode: HandCoverMode) -> AnimationName {
    let covered = match mode {
        HandCoverMode::None => false,
        HandCoverMode::One => layer == Layer::EyeLeft,
        HandCoverMode::Two => true,
    };
    if covered {
        AnimationName::EyeCovered
    } else {
        AnimationName::EyeBlink
    }
}

fn covering_hands(mode: HandCoverMode) -> &'static [Layer] {
    match mode {
        HandCoverMode::None => &[],
        HandCoverMode::One => &[Layer::HandLeft],
        HandCoverMode::Two => &[Layer::HandLeft, Layer::HandRight],
    }
}

/// Everything the renderer needs to know about the current state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderInput {
    /// Current mood
    pub mood: Mood,
    /// Gesture sub-state
    pub hand_cover_mode: HandCoverMode,
    /// Public covering flag
    pub covering_eyes: bool,
    /// Overall scale factor
    pub scale: f32,
    /// Whether the outer float wrapper is on
    pub floating: bool,
}

/// The full layered visual tree for one state
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Composition {
    /// Identity of the animated subtree
    pub render_key: RenderKey,
    /// Mood the composition was built for
    pub mood: Mood,
    /// Gesture sub-state it was built for
    pub hand_cover_mode: HandCoverMode,
    /// Overall scale factor
    pub scale: f32,
    /// Float animation of the outer wrapper, when floating
    pub wrapper: Option<AnimationBinding>,
    /// Layers, parents before children
    pub layers: Vec<LayerNode>,
}

/// Build the composition for the given state
///
/// Hands and covered eyes only appear while `covering_eyes` is set; a stale
/// `hand_cover_mode` without it draws open eyes and no hands.
#[must_use]
pub fn compose(input: &RenderInput, timelines: &Timelines) -> Composition {
    let cover_mode = if input.covering_eyes {
        input.hand_cover_mode
    } else {
        HandCoverMode::None
    };
    let preset = lookup(input.mood);
    let leg_offset = Duration::from_millis(timelines.timing().leg_phase_offset_ms);
    let overlays = mood_overlays(input.mood);

    let mut layers: Vec<LayerNode> = SKELETON
        .iter()
        .filter(|entry| !(input.covering_eyes && entry.layer.is_arm()))
        .map(|entry| {
            let mut bindings: Vec<AnimationBinding> = Vec::with_capacity(3);

            match entry.layer {
                Layer::EyeLeft | Layer::EyeRight => {
                    bindings.push(AnimationBinding::new(eye_cycle(entry.layer, cover_mode)));
                }
                _ => {}
            }

            let delay = if entry.layer == Layer::LegRight {
                leg_offset
            } else {
                Duration::ZERO
            };
            bindings.extend(
                entry.base
                    .iter()
                    .map(|&name| AnimationBinding::delayed(name, delay)),
            );
            bindings.extend(
                overlays
                    .iter()
                    .filter(|(layer, _)| *layer == entry.layer)
                    .map(|&(_, name)| AnimationBinding::new(name)),
            );

            let detail = match entry.layer {
                Layer::EyeLeft => LayerDetail::Eye {
                    scale: preset.eye_left_scale,
                },
                Layer::EyeRight => LayerDetail::Eye {
                    scale: preset.eye_right_scale,
                },
                Layer::Mouth => LayerDetail::Mouth(MouthShape {
                    curve: preset.mouth_curve,
                }),
                _ => LayerDetail::Plain,
            };

            LayerNode {
                layer: entry.layer,
                parent: entry.parent,
                z_index: entry.z_index,
                detail,
                bindings,
            }
        })
        .collect();

    layers.extend(covering_hands(cover_mode).iter().map(|&hand| LayerNode {
        layer: hand,
        parent: Some(Layer::Robot),
        z_index: HAND_Z_INDEX,
        detail: LayerDetail::Plain,
        bindings: vec![AnimationBinding::new(AnimationName::HandCover)],
    }));

    Composition {
        render_key: RenderKey::derive(input.covering_eyes, input.hand_cover_mode),
        mood: input.mood,
        hand_cover_mode: input.hand_cover_mode,
        scale: input.scale,
        wrapper: input
            .floating
            .then_some(AnimationBinding::new(AnimationName::SoftFloat)),
        layers,
    }
}

/// A layer with its pose at one instant
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LayerFrame {
    /// Which part
    pub layer: Layer,
    /// Draw order
    pub z_index: i32,
    /// Static parameters
    pub detail: LayerDetail,
    /// Pose including every ancestor's motion
    pub pose: Pose,
}

/// The composition sampled at one instant
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MascotFrame {
    /// Overall scale factor
    pub scale: f32,
    /// Pose of the outer float wrapper
    pub wrapper: Pose,
    /// Layers sorted back to front
    pub layers: Vec<LayerFrame>,
}

impl MascotFrame {
    /// Frame entry for a layer, if present
    #[must_use]
    pub fn layer(&self, layer: Layer) -> Option<&LayerFrame> {
        self.layers.iter().find(|f| f.layer == layer)
    }
}

impl Composition {
    /// Node for a layer, if present
    #[must_use]
    pub fn layer(&self, layer: Layer) -> Option<&LayerNode> {
        self.layers.iter().find(|node| node.layer == layer)
    }

    /// Whether a layer is present
    #[must_use]
    pub fn has_layer(&self, layer: Layer) -> bool {
        self.layer(layer).is_some()
    }

    /// Covering hands currently drawn
    pub fn hands(&self) -> impl Iterator<Item = &LayerNode> {
        self.layers.iter().filter(|node| node.layer.is_hand())
    }

    /// Sample every layer at `elapsed` since phase 0
    ///
    /// A layer's pose is its own animations overlaid on its parent's pose.
    #[must_use]
    pub fn sample(&self, timelines: &Timelines, elapsed: Duration) -> MascotFrame {
        let mut world: HashMap<Layer, Pose> = HashMap::with_capacity(self.layers.len());
        let mut layers = Vec::with_capacity(self.layers.len());

        for node in &self.layers {
            let parent = node
                .parent
                .and_then(|p| world.get(&p).copied())
                .unwrap_or(Pose::IDENTITY);
            let pose = parent.overlay(sample_bindings(timelines, &node.bindings, elapsed));
            world.insert(node.layer, pose);
            layers.push(LayerFrame {
                layer: node.layer,
                z_index: node.z_index,
                detail: node.detail,
                pose,
            });
        }

        layers.sort_by_key(|frame| frame.z_index);

        MascotFrame {
            scale: self.scale,
            wrapper: self.wrapper.map_or(Pose::IDENTITY, |binding| {
                sample_bindings(timelines, &[binding], elapsed)
            }),
            layers,
        }
    }
}
