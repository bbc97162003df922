//! Mascot Core - Headless Mood and Gesture Engine for the Robot Mascot
//!
//! This crate decides what the learning-companion robot looks like at any
//! moment: which mood preset applies, whether its hands are over its eyes,
//! which looping animations each body part plays, and what it says in its
//! speech bubble. It never draws anything; surfaces turn its output into
//! terminal cells, SVG, or stylesheet keyframes.
//!
//! # Architecture
//!
//! ```text
//!   MascotProps (mood, coveringEyes, bubbleText, size, ...)
//!        │
//!        ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Mascot                               │
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────────────────┐ │
//! │  │   Gesture    │─▶│  RenderKey   │─▶│   AnimationClock    │ │
//! │  │ StateMachine │  │   Tracker    │  │ (reset on remount)  │ │
//! │  └──────┬───────┘  └──────────────┘  └──────────┬──────────┘ │
//! │         │                                        │            │
//! │         ▼                                        ▼            │
//! │  ┌──────────────┐  ┌──────────────┐  ┌─────────────────────┐ │
//! │  │ Mood Preset  │─▶│ Composition  │─▶│    MascotFrame      │ │
//! │  │    Table     │  │   (layers)   │  │  (sampled poses)    │ │
//! │  └──────────────┘  └──────────────┘  └─────────────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   Surfaces (TUI, web, ...)
//! ```
//!
//! # Key Types
//!
//! - [`Mascot`]: One on-screen robot with its own clock and gesture state
//! - [`Mood`]: Expressive state, resolved through [`lookup`]
//! - [`GestureStateMachine`]: Resolves [`HandCoverMode`] from the cover input
//! - [`Composition`]: The layered visual tree for one state
//! - [`BubbleText`]: Tri-state bubble override
//! - [`MascotConfig`]: Animation timings and instance defaults
//!
//! # No I/O
//!
//! Nothing in this crate reads files, opens sockets, sleeps, or reads the
//! wall clock. Time only moves when the host calls [`Mascot::tick`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod composition;
pub mod config;
pub mod gesture;
pub mod mascot;
pub mod mood;
pub mod render_key;
pub mod speech;

pub use animation::{
    AnimationBinding, AnimationClock, AnimationName, EasingFunction, Pose, Timeline, Timelines,
};
pub use composition::{
    compose, Composition, Layer, LayerDetail, LayerFrame, LayerNode, MascotFrame, MouthPolarity,
    MouthShape, RenderInput,
};
pub use config::{ConfigError, DefaultsConfig, MascotConfig, SurfaceConfig, TimingConfig};
pub use gesture::{CoverInput, GestureStateMachine, GestureTransition, HandCoverMode};
pub use mascot::{
    AccentTone, InstanceId, InstanceIds, Mascot, MascotProps, MascotSize, MascotState,
    MascotView, StyleScope, UpdateOutcome,
};
pub use mood::{lookup, lookup_name, Mood, MoodPreset, UnknownMood};
pub use render_key::{Remount, RemountTracker, RenderKey};
pub use speech::{resolve, BubbleText, Caption};
