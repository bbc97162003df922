//! Mascot instance
//!
//! A [`Mascot`] ties the pieces together for one on-screen robot: it owns
//! the gesture state machine, the remount tracker and the animation clock,
//! and rebuilds its [`Composition`] whenever the props change.
//!
//! Several mascots can live on the same page. Each is given an
//! [`InstanceId`] by its host, and everything it emits for stylesheet-based
//! surfaces is scoped under that id so instances never share animation
//! state or styles.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::animation::{AnimationClock, Timelines};
use crate::composition::{compose, Composition, Layer, MascotFrame, RenderInput};
use crate::config::DefaultsConfig;
use crate::gesture::{CoverInput, GestureStateMachine, GestureTransition, HandCoverMode};
use crate::mood::Mood;
use crate::render_key::{Remount, RemountTracker, RenderKey};
use crate::speech::{resolve, BubbleText, Caption};

// =============================================================================
// Presentation options
// =============================================================================

/// Overall size of the robot
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MascotSize {
    /// Medium, drawn at 75%
    Md,
    /// Large, drawn at full size
    #[default]
    Lg,
}

impl MascotSize {
    /// Uniform scale applied to the whole robot
    #[must_use]
    pub fn scale_factor(self) -> f32 {
        match self {
            Self::Md => 0.75,
            Self::Lg => 1.0,
        }
    }
}

/// Accent color family used by the bubble and caption
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentTone {
    /// Brand blue
    #[default]
    Primary,
    /// Muted secondary
    Secondary,
    /// Green
    Emerald,
}

// =============================================================================
// Props
// =============================================================================

fn default_floating() -> bool {
    true
}

/// Everything a host passes in for one mascot
///
/// Deserializes from camelCase JSON. A missing `bubbleText` shows the mood's
/// default line; an explicit `null` hides the bubble.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MascotProps {
    /// Expressive state; unknown names become idle
    #[serde(default)]
    pub mood: Mood,
    /// Bubble override
    #[serde(default, skip_serializing_if = "BubbleText::is_mood_default")]
    pub bubble_text: BubbleText,
    /// Cover-eyes gesture on or off
    #[serde(default)]
    pub covering_eyes: bool,
    /// Cover with one hand instead of two
    #[serde(default)]
    pub single_hand_peek: bool,
    /// Overall size
    #[serde(default)]
    pub size: MascotSize,
    /// Gentle float of the whole robot
    #[serde(default = "default_floating")]
    pub floating: bool,
    /// Accent color family
    #[serde(default)]
    pub accent: AccentTone,
    /// Extra class for the outer container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Optional headline under the robot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// Optional line under the headline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subline: Option<String>,
}

impl Default for MascotProps {
    fn default() -> Self {
        Self {
            mood: Mood::Idle,
            bubble_text: BubbleText::MoodDefault,
            covering_eyes: false,
            single_hand_peek: false,
            size: MascotSize::Lg,
            floating: true,
            accent: AccentTone::Primary,
            class_name: None,
            headline: None,
            subline: None,
        }
    }
}

impl MascotProps {
    /// Props seeded from configured defaults
    #[must_use]
    pub fn with_defaults(defaults: &DefaultsConfig) -> Self {
        Self {
            size: defaults.size,
            floating: defaults.floating,
            accent: defaults.accent,
            ..Self::default()
        }
    }

    /// Gesture input carried by these props
    #[must_use]
    pub fn cover_input(&self) -> CoverInput {
        CoverInput {
            covering_eyes: self.covering_eyes,
            single_hand_peek: self.single_hand_peek,
        }
    }
}

// =============================================================================
// Instance identity
// =============================================================================

/// Identity of one mascot on a page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Raw value
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out instance ids; owned by the host so ids are reproducible
#[derive(Clone, Debug, Default)]
pub struct InstanceIds {
    next: u64,
}

impl InstanceIds {
    /// Allocator starting at 1
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused id
    pub fn allocate(&mut self) -> InstanceId {
        self.next += 1;
        InstanceId(self.next)
    }
}

/// Class prefix isolating one instance's styles and keyframes
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct StyleScope(String);

impl StyleScope {
    /// Scope for an instance
    #[must_use]
    pub fn for_instance(id: InstanceId) -> Self {
        Self(format!("mascot-{id}"))
    }

    /// Scope class
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Selector for a layer inside this instance
    #[must_use]
    pub fn selector(&self, layer: Layer) -> String {
        format!(".{} .{}", self.0, layer.class_name())
    }

    /// Keyframes name private to this instance
    #[must_use]
    pub fn keyframes_name(&self, animation: &str) -> String {
        format!("{}-{animation}", self.0)
    }

    /// Class list of the outer container
    #[must_use]
    pub fn container_class(&self, class_name: Option<&str>) -> String {
        match class_name.map(str::trim).filter(|c| !c.is_empty()) {
            Some(extra) => format!("{} {extra}", self.0),
            None => self.0.clone(),
        }
    }
}

// =============================================================================
// Mascot
// =============================================================================

/// Observable state of an instance
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MascotState {
    /// Current mood
    pub mood: Mood,
    /// Cover-eyes flag as passed in
    pub covering_eyes: bool,
    /// Bubble override as passed in
    pub bubble_text: BubbleText,
    /// Resolved gesture sub-state
    pub hand_cover_mode: HandCoverMode,
}

/// What a props update changed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Gesture transition
    pub gesture: GestureTransition,
    /// Whether the animated subtree was recreated
    pub remount: Remount,
}

/// Everything a surface draws besides the animated layers
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MascotView {
    /// Instance the view belongs to
    pub id: InstanceId,
    /// Class list of the outer container
    pub container_class: String,
    /// Bubble caption, `None` when suppressed
    pub bubble: Option<String>,
    /// Headline and subline, when a headline is set
    pub caption: Option<Caption>,
    /// Accent color family
    pub accent: AccentTone,
}

/// One on-screen robot
#[derive(Debug)]
pub struct Mascot {
    id: InstanceId,
    scope: StyleScope,
    props: MascotProps,
    gesture: GestureStateMachine,
    remount: RemountTracker,
    clock: AnimationClock,
    timelines: Timelines,
    composition: Composition,
}

impl Mascot {
    /// Create an instance with initial props
    #[must_use]
    pub fn new(id: InstanceId, props: MascotProps, timelines: Timelines) -> Self {
        let mut gesture = GestureStateMachine::new();
        let mode = gesture.apply(props.cover_input()).mode();
        let render_key = RenderKey::derive(props.covering_eyes, mode);
        let composition = compose(&render_input(&props, mode), &timelines);

        debug!(
            instance = %id,
            mood = %props.mood,
            render_key = %render_key,
            "Mascot created"
        );

        Self {
            id,
            scope: StyleScope::for_instance(id),
            props,
            gesture,
            remount: RemountTracker::new(render_key),
            clock: AnimationClock::new(),
            timelines,
            composition,
        }
    }

    /// Replace the props
    ///
    /// The gesture sub-state is resolved before the composition is rebuilt,
    /// so the returned composition never lags behind the input. A new render
    /// key resets the clock.
    pub fn update(&mut self, props: MascotProps) -> UpdateOutcome {
        let gesture = self.gesture.apply(props.cover_input());
        let render_key = RenderKey::derive(props.covering_eyes, gesture.mode());
        let remount = self.remount.observe(render_key);

        if let GestureTransition::Changed { from, to } = gesture {
            debug!(instance = %self.id, %from, %to, "Hand cover mode changed");
        }
        if let Remount::Fresh { generation } = remount {
            debug!(
                instance = %self.id,
                render_key = %self.remount.current(),
                generation,
                "Animated subtree remounted"
            );
            self.clock.reset();
        }
        if props.mood != self.props.mood {
            debug!(instance = %self.id, from = %self.props.mood, to = %props.mood, "Mood changed");
        }

        self.composition = compose(&render_input(&props, gesture.mode()), &self.timelines);
        self.props = props;

        UpdateOutcome { gesture, remount }
    }

    /// Change only the mood
    pub fn set_mood(&mut self, mood: Mood) -> UpdateOutcome {
        let props = MascotProps {
            mood,
            ..self.props.clone()
        };
        self.update(props)
    }

    /// Change only the cover-eyes flag
    pub fn set_covering_eyes(&mut self, covering_eyes: bool) -> UpdateOutcome {
        let props = MascotProps {
            covering_eyes,
            ..self.props.clone()
        };
        self.update(props)
    }

    /// Change only the bubble override
    pub fn set_bubble_text(&mut self, bubble_text: BubbleText) -> UpdateOutcome {
        let props = MascotProps {
            bubble_text,
            ..self.props.clone()
        };
        self.update(props)
    }

    /// Advance the animation clock
    pub fn tick(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    /// Instance id
    #[must_use]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Style scope of this instance
    #[must_use]
    pub fn scope(&self) -> &StyleScope {
        &self.scope
    }

    /// Current props
    #[must_use]
    pub fn props(&self) -> &MascotProps {
        &self.props
    }

    /// Observable state
    #[must_use]
    pub fn state(&self) -> MascotState {
        MascotState {
            mood: self.props.mood,
            covering_eyes: self.props.covering_eyes,
            bubble_text: self.props.bubble_text.clone(),
            hand_cover_mode: self.gesture.mode(),
        }
    }

    /// Current render key
    #[must_use]
    pub fn render_key(&self) -> &RenderKey {
        self.remount.current()
    }

    /// Number of remounts so far
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.remount.generation()
    }

    /// Time since the current subtree was mounted
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    /// Current composition
    #[must_use]
    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Timelines used for sampling
    #[must_use]
    pub fn timelines(&self) -> &Timelines {
        &self.timelines
    }

    /// Composition sampled at the clock's current time
    #[must_use]
    pub fn frame(&self) -> MascotFrame {
        self.composition.sample(&self.timelines, self.clock.elapsed())
    }

    /// Bubble, caption and container details
    #[must_use]
    pub fn view(&self) -> MascotView {
        MascotView {
            id: self.id,
            container_class: self.scope.container_class(self.props.class_name.as_deref()),
            bubble: resolve(&self.props.bubble_text, self.props.mood),
            caption: Caption::from_lines(
                self.props.headline.as_deref(),
                self.props.subline.as_deref(),
            ),
            accent: self.props.accent,
        }
    }
}

fn render_input(props: &MascotProps, mode: HandCoverMode) -> RenderInput {
    RenderInput {
        mood: props.mood,
        hand_cover_mode: mode,
        covering_eyes: props.covering_eyes,
        scale: props.size.scale_factor(),
        floating: props.floating,
    }
}
