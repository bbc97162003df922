//! Gesture State Machine
//!
//! The "cover eyes" gesture has three sub-states: no hands, one hand
//! peeking, or both hands over the eyes. The sub-state is a pure function
//! of the current input; replaying the same input any number of times
//! resolves to the same mode.
//!
//! ```text
//!            covering_eyes = true
//!   ┌──────┐ ──────────────────────▶ ┌─────┐
//!   │ None │                         │ Two │
//!   └──────┘ ◀────────────────────── └─────┘
//!       ▲     covering_eyes = false     ▲
//!       │                               │ single_hand_peek = false
//!       │ covering_eyes = false         ▼
//!       └───────────────────────────  ┌─────┐
//!                                     │ One │  (single_hand_peek = true)
//!                                     └─────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hand-cover sub-state of the cover-eyes gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HandCoverMode {
    /// Hands at rest, eyes visible
    #[default]
    None,
    /// A single hand over the left eye, the right eye peeking
    One,
    /// Both hands over the eyes
    Two,
}

impl HandCoverMode {
    /// Number of covering hands drawn in this mode
    #[must_use]
    pub fn hand_count(self) -> usize {
        match self {
            Self::None => 0,
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Lowercase name used in render keys and logs
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::One => "one",
            Self::Two => "two",
        }
    }
}

impl fmt::Display for HandCoverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs that determine the gesture sub-state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CoverInput {
    /// Public boolean contract: are the eyes covered
    pub covering_eyes: bool,
    /// Explicit opt-in for the single-hand peek variant
    pub single_hand_peek: bool,
}

impl CoverInput {
    /// Input carrying only the public boolean
    #[must_use]
    pub const fn covering(covering_eyes: bool) -> Self {
        Self {
            covering_eyes,
            single_hand_peek: false,
        }
    }

    /// The mode this input resolves to
    #[must_use]
    pub fn resolve(self) -> HandCoverMode {
        match (self.covering_eyes, self.single_hand_peek) {
            (false, _) => HandCoverMode::None,
            (true, true) => HandCoverMode::One,
            (true, false) => HandCoverMode::Two,
        }
    }
}

/// Result of feeding an input into the machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureTransition {
    /// Mode did not change
    Unchanged(HandCoverMode),
    /// Mode changed; downstream must restart the animated subtree
    Changed {
        /// Previous mode
        from: HandCoverMode,
        /// New mode
        to: HandCoverMode,
    },
}

impl GestureTransition {
    /// Whether the mode changed
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    /// Mode after the transition
    #[must_use]
    pub fn mode(&self) -> HandCoverMode {
        match *self {
            Self::Unchanged(mode) | Self::Changed { to: mode, .. } => mode,
        }
    }
}

/// Level-triggered machine deriving [`HandCoverMode`] from [`CoverInput`]
#[derive(Clone, Debug, Default)]
pub struct GestureStateMachine {
    input: CoverInput,
    mode: HandCoverMode,
}

impl GestureStateMachine {
    /// Create a machine in the initial `None` state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current input
    pub fn apply(&mut self, input: CoverInput) -> GestureTransition {
        self.input = input;
        let next = input.resolve();

        if next == self.mode {
            return GestureTransition::Unchanged(next);
        }

        let from = self.mode;
        self.mode = next;
        GestureTransition::Changed { from, to: next }
    }

    /// Feed only the public boolean (single-hand peek off)
    pub fn set_covering_eyes(&mut self, covering_eyes: bool) -> GestureTransition {
        self.apply(CoverInput::covering(covering_eyes))
    }

    /// Current mode
    #[must_use]
    pub fn mode(&self) -> HandCoverMode {
        self.mode
    }

    /// Last input fed to the machine
    #[must_use]
    pub fn input(&self) -> CoverInput {
        self.input
    }
}
