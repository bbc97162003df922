//! Render keys and remount tracking
//!
//! A [`RenderKey`] identifies one incarnation of the animated subtree. It is
//! derived only from the cover gesture, so every hand-cover transition yields
//! a new key and every surface restarts all looping animations from phase 0.

use std::fmt;

use serde::Serialize;

use crate::gesture::HandCoverMode;

/// Identity of the animated subtree for one gesture state
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RenderKey(String);

impl RenderKey {
    /// Derive the key for a gesture state
    #[must_use]
    pub fn derive(covering_eyes: bool, mode: HandCoverMode) -> Self {
        let cover = if covering_eyes { "covered" } else { "open" };
        Self(format!("robot-{cover}-{mode}"))
    }

    /// Key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether observing a key kept or replaced the animated subtree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Remount {
    /// Same key as before; animations keep running
    Kept,
    /// New key; animations restart at phase 0
    Fresh {
        /// Number of remounts so far, including this one
        generation: u64,
    },
}

impl Remount {
    /// Whether the subtree was recreated
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh { .. })
    }
}

/// Remembers the last key and reports when it changes
#[derive(Clone, Debug)]
pub struct RemountTracker {
    current: RenderKey,
    generation: u64,
}

impl RemountTracker {
    /// Start tracking from an initial key (generation 0)
    #[must_use]
    pub fn new(initial: RenderKey) -> Self {
        Self {
            current: initial,
            generation: 0,
        }
    }

    /// Observe the key for the latest state
    pub fn observe(&mut self, key: RenderKey) -> Remount {
        if key == self.current {
            return Remount::Kept;
        }

        self.generation += 1;
        self.current = key;
        Remount::Fresh {
            generation: self.generation,
        }
    }

    /// Current key
    #[must_use]
    pub fn current(&self) -> &RenderKey {
        &self.current
    }

    /// Number of remounts observed
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
