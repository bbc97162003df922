//! Theme and Colors
//!
//! The robot palette: light gray shell, dark blue faceplate, bright blue
//! eyes that brighten further when they glow.

use mascot_core::AccentTone;
use ratatui::style::Color;

// ============================================================================
// Robot Palette
// ============================================================================

/// Shell - light gray (head, body, arms)
pub const ROBOT_SHELL: Color = Color::Rgb(232, 232, 232);

/// Faceplate and leg joints - dark blue
pub const ROBOT_FACEPLATE: Color = Color::Rgb(44, 62, 122);

/// Eyes and mouth - bright blue
pub const ROBOT_EYES: Color = Color::Rgb(0, 191, 255);

/// Eyes and chest panel at the peak of their glow
pub const ROBOT_GLOW: Color = Color::Rgb(0, 212, 255);

/// Outlines
pub const ROBOT_OUTLINE: Color = Color::Rgb(0, 0, 0);

/// Covering hands - a touch warmer than the shell so they read in front
pub const ROBOT_HAND: Color = Color::Rgb(245, 245, 245);

// ============================================================================
// UI Colors
// ============================================================================

/// Panel borders and hints
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error text
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Input fields with focus
pub const FOCUS_BLUE: Color = Color::Rgb(96, 165, 250);

/// Foreground used for bubble text and captions
#[must_use]
pub fn accent_color(accent: AccentTone) -> Color {
    match accent {
        AccentTone::Primary => Color::Rgb(59, 130, 246),
        AccentTone::Secondary => Color::Rgb(148, 163, 184),
        AccentTone::Emerald => Color::Rgb(16, 185, 129),
    }
}

/// Eye/chest color for a glow level (terminals get two steps)
#[must_use]
pub fn glow_color(glow: f32) -> Color {
    if glow >= 0.5 {
        ROBOT_GLOW
    } else {
        ROBOT_EYES
    }
}
