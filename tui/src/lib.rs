//! Mascot TUI - Terminal host for the learning-companion robot
//!
//! Renders mascot instances from `mascot-core` with ratatui: sprites per
//! body layer, poses sampled from each instance's clock, a speech bubble and
//! an optional caption.
//!
//! # Architecture
//!
//! - **Avatar**: Robot body-part sprites and their resting anchors
//! - **Widgets**: Mascot, speech bubble, caption and the panel combining them
//! - **Mood driver**: Login-form heuristics with scoped wave/login timers
//! - **Config**: TOML file plus `MASCOT_*` environment overrides

pub mod app;
pub mod avatar;
pub mod config;
pub mod mood_driver;
pub mod theme;
pub mod widgets;

pub use app::App;
