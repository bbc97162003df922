//! Widgets for the mascot surface

pub mod bubble;
pub mod mascot;
pub mod panel;

pub use bubble::{CaptionWidget, SpeechBubble};
pub use mascot::{robot_size, MascotWidget};
pub use panel::MascotPanel;
