//! Robot Avatar Sprites
//!
//! Terminal rendition of the mascot's body parts:
//! - Blocky pixel art built from Unicode block elements
//! - Per-cell coloring from the robot palette
//! - Nearest-neighbour downscaling for the medium size

pub mod parts;
pub mod sprites;

pub use parts::{anchor, sprite_for, ROBOT_HEIGHT, ROBOT_WIDTH};
pub use sprites::{build_sprite, ColoredCell, Sprite};
