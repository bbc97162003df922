//! Robot body parts
//!
//! One sprite per [`Layer`], drawn at full (lg) size, with the cell where
//! its top-left corner sits when every pose is at rest.
//!
//! ```text
//!     ▄██████████▄          head      (4,0)
//!     ██ ██  ██ ██          eyes      (7,1) (13,1)
//!     ██  ╰──╯  ██          mouth     (9,3)
//!      ▀████████▀
//!   ▄█ ▄████████▄ █▄        arms      (2,5) (18,5)
//!   ██ ████▓▓████ ██        chest     (9,6)
//!   ▀▀ ██████████ ▀▀        body      (5,5)
//!       ▀██████▀
//!       ▄▄▄  ▄▄▄            legs      (7,9) (12,9)
//! ```

use mascot_core::{Layer, LayerDetail, MouthPolarity, Pose};
use ratatui::style::Color;

use super::sprites::{build_sprite, Sprite};
use crate::theme::{glow_color, ROBOT_FACEPLATE, ROBOT_HAND, ROBOT_SHELL};

/// Robot size in cells at full scale, including one row of float headroom
pub const ROBOT_WIDTH: u16 = 22;
/// See [`ROBOT_WIDTH`]
pub const ROBOT_HEIGHT: u16 = 12;

/// Pixels of pose offset per terminal column
pub const PX_PER_COL: f32 = 5.0;
/// Pixels of pose offset per terminal row
pub const PX_PER_ROW: f32 = 10.0;

/// Arm rotation (degrees, negative = raised) past which the raised arm is drawn
const ARM_RAISE_DEGREES: f32 = -10.0;

const HEAD: &[&str] = &[
    " _SSSSSSSSSS_ ",
    "SSFFFFFFFFFFSS",
    "SSFFFFFFFFFFSS",
    "SSFFFFFFFFFFSS",
    " sSSSSSSSSSSs ",
];

const BODY: &[&str] = &[
    "_SSSSSSSSSS_",
    "SSSSSSSSSSSS",
    "SSSSSSSSSSSS",
    " sSSSSSSSSs ",
];

const CHEST: &[&str] = &["GGGG", "gggg"];

const ARM_LEFT: &[&str] = &["_S", "SS", "ss"];
const ARM_RIGHT: &[&str] = &["S_", "SS", "ss"];
const ARM_LEFT_RAISED: &[&str] = &["_S", "SS", "S "];
const ARM_RIGHT_RAISED: &[&str] = &["S_", "SS", " S"];

const LEG: &[&str] = &["FFF", "sss"];

const HAND: &[&str] = &["_HH_", "HHHH"];

fn shell_palette() -> [(char, char, Color); 5] {
    [
        ('S', '█', ROBOT_SHELL),
        ('_', '▄', ROBOT_SHELL),
        ('s', '▀', ROBOT_SHELL),
        ('F', '█', ROBOT_FACEPLATE),
        ('H', '█', ROBOT_HAND),
    ]
}

/// Resting top-left cell of a layer at full scale
#[must_use]
pub fn anchor(layer: Layer) -> (i32, i32) {
    // row 0 is float headroom
    let (x, y) = match layer {
        Layer::Robot => (0, 0),
        Layer::Head => (4, 0),
        Layer::EyeLeft => (7, 1),
        Layer::EyeRight => (13, 1),
        Layer::Mouth => (9, 3),
        Layer::Body => (5, 5),
        Layer::ChestPanel => (9, 6),
        Layer::ArmLeft => (2, 5),
        Layer::ArmRight => (18, 5),
        Layer::LegLeft => (7, 9),
        Layer::LegRight => (12, 9),
        Layer::HandLeft => (6, 1),
        Layer::HandRight => (12, 1),
    };
    (x, y + 1)
}

/// Whether an arm pose is far enough into the wave to draw it raised
#[must_use]
pub fn arm_raised(pose: &Pose) -> bool {
    pose.rotate <= ARM_RAISE_DEGREES
}

/// Sprite for a layer in a given pose; `None` for layers with nothing to draw
#[must_use]
pub fn sprite_for(layer: Layer, detail: LayerDetail, pose: &Pose) -> Option<Sprite> {
    let palette = shell_palette();
    let glow = glow_color(pose.glow);

    let sprite = match layer {
        Layer::Robot => return None,
        Layer::Head => build_sprite(HEAD, &palette),
        Layer::Body => build_sprite(BODY, &palette),
        Layer::ChestPanel => build_sprite(CHEST, &[('G', '█', glow), ('g', '▀', glow)]),
        Layer::ArmLeft if arm_raised(pose) => build_sprite(ARM_LEFT_RAISED, &palette),
        Layer::ArmRight if arm_raised(pose) => build_sprite(ARM_RIGHT_RAISED, &palette),
        Layer::ArmLeft => build_sprite(ARM_LEFT, &palette),
        Layer::ArmRight => build_sprite(ARM_RIGHT, &palette),
        Layer::LegLeft | Layer::LegRight => build_sprite(LEG, &palette),
        Layer::HandLeft | Layer::HandRight => build_sprite(HAND, &palette),
        Layer::EyeLeft | Layer::EyeRight => {
            let scale = match detail {
                LayerDetail::Eye { scale } => scale,
                _ => 1.0,
            };
            eye(scale, pose.openness, glow)
        }
        Layer::Mouth => {
            let polarity = match detail {
                LayerDetail::Mouth(shape) => shape.polarity(),
                _ => MouthPolarity::Neutral,
            };
            mouth(polarity, glow)
        }
    };

    Some(sprite)
}

fn eye(scale: f32, openness: f32, color: Color) -> Sprite {
    let ch = if openness > 0.6 {
        '█'
    } else if openness > 0.3 {
        '▄'
    } else {
        '▁'
    };
    let width = if scale >= 1.15 {
        3
    } else if scale <= 0.9 {
        1
    } else {
        2
    };
    let row = "E".repeat(width);
    build_sprite(&[row.as_str()], &[('E', ch, color)])
}

fn mouth(polarity: MouthPolarity, color: Color) -> Sprite {
    let pattern = match polarity {
        MouthPolarity::Smile => "╰──╯",
        MouthPolarity::Neutral => " ω  ",
        MouthPolarity::Frown => "╭──╮",
    };
    let keys: Vec<(char, char, Color)> = pattern
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| (c, c, color))
        .collect();
    build_sprite(&[pattern], &keys)
}
