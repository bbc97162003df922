//! Sprite Definitions
//!
//! Blocky pixel art using Unicode block elements and colors.
//! Each cell has its own foreground color; spaces are transparent.

use std::collections::HashMap;

use ratatui::style::Color;

/// A single colored cell in a sprite
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColoredCell {
    /// The character to display
    pub ch: char,
    /// Foreground color
    pub fg: Color,
}

impl ColoredCell {
    /// Create a new colored cell
    pub const fn new(ch: char, fg: Color) -> Self {
        Self { ch, fg }
    }

    /// Empty/transparent cell
    pub const fn empty() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }

    /// Check if cell is empty/transparent
    pub fn is_empty(&self) -> bool {
        self.ch == ' '
    }
}

/// A grid of colored cells for one body part
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sprite {
    /// 2D grid of colored cells (row-major)
    pub cells: Vec<Vec<ColoredCell>>,
    /// Width in terminal cells
    pub width: u16,
    /// Height in terminal cells
    pub height: u16,
}

impl Sprite {
    /// Create a sprite from a grid of colored cells
    pub fn new(cells: Vec<Vec<ColoredCell>>) -> Self {
        let height = u16::try_from(cells.len()).unwrap_or(u16::MAX);
        let width = cells
            .iter()
            .map(|row| u16::try_from(row.len()).unwrap_or(u16::MAX))
            .max()
            .unwrap_or(0);

        Self {
            cells,
            width,
            height,
        }
    }

    /// Get cell at position (returns empty if out of bounds)
    pub fn get(&self, x: u16, y: u16) -> &ColoredCell {
        static EMPTY: ColoredCell = ColoredCell::empty();
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .unwrap_or(&EMPTY)
    }

    /// Nearest-neighbour resample by `factor`; factors of 1.0 and above
    /// return the sprite unchanged
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Sprite {
        if factor >= 1.0 || self.width == 0 || self.height == 0 {
            return self.clone();
        }

        let width = scaled_len(self.width, factor);
        let height = scaled_len(self.height, factor);

        let cells = (0..height)
            .map(|y| {
                let src_y = source_index(y, height, self.height);
                (0..width)
                    .map(|x| *self.get(source_index(x, width, self.width), src_y))
                    .collect()
            })
            .collect();

        Sprite::new(cells)
    }
}

fn scaled_len(len: u16, factor: f32) -> u16 {
    let scaled = (f32::from(len) * factor).round();
    // at least one cell; never larger than the source
    (scaled as u16).clamp(1, len)
}

fn source_index(dst: u16, dst_len: u16, src_len: u16) -> u16 {
    let idx = u32::from(dst) * u32::from(src_len) / u32::from(dst_len);
    u16::try_from(idx).unwrap_or(src_len - 1).min(src_len - 1)
}

// ============================================================================
// Sprite Builder Helpers
// ============================================================================

/// Parse a sprite definition using a color map
///
/// Format: each character in the pattern maps to a (char, Color) in the palette.
/// Special: ' ' (space) is always transparent.
///
/// Example:
/// ```ignore
/// let palette = [('S', '█', ROBOT_SHELL), ('F', '█', ROBOT_FACEPLATE)];
/// let pattern = [
///     "SSSS",
///     "SFFS",
/// ];
/// ```
pub fn build_sprite(pattern: &[&str], palette: &[(char, char, Color)]) -> Sprite {
    let color_map: HashMap<char, (char, Color)> = palette
        .iter()
        .map(|&(key, ch, color)| (key, (ch, color)))
        .collect();

    let cells: Vec<Vec<ColoredCell>> = pattern
        .iter()
        .map(|line| {
            line.chars()
                .map(|c| {
                    if c == ' ' {
                        ColoredCell::empty()
                    } else if let Some(&(ch, color)) = color_map.get(&c) {
                        ColoredCell::new(ch, color)
                    } else {
                        // Not in the palette - draw literally
                        ColoredCell::new(c, Color::Reset)
                    }
                })
                .collect()
        })
        .collect();

    Sprite::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PALETTE: &[(char, char, Color)] = &[('A', '█', Color::Red), ('B', '▀', Color::Blue)];

    #[test]
    fn test_build_sprite_dimensions() {
        let sprite = build_sprite(&["AA ", "BBBB"], PALETTE);

        assert_eq!(sprite.width, 4);
        assert_eq!(sprite.height, 2);
        assert_eq!(*sprite.get(0, 0), ColoredCell::new('█', Color::Red));
        assert!(sprite.get(2, 0).is_empty());
        assert!(sprite.get(9, 9).is_empty());
    }

    #[test]
    fn test_unknown_key_is_literal() {
        let sprite = build_sprite(&["╰──╯"], PALETTE);
        assert_eq!(sprite.get(0, 0).ch, '╰');
    }

    #[test]
    fn test_scaled_down() {
        let sprite = build_sprite(&["AAAA", "AAAA", "BBBB", "BBBB"], PALETTE);
        let small = sprite.scaled(0.75);

        assert_eq!((small.width, small.height), (3, 3));
        assert_eq!(small.get(0, 0).ch, '█');
        assert_eq!(small.get(0, 2).ch, '▀');
    }

    #[test]
    fn test_scaled_never_vanishes() {
        let sprite = build_sprite(&["A"], PALETTE);
        let small = sprite.scaled(0.1);
        assert_eq!((small.width, small.height), (1, 1));
    }

    #[test]
    fn test_full_scale_is_identity() {
        let sprite = build_sprite(&["AB", "BA"], PALETTE);
        assert_eq!(sprite.scaled(1.0), sprite);
    }
}
