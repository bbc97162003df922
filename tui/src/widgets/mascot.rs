//! Mascot Widget
//!
//! Paints a sampled [`MascotFrame`] into a buffer. Layers are drawn back to
//! front; non-space cells overwrite whatever is below them, so a layer's
//! transparent cells let the layers underneath show through.

use mascot_core::MascotFrame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::Widget;

use crate::avatar::parts::{anchor, sprite_for, PX_PER_COL, PX_PER_ROW, ROBOT_HEIGHT, ROBOT_WIDTH};
use crate::avatar::sprites::Sprite;

/// Layers fainter than this are skipped
const MIN_OPACITY: f32 = 0.5;

/// Cells the robot occupies at a given scale
#[must_use]
pub fn robot_size(scale: f32) -> (u16, u16) {
    let scaled = |len: u16| ((f32::from(len) * scale).round() as u16).max(1);
    (scaled(ROBOT_WIDTH), scaled(ROBOT_HEIGHT))
}

/// Draws one mascot frame, centered horizontally in its area
pub struct MascotWidget<'a> {
    frame: &'a MascotFrame,
}

impl<'a> MascotWidget<'a> {
    /// Create a widget for one sampled frame
    pub fn new(frame: &'a MascotFrame) -> Self {
        Self { frame }
    }
}

impl Widget for MascotWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let scale = self.frame.scale;
        let (width, _) = robot_size(scale);
        let origin_x = i32::from(area.x) + i32::from(area.width.saturating_sub(width) / 2);
        let origin_y = i32::from(area.y);

        let wrapper = self.frame.wrapper;

        for layer in &self.frame.layers {
            if layer.pose.opacity < MIN_OPACITY {
                continue;
            }
            let Some(sprite) = sprite_for(layer.layer, layer.detail, &layer.pose) else {
                continue;
            };

            let (ax, ay) = anchor(layer.layer);
            let dx = (layer.pose.dx + wrapper.dx) / PX_PER_COL;
            let dy = (layer.pose.dy + wrapper.dy) / PX_PER_ROW;
            let x = origin_x + ((ax as f32 + dx) * scale).round() as i32;
            let y = origin_y + ((ay as f32 + dy) * scale).round() as i32;

            blit(buf, area, &sprite.scaled(scale), x, y);
        }
    }
}

/// Copy a sprite's opaque cells into the buffer, clipped to `clip`
fn blit(buf: &mut Buffer, clip: Rect, sprite: &Sprite, x: i32, y: i32) {
    for sy in 0..sprite.height {
        for sx in 0..sprite.width {
            let cell = sprite.get(sx, sy);
            if cell.is_empty() {
                continue;
            }

            let (Ok(dst_x), Ok(dst_y)) = (
                u16::try_from(x + i32::from(sx)),
                u16::try_from(y + i32::from(sy)),
            ) else {
                continue;
            };
            let pos = Position::new(dst_x, dst_y);
            if !clip.contains(pos) {
                continue;
            }

            if let Some(dst) = buf.cell_mut(pos) {
                dst.set_char(cell.ch).set_fg(cell.fg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use mascot_core::{compose, HandCoverMode, Mood, RenderInput, Timelines};

    fn frame(covering_eyes: bool, scale: f32) -> MascotFrame {
        let timelines = Timelines::default();
        let input = RenderInput {
            mood: Mood::Idle,
            hand_cover_mode: if covering_eyes {
                HandCoverMode::Two
            } else {
                HandCoverMode::None
            },
            covering_eyes,
            scale,
            floating: false,
        };
        compose(&input, &timelines).sample(&timelines, Duration::ZERO)
    }

    fn painted(buf: &Buffer) -> usize {
        buf.content.iter().filter(|c| c.symbol() != " ").count()
    }

    #[test]
    fn test_robot_fits_its_size() {
        let area = Rect::new(0, 0, ROBOT_WIDTH, ROBOT_HEIGHT);
        let mut buf = Buffer::empty(area);
        MascotWidget::new(&frame(false, 1.0)).render(area, &mut buf);

        assert!(painted(&buf) > 50);
    }

    #[test]
    fn test_md_paints_fewer_cells() {
        let area = Rect::new(0, 0, ROBOT_WIDTH, ROBOT_HEIGHT);

        let mut lg = Buffer::empty(area);
        MascotWidget::new(&frame(false, 1.0)).render(area, &mut lg);
        let mut md = Buffer::empty(area);
        MascotWidget::new(&frame(false, 0.75)).render(area, &mut md);

        assert!(painted(&md) < painted(&lg));
        assert_eq!(robot_size(0.75), (17, 9));
    }

    #[test]
    fn test_clipped_to_area() {
        let full = Rect::new(0, 0, 40, 20);
        let area = Rect::new(5, 5, 6, 3);
        let mut buf = Buffer::empty(full);
        MascotWidget::new(&frame(true, 1.0)).render(area, &mut buf);

        for y in 0..full.height {
            for x in 0..full.width {
                let pos = Position::new(x, y);
                if !area.contains(pos) {
                    assert_eq!(buf[pos].symbol(), " ");
                }
            }
        }
    }
}
