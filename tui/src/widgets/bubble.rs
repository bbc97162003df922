//! Speech Bubble and Caption Widgets
//!
//! The bubble wraps its text to the available width and draws a rounded
//! border with a tail pointing down at the robot. The caption is the
//! optional headline (and subline) rendered underneath.

use mascot_core::{AccentTone, Caption};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

use crate::theme::{accent_color, DIM_GRAY};

/// Border plus padding on each side
const H_CHROME: u16 = 4;
/// Top border, bottom border, tail
const V_CHROME: u16 = 3;

/// Rounded speech bubble above the robot
pub struct SpeechBubble<'a> {
    text: &'a str,
    accent: AccentTone,
}

impl<'a> SpeechBubble<'a> {
    /// Create a bubble for `text`, bordered in the accent color
    pub fn new(text: &'a str, accent: AccentTone) -> Self {
        Self { text, accent }
    }

    fn lines(&self, max_width: u16) -> Vec<String> {
        let inner = usize::from(max_width.saturating_sub(H_CHROME)).max(1);
        let wrapped: Vec<String> = wrap(self.text, inner)
            .into_iter()
            .map(|cow| cow.to_string())
            .collect();
        if wrapped.is_empty() {
            vec![String::new()]
        } else {
            wrapped
        }
    }

    /// Rows needed when given `width` columns
    #[must_use]
    pub fn height(&self, width: u16) -> u16 {
        u16::try_from(self.lines(width).len()).unwrap_or(u16::MAX) + V_CHROME
    }
}

impl Widget for SpeechBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < H_CHROME + 1 || area.height < V_CHROME + 1 {
            return;
        }

        let lines = self.lines(area.width);
        let text_width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
        let inner = u16::try_from(text_width).unwrap_or(area.width).min(area.width - H_CHROME);
        let box_width = inner + H_CHROME;
        let x = area.x + (area.width - box_width) / 2;

        let border = Style::default().fg(DIM_GRAY);
        let text = Style::default().fg(accent_color(self.accent));

        let horizontal = "─".repeat(usize::from(box_width - 2));
        buf.set_string(x, area.y, format!("╭{horizontal}╮"), border);

        let visible = usize::from(area.height - V_CHROME);
        let shown = lines.len().min(visible);
        for (i, line) in lines.iter().take(shown).enumerate() {
            let y = area.y + 1 + i as u16;
            buf.set_string(x, y, "│", border);
            buf.set_stringn(x + 2, y, line, usize::from(inner), text);
            buf.set_string(x + box_width - 1, y, "│", border);
        }

        let bottom_y = area.y + 1 + shown as u16;
        buf.set_string(x, bottom_y, format!("╰{horizontal}╯"), border);
        let tail_x = x + box_width / 2;
        buf.set_string(tail_x, bottom_y, "┬", border);
        buf.set_string(tail_x, bottom_y + 1, "╵", border);
    }
}

/// Headline with an optional subline, centered
pub struct CaptionWidget<'a> {
    caption: &'a Caption,
    accent: AccentTone,
}

impl<'a> CaptionWidget<'a> {
    /// Create a caption widget
    pub fn new(caption: &'a Caption, accent: AccentTone) -> Self {
        Self { caption, accent }
    }

    /// Rows the caption occupies
    #[must_use]
    pub fn height(&self) -> u16 {
        if self.caption.subline.is_some() {
            2
        } else {
            1
        }
    }
}

impl Widget for CaptionWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }

        let headline = Style::default()
            .fg(accent_color(self.accent))
            .add_modifier(Modifier::BOLD);
        centered(buf, area, area.y, &self.caption.headline, headline);

        if let Some(subline) = &self.caption.subline {
            if area.height > 1 {
                centered(buf, area, area.y + 1, subline, Style::default().fg(DIM_GRAY));
            }
        }
    }
}

fn centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let width = u16::try_from(text.width()).unwrap_or(area.width).min(area.width);
    let x = area.x + (area.width - width) / 2;
    buf.set_stringn(x, y, text, usize::from(area.width), style);
}
