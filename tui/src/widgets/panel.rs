//! Mascot panel: bubble, robot and caption stacked vertically

use mascot_core::Mascot;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::widgets::Widget;

use super::bubble::{CaptionWidget, SpeechBubble};
use super::mascot::{robot_size, MascotWidget};

/// Everything one mascot instance shows
pub struct MascotPanel<'a> {
    mascot: &'a Mascot,
}

impl<'a> MascotPanel<'a> {
    /// Create a panel for a mascot instance
    pub fn new(mascot: &'a Mascot) -> Self {
        Self { mascot }
    }
}

impl Widget for MascotPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = self.mascot.frame();
        let view = self.mascot.view();

        let bubble = view
            .bubble
            .as_deref()
            .map(|text| SpeechBubble::new(text, view.accent));
        let caption = view
            .caption
            .as_ref()
            .map(|caption| CaptionWidget::new(caption, view.accent));

        let bubble_height = bubble.as_ref().map_or(0, |b| b.height(area.width));
        let caption_height = caption.as_ref().map_or(0, CaptionWidget::height);
        let (_, robot_height) = robot_size(frame.scale);

        let [bubble_area, robot_area, caption_area] = Layout::vertical([
            Constraint::Length(bubble_height),
            Constraint::Length(robot_height),
            Constraint::Length(caption_height),
        ])
        .flex(Flex::Center)
        .areas(area);

        if let Some(bubble) = bubble {
            bubble.render(bubble_area, buf);
        }
        MascotWidget::new(&frame).render(robot_area, buf);
        if let Some(caption) = caption {
            caption.render(caption_area, buf);
        }
    }
}
