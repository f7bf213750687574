//! Loading indicator: a small spinner + count rendered at the right end of
//! the status bar while thumbnails are still decoding.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// "⠋ 12 loading" indicator; invisible once nothing is pending.
pub struct LoadingIndicator {
    /// Thumbnails still decoding.
    pub pending: usize,
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
}

impl LoadingIndicator {
    fn label(&self) -> String {
        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        format!(" {frame} {} loading ", self.pending)
    }
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.pending == 0 || area.height == 0 {
            return;
        }
        let label = self.label();
        let label_width = label.chars().count() as u16;
        if area.width < label_width {
            return;
        }
        let x = area.x + area.width - label_width;
        let line = Line::from(Span::styled(label, Theme::spinner_style()));
        buf.set_line(x, area.y, &line, label_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_when_nothing_pending() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        LoadingIndicator { pending: 0, tick: 3 }.render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_right_aligned_with_count() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        LoadingIndicator { pending: 7, tick: 0 }.render(area, &mut buf);
        // " ⠋ 7 loading " is 13 columns wide.
        assert_eq!(buf[(17, 0)].symbol(), " ");
        assert_eq!(buf[(18, 0)].symbol(), "⠋");
        assert_eq!(buf[(20, 0)].symbol(), "7");
    }
}
