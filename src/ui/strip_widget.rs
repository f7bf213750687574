//! Strip widget: one bordered row of thumbnail cards with prev/next
//! buttons, clipped to its viewport at the current scroll offset.
//!
//! Cards are drawn into a scratch buffer first and then copied column by
//! column, so a card cut by the viewport edge shows exactly its visible
//! slice.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::app::strip::{Strip, StripItem, ThumbState};

use super::halfblocks::render_halfblocks;
use super::layout::StripArea;
use super::theme::Theme;

pub struct StripWidget<'a> {
    pub strip: &'a Strip,
    pub area: StripArea,
    pub focused: bool,
    /// Visibility slack used for the "3–5 of 12" position label.
    pub tolerance: f64,
}

impl<'a> StripWidget<'a> {
    fn position_label(&self) -> String {
        let total = self.strip.items.len();
        match self.strip.fully_visible_range(self.tolerance) {
            Some((first, last)) if first == last => format!(" {} of {total} ", first + 1),
            Some((first, last)) => format!(" {}–{} of {total} ", first + 1, last + 1),
            None => format!(" {total} images "),
        }
    }
}

impl<'a> Widget for StripWidget<'a> {
    fn render(self, _area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::strip_border_style(self.focused))
            .title(Line::from(vec![
                Span::styled(format!(" {} ", self.strip.title()), Theme::title_style()),
                Span::styled(self.position_label(), Theme::position_style()),
            ]));
        block.render(self.area.block, buf);

        render_button(
            "◀",
            self.area.prev_button,
            !self.strip.at_start(),
            buf,
        );
        render_button("▶", self.area.next_button, !self.strip.at_end(), buf);

        let viewport = self.area.viewport;
        let scroll = self.strip.scroll_offset().round() as i64;
        let card_h = self.strip.sizing.card_rows().min(viewport.height);
        for item in &self.strip.items {
            let screen_x = i64::from(viewport.x) + i64::from(item.x) - scroll;
            let screen_right = screen_x + i64::from(item.width);
            if screen_right <= i64::from(viewport.x)
                || screen_x >= i64::from(viewport.x + viewport.width)
            {
                continue;
            }
            render_card_clipped(item, screen_x, card_h, viewport, buf);
        }
    }
}

fn render_button(glyph: &str, area: Rect, enabled: bool, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    Paragraph::new(Line::from(Span::styled(
        format!(" {glyph} "),
        Theme::button_style(enabled),
    )))
    .render(Rect::new(area.x, y, area.width, 1), buf);
}

/// Draw `item` at `screen_x` (possibly off the left edge) and keep only the
/// columns inside `viewport`.
fn render_card_clipped(item: &StripItem, screen_x: i64, height: u16, viewport: Rect, buf: &mut Buffer) {
    let card = Rect::new(0, 0, item.width, height);
    let mut scratch = Buffer::empty(card);
    render_card(item, card, &mut scratch);

    let vp_left = i64::from(viewport.x);
    let vp_right = vp_left + i64::from(viewport.width);
    for col in 0..item.width {
        let x = screen_x + i64::from(col);
        if x < vp_left || x >= vp_right {
            continue;
        }
        for row in 0..height {
            let Some(src) = scratch.cell(Position::new(col, row)) else {
                continue;
            };
            if let Some(dst) = buf.cell_mut(Position::new(x as u16, viewport.y + row)) {
                *dst = src.clone();
            }
        }
    }
}

/// Card = rounded border, thumbnail, name label on the last inner row.
fn render_card(item: &StripItem, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::card_border_style());
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let thumb_area = Rect::new(inner.x, inner.y, inner.width, inner.height.saturating_sub(1));
    let label_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);

    match &item.thumb {
        ThumbState::Ready(image) => render_halfblocks(image, thumb_area, buf),
        ThumbState::Loading => render_centered("…", thumb_area, Theme::placeholder_style(), buf),
        ThumbState::Failed => render_centered("✗", thumb_area, Theme::error_style(), buf),
    }

    let label = truncate_label(&item.entry.name, usize::from(inner.width));
    Paragraph::new(Line::from(Span::styled(label, Theme::card_label_style())).centered())
        .render(label_area, buf);
}

fn render_centered(text: &str, area: Rect, style: ratatui::style::Style, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    Paragraph::new(Line::from(Span::styled(text.to_string(), style)).centered())
        .render(Rect::new(area.x, y, area.width, 1), buf);
}

/// Shorten `name` to `max` columns, keeping the extension end visible.
fn truncate_label(name: &str, max: usize) -> String {
    let count = name.chars().count();
    if count <= max {
        return name.to_string();
    }
    if max <= 1 {
        return "…".repeat(max);
    }
    let tail: String = name.chars().skip(count - (max - 1)).collect();
    format!("…{tail}")
}
