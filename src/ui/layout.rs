//! Layout helpers: split the terminal into strip rows and a status bar.
//!
//! Pure geometry shared by the renderer and mouse hit-testing.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the `◀` / `▶` button columns on either side of a viewport.
pub const BUTTON_COLS: u16 = 3;

/// Regions of one strip row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripArea {
    /// Index into the strip list.
    pub index: usize,
    /// Bordered block around the whole row.
    pub block: Rect,
    pub prev_button: Rect,
    /// Clipping region for the cards.
    pub viewport: Rect,
    pub next_button: Rect,
}

/// Primary screen layout: stacked strip rows plus a one-line status bar.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub strips: Vec<StripArea>,
    pub strips_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    ///
    /// `row_height` is the full height of one strip row (border included).
    /// Rows start at `first_visible`; rows that do not fit are left out.
    pub fn from_area(area: Rect, strip_count: usize, row_height: u16, first_visible: usize) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // strip rows
                Constraint::Length(1), // status bar
            ])
            .split(area);
        let strips_area = chunks[0];

        let capacity = Self::capacity(strips_area.height, row_height);
        let mut strips = Vec::new();
        let mut y = strips_area.y;
        for index in first_visible..strip_count.min(first_visible + capacity) {
            let block = Rect::new(strips_area.x, y, strips_area.width, row_height);
            if let Some(strip_area) = split_row(index, block) {
                strips.push(strip_area);
            }
            y += row_height;
        }

        Self {
            strips,
            strips_area,
            status_area: chunks[1],
        }
    }

    /// How many full rows of `row_height` fit in `height`.
    pub fn capacity(height: u16, row_height: u16) -> usize {
        if row_height == 0 {
            return 0;
        }
        usize::from(height / row_height)
    }

    /// The strip row containing the given cell, if any.
    pub fn strip_at(&self, column: u16, row: u16) -> Option<&StripArea> {
        self.strips
            .iter()
            .find(|s| point_in_rect(s.block, column, row))
    }
}

/// Carve a bordered row into buttons and viewport.  `None` when the row is
/// too narrow to hold both buttons and at least one viewport column.
fn split_row(index: usize, block: Rect) -> Option<StripArea> {
    if block.width < 2 + BUTTON_COLS * 2 + 1 || block.height < 3 {
        return None;
    }
    let inner = Rect::new(block.x + 1, block.y + 1, block.width - 2, block.height - 2);
    let prev_button = Rect::new(inner.x, inner.y, BUTTON_COLS, inner.height);
    let next_button = Rect::new(
        inner.x + inner.width - BUTTON_COLS,
        inner.y,
        BUTTON_COLS,
        inner.height,
    );
    let viewport = Rect::new(
        inner.x + BUTTON_COLS,
        inner.y,
        inner.width - BUTTON_COLS * 2,
        inner.height,
    );
    Some(StripArea {
        index,
        block,
        prev_button,
        viewport,
        next_button,
    })
}

pub fn point_in_rect(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Adjust the first visible row so that `focused` stays on screen.
pub fn scroll_to_show(first: usize, focused: usize, capacity: usize, count: usize) -> usize {
    if capacity == 0 || count == 0 {
        return 0;
    }
    let max_first = count.saturating_sub(capacity);
    let first = if focused < first {
        focused
    } else if focused >= first + capacity {
        focused + 1 - capacity
    } else {
        first
    };
    first.min(max_first)
}
