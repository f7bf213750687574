//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::app::strip::{Strip, Viewport};
use crate::config::AppConfig;
use crate::ui::layout::{scroll_to_show, AppLayout};

/// Top-level application state.
pub struct AppState {
    /// One strip per directory that produced at least one image.
    pub strips: Vec<Strip>,
    /// Index of the strip receiving keyboard navigation.
    pub focused: usize,
    /// First strip row shown on screen.
    pub first_visible: usize,
    pub config: AppConfig,
    /// Full terminal area from the last resize.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Frame counter driving the loading spinner.
    pub tick: u64,
}

impl AppState {
    pub fn new(strips: Vec<Strip>, config: AppConfig) -> Self {
        Self {
            strips,
            focused: 0,
            first_visible: 0,
            config,
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
            tick: 0,
        }
    }

    /// Height of one strip row: cards plus the row's own border.
    pub fn row_height(&self) -> u16 {
        self.config.sizing.card_rows() + 2
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(
            self.terminal_area,
            self.strips.len(),
            self.row_height(),
            self.first_visible,
        )
    }

    /// Recompute which rows are on screen and hand every strip its viewport.
    /// Strips scrolled out of view lose their viewport and stop reacting to
    /// navigation until they come back.
    pub fn apply_layout(&mut self) {
        let strips_height = self.terminal_area.height.saturating_sub(1);
        let capacity = AppLayout::capacity(strips_height, self.row_height());
        self.first_visible =
            scroll_to_show(self.first_visible, self.focused, capacity, self.strips.len());

        let layout = self.layout();
        for (index, strip) in self.strips.iter_mut().enumerate() {
            let viewport = layout
                .strips
                .iter()
                .find(|a| a.index == index)
                .map(|a| Viewport {
                    left: f64::from(a.viewport.x),
                    width: f64::from(a.viewport.width),
                });
            strip.set_viewport(viewport);
        }
    }

    pub fn set_terminal_area(&mut self, area: Rect) {
        if self.terminal_area != area {
            self.terminal_area = area;
            self.apply_layout();
        }
    }

    /// Move focus to `index` (clamped) and bring its row on screen.
    pub fn focus(&mut self, index: usize) {
        if self.strips.is_empty() {
            return;
        }
        let index = index.min(self.strips.len() - 1);
        if index != self.focused {
            self.focused = index;
            self.apply_layout();
        }
    }

    pub fn focused_strip_mut(&mut self) -> Option<&mut Strip> {
        self.strips.get_mut(self.focused)
    }

    /// Advance every scroll animation by one frame.  Returns `true` while any
    /// strip is still moving.
    pub fn tick_animations(&mut self) -> bool {
        self.tick = self.tick.wrapping_add(1);
        let mut moving = false;
        for strip in self.strips.iter_mut().filter(|s| s.is_animating()) {
            moving |= strip.tick();
        }
        moving
    }

    pub fn pending_thumbs(&self) -> usize {
        self.strips.iter().map(Strip::pending_thumbs).sum()
    }
}
