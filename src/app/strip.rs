//! Strip model: one horizontally scrolling row of thumbnail cards.
//!
//! A `Strip` is the scroll container the carousel logic drives: it lays its
//! cards out on a track, owns the scroll animation, and answers geometry
//! queries in screen columns.

use std::path::PathBuf;
use std::sync::Arc;

use crate::core::geometry::{ContainerRect, ItemSpan};
use crate::core::scan::ImageEntry;
use crate::core::scroller::{ScrollBehavior, ScrollHost};
use crate::ui::smooth_scroll::SmoothScroll;

/// Columns between neighbouring cards.
pub const CARD_GAP: u16 = 1;
/// Border columns (left + right) around a card's thumbnail.
pub const CARD_CHROME_COLS: u16 = 2;
/// Rows a card adds around its thumbnail (top border, label, bottom border).
pub const CARD_CHROME_ROWS: u16 = 3;

/// How image dimensions map to card sizes.
#[derive(Debug, Clone, Copy)]
pub struct ItemSizing {
    /// Terminal rows used by each thumbnail (two pixel rows per cell).
    pub thumb_rows: u16,
    pub min_cols: u16,
    pub max_cols: u16,
}

impl Default for ItemSizing {
    fn default() -> Self {
        Self {
            thumb_rows: 8,
            min_cols: 6,
            max_cols: 48,
        }
    }
}

impl ItemSizing {
    /// Thumbnail width in columns, keeping the image's aspect ratio.
    pub fn thumb_cols(&self, width_px: u32, height_px: u32) -> u16 {
        if height_px == 0 {
            return self.min_cols;
        }
        let pixel_rows = f64::from(self.thumb_rows) * 2.0;
        let cols = (f64::from(width_px) / f64::from(height_px) * pixel_rows).round();
        let lo = self.min_cols.max(1);
        let hi = self.max_cols.max(lo);
        (cols as u16).clamp(lo, hi)
    }

    /// Full card height in rows.
    pub fn card_rows(&self) -> u16 {
        self.thumb_rows + CARD_CHROME_ROWS
    }
}

/// Decode state of a card's thumbnail.
#[derive(Debug, Clone)]
pub enum ThumbState {
    Loading,
    Ready(Arc<image::RgbaImage>),
    Failed,
}

#[derive(Debug, Clone)]
pub struct StripItem {
    pub entry: ImageEntry,
    /// Left edge on the track (unscrolled).  Wider than a screen coordinate:
    /// large directories run well past `u16::MAX` columns.
    pub x: u32,
    /// Card width including its border.
    pub width: u16,
    pub thumb_cols: u16,
    pub thumb: ThumbState,
}

impl StripItem {
    pub fn right(&self) -> u32 {
        self.x.saturating_add(u32::from(self.width))
    }
}

/// Visible region assigned by the last layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone)]
pub struct Strip {
    pub dir: PathBuf,
    pub items: Vec<StripItem>,
    pub sizing: ItemSizing,
    viewport: Option<Viewport>,
    scroll: SmoothScroll,
}

impl Strip {
    /// Lay out `entries` as cards.  `None` when there is nothing to show:
    /// an empty directory never becomes a strip.
    pub fn new(
        dir: PathBuf,
        entries: Vec<ImageEntry>,
        sizing: ItemSizing,
        scroll_speed: f64,
    ) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let mut x = 0u32;
        let items = entries
            .into_iter()
            .map(|entry| {
                let thumb_cols = sizing.thumb_cols(entry.width_px, entry.height_px);
                let width = thumb_cols + CARD_CHROME_COLS;
                let item = StripItem {
                    entry,
                    x,
                    width,
                    thumb_cols,
                    thumb: ThumbState::Loading,
                };
                x = x.saturating_add(u32::from(width + CARD_GAP));
                item
            })
            .collect();

        Some(Self {
            dir,
            items,
            sizing,
            viewport: None,
            scroll: SmoothScroll::new(scroll_speed),
        })
    }

    /// Display title: the directory's own name, falling back to the path.
    pub fn title(&self) -> String {
        self.dir
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| self.dir.display().to_string())
    }

    // ── layout ───────────────────────────────────────────────────

    /// Assign (or withdraw) the visible region.  The offset is re-clamped so
    /// a wider viewport never leaves blank space past the last card.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
        if viewport.is_none() {
            return;
        }
        let max = self.max_scroll();
        if self.scroll.position() > max {
            self.scroll.jump_to(max);
        } else if self.scroll.target() > max {
            self.scroll.set_target(max);
        }
    }

    /// Right edge of the last card on the track.
    pub fn track_width(&self) -> f64 {
        self.items
            .iter()
            .map(|i| f64::from(i.right()))
            .fold(0.0, f64::max)
    }

    pub fn max_scroll(&self) -> f64 {
        let width = self.viewport.map_or(0.0, |v| v.width);
        (self.track_width() - width).max(0.0)
    }

    // ── scroll state ─────────────────────────────────────────────

    /// Offset currently on screen (may be mid-animation).
    pub fn scroll_offset(&self) -> f64 {
        self.scroll.position()
    }

    /// Advance the scroll animation one frame.  Returns `true` while moving.
    pub fn tick(&mut self) -> bool {
        self.scroll.tick();
        self.scroll.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    pub fn at_start(&self) -> bool {
        self.scroll.target() <= 0.5
    }

    pub fn at_end(&self) -> bool {
        self.scroll.target() >= self.max_scroll() - 0.5
    }

    pub fn scroll_to_start(&mut self) {
        self.request_scroll(0.0, ScrollBehavior::Smooth);
    }

    pub fn scroll_to_end(&mut self) {
        let end = self.max_scroll();
        self.request_scroll(end, ScrollBehavior::Smooth);
    }

    /// Indices of the first and last cards lying fully inside the viewport.
    pub fn fully_visible_range(&self, tolerance: f64) -> Option<(usize, usize)> {
        let container = self.viewport.map(|_| self.measure_container())?;
        let spans = self.measure_items();
        let visible = |s: &ItemSpan| {
            s.left >= container.left - tolerance && s.right <= container.right + tolerance
        };
        let first = spans.iter().position(visible)?;
        let last = spans.iter().rposition(visible)?;
        Some((first, last))
    }

    pub fn set_thumb(&mut self, index: usize, thumb: ThumbState) {
        if let Some(item) = self.items.get_mut(index) {
            item.thumb = thumb;
        }
    }

    pub fn pending_thumbs(&self) -> usize {
        self.items
            .iter()
            .filter(|i| matches!(i.thumb, ThumbState::Loading))
            .count()
    }
}

impl ScrollHost for Strip {
    fn is_attached(&self) -> bool {
        self.viewport.is_some_and(|v| v.width > 0.0)
    }

    fn measure_container(&self) -> ContainerRect {
        let vp = self.viewport.unwrap_or(Viewport {
            left: 0.0,
            width: 0.0,
        });
        ContainerRect {
            left: vp.left,
            right: vp.left + vp.width,
            scroll_left: self.scroll.position(),
            scroll_width: self.track_width(),
            client_width: vp.width,
        }
    }

    fn measure_items(&self) -> Vec<ItemSpan> {
        let origin = self.viewport.map_or(0.0, |v| v.left) - self.scroll.position();
        self.items
            .iter()
            .map(|i| ItemSpan::new(origin + f64::from(i.x), origin + f64::from(i.right())))
            .collect()
    }

    fn request_scroll(&mut self, target: f64, behavior: ScrollBehavior) {
        let target = target.min(self.max_scroll()).max(0.0);
        match behavior {
            ScrollBehavior::Smooth => self.scroll.set_target(target),
            ScrollBehavior::Instant => self.scroll.jump_to(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scroller::{Direction, GestureDelta, ScrollTolerances, VisibilityScroller};

    fn entry(name: &str, w: u32, h: u32) -> ImageEntry {
        ImageEntry {
            path: PathBuf::from(name),
            name: name.to_string(),
            width_px: w,
            height_px: h,
        }
    }

    /// Cards of 20, 30 and 12 columns (including borders).
    fn sample_strip() -> Strip {
        let sizing = ItemSizing {
            thumb_rows: 4,
            min_cols: 2,
            max_cols: 60,
        };
        let entries = vec![entry("a", 18, 8), entry("b", 28, 8), entry("c", 10, 8)];
        Strip::new(PathBuf::from("/pics/holiday"), entries, sizing, 0.5).expect("non-empty")
    }

    fn settle(strip: &mut Strip) {
        for _ in 0..100 {
            if !strip.tick() {
                break;
            }
        }
    }

    #[test]
    fn test_thumb_cols_follow_aspect_ratio() {
        let sizing = ItemSizing {
            thumb_rows: 8,
            min_cols: 6,
            max_cols: 48,
        };
        assert_eq!(sizing.thumb_cols(100, 100), 16);
        assert_eq!(sizing.thumb_cols(200, 100), 32);
        assert_eq!(sizing.thumb_cols(10, 100), 6);
        assert_eq!(sizing.thumb_cols(1000, 10), 48);
        assert_eq!(sizing.thumb_cols(5, 0), 6);
        assert_eq!(sizing.card_rows(), 11);
    }

    #[test]
    fn test_cards_are_laid_out_with_gaps() {
        let strip = sample_strip();
        let xs: Vec<(u32, u16)> = strip.items.iter().map(|i| (i.x, i.width)).collect();
        assert_eq!(xs, vec![(0, 20), (21, 30), (52, 12)]);
        assert_eq!(strip.track_width(), 64.0);
        assert_eq!(strip.title(), "holiday");
    }

    #[test]
    fn test_long_track_keeps_every_card_reachable() {
        // 4000 cards of 18 columns run far past u16::MAX on the track.
        let entries = (0..4000)
            .map(|i| entry(&format!("{i:04}.png"), 100, 100))
            .collect();
        let mut strip =
            Strip::new(PathBuf::from("/pics/all"), entries, ItemSizing::default(), 0.5)
                .expect("non-empty");
        assert!(strip.items.windows(2).all(|w| w[0].x < w[1].x));
        let last = strip.items.last().expect("non-empty");
        assert_eq!(last.x, 3999 * 19);
        assert_eq!(last.right(), 3999 * 19 + 18);
        assert_eq!(strip.track_width(), f64::from(3999 * 19 + 18));

        strip.set_viewport(Some(Viewport {
            left: 0.0,
            width: 80.0,
        }));
        strip.scroll_to_end();
        settle(&mut strip);
        assert_eq!(strip.scroll_offset(), strip.track_width() - 80.0);
        let spans = strip.measure_items();
        let last = spans.last().expect("non-empty");
        assert_eq!((last.left, last.right), (62.0, 80.0));
        assert_eq!(strip.fully_visible_range(1.0).map(|(_, l)| l), Some(3999));
    }

    #[test]
    fn test_empty_directory_makes_no_strip() {
        assert!(Strip::new(PathBuf::from("x"), Vec::new(), ItemSizing::default(), 0.3).is_none());
    }

    #[test]
    fn test_unattached_until_laid_out() {
        let mut strip = sample_strip();
        assert!(!strip.is_attached());
        assert!(VisibilityScroller::bind(&mut strip, ScrollTolerances::default()).is_none());

        strip.set_viewport(Some(Viewport {
            left: 4.0,
            width: 40.0,
        }));
        assert!(strip.is_attached());
    }

    #[test]
    fn test_measure_is_in_screen_space() {
        let mut strip = sample_strip();
        strip.set_viewport(Some(Viewport {
            left: 4.0,
            width: 40.0,
        }));
        strip.request_scroll(10.0, ScrollBehavior::Instant);

        let c = strip.measure_container();
        assert_eq!((c.left, c.right), (4.0, 44.0));
        assert_eq!(c.scroll_left, 10.0);
        assert_eq!(c.scroll_width, 64.0);

        let items = strip.measure_items();
        assert_eq!(items[0], ItemSpan::new(-6.0, 14.0));
        assert_eq!(items[1], ItemSpan::new(15.0, 45.0));
    }

    #[test]
    fn test_request_scroll_clamps() {
        let mut strip = sample_strip();
        strip.set_viewport(Some(Viewport {
            left: 0.0,
            width: 40.0,
        }));
        strip.request_scroll(500.0, ScrollBehavior::Instant);
        assert_eq!(strip.scroll_offset(), 24.0);
        strip.request_scroll(-3.0, ScrollBehavior::Instant);
        assert_eq!(strip.scroll_offset(), 0.0);

        strip.request_scroll(500.0, ScrollBehavior::Smooth);
        assert_eq!(strip.scroll_offset(), 0.0);
        settle(&mut strip);
        assert_eq!(strip.scroll_offset(), 24.0);
        assert!(strip.at_end());
    }

    #[test]
    fn test_next_steps_through_strip() {
        let mut strip = sample_strip();
        strip.set_viewport(Some(Viewport {
            left: 0.0,
            width: 40.0,
        }));
        let tol = ScrollTolerances {
            tolerance: 1.0,
            landing_pad: 2.0,
            settle_threshold: 2.0,
        };

        // Card b (21..51) overhangs the right edge (40) by 11 -> 13.
        let target = VisibilityScroller::bind(&mut strip, tol).and_then(|mut s| s.step(Direction::Next));
        assert_eq!(target, Some(13.0));
        settle(&mut strip);

        // Card c (52..64) is next; 13 + (51 - 40) + 2 = 26 -> clamped to 24.
        let target = VisibilityScroller::bind(&mut strip, tol).and_then(|mut s| s.step(Direction::Next));
        assert_eq!(target, Some(24.0));
        settle(&mut strip);

        let target = VisibilityScroller::bind(&mut strip, tol).and_then(|mut s| s.step(Direction::Next));
        assert_eq!(target, None);
    }

    #[test]
    fn test_gesture_jumps_and_cancels_animation() {
        let mut strip = sample_strip();
        strip.set_viewport(Some(Viewport {
            left: 0.0,
            width: 40.0,
        }));
        strip.scroll_to_end();
        assert!(strip.is_animating());

        let mut scroller =
            VisibilityScroller::bind(&mut strip, ScrollTolerances::default()).expect("attached");
        assert!(scroller
            .handle_horizontal_delta(GestureDelta::new(3.0, 0.0))
            .suppresses_default());
        assert_eq!(strip.scroll_offset(), 3.0);
        assert!(!strip.is_animating());
    }

    #[test]
    fn test_wider_viewport_reclamps_offset() {
        let mut strip = sample_strip();
        strip.set_viewport(Some(Viewport {
            left: 0.0,
            width: 40.0,
        }));
        strip.request_scroll(24.0, ScrollBehavior::Instant);

        strip.set_viewport(Some(Viewport {
            left: 0.0,
            width: 60.0,
        }));
        assert_eq!(strip.scroll_offset(), 4.0);

        strip.set_viewport(Some(Viewport {
            left: 0.0,
            width: 100.0,
        }));
        assert_eq!(strip.scroll_offset(), 0.0);
        assert!(strip.at_start() && strip.at_end());
    }

    #[test]
    fn test_fully_visible_range() {
        let mut strip = sample_strip();
        assert_eq!(strip.fully_visible_range(1.0), None);

        strip.set_viewport(Some(Viewport {
            left: 0.0,
            width: 40.0,
        }));
        assert_eq!(strip.fully_visible_range(1.0), Some((0, 0)));

        strip.request_scroll(21.0, ScrollBehavior::Instant);
        assert_eq!(strip.fully_visible_range(1.0), Some((1, 1)));

        strip.request_scroll(24.0, ScrollBehavior::Instant);
        assert_eq!(strip.fully_visible_range(1.0), Some((2, 2)));
    }

    #[test]
    fn test_pending_thumbs() {
        let mut strip = sample_strip();
        assert_eq!(strip.pending_thumbs(), 3);
        strip.set_thumb(1, ThumbState::Failed);
        strip.set_thumb(99, ThumbState::Failed);
        assert_eq!(strip.pending_thumbs(), 2);
    }
}
