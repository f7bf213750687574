//! Visibility-aware carousel stepping.
//!
//! Given a viewport clipping a wider track of variable-width items, decide
//! how far to scroll so that a "next" or "previous" step always lands with
//! the next partially hidden item fully revealed, plus a small landing
//! margin.  Geometry is measured from the host on every call and never
//! cached: item widths and the viewport may change between steps.

use super::geometry::{ContainerRect, Geometry, ItemSpan};

// ─── host seam ──────────────────────────────────────────────────

/// How the host should apply a requested scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Animate toward the target with the host's smooth-scroll primitive.
    Smooth,
    /// Jump immediately.
    Instant,
}

/// A scroll container the scroller can measure and drive.
pub trait ScrollHost {
    /// `false` while the host has nothing to bind to (e.g. no viewport has
    /// been laid out yet).  Unbound hosts are skipped, not errors.
    fn is_attached(&self) -> bool {
        true
    }

    fn measure_container(&self) -> ContainerRect;

    /// Item extents in reading order.
    fn measure_items(&self) -> Vec<ItemSpan>;

    /// Ask the host to move its scroll offset.  The host clamps natively.
    fn request_scroll(&mut self, target: f64, behavior: ScrollBehavior);

    fn measure(&self) -> Geometry {
        Geometry {
            container: self.measure_container(),
            items: self.measure_items(),
        }
    }
}

// ─── intents ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Horizontal and vertical magnitude of one gesture event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureDelta {
    pub dx: f64,
    pub dy: f64,
}

impl GestureDelta {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Whether a gesture was consumed.  `Handled` means the host must suppress
/// its default handling of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Handled,
    Ignored,
}

impl GestureOutcome {
    pub fn suppresses_default(self) -> bool {
        self == GestureOutcome::Handled
    }
}

// ─── tuning ─────────────────────────────────────────────────────

/// Slack values used by [`plan_step`].
///
/// `tolerance` decides whether an item counts as fully visible;
/// `settle_threshold` decides whether a computed move is too small to animate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTolerances {
    /// An edge may overhang the viewport by this much and still count as visible.
    pub tolerance: f64,
    /// Margin left between a revealed item and the viewport edge.
    pub landing_pad: f64,
    /// Moves of this magnitude or less are dropped.
    pub settle_threshold: f64,
}

impl Default for ScrollTolerances {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            landing_pad: 12.0,
            settle_threshold: 2.0,
        }
    }
}

// ─── planning (pure) ────────────────────────────────────────────

/// First item whose right edge sticks out past the viewport's right edge.
pub fn find_next_not_fully_visible<'a>(
    geometry: &'a Geometry,
    tolerance: f64,
) -> Option<&'a ItemSpan> {
    let right = geometry.container.right;
    geometry.items.iter().find(|item| item.right > right + tolerance)
}

/// Last item whose left edge sticks out past the viewport's left edge.
pub fn find_prev_not_fully_visible<'a>(
    geometry: &'a Geometry,
    tolerance: f64,
) -> Option<&'a ItemSpan> {
    let left = geometry.container.left;
    geometry
        .items
        .iter()
        .rev()
        .find(|item| item.left < left - tolerance)
}

/// Decide the scroll offset a step should request, or `None` for a no-op.
///
/// The returned offset is always within `[0, max_scroll_left]`.
pub fn plan_step(
    geometry: &Geometry,
    direction: Direction,
    tolerances: &ScrollTolerances,
) -> Option<f64> {
    let c = &geometry.container;
    let settle = tolerances.settle_threshold;

    match direction {
        Direction::Next => {
            let Some(item) = find_next_not_fully_visible(geometry, tolerances.tolerance) else {
                // Everything to the right is visible: settle at the very end.
                let end = c.max_scroll_left();
                return ((c.scroll_left - end).abs() > settle).then_some(end);
            };
            let delta = (item.right - c.right) + tolerances.landing_pad;
            if delta.abs() <= settle {
                return None;
            }
            Some(c.clamp(c.scroll_left + delta))
        }
        Direction::Prev => {
            let Some(item) = find_prev_not_fully_visible(geometry, tolerances.tolerance) else {
                return (c.scroll_left > settle).then_some(0.0);
            };
            let delta = (item.left - c.left) - tolerances.landing_pad;
            if delta.abs() <= settle {
                return None;
            }
            Some(c.clamp(c.scroll_left + delta))
        }
    }
}

// ─── scroller ───────────────────────────────────────────────────

/// Carousel navigation bound to one scroll host.
///
/// Holds no state beyond the binding itself, so binding per event is fine.
pub struct VisibilityScroller<'h, H: ScrollHost + ?Sized> {
    host: &'h mut H,
    tolerances: ScrollTolerances,
}

impl<'h, H: ScrollHost + ?Sized> VisibilityScroller<'h, H> {
    /// Bind to `host`, or `None` if the host is not attached.
    pub fn bind(host: &'h mut H, tolerances: ScrollTolerances) -> Option<Self> {
        if !host.is_attached() {
            return None;
        }
        Some(Self { host, tolerances })
    }

    /// Step one item in `direction`.  Returns the offset that was requested,
    /// or `None` when no scroll was needed.
    pub fn step(&mut self, direction: Direction) -> Option<f64> {
        let geometry = self.host.measure();
        let target = plan_step(&geometry, direction, &self.tolerances);
        match target {
            Some(target) => {
                tracing::debug!(
                    ?direction,
                    from = geometry.container.scroll_left,
                    to = target,
                    "carousel step"
                );
                self.host.request_scroll(target, ScrollBehavior::Smooth);
            }
            None => {
                tracing::trace!(?direction, at = geometry.container.scroll_left, "step settled");
            }
        }
        target
    }

    /// Apply a trackpad/wheel gesture if it is predominantly horizontal.
    ///
    /// The offset is moved immediately by `dx`; clamping is left to the host.
    pub fn handle_horizontal_delta(&mut self, delta: GestureDelta) -> GestureOutcome {
        if delta.dx.abs() <= delta.dy.abs() {
            return GestureOutcome::Ignored;
        }
        let current = self.host.measure_container().scroll_left;
        self.host
            .request_scroll(current + delta.dx, ScrollBehavior::Instant);
        GestureOutcome::Handled
    }
}
