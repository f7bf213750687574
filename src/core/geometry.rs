//! Geometry snapshots read from a scroll host.
//!
//! All values share one horizontal coordinate space (terminal columns in the
//! app, but nothing here assumes a unit).  A snapshot is only valid for the
//! call that measured it.

/// Horizontal extent of a single item, in the container's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSpan {
    pub left: f64,
    pub right: f64,
}

impl ItemSpan {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }
}

/// The visible rectangle of a scroll container plus its scroll metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerRect {
    /// Left edge of the visible region.
    pub left: f64,
    /// Right edge of the visible region.
    pub right: f64,
    /// Current scroll offset.
    pub scroll_left: f64,
    /// Total width of the scrolled content.
    pub scroll_width: f64,
    /// Width of the visible region.
    pub client_width: f64,
}

impl ContainerRect {
    /// Largest valid scroll offset.  Zero when the content is narrower than
    /// the viewport.
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Clamp `offset` into `[0, max_scroll_left]`.
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.min(self.max_scroll_left()).max(0.0)
    }
}

/// Fresh measurement of a container and its items.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub container: ContainerRect,
    pub items: Vec<ItemSpan>,
}
