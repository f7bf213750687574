//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the strip model and turns it into cells on the
//! terminal.  No filesystem I/O happens here.

pub mod halfblocks;
pub mod layout;
pub mod smooth_scroll;
pub mod spinner;
pub mod strip_widget;
pub mod theme;
