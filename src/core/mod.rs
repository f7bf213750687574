//! Core algorithms – carousel stepping, geometry, and image discovery.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! The scroller only sees geometry through the [`scroller::ScrollHost`] trait.

pub mod geometry;
pub mod scan;
pub mod scroller;
