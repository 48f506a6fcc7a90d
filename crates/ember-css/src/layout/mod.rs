//! CSS Layout Engine
//!
//! This module turns a styled document tree into a tree of positioned boxes.
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Visual Formatting Model Details](https://www.w3.org/TR/CSS2/visudet.html)
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//!
//! # Module Structure
//!
//! - [`box_model`] - Rectangles shared with the paint phase
//! - [`config`] - Layout tunables
//! - [`font`] - Font descriptors, metrics and the font cache
//! - [`layout_box`] - Box kinds and the box tree
//! - [`formatting_context`] - Entry point and block formatting
//! - [`inline`] - Line breaking and line box alignment
//!
//! # Not Implemented
//!
//! Margins, padding, borders, floats, positioning, flex, grid and tables.

pub mod box_model;
pub mod config;
pub mod font;
pub mod formatting_context;
pub mod inline;
pub mod layout_box;

pub use box_model::Rect;
pub use config::LayoutConfig;
pub use font::{ApproximateFontMetrics, Font, FontCache, FontDescriptor, FontMetrics};
pub use formatting_context::{LayoutMode, layout};
pub use layout_box::{AnonymousBlock, BoxId, BoxKind, BoxSource, LayoutBox, LayoutTree};
