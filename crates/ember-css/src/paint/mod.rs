//! CSS Painting
//!
//! [CSS 2.1 Appendix E - Elaborate description of Stacking Contexts](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! This module converts a laid-out box tree into a display list of drawing
//! commands. Culling against the scroll window is left to the consumer, so
//! the list always covers the whole document.
//!
//! ```text
//! Style → Layout → Paint → Render
//!                    ↓
//!              DisplayList
//! ```

mod display_list;
mod painter;

pub use display_list::{DisplayList, DrawCommand, InteractionTag};
pub use painter::{Painter, paint};
