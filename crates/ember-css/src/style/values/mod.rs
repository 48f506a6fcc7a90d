//! CSS Value types and parsing
//!
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)

mod color;
mod font;
mod length;

pub use color::Color;
pub use font::{FontSlant, FontWeight, primary_family};
pub use length::{DEFAULT_FONT_SIZE_PX, format_px, parse_px, resolve_font_size};
