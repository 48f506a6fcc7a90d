//! Typed views over resolved style strings.
//!
//! The cascade stores every property as a string. Layout and paint read
//! those strings through the helpers here:
//! - [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//! - [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//! - [CSS Display Module Level 3](https://www.w3.org/TR/css-display-3/)
//! - [CSS Inline Layout Module Level 3](https://www.w3.org/TR/css-inline-3/)

mod display;
mod values;

pub use display::{DisplayValue, VerticalAlign};
pub use values::{
    Color, DEFAULT_FONT_SIZE_PX, FontSlant, FontWeight, format_px, parse_px, primary_family,
    resolve_font_size,
};
