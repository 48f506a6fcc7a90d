//! CSS Backgrounds and Borders Level 3
//!
//! [CSS Backgrounds and Borders Module Level 3](https://www.w3.org/TR/css-backgrounds-3/)

use ember_common::warning::warn_once;
use ember_dom::StyleMap;

use crate::style::{Color, parse_px};

/// [§ 3.10 Backgrounds Shorthand](https://www.w3.org/TR/css-backgrounds-3/#background)
///
/// "If there are multiple layers, the background-color can only be specified
/// in the final layer."
///
/// The shorthand is not fully expanded: the color is taken to be the last
/// token of the final comma-separated layer that parses as a color. Commas
/// and spaces inside functions such as `rgb()` do not split layers or
/// tokens. An
/// explicit `background-color` always wins over the shorthand. Returns
/// `None` when nothing opaque enough to paint is set.
#[must_use]
pub fn background_color(style: &StyleMap) -> Option<Color> {
    let from_shorthand = style.get("background").and_then(|background| {
        let layers = split_outside_parens(background, |ch| ch == ',');
        let final_layer = layers.last().copied().unwrap_or_default();
        split_outside_parens(final_layer, char::is_whitespace)
            .into_iter()
            .filter_map(Color::parse)
            .last()
    });

    let color = match style.get("background-color") {
        Some(value) => Color::parse(value).or_else(|| {
            warn_once("CSS", &format!("could not parse background-color '{value}'"));
            None
        }),
        None => from_shorthand,
    };
    color.filter(|c| !c.is_transparent())
}

/// Split `value` at separators that are not nested inside a function such
/// as `rgb(...)` or `url(...)`. Empty pieces are dropped.
fn split_outside_parens(value: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 && is_separator(ch) => {
                pieces.push(&value[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&value[start..]);
    pieces.retain(|piece| !piece.trim().is_empty());
    pieces
}

/// [§ 5.1 border-radius](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
///
/// A single `px` radius for all four corners; anything else is square.
#[must_use]
pub fn border_radius(style: &StyleMap) -> f32 {
    style
        .get("border-radius")
        .and_then(|value| parse_px(value))
        .unwrap_or(0.0)
}
