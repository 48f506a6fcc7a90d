//! Layout tunables.

use serde::{Deserialize, Serialize};

/// Numbers the layout engine would otherwise hard-code.
///
/// Deserializes from a partial JSON object; missing fields keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of the page area in pixels.
    pub viewport_width: f32,
    /// Inset of the document box on the left and right.
    pub horizontal_margin: f32,
    /// Extra scroll room below the last line.
    pub vertical_margin: f32,
    /// [CSS 2.1 § 10.8.1 Leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// Baseline offset from the top of a line, as a multiple of the tallest
    /// ascent on that line.
    pub leading_factor: f32,
    /// Line height as a multiple of `max_ascent + max_descent`.
    pub line_height_factor: f32,
    /// Fixed width of `input` and `button` boxes.
    pub input_width: f32,
    /// Root font size in pixels, also the fallback for unparseable sizes.
    pub default_font_size: f32,
    /// Placeholder size of an `img` without `width`/`height` attributes.
    pub image_width: f32,
    /// See [`LayoutConfig::image_width`].
    pub image_height: f32,
}

impl LayoutConfig {
    /// Width available to the document box once both margins are removed.
    #[must_use]
    pub fn content_width(&self) -> f32 {
        (self.viewport_width - 2.0 * self.horizontal_margin).max(0.0)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            horizontal_margin: 13.0,
            vertical_margin: 18.0,
            leading_factor: 1.25,
            line_height_factor: 1.25,
            input_width: 200.0,
            default_font_size: 16.0,
            image_width: 100.0,
            image_height: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_width() {
        assert_eq!(LayoutConfig::default().content_width(), 774.0);
        let narrow = LayoutConfig {
            viewport_width: 10.0,
            ..LayoutConfig::default()
        };
        assert_eq!(narrow.content_width(), 0.0);
    }
}
