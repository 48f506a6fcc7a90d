//! Fonts for inline layout.
//!
//! [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)
//!
//! A [`FontDescriptor`] is the four-part key `(family, size, weight, slant)`
//! resolved from a node's style. A [`FontCache`] turns descriptors into
//! shared [`Font`] handles backed by one [`FontMetrics`] implementation. The
//! cache belongs to a document session, not to the process.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use ember_common::warning::warn_once;
use ember_dom::StyleMap;

use crate::style::{FontSlant, FontWeight, parse_px, primary_family};

/// Points per CSS pixel; descriptor sizes are stored in points.
pub const POINTS_PER_PIXEL: f32 = 0.75;

/// Family used when a node has no `font-family`.
pub const DEFAULT_FAMILY: &str = "Times";

/// The key a font is selected and cached by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FontDescriptor {
    /// First family of the `font-family` list, unquoted.
    pub family: String,
    /// Size in whole points (`px * 0.75`, truncated).
    pub size: u32,
    /// Bold or normal.
    pub weight: FontWeight,
    /// Roman or italic.
    pub slant: FontSlant,
}

impl FontDescriptor {
    /// Build a descriptor from a resolved style map.
    ///
    /// A `font-size` that is not `<N>px` falls back to `default_px`.
    #[must_use]
    pub fn from_style(style: &StyleMap, default_px: f32) -> Self {
        let family = style
            .get("font-family")
            .map_or_else(|| DEFAULT_FAMILY.to_string(), |f| primary_family(f));
        let px = match style.get("font-size") {
            Some(value) => parse_px(value).unwrap_or_else(|| {
                warn_once("Layout", &format!("unable to parse font size '{value}'"));
                default_px
            }),
            None => default_px,
        };
        Self {
            family,
            size: (px * POINTS_PER_PIXEL) as u32,
            weight: style
                .get("font-weight")
                .map_or_else(FontWeight::default, |w| FontWeight::from_css(w)),
            slant: style
                .get("font-style")
                .map_or_else(FontSlant::default, |s| FontSlant::from_css(s)),
        }
    }

    /// The size converted back to CSS pixels, used to scale glyph metrics.
    #[must_use]
    pub fn pixel_size(&self) -> f32 {
        self.size as f32 / POINTS_PER_PIXEL
    }
}

impl fmt::Display for FontDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}pt {} {}", self.family, self.size, self.weight, self.slant)
    }
}

/// Font metrics interface for text measurement during layout.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
///
/// Implementations must be shareable across threads because a [`FontCache`]
/// may be read while another thread inserts.
pub trait FontMetrics: Send + Sync {
    /// Total advance width of `text` in pixels.
    fn text_width(&self, text: &str, font: &FontDescriptor) -> f32;

    /// Distance from the baseline to the top of the tallest glyph, positive.
    fn ascent(&self, font: &FontDescriptor) -> f32;

    /// Distance from the baseline to the bottom of the lowest glyph, positive.
    fn descent(&self, font: &FontDescriptor) -> f32;
}

/// Approximate font metrics using fixed ratios.
///
/// The average advance of Latin glyphs in a proportional face is close to
/// 0.6 of the pixel size. Ascent and descent split the em box 4:1.
///
/// Deterministic, so layout tests do not depend on installed fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl ApproximateFontMetrics {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const ASCENT_RATIO: f32 = 0.8;
    const DESCENT_RATIO: f32 = 0.2;
}

impl FontMetrics for ApproximateFontMetrics {
    fn text_width(&self, text: &str, font: &FontDescriptor) -> f32 {
        text.chars().count() as f32 * font.pixel_size() * Self::CHAR_WIDTH_RATIO
    }

    fn ascent(&self, font: &FontDescriptor) -> f32 {
        font.pixel_size() * Self::ASCENT_RATIO
    }

    fn descent(&self, font: &FontDescriptor) -> f32 {
        font.pixel_size() * Self::DESCENT_RATIO
    }
}

/// A font handle with its vertical metrics precomputed.
pub struct Font {
    /// The key this font was created for.
    pub descriptor: FontDescriptor,
    /// Positive ascent in pixels.
    pub ascent: f32,
    /// Positive descent in pixels.
    pub descent: f32,
    /// Advance of a single space.
    pub space_width: f32,
    metrics: Arc<dyn FontMetrics>,
}

impl Font {
    fn new(descriptor: FontDescriptor, metrics: Arc<dyn FontMetrics>) -> Self {
        Self {
            ascent: metrics.ascent(&descriptor),
            descent: metrics.descent(&descriptor),
            space_width: metrics.text_width(" ", &descriptor),
            descriptor,
            metrics,
        }
    }

    /// Advance width of `text`.
    #[must_use]
    pub fn measure(&self, text: &str) -> f32 {
        self.metrics.text_width(text, &self.descriptor)
    }

    /// Height of one line of this font: ascent plus descent.
    #[must_use]
    pub fn linespace(&self) -> f32 {
        self.ascent + self.descent
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("descriptor", &self.descriptor)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .finish_non_exhaustive()
    }
}

/// Append-only cache of fonts keyed by descriptor.
///
/// Safe to read concurrently with inserts. Fonts are never evicted.
pub struct FontCache {
    metrics: Arc<dyn FontMetrics>,
    fonts: RwLock<HashMap<FontDescriptor, Arc<Font>>>,
}

impl FontCache {
    /// A cache whose fonts are measured by `metrics`.
    #[must_use]
    pub fn new(metrics: Arc<dyn FontMetrics>) -> Self {
        Self {
            metrics,
            fonts: RwLock::new(HashMap::new()),
        }
    }

    /// A cache backed by [`ApproximateFontMetrics`].
    #[must_use]
    pub fn approximate() -> Self {
        Self::new(Arc::new(ApproximateFontMetrics))
    }

    /// The font for `descriptor`, created on first use.
    #[must_use]
    pub fn get(&self, descriptor: &FontDescriptor) -> Arc<Font> {
        {
            let fonts = self.fonts.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(font) = fonts.get(descriptor) {
                return Arc::clone(font);
            }
        }
        let mut fonts = self.fonts.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(fonts.entry(descriptor.clone()).or_insert_with(|| {
            log::debug!("creating font {descriptor}");
            Arc::new(Font::new(descriptor.clone(), Arc::clone(&self.metrics)))
        }))
    }

    /// Number of distinct fonts created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fonts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// True before the first font is requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::approximate()
    }
}

impl fmt::Debug for FontCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontCache").field("fonts", &self.len()).finish_non_exhaustive()
    }
}
