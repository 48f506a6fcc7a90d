//! Font metrics backed by fontdue for accurate text measurement during layout.
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "CSS assumes that every font has font metrics that specify a
//! characteristic height above the baseline and a depth below it."

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use ember_css::{FontDescriptor, FontMetrics};
use fontdue::{Font, FontSettings};

/// Common system font paths, searched in order by
/// [`FontdueFontMetrics::system_default`].
const FONT_SEARCH_PATHS: &[&str] = &[
    // macOS
    "/System/Library/Fonts/Times.ttc",
    "/Library/Fonts/Times New Roman.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf",
    "/usr/share/fonts/TTF/DejaVuSerif.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSerif-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSerif.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    // Windows
    "C:\\Windows\\Fonts\\times.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font metrics from a single font face.
///
/// Every descriptor is measured with the same face at the descriptor's pixel
/// size; family, weight and slant do not select a different face.
pub struct FontdueFontMetrics {
    font: Font,
}

impl FontdueFontMetrics {
    /// Parse a TrueType or OpenType font.
    ///
    /// # Errors
    ///
    /// Returns an error if fontdue rejects the data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow!("invalid font data: {e}"))?;
        Ok(Self { font })
    }

    /// Load a font file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a font.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read font '{}'", path.display()))?;
        Self::from_bytes(&bytes).with_context(|| format!("failed to parse font '{}'", path.display()))
    }

    /// The first loadable font from a list of common system locations.
    #[must_use]
    pub fn system_default() -> Option<Self> {
        FONT_SEARCH_PATHS.iter().find_map(|path| {
            let path = Path::new(path);
            if !path.exists() {
                return None;
            }
            match Self::load(path) {
                Ok(metrics) => {
                    log::debug!("using system font {}", path.display());
                    Some(metrics)
                }
                Err(e) => {
                    log::warn!("{e:#}");
                    None
                }
            }
        })
    }
}

impl FontMetrics for FontdueFontMetrics {
    fn text_width(&self, text: &str, font: &FontDescriptor) -> f32 {
        // Font::metrics avoids rasterizing when only advances are needed.
        let px = font.pixel_size();
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| self.font.metrics(ch, px).advance_width)
            .sum()
    }

    fn ascent(&self, font: &FontDescriptor) -> f32 {
        let px = font.pixel_size();
        self.font
            .horizontal_line_metrics(px)
            .map_or(px * 0.8, |m| m.ascent)
    }

    fn descent(&self, font: &FontDescriptor) -> f32 {
        // fontdue reports descent below the baseline as a negative offset.
        let px = font.pixel_size();
        self.font
            .horizontal_line_metrics(px)
            .map_or(px * 0.2, |m| -m.descent)
    }
}
