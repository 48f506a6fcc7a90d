//! CSS length values
//!
//! [CSS Values and Units Level 4](https://www.w3.org/TR/css-values-4/)
//!
//! Resolved styles are plain strings; absolute lengths are normalised to
//! `<number>px` by the cascade, so the layout engine only ever reads `px`.

/// Initial `font-size` in CSS pixels.
pub const DEFAULT_FONT_SIZE_PX: f32 = 16.0;

/// [§ 6.2 Absolute lengths](https://www.w3.org/TR/css-values-4/#absolute-lengths)
///
/// Parse a literal `<N>px` value. Anything else (other units, keywords,
/// negative or non-finite numbers) yields `None`.
#[must_use]
pub fn parse_px(value: &str) -> Option<f32> {
    let number = value.trim().strip_suffix("px")?;
    let px = number.trim_end().parse::<f32>().ok()?;
    (px.is_finite() && px >= 0.0).then_some(px)
}

/// Format a pixel length the way the cascade stores it (`"24px"`,
/// `"13.5px"`).
#[must_use]
pub fn format_px(px: f32) -> String {
    format!("{px}px")
}

/// [§ 5.4 Relative lengths](https://www.w3.org/TR/css-values-4/#relative-lengths)
/// and [CSS Fonts § 2.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
///
/// "Percentages: refer to parent element's font size"
///
/// Resolve a specified `font-size` in pixels. `%` and `em` are relative to
/// `parent_px`, `rem` to `root_px` (the root element's font size); `px` is
/// taken as is. Returns `None` for anything else.
#[must_use]
pub fn resolve_font_size(value: &str, parent_px: f32, root_px: f32) -> Option<f32> {
    let value = value.trim();
    if let Some(pct) = value.strip_suffix('%') {
        let pct = pct.trim_end().parse::<f32>().ok()?;
        return finite_non_negative(pct / 100.0 * parent_px);
    }
    if let Some(rem) = value.strip_suffix("rem") {
        let rem = rem.trim_end().parse::<f32>().ok()?;
        return finite_non_negative(rem * root_px);
    }
    if let Some(em) = value.strip_suffix("em") {
        let em = em.trim_end().parse::<f32>().ok()?;
        return finite_non_negative(em * parent_px);
    }
    parse_px(value)
}

fn finite_non_negative(px: f32) -> Option<f32> {
    (px.is_finite() && px >= 0.0).then_some(px)
}
