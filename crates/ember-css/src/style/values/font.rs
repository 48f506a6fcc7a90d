//! CSS Font value parsing
//!
//! [CSS Fonts Module Level 4](https://www.w3.org/TR/css-fonts-4/)

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

use ember_common::warning::warn_once;

/// [§ 3.2 font-weight](https://www.w3.org/TR/css-fonts-4/#font-weight-prop)
///
/// Only two weights are distinguished when selecting a font.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FontWeight {
    /// `normal`, `lighter` and numeric weights below 600.
    #[default]
    #[strum(to_string = "normal", serialize = "lighter")]
    Normal,
    /// `bold`, `bolder` and numeric weights of 600 and above.
    #[strum(to_string = "bold", serialize = "bolder")]
    Bold,
}

impl FontWeight {
    /// Interpret a resolved `font-weight` value.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        let value = value.trim();
        if let Ok(weight) = Self::from_str(value) {
            return weight;
        }
        match value.parse::<u16>() {
            Ok(numeric) if numeric >= 600 => Self::Bold,
            Ok(_) => Self::Normal,
            Err(_) => {
                warn_once("CSS", &format!("unsupported font-weight '{value}'"));
                Self::Normal
            }
        }
    }
}

/// [§ 3.3 font-style](https://www.w3.org/TR/css-fonts-4/#font-style-prop)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum FontSlant {
    /// Upright glyphs (`font-style: normal`).
    #[default]
    #[strum(to_string = "roman", serialize = "normal")]
    Roman,
    /// `italic` or `oblique`.
    #[strum(to_string = "italic", serialize = "oblique")]
    Italic,
}

impl FontSlant {
    /// Interpret a resolved `font-style` value. Unknown values are upright.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        Self::from_str(value.trim()).unwrap_or_default()
    }
}

/// [§ 3.1 font-family](https://www.w3.org/TR/css-fonts-4/#font-family-prop)
///
/// Only the first family of the list is used, with surrounding quotes
/// removed.
#[must_use]
pub fn primary_family(value: &str) -> String {
    value
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_keywords_and_numbers() {
        assert_eq!(FontWeight::from_css("bold"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("BOLDER"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("700"), FontWeight::Bold);
        assert_eq!(FontWeight::from_css("400"), FontWeight::Normal);
        assert_eq!(FontWeight::from_css("normal"), FontWeight::Normal);
        assert_eq!(FontWeight::Bold.to_string(), "bold");
    }

    #[test]
    fn test_slant() {
        assert_eq!(FontSlant::from_css("normal"), FontSlant::Roman);
        assert_eq!(FontSlant::from_css("italic"), FontSlant::Italic);
        assert_eq!(FontSlant::from_css("oblique"), FontSlant::Italic);
        assert_eq!(FontSlant::from_css("sideways"), FontSlant::Roman);
        assert_eq!(FontSlant::Roman.as_ref(), "roman");
    }

    #[test]
    fn test_primary_family() {
        assert_eq!(primary_family("\"Helvetica Neue\", Arial, sans-serif"), "Helvetica Neue");
        assert_eq!(primary_family("'Times'"), "Times");
        assert_eq!(primary_family("monospace"), "monospace");
    }
}
