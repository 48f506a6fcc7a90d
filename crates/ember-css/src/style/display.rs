//! CSS Display and vertical-align keywords
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)

use std::str::FromStr;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

use ember_common::warning::warn_once;

/// [§ 2.1 Outer Display Roles](https://www.w3.org/TR/css-display-3/#outer-role)
///
/// "The `<display-outside>` keywords specify the element's outer display type,
/// which is essentially its principal box's role in flow layout."
///
/// Only the outer role matters here: every block-level keyword lays out as
/// `block`, every inline-level keyword as `inline`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum DisplayValue {
    /// "The element generates a block-level box when placed in flow layout."
    #[strum(
        to_string = "block",
        serialize = "list-item",
        serialize = "flow-root",
        serialize = "flex",
        serialize = "grid",
        serialize = "table"
    )]
    Block,
    /// "The element generates an inline-level box when placed in flow layout."
    ///
    /// This is the initial value, used when no rule sets `display`.
    #[default]
    #[strum(
        to_string = "inline",
        serialize = "inline-block",
        serialize = "inline-flex",
        serialize = "inline-grid",
        serialize = "contents"
    )]
    Inline,
    /// [§ 2.7 Box Generation](https://www.w3.org/TR/css-display-3/#box-generation)
    /// "The element and its descendants generate no boxes or text runs."
    #[strum(to_string = "none")]
    None,
}

impl DisplayValue {
    /// Interpret a resolved `display` value; missing means `inline`.
    #[must_use]
    pub fn from_css(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Inline;
        };
        Self::from_str(value.trim()).unwrap_or_else(|_| {
            warn_once("CSS", &format!("unsupported display '{value}', using inline"));
            Self::Inline
        })
    }
}

/// [CSS Inline § 4.2 vertical-align](https://www.w3.org/TR/css-inline-3/#propdef-vertical-align)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VerticalAlign {
    /// "Use the dominant baseline choice of the parent."
    #[default]
    Baseline,
    /// "Lower the baseline of the box to the proper position for subscripts."
    Sub,
    /// "Raise the baseline of the box to the proper position for superscripts."
    Super,
}

impl VerticalAlign {
    /// Interpret a resolved `vertical-align` value. Unsupported values align
    /// to the baseline.
    #[must_use]
    pub fn from_css(value: Option<&str>) -> Self {
        value
            .and_then(|v| Self::from_str(v.trim()).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keywords() {
        assert_eq!(DisplayValue::from_css(Some("block")), DisplayValue::Block);
        assert_eq!(DisplayValue::from_css(Some("list-item")), DisplayValue::Block);
        assert_eq!(DisplayValue::from_css(Some("inline-block")), DisplayValue::Inline);
        assert_eq!(DisplayValue::from_css(Some("NONE")), DisplayValue::None);
        assert_eq!(DisplayValue::from_css(None), DisplayValue::Inline);
        assert_eq!(DisplayValue::from_css(Some("ruby")), DisplayValue::Inline);
        assert_eq!(DisplayValue::Block.to_string(), "block");
    }

    #[test]
    fn test_vertical_align() {
        assert_eq!(VerticalAlign::from_css(Some("super")), VerticalAlign::Super);
        assert_eq!(VerticalAlign::from_css(Some("sub")), VerticalAlign::Sub);
        assert_eq!(VerticalAlign::from_css(Some("middle")), VerticalAlign::Baseline);
        assert_eq!(VerticalAlign::from_css(None), VerticalAlign::Baseline);
    }
}
