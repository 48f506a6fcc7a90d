//! Stylesheet parsing, selector matching, cascade, box layout and paint for
//! the Ember renderer.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Fault-tolerant rule and declaration parsing with resync
//!   - Comments, skipped at-rules, `!important` stripping
//!
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, class and universal selectors
//!   - Descendant and child combinators
//!   - Priority (specificity) calculation
//!
//! - **CSS Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - Inheritance, priority ordering, inline styles
//!   - `inherit`, `%`, `em` and `rem` font sizes
//!
//! - **Layout** ([CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html))
//!   - Block and inline formatting, anonymous blocks, line breaking
//!   - Baseline and `vertical-align` positioning
//!
//! - **Paint** ([CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html))
//!   - Backgrounds, text, inputs and image placeholders
//!
//! # Not Yet Implemented
//!
//! - Attribute, id and pseudo-class selectors
//! - Media queries (at-rules are skipped)
//! - Margins, padding and borders
//! - Floats, positioning, flex, grid and tables

/// CSS backgrounds per [CSS Backgrounds and Borders Level 3](https://www.w3.org/TR/css-backgrounds-3/).
pub mod backgrounds;
/// CSS cascade and style resolution per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Box tree layout per [CSS 2.1 § 9](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// Display list and painting per [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html).
pub mod paint;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS selector matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Keyword and value types read from resolved styles.
pub mod style;
/// User-agent stylesheet per [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html).
pub mod ua_stylesheet;

// Re-exports for convenience
pub use backgrounds::{background_color, border_radius};
pub use cascade::{INHERITED_PROPERTIES, cascade_order, style, style_with_font_size};
pub use layout::{
    ApproximateFontMetrics, BoxId, BoxKind, BoxSource, Font, FontCache, FontDescriptor,
    FontMetrics, LayoutBox, LayoutConfig, LayoutMode, LayoutTree, Rect, layout,
};
pub use paint::{DisplayList, DrawCommand, InteractionTag, Painter, paint};
pub use parser::{
    CSSParser, CssParseError, Declarations, Rule, Stylesheet, parse, parse_declaration_block,
    parse_selector, parse_selector_list,
};
pub use selector::Selector;
pub use style::{
    Color, DEFAULT_FONT_SIZE_PX, DisplayValue, FontSlant, FontWeight, VerticalAlign,
};
pub use ua_stylesheet::default_stylesheet;
