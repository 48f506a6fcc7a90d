//! Stylesheet parser module.

/// Character-level recursive-descent parser with skip-and-resync recovery.
pub mod css_parser;

pub use css_parser::{
    CSSParser, CssParseError, Declarations, Rule, Stylesheet, parse, parse_declaration_block,
    parse_selector, parse_selector_list,
};
