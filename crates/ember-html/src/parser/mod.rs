//! Tree construction for the tag-soup parser.

/// The parser, document normalisation and tree printing.
pub mod core;

pub use core::{HEAD_ELEMENTS, HTMLParser, VOID_ELEMENTS, format_tree, parse, parse_fragment, print_tree};
