//! Tag-soup HTML parser for the Ember renderer.
//!
//! # Scope
//!
//! This crate turns arbitrary text into a [`DomTree`](ember_dom::DomTree). It
//! never fails: malformed markup is repaired rather than rejected.
//!
//! - **Tokenizer states**: a single character-level pass over the input in one
//!   of three states (text, inside a tag, inside a character reference).
//! - **Tag text parsing**: tag name plus a forgiving attribute scanner
//!   (quoted, unquoted and bare attributes, last duplicate wins).
//! - **Tree construction**: a stack of unfinished elements with implicit
//!   `html`, `head` and `body` insertion, void elements, and a final
//!   normalisation so the root always holds exactly one `head` followed by
//!   one `body`.
//!
//! # Not Implemented
//!
//! - The WHATWG insertion-mode state machine and adoption agency algorithm
//! - Raw text handling for `script` and `style` contents
//! - Comments and DOCTYPE nodes (they are read as tags and dropped)

/// Tree construction from the tokenizer's output.
pub mod parser;
/// Character-level scanning helpers: states, tag text and character references.
pub mod tokenizer;

pub use parser::{HTMLParser, format_tree, parse, parse_fragment, print_tree};
pub use tokenizer::{TokenizerState, parse_tag};
