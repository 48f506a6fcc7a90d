//! Character-level scanning helpers for the tag-soup parser.
//!
//! The parser owns the actual scanning loop; this module supplies the state
//! enum, the tag-text splitter and the character reference table.

/// Tag name and attribute parsing for the text between `<` and `>`.
pub mod attributes;
/// Named and numeric character reference lookup.
pub mod named_character_references;

pub use attributes::parse_tag;

use strum_macros::Display;

/// The three states of the scanning loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Accumulating character data.
    Text,
    /// Between `<` and `>`.
    InTag,
    /// After `&`, waiting for `;` or a terminator.
    InCharacterReference,
}

/// Characters that end a character reference without resolving it.
///
/// The reference is emitted literally and the terminator is then processed
/// as if no reference had been open.
pub const CHARACTER_REFERENCE_TERMINATORS: [char; 4] = ['<', '>', ' ', '\n'];
