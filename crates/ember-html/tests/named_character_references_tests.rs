//! Integration tests for character reference lookup.

use ember_html::tokenizer::named_character_references::{decode_numeric, lookup_entity, resolve};

#[test]
fn test_lookup_common_entities() {
    assert_eq!(lookup_entity("amp"), Some("&"));
    assert_eq!(lookup_entity("lt"), Some("<"));
    assert_eq!(lookup_entity("gt"), Some(">"));
    assert_eq!(lookup_entity("quot"), Some("\""));
    assert_eq!(lookup_entity("nbsp"), Some("\u{00A0}"));
}

#[test]
fn test_lookup_typographic_entities() {
    assert_eq!(lookup_entity("ndash"), Some("–"));
    assert_eq!(lookup_entity("mdash"), Some("—"));
    assert_eq!(lookup_entity("copy"), Some("©"));
    assert_eq!(lookup_entity("trade"), Some("™"));
    assert_eq!(lookup_entity("euro"), Some("€"));
    assert_eq!(lookup_entity("deg"), Some("°"));
}

#[test]
fn test_lookup_is_case_sensitive_and_bare() {
    assert_eq!(lookup_entity("AMP"), None);
    assert_eq!(lookup_entity("amp;"), None);
    assert_eq!(lookup_entity("xyz"), None);
}

#[test]
fn test_numeric_references() {
    assert_eq!(decode_numeric("#39"), Some('\''));
    assert_eq!(decode_numeric("#x27"), Some('\''));
    assert_eq!(decode_numeric("#X41"), Some('A'));
    assert_eq!(decode_numeric("#0"), Some('\u{FFFD}'));
    assert_eq!(decode_numeric("#xD800"), Some('\u{FFFD}'));
    assert_eq!(decode_numeric("#zz"), None);
    assert_eq!(decode_numeric("39"), None);
}

#[test]
fn test_resolve_dispatches() {
    assert_eq!(resolve("gt").as_deref(), Some(">"));
    assert_eq!(resolve("#62").as_deref(), Some(">"));
    assert_eq!(resolve("bogus"), None);
}
