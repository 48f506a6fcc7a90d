//! Character reference lookup table.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! The full table defines 2,231 entities; only the common ones are kept here.
//! Names are stored without the leading `&` and without the trailing `;`,
//! since the scanner only resolves a reference once it has seen the `;`.

use std::collections::HashMap;
use std::sync::LazyLock;

static NAMED_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Markup-significant
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", "\u{00A0}"),
        // Punctuation
        ("ndash", "\u{2013}"),
        ("mdash", "\u{2014}"),
        ("hellip", "\u{2026}"),
        ("lsquo", "\u{2018}"),
        ("rsquo", "\u{2019}"),
        ("ldquo", "\u{201C}"),
        ("rdquo", "\u{201D}"),
        ("laquo", "\u{00AB}"),
        ("raquo", "\u{00BB}"),
        ("bull", "\u{2022}"),
        ("middot", "\u{00B7}"),
        ("sect", "\u{00A7}"),
        ("para", "\u{00B6}"),
        // Symbols
        ("copy", "\u{00A9}"),
        ("reg", "\u{00AE}"),
        ("trade", "\u{2122}"),
        ("deg", "\u{00B0}"),
        ("plusmn", "\u{00B1}"),
        ("times", "\u{00D7}"),
        ("divide", "\u{00F7}"),
        ("asymp", "\u{2248}"),
        ("ne", "\u{2260}"),
        ("le", "\u{2264}"),
        ("ge", "\u{2265}"),
        // Currency
        ("cent", "\u{00A2}"),
        ("pound", "\u{00A3}"),
        ("yen", "\u{00A5}"),
        ("euro", "\u{20AC}"),
        // Arrows
        ("larr", "\u{2190}"),
        ("rarr", "\u{2192}"),
        ("uarr", "\u{2191}"),
        ("darr", "\u{2193}"),
        // Accented letters (common)
        ("eacute", "\u{00E9}"),
        ("egrave", "\u{00E8}"),
        ("aacute", "\u{00E1}"),
        ("agrave", "\u{00E0}"),
        ("ntilde", "\u{00F1}"),
        ("ccedil", "\u{00E7}"),
        ("ouml", "\u{00F6}"),
        ("uuml", "\u{00FC}"),
    ])
});

/// Look up a named character reference by its bare name (`"amp"`, not
/// `"&amp;"`). Names are case-sensitive.
#[must_use]
pub fn lookup_entity(name: &str) -> Option<&'static str> {
    NAMED_ENTITIES.get(name).copied()
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// Decode `#39` or `#x27` style references. NUL, surrogates and values past
/// U+10FFFF decode to U+FFFD REPLACEMENT CHARACTER.
#[must_use]
pub fn decode_numeric(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    if code == 0 {
        return Some(char::REPLACEMENT_CHARACTER);
    }
    Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
}

/// Resolve the contents of a complete `&name;` reference.
#[must_use]
pub fn resolve(name: &str) -> Option<String> {
    if name.starts_with('#') {
        return decode_numeric(name).map(String::from);
    }
    lookup_entity(name).map(str::to_string)
}
