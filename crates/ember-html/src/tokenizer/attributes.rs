//! Tag text parsing.
//!
//! Loosely follows [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
//! through [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state),
//! collapsed into one forgiving scanner that never reports an error.

use ember_dom::AttributesMap;

/// Split the text between `<` and `>` into a lowercase tag name and its
/// attributes.
///
/// - The tag name is the first whitespace-delimited word, case-folded. A
///   trailing `/` (as in `<br/>`) is dropped.
/// - Attribute names are case-folded; values keep their case.
/// - `key=value`, `key="value"` and `key='value'` are accepted. A quoted value
///   ends only at the matching quote character; an unterminated quote runs
///   to the end of the tag text.
/// - A bare `key` gets the value `"true"`.
/// - When a key appears twice, the later value wins.
/// - `/` outside a value is ignored.
#[must_use]
pub fn parse_tag(text: &str) -> (String, AttributesMap) {
    let trimmed = text.trim_start();
    let (raw_tag, rest) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));

    let mut tag = raw_tag.to_lowercase();
    if tag.len() > 1 && tag.ends_with('/') {
        let _ = tag.pop();
    }

    (tag, parse_attributes(rest))
}

fn parse_attributes(text: &str) -> AttributesMap {
    let mut attrs = AttributesMap::new();
    let mut key = String::new();
    let mut value: Option<String> = None;
    let mut quote: Option<char> = None;

    for c in text.chars() {
        if let Some(open) = quote {
            if c == open {
                commit(&mut attrs, &mut key, value.take().unwrap_or_default());
                quote = None;
            } else if let Some(value) = value.as_mut() {
                value.push(c);
            }
            continue;
        }

        match c {
            c if c.is_whitespace() => {
                if !key.is_empty() {
                    let v = value.take().unwrap_or_else(|| "true".to_string());
                    commit(&mut attrs, &mut key, v);
                }
            }
            '"' | '\'' if !key.is_empty() && value.as_deref() == Some("") => {
                quote = Some(c);
            }
            '=' if !key.is_empty() && value.is_none() => value = Some(String::new()),
            '/' if value.is_none() => {}
            _ => match value.as_mut() {
                Some(value) => value.push(c),
                None => key.push(c),
            },
        }
    }

    if !key.is_empty() {
        let v = value.unwrap_or_else(|| "true".to_string());
        commit(&mut attrs, &mut key, v);
    }
    attrs
}

fn commit(attrs: &mut AttributesMap, key: &mut String, value: String) {
    let _ = attrs.insert(std::mem::take(key).to_lowercase(), value);
}
