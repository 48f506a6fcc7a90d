//! CSS Cascading and Style Resolution
//!
//! This module implements style resolution loosely following
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/).
//!
//! Every node (text nodes included) receives a fresh `property -> value`
//! map, built in four steps that must stay in this order:
//!
//! 1. inherited properties, copied from the parent's resolved map (or a fixed
//!    default at the root)
//! 2. matching rules, in ascending priority, ties in source order
//! 3. the element's inline `style` attribute
//! 4. resolution of relative `font-size` values to `px`
//!
//! The tree is walked in pre-order so a node always sees its parent's
//! finished map.

use ember_common::warning::warn_once;
use ember_dom::{DomTree, NodeId, StyleMap};

use crate::parser::{Rule, Stylesheet, parse_declaration_block};
use crate::style::{DEFAULT_FONT_SIZE_PX, format_px, parse_px, resolve_font_size};

/// [§ 7.1 Inherited properties](https://www.w3.org/TR/css-cascade-4/#inherited-property)
///
/// The inherited properties and their values at the root. The root
/// `font-size` is replaced by the configured default size.
pub const INHERITED_PROPERTIES: [(&str, &str); 6] = [
    ("font-family", "Times"),
    ("font-size", "16px"),
    ("font-style", "normal"),
    ("font-weight", "normal"),
    ("color", "black"),
    ("cursor", "auto"),
];

/// [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
///
/// Rules in the order they are applied: ascending priority, with a stable
/// sort so equal priorities keep source order.
#[must_use]
pub fn cascade_order(stylesheet: &Stylesheet) -> Vec<&Rule> {
    let mut rules: Vec<&Rule> = stylesheet.iter().collect();
    rules.sort_by_key(|rule| rule.selector.priority());
    rules
}

/// Resolve the style of every node in the tree with the default 16px root
/// font size.
pub fn style(tree: &mut DomTree, stylesheet: &Stylesheet) {
    style_with_font_size(tree, stylesheet, DEFAULT_FONT_SIZE_PX);
}

/// Resolve the style of every node in the tree.
///
/// Any previous resolved style is replaced, so running this twice with the
/// same inputs yields identical maps.
pub fn style_with_font_size(tree: &mut DomTree, stylesheet: &Stylesheet, root_font_size: f32) {
    let rules = cascade_order(stylesheet);
    for node in tree.descendants(tree.root()) {
        let resolved = resolve_node(tree, node, &rules, root_font_size);
        tree.set_style(node, resolved);
    }
}

fn resolve_node(tree: &DomTree, node: NodeId, rules: &[&Rule], root_font_size: f32) -> StyleMap {
    let parent_style = tree.parent(node).map(|p| tree.style(p));
    let root_font_size_value = format_px(root_font_size);
    let mut style = StyleMap::new();

    // STEP 1: inherited values
    for (property, default) in INHERITED_PROPERTIES {
        let default = if property == "font-size" {
            root_font_size_value.as_str()
        } else {
            default
        };
        let value = parent_style
            .and_then(|s| s.get(property))
            .map_or(default, String::as_str);
        let _ = style.insert(property.to_string(), value.to_string());
    }

    // STEP 2: stylesheet rules, lowest priority first
    for rule in rules {
        if rule.selector.matches(tree, node) {
            for (property, value) in &rule.declarations {
                let _ = style.insert(property.clone(), value.clone());
            }
        }
    }

    // STEP 3: inline style attribute
    if let Some(inline) = tree.attribute(node, "style") {
        for (property, value) in parse_declaration_block(inline) {
            let _ = style.insert(property, value);
        }
    }

    // STEP 4: computed values
    resolve_inherit_keywords(&mut style, parent_style);
    let parent_font_size = parent_style
        .and_then(|s| s.get("font-size"))
        .map_or(root_font_size_value.as_str(), String::as_str);
    // rem is relative to the root element, whose style is resolved first.
    let rem_base = if node == tree.root() {
        root_font_size
    } else {
        tree.style_value(tree.root(), "font-size")
            .and_then(parse_px)
            .unwrap_or(root_font_size)
    };
    resolve_font_size_value(&mut style, parent_font_size, root_font_size, rem_base);

    style
}

/// [§ 7.3.1 Explicit inheritance: the inherit keyword](https://www.w3.org/TR/css-cascade-4/#inherit)
///
/// "If the cascaded value of a property is the inherit keyword, the
/// property's specified and computed values are the inherited value."
fn resolve_inherit_keywords(style: &mut StyleMap, parent_style: Option<&StyleMap>) {
    let inheriting: Vec<String> = style
        .iter()
        .filter(|(_, value)| value.trim().eq_ignore_ascii_case("inherit"))
        .map(|(property, _)| property.clone())
        .collect();
    for property in inheriting {
        match parent_style.and_then(|s| s.get(&property)) {
            Some(value) => {
                let _ = style.insert(property, value.clone());
            }
            None => {
                let _ = style.remove(&property);
            }
        }
    }
}

/// [CSS Fonts § 2.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
///
/// "Percentages: refer to parent element's font size"
///
/// Normalise `font-size` to `<N>px`. Missing or unparseable values fall back
/// to the configured root size.
fn resolve_font_size_value(
    style: &mut StyleMap,
    parent_font_size: &str,
    root_font_size: f32,
    rem_base: f32,
) {
    let parent_px = parse_px(parent_font_size).unwrap_or(root_font_size);
    let px = match style.get("font-size") {
        Some(specified) => resolve_font_size(specified, parent_px, rem_base).unwrap_or_else(|| {
            warn_once("CSS", &format!("could not parse font-size '{specified}'"));
            root_font_size
        }),
        None => root_font_size,
    };
    let _ = style.insert("font-size".to_string(), format_px(px));
}
