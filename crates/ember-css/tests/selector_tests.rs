//! Integration tests for selector matching against parsed documents.

use ember_css::{Selector, parse_selector};
use ember_dom::{DomTree, NodeId};

/// All nodes with the given tag, in document order.
fn elements(tree: &DomTree, tag: &str) -> Vec<NodeId> {
    tree.descendants(tree.root())
        .into_iter()
        .filter(|&id| tree.is_element_named(id, tag))
        .collect()
}

fn matching(tree: &DomTree, selector: &str) -> Vec<NodeId> {
    let selector = parse_selector(selector).unwrap();
    tree.descendants(tree.root())
        .into_iter()
        .filter(|&id| selector.matches(tree, id))
        .collect()
}

#[test]
fn test_descendant_matches_at_any_depth() {
    let tree = ember_html::parse("<div><section><p>deep</p></section></div><p>outside</p>");
    let ps = elements(&tree, "p");
    let selector = parse_selector("div p").unwrap();
    assert!(selector.matches(&tree, ps[0]));
    assert!(!selector.matches(&tree, ps[1]));
}

#[test]
fn test_direct_descendant_requires_immediate_parent() {
    let tree = ember_html::parse("<div><p>child</p><section><p>grandchild</p></section></div>");
    let ps = elements(&tree, "p");
    let selector = parse_selector("div > p").unwrap();
    assert!(selector.matches(&tree, ps[0]));
    assert!(!selector.matches(&tree, ps[1]));
}

#[test]
fn test_class_matches_any_token() {
    let tree = ember_html::parse(r#"<p class="note  green-text">a</p><p class="notes">b</p>"#);
    assert_eq!(matching(&tree, ".green-text"), vec![elements(&tree, "p")[0]]);
    assert_eq!(matching(&tree, ".note"), vec![elements(&tree, "p")[0]]);
}

#[test]
fn test_universal_matches_elements_only() {
    let tree = ember_html::parse("<p>text</p>");
    let matched = matching(&tree, "*");
    assert!(matched.iter().all(|&id| tree.as_element(id).is_some()));
    // html, head, body, p
    assert_eq!(matched.len(), 4);
}

#[test]
fn test_chained_combinators() {
    let tree = ember_html::parse("<ul><li><p><b><span>x</span></b></p></li></ul><p><span>y</span></p>");
    let spans = elements(&tree, "span");
    assert_eq!(matching(&tree, "li > p span"), vec![spans[0]]);
    assert_eq!(matching(&tree, "li > span"), Vec::<NodeId>::new());
}

#[test]
fn test_priorities() {
    assert_eq!(Selector::Tag("p".to_string()).priority(), 2);
    assert_eq!(Selector::Class("a".to_string()).priority(), 1);
    assert_eq!(Selector::Universal.priority(), 0);
    assert_eq!(parse_selector("div .a").unwrap().priority(), 3);
    assert_eq!(parse_selector("* > p").unwrap().priority(), 2);
}
