//! Integration tests for the tag-soup HTML parser.

use ember_dom::{DomTree, NodeId};
use ember_html::{format_tree, parse, parse_fragment};
use quickcheck_macros::quickcheck;

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    tree.descendants(from)
        .into_iter()
        .find(|&id| tree.is_element_named(id, tag))
}

/// Helper to list the text of the direct text children of a node.
fn texts(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .filter_map(|&c| tree.as_text(c))
        .map(str::to_string)
        .collect()
}

fn child_tags(tree: &DomTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .map(|&c| tree.tag_name(c).unwrap_or("#text").to_string())
        .collect()
}

fn body(tree: &DomTree) -> NodeId {
    tree.body().expect("document has a body")
}

#[test]
fn test_plain_text_gets_implied_structure() {
    let tree = parse("hello moto");
    assert_eq!(tree.tag_name(tree.root()), Some("html"));
    assert_eq!(child_tags(&tree, tree.root()), vec!["head", "body"]);
    assert_eq!(texts(&tree, body(&tree)), vec!["hello moto"]);
}

#[test]
fn test_void_element_followed_by_text() {
    let tree = parse("<input />hello");
    let body = body(&tree);
    assert_eq!(child_tags(&tree, body), vec!["input", "#text"]);
    assert_eq!(texts(&tree, body), vec!["hello"]);
    let input = tree.children(body)[0];
    assert!(tree.children(input).is_empty());
}

#[test]
fn test_br_with_trailing_slash_is_void() {
    let tree = parse("a<br/>b");
    assert_eq!(child_tags(&tree, body(&tree)), vec!["#text", "br", "#text"]);
}

#[test]
fn test_script_goes_to_head_then_body_opens() {
    let tree = parse("<html><script></script><p>hi</p></html>");
    let head = tree.head().unwrap();
    assert_eq!(child_tags(&tree, head), vec!["script"]);
    let body = body(&tree);
    assert_eq!(child_tags(&tree, body), vec!["p"]);
    let p = tree.children(body)[0];
    assert_eq!(texts(&tree, p), vec!["hi"]);
}

#[test]
fn test_title_and_meta_stay_in_head() {
    let tree = parse("<meta charset=utf-8><title>Home</title><h1>Welcome</h1>");
    let head = tree.head().unwrap();
    assert_eq!(child_tags(&tree, head), vec!["meta", "title"]);
    assert_eq!(tree.attribute(tree.children(head)[0], "charset"), Some("utf-8"));
    let title = find_element(&tree, head, "title").unwrap();
    assert_eq!(tree.text_content(title), "Home");
    assert!(find_element(&tree, body(&tree), "h1").is_some());
}

#[test]
fn test_html_attributes_land_on_root() {
    let tree = parse(r#"<html lang="en"><body>x</body></html>"#);
    assert_eq!(tree.attribute(NodeId::ROOT, "lang"), Some("en"));
}

#[test]
fn test_doctype_and_comments_are_dropped() {
    let tree = parse("<!DOCTYPE html><!-- note --><p>x</p>");
    assert_eq!(child_tags(&tree, body(&tree)), vec!["p"]);
}

#[test]
fn test_close_tag_pops_regardless_of_name() {
    let tree = parse("<div><span>a</div>b");
    let body = body(&tree);
    let div = find_element(&tree, body, "div").unwrap();
    let span = find_element(&tree, div, "span").unwrap();
    assert_eq!(tree.text_content(span), "a");
    // `</div>` closed the span, so "b" is still inside the div.
    assert_eq!(texts(&tree, div), vec!["b"]);
}

#[test]
fn test_unclosed_elements_are_closed_at_end() {
    let tree = parse("<ul><li>one<li>two");
    let ul = find_element(&tree, NodeId::ROOT, "ul").unwrap();
    assert_eq!(tree.text_content(ul), "onetwo");
}

#[test]
fn test_stray_close_tags_never_remove_root() {
    let tree = parse("</p></div></html></html>text");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["head", "body"]);
    assert_eq!(texts(&tree, body(&tree)), vec!["text"]);
}

#[test]
fn test_content_after_html_close_merges_into_single_body() {
    let tree = parse("<p>a</p></html><p>b</p>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["head", "body"]);
    assert_eq!(child_tags(&tree, body(&tree)), vec!["p", "p"]);
    assert_eq!(tree.text_content(body(&tree)), "ab");
}

#[test]
fn test_whitespace_only_text_is_dropped() {
    let tree = parse("<div>\n   \n</div>");
    let div = find_element(&tree, NodeId::ROOT, "div").unwrap();
    assert!(tree.children(div).is_empty());
}

#[test]
fn test_empty_input() {
    let tree = parse("");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["head", "body"]);
    assert!(tree.children(body(&tree)).is_empty());
}

// ========== character references ==========

#[test]
fn test_known_reference() {
    let tree = parse("&gt;");
    assert_eq!(texts(&tree, body(&tree)), vec![">"]);
}

#[test]
fn test_reference_splits_text_nodes() {
    let tree = parse("a &amp; b");
    assert_eq!(texts(&tree, body(&tree)), vec!["a ", "&", " b"]);
    assert_eq!(tree.text_content(body(&tree)), "a & b");
}

#[test]
fn test_numeric_reference() {
    let tree = parse("it&#39;s");
    assert_eq!(tree.text_content(body(&tree)), "it's");
}

#[test]
fn test_unknown_reference_is_literal() {
    let tree = parse("&bogus;");
    assert_eq!(texts(&tree, body(&tree)), vec!["&bogus;"]);
}

#[test]
fn test_reference_interrupted_by_space() {
    let tree = parse("&gtclose panda");
    assert_eq!(texts(&tree, body(&tree)), vec!["&gtclose", " panda"]);
}

#[test]
fn test_reference_interrupted_by_tag() {
    let tree = parse("&gt<b>bold</b>");
    let body = body(&tree);
    assert_eq!(child_tags(&tree, body), vec!["#text", "b"]);
    assert_eq!(texts(&tree, body), vec!["&gt"]);
}

#[test]
fn test_reference_at_end_of_input() {
    let tree = parse("&gtclose");
    assert_eq!(texts(&tree, body(&tree)), vec!["&gtclose"]);
}

#[test]
fn test_unterminated_tag_at_end_is_text() {
    let tree = parse("x<p class");
    assert_eq!(tree.text_content(body(&tree)), "x<p class");
}

// ========== attributes ==========

#[test]
fn test_attributes_case_folded_last_duplicate_wins() {
    let tree = parse(r#"<a HREF="apple.com" href="banana.com" Title=Hi>x</a>"#);
    let a = find_element(&tree, NodeId::ROOT, "a").unwrap();
    assert_eq!(tree.attribute(a, "href"), Some("banana.com"));
    assert_eq!(tree.attribute(a, "title"), Some("Hi"));
}

#[test]
fn test_uppercase_tags_are_lowercased() {
    let tree = parse("<DIV><P>x</P></DIV>");
    assert!(find_element(&tree, NodeId::ROOT, "div").is_some());
    assert!(find_element(&tree, NodeId::ROOT, "p").is_some());
}

// ========== fragments and printing ==========

#[test]
fn test_parse_fragment_returns_body_children() {
    let (tree, nodes) = parse_fragment("<b>bold</b> tail");
    assert_eq!(nodes.len(), 2);
    assert_eq!(tree.tag_name(nodes[0]), Some("b"));
    assert_eq!(tree.as_text(nodes[1]), Some(" tail"));
}

#[test]
fn test_format_tree() {
    let tree = parse(r#"<p class="x" id=a>hi</p>"#);
    let out = format_tree(&tree, NodeId::ROOT);
    assert_eq!(
        out,
        "<html>\n  <head>\n  <body>\n    <p class=\"x\" id=\"a\">\n      \"hi\"\n"
    );
}

// ========== totality ==========

#[quickcheck]
fn prop_any_input_yields_head_then_body(input: String) -> bool {
    let tree = parse(&input);
    let root_children = child_tags(&tree, NodeId::ROOT);
    root_children == ["head", "body"]
        && tree
            .descendants(NodeId::ROOT)
            .into_iter()
            .skip(1)
            .all(|id| {
                tree.parent(id)
                    .is_some_and(|parent| tree.children(parent).contains(&id))
            })
}

#[quickcheck]
fn prop_tag_soup_yields_head_then_body(pieces: Vec<u8>) -> bool {
    const PARTS: [&str; 12] = [
        "<p>", "</p>", "<head>", "</head>", "<body>", "</html>", "<br>", "text", "&amp;", "&",
        "<title>", "<",
    ];
    let input: String = pieces
        .iter()
        .map(|&b| PARTS[usize::from(b) % PARTS.len()])
        .collect();
    let tree = parse(&input);
    child_tags(&tree, NodeId::ROOT) == ["head", "body"]
}
