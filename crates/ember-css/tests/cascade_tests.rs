//! Integration tests for the cascade.

use ember_css::{Stylesheet, cascade_order, default_stylesheet, parse, style, style_with_font_size};
use ember_dom::{DomTree, NodeId, StyleMap};

fn first(tree: &DomTree, tag: &str) -> NodeId {
    tree.descendants(tree.root())
        .into_iter()
        .find(|&id| tree.is_element_named(id, tag))
        .unwrap()
}

fn styled(html: &str, css: &str) -> DomTree {
    let mut tree = ember_html::parse(html);
    let mut sheet = default_stylesheet().clone();
    sheet.append(&parse(css));
    style(&mut tree, &sheet);
    tree
}

fn value<'a>(tree: &'a DomTree, node: NodeId, property: &str) -> Option<&'a str> {
    tree.style_value(node, property)
}

#[test]
fn test_higher_priority_wins_regardless_of_source_order() {
    let tree = styled(r#"<p class="a">Hi</p>"#, ".a { color: red; } p { color: blue; }");
    let p = first(&tree, "p");
    assert_eq!(value(&tree, p, "color"), Some("blue"));
}

#[test]
fn test_equal_priority_keeps_source_order() {
    let tree = styled("<p>Hi</p>", "p { color: red; } p { color: green; }");
    assert_eq!(value(&tree, first(&tree, "p"), "color"), Some("green"));
}

#[test]
fn test_inline_style_overrides_rules() {
    let tree = styled(
        r#"<div class="x"><p style="color: purple">Hi</p></div>"#,
        "div p { color: red; } p { color: blue }",
    );
    assert_eq!(value(&tree, first(&tree, "p"), "color"), Some("purple"));
}

#[test]
fn test_inherited_properties_flow_to_text() {
    let tree = styled("<div><span>Hi</span></div>", "div { color: green; font-family: Arial; }");
    let span = first(&tree, "span");
    let text = tree.children(span)[0];
    assert_eq!(value(&tree, text, "color"), Some("green"));
    assert_eq!(value(&tree, text, "font-family"), Some("Arial"));
}

#[test]
fn test_non_inherited_properties_stay_put() {
    let tree = styled("<div><span>Hi</span></div>", "div { background-color: red; }");
    assert_eq!(value(&tree, first(&tree, "span"), "background-color"), None);
}

#[test]
fn test_root_defaults() {
    let tree = styled("", "");
    let root = tree.root();
    assert_eq!(value(&tree, root, "font-size"), Some("16px"));
    assert_eq!(value(&tree, root, "font-family"), Some("Times"));
    assert_eq!(value(&tree, root, "color"), Some("black"));
    assert_eq!(value(&tree, root, "display"), Some("block"));
}

#[test]
fn test_percentage_em_and_inherit_font_sizes() {
    let tree = styled(
        r#"<div><p>a</p><span>b</span><b>c</b><i>d</i></div>"#,
        "div { font-size: 20px } p { font-size: 150% } span { font-size: 2em } b { font-size: inherit } i { font-size: 1rem }",
    );
    assert_eq!(value(&tree, first(&tree, "p"), "font-size"), Some("30px"));
    assert_eq!(value(&tree, first(&tree, "span"), "font-size"), Some("40px"));
    assert_eq!(value(&tree, first(&tree, "b"), "font-size"), Some("20px"));
    assert_eq!(value(&tree, first(&tree, "i"), "font-size"), Some("16px"));
}

#[test]
fn test_nested_percentages_compound() {
    let tree = styled("<div><div>x</div></div>", "div { font-size: 50% }");
    let outer = first(&tree, "div");
    let inner = tree.children(outer)[0];
    assert_eq!(value(&tree, outer, "font-size"), Some("8px"));
    assert_eq!(value(&tree, inner, "font-size"), Some("4px"));
    assert_eq!(value(&tree, tree.children(inner)[0], "font-size"), Some("4px"));
}

#[test]
fn test_unparseable_font_size_falls_back_to_root() {
    let tree = styled("<p>x</p>", "p { font-size: huge }");
    assert_eq!(value(&tree, first(&tree, "p"), "font-size"), Some("16px"));
}

#[test]
fn test_custom_root_font_size() {
    let mut tree = ember_html::parse("<p>x</p>");
    style_with_font_size(&mut tree, default_stylesheet(), 20.0);
    assert_eq!(tree.style_value(first(&tree, "p"), "font-size"), Some("20px"));
}

#[test]
fn test_rem_follows_root_font_size() {
    let mut tree = ember_html::parse("<div><p>a</p></div>");
    let mut sheet = default_stylesheet().clone();
    sheet.append(&parse("div { font-size: 10px } p { font-size: 1.5rem }"));
    style_with_font_size(&mut tree, &sheet, 20.0);
    assert_eq!(tree.style_value(first(&tree, "p"), "font-size"), Some("30px"));

    let tree = styled(
        "<div><p>a</p></div>",
        "html { font-size: 12px } div { font-size: 40px } p { font-size: 2rem }",
    );
    assert_eq!(value(&tree, tree.root(), "font-size"), Some("12px"));
    assert_eq!(value(&tree, first(&tree, "p"), "font-size"), Some("24px"));
}

#[test]
fn test_default_sheet_hides_head_content() {
    let tree = styled("<title>t</title><script>x</script><p>y</p>", "");
    assert_eq!(value(&tree, first(&tree, "title"), "display"), Some("none"));
    assert_eq!(value(&tree, first(&tree, "script"), "display"), Some("none"));
    assert_eq!(value(&tree, first(&tree, "p"), "display"), Some("block"));
}

#[test]
fn test_cascade_order_is_stable() {
    let sheet = parse("p { color: red } .a { color: blue } div { color: green } * { color: gray }");
    let order: Vec<String> = cascade_order(&sheet)
        .into_iter()
        .map(|r| r.selector.to_string())
        .collect();
    assert_eq!(order, vec!["*", ".a", "p", "div"]);
}

#[test]
fn test_restyle_replaces_previous_styles() {
    let mut tree = ember_html::parse("<p>x</p>");
    style(&mut tree, &parse("p { color: red }"));
    style(&mut tree, &Stylesheet::new());
    assert_eq!(tree.style_value(first(&tree, "p"), "color"), Some("black"));
}

fn snapshot(tree: &DomTree) -> Vec<StyleMap> {
    tree.descendants(tree.root())
        .into_iter()
        .map(|id| tree.style(id).clone())
        .collect()
}

#[quickcheck_macros::quickcheck]
fn prop_style_is_idempotent(html: String, css: String) -> bool {
    let mut tree = ember_html::parse(&html);
    let mut sheet = default_stylesheet().clone();
    sheet.append(&parse(&css));
    style(&mut tree, &sheet);
    let once = snapshot(&tree);
    style(&mut tree, &sheet);
    once == snapshot(&tree)
}
