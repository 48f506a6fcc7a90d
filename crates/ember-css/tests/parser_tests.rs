//! Integration tests for the stylesheet parser.

use ember_css::{Selector, parse, parse_declaration_block, parse_selector, parse_selector_list};

fn tag(name: &str) -> Box<Selector> {
    Box::new(Selector::Tag(name.to_string()))
}

#[test]
fn test_two_rules_in_source_order() {
    let sheet = parse("p { color: red; } .note { font-size: 90%; }");
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.rules[0].selector, Selector::Tag("p".to_string()));
    assert_eq!(sheet.rules[0].declarations["color"], "red");
    assert_eq!(sheet.rules[1].selector, Selector::Class("note".to_string()));
    assert_eq!(sheet.rules[1].declarations["font-size"], "90%");
}

#[test]
fn test_unsupported_selector_is_dropped() {
    let sheet = parse("h1 { display: block} p:before span {color: white;} li {padding-left:2px;}");
    let selectors: Vec<String> = sheet.iter().map(|r| r.selector.to_string()).collect();
    assert_eq!(selectors, vec!["h1", "li"]);
    assert_eq!(sheet.rules[1].declarations["padding-left"], "2px");
}

#[test]
fn test_selector_list_expands_to_separate_rules() {
    let sheet = parse("li, p { margin: 0 }");
    assert_eq!(sheet.len(), 2);
    assert_eq!(sheet.rules[0].selector, Selector::Tag("li".to_string()));
    assert_eq!(sheet.rules[1].selector, Selector::Tag("p".to_string()));
    assert_eq!(sheet.rules[0].declarations, sheet.rules[1].declarations);
}

#[test]
fn test_combinators_associate_left() {
    let selector = parse_selector("li > p span").unwrap();
    assert_eq!(
        selector,
        Selector::Descendant(Box::new(Selector::DirectDescendant(tag("li"), tag("p"))), tag("span"))
    );
    assert_eq!(selector.priority(), 6);
    assert_eq!(selector.to_string(), "li > p span");
}

#[test]
fn test_class_and_universal_selectors() {
    assert_eq!(
        parse_selector(".green-text").unwrap(),
        Selector::Class("green-text".to_string())
    );
    assert_eq!(parse_selector("*").unwrap(), Selector::Universal);
    assert_eq!(parse_selector("DIV").unwrap(), Selector::Tag("div".to_string()));
    assert!(parse_selector("#main").is_err());
    assert!(parse_selector("a:hover").is_err());
    assert!(parse_selector("p, div").is_err());
    assert_eq!(parse_selector_list("p, div").unwrap().len(), 2);
}

#[test]
fn test_at_rules_are_skipped() {
    let sheet = parse(
        "@import url(a.css);\n\
         @media (max-width: 600px) { p { color: red; } div { color: blue } }\n\
         b { font-weight: bold }",
    );
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules[0].selector, Selector::Tag("b".to_string()));
}

#[test]
fn test_missing_semicolon_drops_only_that_declaration() {
    let declarations = parse_declaration_block("color: red background: blue; font-size: 12px");
    assert_eq!(declarations.get("color"), None);
    assert_eq!(declarations["font-size"], "12px");
}

#[test]
fn test_jargon_between_rules_resyncs() {
    let sheet = parse("p { color: red } ;;; }}} div { color: blue }");
    let selectors: Vec<String> = sheet.iter().map(|r| r.selector.to_string()).collect();
    assert_eq!(selectors, vec!["p", "div"]);
}

#[test]
fn test_declaration_values() {
    let declarations = parse_declaration_block(
        "Font-Family: \"Helvetica Neue\", Arial; background: rgb(1, 2, 3) !important; width:10px",
    );
    assert_eq!(declarations["font-family"], "\"Helvetica Neue\", Arial");
    assert_eq!(declarations["background"], "rgb(1, 2, 3)");
    assert_eq!(declarations["width"], "10px");
}

#[test]
fn test_later_duplicate_declaration_wins() {
    let declarations = parse_declaration_block("color: red; color: green");
    assert_eq!(declarations["color"], "green");
}

#[test]
fn test_unterminated_block_is_accepted() {
    let sheet = parse("p { color: red");
    assert_eq!(sheet.len(), 1);
    assert_eq!(sheet.rules[0].declarations["color"], "red");
}

#[test]
fn test_empty_and_comment_only_input() {
    assert!(parse("").is_empty());
    assert!(parse("  /* nothing here */  ").is_empty());
    assert!(parse_declaration_block("").is_empty());
}

#[quickcheck_macros::quickcheck]
fn prop_parse_is_total(css: String) -> bool {
    let sheet = parse(&css);
    sheet.iter().all(|rule| rule.selector.priority() < u32::MAX)
}
