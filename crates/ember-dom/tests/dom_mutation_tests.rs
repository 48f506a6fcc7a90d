//! Tests for DOM tree mutation and traversal: append, remove, insert, move,
//! replace, import and tree-order walks.

use ember_dom::{AttributesMap, DomTree, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc_element(tag, AttributesMap::new())
}

#[test]
fn test_new_tree_has_html_root() {
    let tree = DomTree::new();
    assert_eq!(tree.root(), NodeId::ROOT);
    assert_eq!(tree.tag_name(NodeId::ROOT), Some("html"));
    assert!(tree.parent(NodeId::ROOT).is_none());
    assert!(tree.style(NodeId::ROOT).is_empty());
}

// ========== remove_child / detach ==========

#[test]
fn test_remove_child_keeps_sibling_links() {
    let mut tree = DomTree::new();
    let list = alloc_element(&mut tree, "ul");
    tree.append_child(NodeId::ROOT, list);
    let items: Vec<NodeId> = ["one", "two", "three"]
        .iter()
        .map(|text| {
            let li = alloc_element(&mut tree, "li");
            let t = tree.alloc_text(text);
            tree.append_child(li, t);
            tree.append_child(list, li);
            li
        })
        .collect();

    tree.remove_child(list, items[1]);

    assert_eq!(tree.children(list), &[items[0], items[2]]);
    assert_eq!(tree.parent(items[1]), None);
    assert_eq!(tree.text_content(list), "onethree");
    // The removed subtree is intact, just unattached.
    assert_eq!(tree.text_content(items[1]), "two");
}

#[test]
fn test_detach_last_child_leaves_empty_parent() {
    let mut tree = DomTree::new();
    let form = alloc_element(&mut tree, "form");
    tree.append_child(NodeId::ROOT, form);
    let input = alloc_element(&mut tree, "input");
    tree.append_child(form, input);

    tree.detach(input);

    assert!(tree.children(form).is_empty());
    assert!(!tree.is_descendant_of(input, NodeId::ROOT));
}

#[test]
fn test_append_reparents_instead_of_sharing() {
    let mut tree = DomTree::new();
    let first = alloc_element(&mut tree, "div");
    let second = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, first);
    tree.append_child(NodeId::ROOT, second);

    let p = alloc_element(&mut tree, "p");
    tree.append_child(first, p);
    tree.append_child(second, p);

    assert!(tree.children(first).is_empty());
    assert_eq!(tree.children(second), &[p]);
    assert_eq!(tree.parent(p), Some(second));
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let existing = alloc_element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, existing);

    let head = alloc_element(&mut tree, "head");
    tree.insert_before(NodeId::ROOT, head, existing);

    assert_eq!(tree.children(NodeId::ROOT), &[head, existing]);
    assert_eq!(tree.parent(head), Some(NodeId::ROOT));
    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.body(), Some(existing));
}

// ========== move_children / replace_children ==========

#[test]
fn test_move_children_merges_duplicate_body() {
    let mut tree = DomTree::new();
    let body = alloc_element(&mut tree, "body");
    let stray = alloc_element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, body);
    tree.append_child(NodeId::ROOT, stray);
    let h1 = alloc_element(&mut tree, "h1");
    tree.append_child(body, h1);
    let p = alloc_element(&mut tree, "p");
    let text = tree.alloc_text("late");
    tree.append_child(stray, p);
    tree.append_child(stray, text);

    tree.move_children(stray, body);
    tree.remove_child(NodeId::ROOT, stray);

    assert_eq!(tree.children(body), &[h1, p, text]);
    assert_eq!(tree.parent(text), Some(body));
    assert_eq!(tree.children(NodeId::ROOT), &[body]);
}

#[test]
fn test_replace_children_detaches_old() {
    let mut tree = DomTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);
    let old = tree.alloc_text("old");
    tree.append_child(div, old);

    let a = tree.alloc_text("a");
    let b = alloc_element(&mut tree, "b");
    tree.replace_children(div, &[a, b]);

    assert_eq!(tree.children(div), &[a, b]);
    assert_eq!(tree.parent(old), None);
    assert_eq!(tree.parent(a), Some(div));
    assert_eq!(tree.text_content(div), "a");
}

#[test]
fn test_import_subtree_copies_structure() {
    let mut source = DomTree::new();
    let p = alloc_element(&mut source, "p");
    source.append_child(NodeId::ROOT, p);
    let text = source.alloc_text("hello");
    source.append_child(p, text);

    let mut target = DomTree::new();
    let copy = target.import_subtree(&source, p);
    target.append_child(NodeId::ROOT, copy);

    assert_eq!(target.tag_name(copy), Some("p"));
    assert_eq!(target.text_content(copy), "hello");
    assert_eq!(target.parent(copy), Some(NodeId::ROOT));
    // The source tree is untouched.
    assert_eq!(source.children(p).len(), 1);
}

// ========== traversal ==========

#[test]
fn test_descendants_are_in_tree_order() {
    let mut tree = DomTree::new();
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    let text = tree.alloc_text("hello moto");
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, body);
    tree.append_child(body, p);
    tree.append_child(p, text);
    tree.append_child(body, div);

    assert_eq!(tree.descendants(NodeId::ROOT), vec![NodeId::ROOT, body, p, text, div]);
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = DomTree::new();
    let body = alloc_element(&mut tree, "body");
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, body);
    tree.append_child(body, p);

    let chain: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(chain, vec![body, NodeId::ROOT]);
    assert!(tree.is_descendant_of(p, NodeId::ROOT));
    assert!(!tree.is_descendant_of(body, p));
}

#[test]
fn test_class_list_and_id() {
    let mut tree = DomTree::new();
    let mut attrs = AttributesMap::new();
    let _ = attrs.insert("class".to_string(), "a  b".to_string());
    let _ = attrs.insert("id".to_string(), "main".to_string());
    let div = tree.alloc_element("div", attrs);

    let element = tree.as_element(div).unwrap();
    assert!(element.has_class("a"));
    assert!(element.has_class("b"));
    assert!(!element.has_class("c"));
    assert_eq!(element.id(), Some("main"));
    let span = tree.alloc_element("span", AttributesMap::new());
    assert_eq!(tree.as_element(span).unwrap().id(), None);
    assert!(matches!(tree.get(div).unwrap().node_type, NodeType::Element(_)));
}
