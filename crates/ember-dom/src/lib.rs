//! Document tree for the Ember renderer.
//!
//! This crate provides an arena-based tree of Element and Text nodes following
//! the shape of the [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! All nodes live in one vector and refer to each other through [`NodeId`]
//! indices. A node's `children` list is its only ownership edge; the `parent`
//! index is a non-owning back-reference used for upward traversal (style
//! inheritance, ancestor matching). Nodes detached from the tree stay in the
//! arena until the whole [`DomTree`] is dropped, so no node outlives its root.
//!
//! Every node also carries a resolved-style map. It is empty after parsing and
//! is filled in by the cascade.

use std::collections::HashMap;

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// Resolved `property -> value` map produced by the cascade.
pub type StyleMap = HashMap<String, String>;

/// A type-safe index into the document tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root `html` element is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// Resolved style, populated by the cascade.
    pub style: StyleMap,
}

/// The two kinds of node the renderer deals with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
}

/// Element-specific data.
///
/// NOTE: Only the local name and attributes are stored. Namespaces and custom
/// element state are out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase local name.
    pub tag_name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
    /// Whether this element currently holds input focus.
    pub is_focused: bool,
}

impl ElementData {
    /// Create element data with the given tag and attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, attrs: AttributesMap) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs,
            is_focused: false,
        }
    }

    /// [§ 3.2.6 The id attribute](https://html.spec.whatwg.org/multipage/dom.html#the-id-attribute)
    ///
    /// The element's unique identifier, the target of `#fragment` links.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").map(String::as_str)
    }

    /// [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes)
    ///
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens representing the various classes that the element belongs to."
    ///
    /// Returns true if `name` is one of those tokens.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == name))
    }
}

/// Arena-based document tree.
///
/// The root is always an `html` element at [`NodeId::ROOT`].
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree containing only an empty `html` root element.
    pub fn new() -> Self {
        let root = Node {
            node_type: NodeType::Element(ElementData::new("html", AttributesMap::new())),
            parent: None,
            children: Vec::new(),
            style: StyleMap::new(),
        };
        Self { nodes: vec![root] }
    }

    /// Get the root node ID.
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            style: StyleMap::new(),
        });
        id
    }

    /// Allocate an unattached element.
    pub fn alloc_element(&mut self, tag_name: &str, attrs: AttributesMap) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(tag_name, attrs)))
    }

    /// Allocate an unattached text node.
    pub fn alloc_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeType::Text(text.to_string()))
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Appends `child` as the last child of `parent`. A child that already
    /// has a parent is detached from it first, so a node never has two parents.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `child` into `parent` immediately before `reference`. If
    /// `reference` is not a child of `parent` the node is appended instead.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        let index = children
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`'s children. No-op if it is not a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.nodes[parent.0].children;
        if let Some(index) = children.iter().position(|&c| c == child) {
            let _ = children.remove(index);
            self.nodes[child.0].parent = None;
        }
    }

    /// Detach a node from its current parent, if any.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent {
            self.remove_child(parent, id);
        }
    }

    /// Move every child of `from` to the end of `to`, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let moved = std::mem::take(&mut self.nodes[from.0].children);
        for child in moved {
            self.nodes[to.0].children.push(child);
            self.nodes[child.0].parent = Some(to);
        }
    }

    /// Replace all children of `parent` with `new_children`, in order.
    ///
    /// The previous children are detached (their `parent` is cleared).
    pub fn replace_children(&mut self, parent: NodeId, new_children: &[NodeId]) {
        let old = std::mem::take(&mut self.nodes[parent.0].children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
        for &child in new_children {
            self.append_child(parent, child);
        }
    }

    /// Deep-copy the subtree rooted at `id` in `source` into this arena.
    ///
    /// Returns the ID of the copied root, which is left unattached.
    /// Resolved styles are not copied; the copy must be re-styled.
    pub fn import_subtree(&mut self, source: &Self, id: NodeId) -> NodeId {
        let node_type = source.nodes[id.0].node_type.clone();
        let copy = self.alloc(node_type);
        for &child in source.children(id) {
            let child_copy = self.import_subtree(source, child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// [§ 4.2.6 Tree order](https://dom.spec.whatwg.org/#concept-tree-order)
    ///
    /// The subtree rooted at `id` (inclusive) flattened in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    /// Get element data if this node is an element.
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            NodeType::Text(_) => None,
        })
    }

    /// Get text content if this node is a text node.
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            NodeType::Element(_) => None,
        })
    }

    /// Tag name of an element node.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// True if the node is an element with the given tag name.
    pub fn is_element_named(&self, id: NodeId, tag: &str) -> bool {
        self.tag_name(id) == Some(tag)
    }

    /// Attribute value of an element node.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.as_element(id)
            .and_then(|e| e.attrs.get(name))
            .map(String::as_str)
    }

    /// The resolved style of a node (empty before the cascade runs).
    pub fn style(&self, id: NodeId) -> &StyleMap {
        &self.nodes[id.0].style
    }

    /// A single resolved property of a node.
    pub fn style_value(&self, id: NodeId, property: &str) -> Option<&str> {
        self.get(id)
            .and_then(|n| n.style.get(property))
            .map(String::as_str)
    }

    /// Replace the resolved style of a node.
    pub fn set_style(&mut self, id: NodeId, style: StyleMap) {
        self.nodes[id.0].style = style;
    }

    /// [§ 4.4 textContent](https://dom.spec.whatwg.org/#dom-node-textcontent)
    ///
    /// Concatenated data of every text node in the subtree, in tree order.
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|n| self.as_text(n))
            .collect()
    }

    /// First child of the root with the given tag.
    fn root_child(&self, tag: &str) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.is_element_named(id, tag))
            .copied()
    }

    /// [§ 3.1.4 The head element](https://html.spec.whatwg.org/multipage/dom.html#the-head-element-2)
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        self.root_child("head")
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        self.root_child("body")
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
