use std::fmt::Write as _;

use ember_common::warning::warn_once;
use ember_dom::{AttributesMap, DomTree, NodeId, NodeType};

use crate::tokenizer::named_character_references::resolve;
use crate::tokenizer::{CHARACTER_REFERENCE_TERMINATORS, TokenizerState, parse_tag};

/// [§ 13.1.2 Void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements."
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Tags that belong in `head` when they appear before any body content.
pub const HEAD_ELEMENTS: [&str; 9] = [
    "base", "basefont", "bgsound", "noscript", "link", "meta", "title", "style", "script",
];

/// Tag-soup HTML parser.
///
/// Scans the input once, character by character, maintaining a stack of
/// unfinished elements. An element is attached to its parent when it is
/// popped off that stack; text and void elements are attached immediately
/// to the current top.
///
/// # Example
/// ```
/// use ember_html::HTMLParser;
///
/// let tree = HTMLParser::new("<p>hello</p>").run();
/// let body = tree.body().unwrap();
/// assert_eq!(tree.text_content(body), "hello");
/// ```
pub struct HTMLParser {
    input: String,
    tree: DomTree,
    /// Stack of open elements. `unfinished[0]` is always the root once
    /// anything has been inserted.
    unfinished: Vec<NodeId>,
    state: TokenizerState,
}

impl HTMLParser {
    /// Create a parser for the given markup.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            tree: DomTree::new(),
            unfinished: Vec::new(),
            state: TokenizerState::Text,
        }
    }

    /// Parse the whole input and return the finished tree.
    ///
    /// Never fails. The returned root is an `html` element whose children are
    /// exactly one `head` followed by exactly one `body`.
    #[must_use]
    pub fn run(mut self) -> DomTree {
        let input = std::mem::take(&mut self.input);
        let mut buffer = String::new();

        for c in input.chars() {
            if self.state == TokenizerState::InCharacterReference
                && CHARACTER_REFERENCE_TERMINATORS.contains(&c)
            {
                self.add_text(&format!("&{buffer}"));
                buffer.clear();
                self.state = TokenizerState::Text;
            }

            match self.state {
                TokenizerState::InTag => {
                    if c == '>' {
                        self.add_tag(&buffer);
                        buffer.clear();
                        self.state = TokenizerState::Text;
                    } else {
                        buffer.push(c);
                    }
                }
                TokenizerState::InCharacterReference => {
                    if c == ';' {
                        match resolve(&buffer) {
                            Some(resolved) => self.add_text(&resolved),
                            None => {
                                warn_once(
                                    "HTML",
                                    &format!("unknown character reference &{buffer};"),
                                );
                                self.add_text(&format!("&{buffer};"));
                            }
                        }
                        buffer.clear();
                        self.state = TokenizerState::Text;
                    } else {
                        buffer.push(c);
                    }
                }
                TokenizerState::Text => match c {
                    '<' => {
                        self.flush_text(&mut buffer);
                        self.state = TokenizerState::InTag;
                    }
                    '&' => {
                        self.flush_text(&mut buffer);
                        self.state = TokenizerState::InCharacterReference;
                    }
                    _ => buffer.push(c),
                },
            }
        }

        // Whatever is left over at end of input is literal text.
        match self.state {
            TokenizerState::InCharacterReference => self.add_text(&format!("&{buffer}")),
            TokenizerState::InTag => self.add_text(&format!("<{buffer}")),
            TokenizerState::Text => self.add_text(&buffer),
        }

        self.finish()
    }

    fn flush_text(&mut self, buffer: &mut String) {
        if !buffer.is_empty() {
            self.add_text(buffer);
            buffer.clear();
        }
    }

    /// Append a text node to the current open element. Whitespace-only text
    /// is dropped.
    fn add_text(&mut self, text: &str) {
        if text.chars().all(|c| c.is_ascii_whitespace()) {
            return;
        }
        self.insert_implied_tags(None);
        let parent = self.current();
        let text_id = self.tree.alloc_text(text);
        self.tree.append_child(parent, text_id);
    }

    /// Handle the text between `<` and `>`.
    fn add_tag(&mut self, text: &str) {
        let (tag, attrs) = parse_tag(text);

        // Comments, DOCTYPE and processing instructions.
        if tag.is_empty() || tag.starts_with('!') || tag.starts_with('?') {
            log::debug!(target: "html", "ignoring markup declaration <{text}>");
            return;
        }

        // A second `html` start tag contributes its attributes to the root.
        if tag == "html" && !self.unfinished.is_empty() {
            if let Some(root) = self.tree.as_element_mut(NodeId::ROOT) {
                for (key, value) in attrs {
                    let _ = root.attrs.entry(key).or_insert(value);
                }
            }
            return;
        }

        self.insert_implied_tags(Some(&tag));

        if tag.starts_with('/') {
            self.close_current();
        } else if VOID_ELEMENTS.contains(&tag.as_str()) {
            let parent = self.current();
            let id = self.tree.alloc_element(&tag, attrs);
            self.tree.append_child(parent, id);
        } else {
            self.open(&tag, attrs);
        }
    }

    /// Push a new unfinished element. The very first element reuses the
    /// tree's root node.
    fn open(&mut self, tag: &str, attrs: AttributesMap) {
        let id = if self.unfinished.is_empty() {
            if let Some(root) = self.tree.as_element_mut(NodeId::ROOT) {
                root.attrs = attrs;
            }
            NodeId::ROOT
        } else {
            self.tree.alloc_element(tag, attrs)
        };
        self.unfinished.push(id);
    }

    /// Pop the current element and attach it to the new top. End tags never
    /// close the root, and the tag name is not checked against the element
    /// being closed.
    fn close_current(&mut self) {
        if self.unfinished.len() <= 1 {
            return;
        }
        if let Some(node) = self.unfinished.pop() {
            let parent = self.current();
            self.tree.append_child(parent, node);
        }
    }

    fn current(&self) -> NodeId {
        self.unfinished.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn open_tags(&self) -> Vec<&str> {
        self.unfinished
            .iter()
            .filter_map(|&id| self.tree.tag_name(id))
            .collect()
    }

    /// Insert the `html`, `head` and `body` tags that the markup left out,
    /// based on the open elements and the tag about to be processed (`None`
    /// for text).
    fn insert_implied_tags(&mut self, incoming: Option<&str>) {
        loop {
            let open = self.open_tags();
            if open.is_empty() && incoming != Some("html") {
                self.open("html", AttributesMap::new());
            } else if open == ["html"]
                && !matches!(incoming, Some("head" | "body" | "/html"))
            {
                let tag = if incoming.is_some_and(|t| HEAD_ELEMENTS.contains(&t)) {
                    "head"
                } else {
                    "body"
                };
                self.open(tag, AttributesMap::new());
            } else if open == ["html", "head"]
                && !incoming.is_some_and(|t| t == "/head" || HEAD_ELEMENTS.contains(&t))
            {
                self.close_current();
            } else {
                break;
            }
        }
    }

    /// Close everything still open and normalise the root's children.
    fn finish(mut self) -> DomTree {
        if self.unfinished.is_empty() {
            self.insert_implied_tags(None);
        }
        while self.unfinished.len() > 1 {
            self.close_current();
        }
        normalize_document(&mut self.tree);
        self.tree
    }
}

/// Make the root hold exactly one `head` followed by exactly one `body`.
///
/// Extra `head`/`body` children (e.g. from content after `</html>`) are
/// merged into the first one, preserving order, and missing ones are created.
fn normalize_document(tree: &mut DomTree) {
    let root = NodeId::ROOT;
    let head = merge_root_children(tree, "head");
    let body = merge_root_children(tree, "body");

    let body = body.unwrap_or_else(|| {
        let body = tree.alloc_element("body", AttributesMap::new());
        tree.append_child(root, body);
        body
    });
    let head = head.unwrap_or_else(|| tree.alloc_element("head", AttributesMap::new()));

    // Anything else directly under the root moves into the body.
    let strays: Vec<NodeId> = tree
        .children(root)
        .iter()
        .copied()
        .filter(|&id| id != head && id != body)
        .collect();
    for stray in strays {
        tree.append_child(body, stray);
    }

    tree.insert_before(root, head, body);
}

fn merge_root_children(tree: &mut DomTree, tag: &str) -> Option<NodeId> {
    let matching: Vec<NodeId> = tree
        .children(NodeId::ROOT)
        .iter()
        .copied()
        .filter(|&id| tree.is_element_named(id, tag))
        .collect();
    let (&first, rest) = matching.split_first()?;
    for &extra in rest {
        tree.move_children(extra, first);
        tree.remove_child(NodeId::ROOT, extra);
    }
    Some(first)
}

/// Parse markup into a document tree.
#[must_use]
pub fn parse(html: &str) -> DomTree {
    HTMLParser::new(html).run()
}

/// Parse a fragment as if it were the contents of `body`.
///
/// Returns the scratch tree and the top-level nodes of the fragment, ready to
/// be imported into another tree with [`DomTree::import_subtree`].
#[must_use]
pub fn parse_fragment(html: &str) -> (DomTree, Vec<NodeId>) {
    let tree = parse(&format!("<html><body>{html}</body></html>"));
    let nodes = tree
        .body()
        .map(|body| tree.children(body).to_vec())
        .unwrap_or_default();
    (tree, nodes)
}

/// Render a subtree as an indented outline, one node per line.
///
/// Attributes are listed in sorted order so the output is stable.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Element(data) => {
            let mut attrs: Vec<_> = data.attrs.iter().collect();
            attrs.sort();
            let attrs: String = attrs
                .into_iter()
                .map(|(k, v)| format!(" {k}=\"{v}\""))
                .collect();
            let _ = writeln!(out, "{prefix}<{}{attrs}>", data.tag_name);
        }
        NodeType::Text(data) => {
            let _ = writeln!(out, "{prefix}{data:?}");
        }
    }
    for &child in tree.children(id) {
        write_node(tree, child, indent + 1, out);
    }
}

/// Print a DOM tree for debugging.
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", format_tree(tree, id));
}
