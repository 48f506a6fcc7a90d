//! Layout box types.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! The box tree is rebuilt from scratch on every layout pass. Boxes live in
//! one arena and refer to each other by [`BoxId`]; the `parent` and
//! `previous` links are back-references used to place a box after its
//! preceding sibling without a second pass.

use std::fmt::Write as _;
use std::sync::Arc;

use ember_dom::{DomTree, NodeId, StyleMap};
use strum_macros::{AsRefStr, Display};

use super::box_model::Rect;
use super::font::Font;

/// Index of a box in a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub usize);

/// The closed set of box kinds.
#[derive(Debug, Clone, PartialEq, Display, AsRefStr)]
pub enum BoxKind {
    /// The single root box, inset from the viewport edges.
    #[strum(to_string = "DocumentBox")]
    Document,
    /// [§ 9.2.1 Block-level elements and block boxes](https://www.w3.org/TR/CSS2/visuren.html#block-boxes)
    #[strum(to_string = "BlockBox")]
    Block,
    /// [§ 9.4.2](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    /// "The rectangular area that contains the boxes that form a line is
    /// called a line box."
    #[strum(to_string = "LineBox")]
    Line,
    /// One whitespace-delimited word.
    #[strum(to_string = "TextRun")]
    TextRun {
        /// The word, without surrounding whitespace.
        word: String,
    },
    /// A fixed-width `input` or `button`.
    #[strum(to_string = "InputBox")]
    Input,
    /// A fixed-size `img` placeholder.
    #[strum(to_string = "ImageBox")]
    Image {
        /// The element's `src` attribute.
        src: String,
        /// Intrinsic width in pixels.
        width: f32,
        /// Intrinsic height in pixels.
        height: f32,
    },
}

/// What a box was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxSource {
    /// A document node.
    Node(NodeId),
    /// An index into [`LayoutTree::anonymous`].
    Anonymous(usize),
}

/// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
///
/// "if a block container box has a block-level box inside it, then we force
/// it to have only block-level boxes inside it."
///
/// A run of inline-level siblings wrapped so their parent can lay out only
/// block children.
#[derive(Debug, Clone)]
pub struct AnonymousBlock {
    /// The element whose children were wrapped.
    pub parent: NodeId,
    /// The wrapped siblings, in document order.
    pub nodes: Vec<NodeId>,
    /// A copy of the parent's resolved style with `display: block`.
    pub style: StyleMap,
}

/// A single box with its resolved geometry.
///
/// Geometry is `None` until the layout pass assigns it.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// What kind of box this is.
    pub kind: BoxKind,
    /// The node (or anonymous wrapper) the box was generated for.
    pub source: BoxSource,
    /// Containing box; `None` only for the document box.
    pub parent: Option<BoxId>,
    /// Preceding sibling in flow order.
    pub previous: Option<BoxId>,
    /// Child boxes in flow order.
    pub children: Vec<BoxId>,
    /// Font used by text, input and image boxes.
    pub font: Option<Arc<Font>>,
    pub(crate) x: Option<f32>,
    pub(crate) y: Option<f32>,
    pub(crate) width: Option<f32>,
    pub(crate) height: Option<f32>,
}

fn resolved(value: Option<f32>, field: &str, kind: &BoxKind) -> f32 {
    match value {
        Some(v) => v,
        None => panic!("{field} of {kind} read before layout"),
    }
}

impl LayoutBox {
    fn new(kind: BoxKind, source: BoxSource, parent: Option<BoxId>, previous: Option<BoxId>) -> Self {
        Self {
            kind,
            source,
            parent,
            previous,
            children: Vec::new(),
            font: None,
            x: None,
            y: None,
            width: None,
            height: None,
        }
    }

    /// Left edge.
    ///
    /// # Panics
    ///
    /// Panics if layout has not assigned the value.
    #[must_use]
    pub fn x(&self) -> f32 {
        resolved(self.x, "x", &self.kind)
    }

    /// Top edge.
    ///
    /// # Panics
    ///
    /// Panics if layout has not assigned the value.
    #[must_use]
    pub fn y(&self) -> f32 {
        resolved(self.y, "y", &self.kind)
    }

    /// Width.
    ///
    /// # Panics
    ///
    /// Panics if layout has not assigned the value.
    #[must_use]
    pub fn width(&self) -> f32 {
        resolved(self.width, "width", &self.kind)
    }

    /// Height.
    ///
    /// # Panics
    ///
    /// Panics if layout has not assigned the value.
    #[must_use]
    pub fn height(&self) -> f32 {
        resolved(self.height, "height", &self.kind)
    }

    /// The border box as a rectangle.
    ///
    /// # Panics
    ///
    /// Panics if any coordinate is unassigned.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x(), self.y(), self.width(), self.height())
    }

    /// True once all four coordinates are assigned.
    #[must_use]
    pub const fn is_laid_out(&self) -> bool {
        self.x.is_some() && self.y.is_some() && self.width.is_some() && self.height.is_some()
    }

    /// Advance of a space in this box's font, or 0 for boxes without one.
    #[must_use]
    pub fn space_width(&self) -> f32 {
        self.font.as_ref().map_or(0.0, |f| f.space_width)
    }
}

/// The box tree produced by one layout pass.
///
/// Box 0 is always the document box.
#[derive(Debug, Clone, Default)]
pub struct LayoutTree {
    boxes: Vec<LayoutBox>,
    anonymous: Vec<AnonymousBlock>,
}

impl LayoutTree {
    /// The document box.
    pub const ROOT: BoxId = BoxId(0);

    /// Allocate a box and append it to `parent`'s children.
    pub(crate) fn push(
        &mut self,
        kind: BoxKind,
        source: BoxSource,
        parent: Option<BoxId>,
        previous: Option<BoxId>,
    ) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(LayoutBox::new(kind, source, parent, previous));
        if let Some(parent) = parent {
            self.boxes[parent.0].children.push(id);
        }
        id
    }

    pub(crate) fn push_anonymous(&mut self, block: AnonymousBlock) -> BoxSource {
        self.anonymous.push(block);
        BoxSource::Anonymous(self.anonymous.len() - 1)
    }

    pub(crate) fn get_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }

    /// The document box.
    #[must_use]
    pub const fn root(&self) -> BoxId {
        Self::ROOT
    }

    /// Look up a box.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn get(&self, id: BoxId) -> &LayoutBox {
        match self.boxes.get(id.0) {
            Some(layout_box) => layout_box,
            None => panic!("dangling {id:?}: tree has {} boxes", self.boxes.len()),
        }
    }

    /// Number of boxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// True for a tree that was never laid out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Child boxes of `id`.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        &self.get(id).children
    }

    /// The anonymous wrapper with the given index.
    #[must_use]
    pub fn anonymous(&self, index: usize) -> &AnonymousBlock {
        &self.anonymous[index]
    }

    /// The subtree rooted at `id` (inclusive) flattened in pre-order.
    #[must_use]
    pub fn descendants(&self, id: BoxId) -> Vec<BoxId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        out
    }

    /// The document node a box was generated for; `None` for anonymous
    /// wrappers.
    #[must_use]
    pub fn node(&self, id: BoxId) -> Option<NodeId> {
        match self.get(id).source {
            BoxSource::Node(node) => Some(node),
            BoxSource::Anonymous(_) => None,
        }
    }

    /// The document node whose style and attributes govern the box. For an
    /// anonymous wrapper this is the wrapped element.
    #[must_use]
    pub fn style_node(&self, id: BoxId) -> NodeId {
        match self.get(id).source {
            BoxSource::Node(node) => node,
            BoxSource::Anonymous(index) => self.anonymous[index].parent,
        }
    }

    /// The resolved style of the box.
    #[must_use]
    pub fn style<'a>(&'a self, dom: &'a DomTree, id: BoxId) -> &'a StyleMap {
        match self.get(id).source {
            BoxSource::Node(node) => dom.style(node),
            BoxSource::Anonymous(index) => &self.anonymous[index].style,
        }
    }

    /// Height of the laid-out document, 0 for an empty tree.
    #[must_use]
    pub fn document_height(&self) -> f32 {
        self.boxes.first().and_then(|b| b.height).unwrap_or(0.0)
    }

    /// First box, in pre-order, generated for an element whose `id`
    /// attribute equals `fragment`.
    #[must_use]
    pub fn find_by_element_id(&self, dom: &DomTree, fragment: &str) -> Option<BoxId> {
        self.descendants(self.root()).into_iter().find(|&id| {
            self.node(id)
                .and_then(|node| dom.as_element(node))
                .and_then(|element| element.id())
                .is_some_and(|value| value == fragment)
        })
    }

    /// An indented outline of the tree with geometry, one box per line.
    #[must_use]
    pub fn format(&self, dom: &DomTree) -> String {
        let mut out = String::new();
        if !self.is_empty() {
            self.format_box(dom, self.root(), 0, &mut out);
        }
        out
    }

    fn format_box(&self, dom: &DomTree, id: BoxId, depth: usize, out: &mut String) {
        let b = self.get(id);
        let label = match (&b.kind, b.source) {
            (BoxKind::TextRun { word }, _) => format!("{} {word:?}", b.kind),
            (BoxKind::Image { src, .. }, _) => format!("{} {src:?}", b.kind),
            (_, BoxSource::Anonymous(_)) => format!("{} (anonymous)", b.kind),
            (_, BoxSource::Node(node)) => match dom.tag_name(node) {
                Some(tag) => format!("{} <{tag}>", b.kind),
                None => b.kind.to_string(),
            },
        };
        let geometry = |v: Option<f32>| v.map_or_else(|| "?".to_string(), |v| format!("{v:.1}"));
        let _ = writeln!(
            out,
            "{}{label} x={} y={} w={} h={}",
            "  ".repeat(depth),
            geometry(b.x),
            geometry(b.y),
            geometry(b.width),
            geometry(b.height),
        );
        for &child in &b.children {
            self.format_box(dom, child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "x of BlockBox read before layout")]
    fn test_reading_geometry_before_layout_panics() {
        let mut tree = LayoutTree::default();
        let id = tree.push(BoxKind::Block, BoxSource::Node(NodeId::ROOT), None, None);
        let _ = tree.get(id).x();
    }

    #[test]
    #[should_panic(expected = "dangling")]
    fn test_dangling_box_id_panics() {
        let tree = LayoutTree::default();
        let _ = tree.get(BoxId(3));
    }

    #[test]
    fn test_push_links_parent_and_children() {
        let mut tree = LayoutTree::default();
        let doc = tree.push(BoxKind::Document, BoxSource::Node(NodeId::ROOT), None, None);
        let a = tree.push(BoxKind::Block, BoxSource::Node(NodeId(1)), Some(doc), None);
        let b = tree.push(BoxKind::Block, BoxSource::Node(NodeId(2)), Some(doc), Some(a));
        assert_eq!(tree.children(doc), &[a, b]);
        assert_eq!(tree.get(b).previous, Some(a));
        assert_eq!(tree.descendants(doc), vec![doc, a, b]);
        assert!(!tree.get(a).is_laid_out());
    }
}
