//! Block formatting and the layout entry point.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the other,
//! vertically, beginning at the top of a containing block."
//!
//! Geometry is assigned in two phases per box: `x`, `width` and `y` come
//! top-down from the parent and previous sibling before any child is laid
//! out, and `height` comes bottom-up once every child has been placed. Width
//! must be known before line breaking, and height cannot be known until
//! children have wrapped.

use std::sync::Arc;

use ember_dom::{DomTree, NodeId};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::style::{DisplayValue, parse_px};

use super::config::LayoutConfig;
use super::font::{Font, FontCache, FontDescriptor};
use super::layout_box::{AnonymousBlock, BoxId, BoxKind, BoxSource, LayoutTree};

/// How a block box lays out its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LayoutMode {
    /// Children are stacked vertically as block boxes.
    Block,
    /// Content is broken into line boxes.
    Inline,
}

/// Lay out a styled document.
///
/// The tree must already have been through the cascade; nodes without a
/// resolved style lay out as inline content in the default font.
#[must_use]
pub fn layout(dom: &DomTree, fonts: &FontCache, config: &LayoutConfig) -> LayoutTree {
    let mut context = LayoutContext {
        dom,
        fonts,
        config,
        tree: LayoutTree::default(),
    };

    let root = dom.root();
    let document = context
        .tree
        .push(BoxKind::Document, BoxSource::Node(root), None, None);
    {
        let doc = context.tree.get_mut(document);
        doc.x = Some(config.horizontal_margin);
        doc.y = Some(0.0);
        doc.width = Some(config.content_width());
    }

    let html = context
        .tree
        .push(BoxKind::Block, BoxSource::Node(root), Some(document), None);
    context.layout_block(html);

    let height = context.tree.get(html).height();
    context.tree.get_mut(document).height = Some(height);
    log::debug!(
        "laid out {} boxes, document height {height}",
        context.tree.len()
    );
    context.tree
}

/// Shared state for one layout pass.
pub(super) struct LayoutContext<'a> {
    pub(super) dom: &'a DomTree,
    pub(super) fonts: &'a FontCache,
    pub(super) config: &'a LayoutConfig,
    pub(super) tree: LayoutTree,
}

impl LayoutContext<'_> {
    /// Document nodes whose content a block box lays out.
    ///
    /// For inline mode these are the roots of the inline walk; for block mode
    /// their children are the candidate block children.
    pub(super) fn content_nodes(&self, id: BoxId) -> Vec<NodeId> {
        match self.tree.get(id).source {
            BoxSource::Node(node) => vec![node],
            BoxSource::Anonymous(index) => self.tree.anonymous(index).nodes.clone(),
        }
    }

    fn child_nodes(&self, id: BoxId) -> Vec<NodeId> {
        match self.tree.get(id).source {
            BoxSource::Node(node) => self.dom.children(node).to_vec(),
            BoxSource::Anonymous(index) => self.tree.anonymous(index).nodes.clone(),
        }
    }

    /// [§ 2 The display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
    fn display(&self, node: NodeId) -> DisplayValue {
        DisplayValue::from_css(self.dom.style_value(node, "display"))
    }

    /// Text nodes and elements with an inline outer display.
    pub(super) fn is_inline_level(&self, node: NodeId) -> bool {
        self.dom.as_text(node).is_some() || self.display(node) == DisplayValue::Inline
    }

    /// Elements that generate no boxes: `head`, hidden inputs, anything with
    /// a `hidden` attribute or `display: none`.
    pub(super) fn is_skipped(&self, node: NodeId) -> bool {
        let Some(element) = self.dom.as_element(node) else {
            return false;
        };
        element.tag_name == "head"
            || (element.tag_name == "input"
                && element.attrs.get("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")))
            || element.attrs.contains_key("hidden")
            || self.display(node) == DisplayValue::None
    }

    /// Pick the layout mode of a block box.
    ///
    /// A text node or inline element is laid out inline. Otherwise any
    /// block-level element child forces block mode; remaining boxes with
    /// content (or an `input`/`img`) are inline, and an empty leaf is a block.
    pub(super) fn layout_mode(&self, id: BoxId) -> LayoutMode {
        let layout_box = self.tree.get(id);
        if let BoxSource::Node(node) = layout_box.source {
            if self.dom.as_text(node).is_some() {
                return LayoutMode::Inline;
            }
            if self.display(node) == DisplayValue::Inline {
                return LayoutMode::Inline;
            }
        }

        let children = self.child_nodes(id);
        let has_block_child = children.iter().any(|&child| {
            self.dom.as_element(child).is_some() && self.display(child) == DisplayValue::Block
        });
        if has_block_child {
            return LayoutMode::Block;
        }

        let node = self.tree.style_node(id);
        let is_replaced = matches!(self.dom.tag_name(node), Some("input" | "img"));
        if !children.is_empty() || is_replaced {
            LayoutMode::Inline
        } else {
            LayoutMode::Block
        }
    }

    /// The cached font for a node's resolved style.
    pub(super) fn font_for(&self, node: NodeId) -> Arc<Font> {
        let descriptor =
            FontDescriptor::from_style(self.dom.style(node), self.config.default_font_size);
        self.fonts.get(&descriptor)
    }

    /// A `width`/`height` given as a literal `<N>px`.
    fn px_override(&self, id: BoxId, property: &str) -> Option<f32> {
        self.tree
            .style(self.dom, id)
            .get(property)
            .and_then(|value| parse_px(value))
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    pub(super) fn layout_block(&mut self, id: BoxId) {
        // STEP 1: position and width, top-down.
        let (parent, previous) = {
            let b = self.tree.get(id);
            (b.parent, b.previous)
        };
        let (parent_x, parent_y, parent_width) = match parent {
            Some(p) => {
                let p = self.tree.get(p);
                (p.x(), p.y(), p.width())
            }
            None => (0.0, 0.0, self.config.content_width()),
        };
        let y = match previous {
            Some(prev) => {
                let prev = self.tree.get(prev);
                prev.y() + prev.height()
            }
            None => parent_y,
        };
        let width = self.px_override(id, "width").unwrap_or(parent_width);
        {
            let b = self.tree.get_mut(id);
            b.x = Some(parent_x);
            b.y = Some(y);
            b.width = Some(width);
        }

        // STEP 2: build and lay out children.
        match self.layout_mode(id) {
            LayoutMode::Block => self.build_block_children(id),
            LayoutMode::Inline => self.build_lines(id),
        }
        let children = self.tree.children(id).to_vec();
        for &child in &children {
            match self.tree.get(child).kind {
                BoxKind::Line => self.layout_line(child),
                _ => self.layout_block(child),
            }
        }

        // STEP 3: height, bottom-up.
        let height = self.px_override(id, "height").unwrap_or_else(|| {
            children
                .iter()
                .map(|&child| self.tree.get(child).height())
                .sum()
        });
        self.tree.get_mut(id).height = Some(height);
    }

    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// Runs of inline-level children are buffered and wrapped in an
    /// anonymous block as soon as a block-level child (or the end of the
    /// children) is reached.
    fn build_block_children(&mut self, id: BoxId) {
        let mut previous = None;
        let mut buffer = Vec::new();
        for child in self.child_nodes(id) {
            if self.is_skipped(child) {
                continue;
            }
            if self.is_inline_level(child) {
                buffer.push(child);
                continue;
            }
            if !buffer.is_empty() {
                previous = Some(self.push_anonymous_block(id, std::mem::take(&mut buffer), previous));
            }
            previous = Some(
                self.tree
                    .push(BoxKind::Block, BoxSource::Node(child), Some(id), previous),
            );
        }
        if !buffer.is_empty() {
            let _ = self.push_anonymous_block(id, buffer, previous);
        }
    }

    fn push_anonymous_block(
        &mut self,
        parent: BoxId,
        nodes: Vec<NodeId>,
        previous: Option<BoxId>,
    ) -> BoxId {
        let mut style = self.tree.style(self.dom, parent).clone();
        let _ = style.insert("display".to_string(), "block".to_string());
        let source = self.tree.push_anonymous(AnonymousBlock {
            parent: self.tree.style_node(parent),
            nodes,
            style,
        });
        self.tree.push(BoxKind::Block, source, Some(parent), previous)
    }
}
