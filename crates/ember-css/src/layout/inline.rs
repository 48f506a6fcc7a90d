//! CSS Inline Layout and Line Box Model.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block."
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "The height of the line box is determined by the rules given in the
//! section on line height calculations."

use std::sync::Arc;

use ember_dom::NodeId;

use crate::style::VerticalAlign;

use super::font::Font;
use super::formatting_context::LayoutContext;
use super::layout_box::{BoxId, BoxKind, BoxSource};

/// Horizontal state of the line being filled.
struct LineCursor {
    line: BoxId,
    /// Right edge of the last box on the line, relative to the line start.
    x: f32,
}

/// Parse an `img` dimension attribute: a plain number or `<N>px`.
fn dimension_attribute(value: Option<&str>) -> Option<f32> {
    let value = value?.trim();
    let number = value.strip_suffix("px").unwrap_or(value);
    number
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
}

impl LayoutContext<'_> {
    /// Break the content of block `id` into line boxes.
    pub(super) fn build_lines(&mut self, id: BoxId) {
        let mut cursor = LineCursor {
            line: self.new_line(id),
            x: 0.0,
        };
        for node in self.content_nodes(id) {
            self.recurse(id, &mut cursor, node);
        }
    }

    fn new_line(&mut self, block: BoxId) -> BoxId {
        let previous = self.tree.children(block).last().copied();
        let source = self.tree.get(block).source;
        self.tree.push(BoxKind::Line, source, Some(block), previous)
    }

    /// Depth-first walk of inline content.
    fn recurse(&mut self, block: BoxId, cursor: &mut LineCursor, node: NodeId) {
        let dom = self.dom;
        if let Some(text) = dom.as_text(node) {
            for word in text.split_ascii_whitespace() {
                let font = self.font_for(node);
                let width = font.measure(word);
                let kind = BoxKind::TextRun {
                    word: word.to_string(),
                };
                self.place(block, cursor, node, kind, font, width);
            }
            return;
        }

        match dom.tag_name(node) {
            // [§ 4.5.27 The br element](https://html.spec.whatwg.org/multipage/text-level-semantics.html#the-br-element)
            Some("br") => {
                cursor.line = self.new_line(block);
                cursor.x = 0.0;
            }
            Some("input" | "button") => {
                let font = self.font_for(node);
                let width = self.config.input_width;
                self.place(block, cursor, node, BoxKind::Input, font, width);
            }
            Some("img") => {
                let width = dimension_attribute(self.dom.attribute(node, "width"))
                    .unwrap_or(self.config.image_width);
                let height = dimension_attribute(self.dom.attribute(node, "height"))
                    .unwrap_or(self.config.image_height);
                let kind = BoxKind::Image {
                    src: self.dom.attribute(node, "src").unwrap_or_default().to_string(),
                    width,
                    height,
                };
                let font = self.font_for(node);
                self.place(block, cursor, node, kind, font, width);
            }
            _ => {
                for child in self.dom.children(node).to_vec() {
                    if !self.is_skipped(child) {
                        self.recurse(block, cursor, child);
                    }
                }
            }
        }
    }

    /// Append a leaf to the current line, starting a new line first if the
    /// leaf and the space before it would overflow the block.
    ///
    /// A leaf wider than the block on an empty line stays there.
    fn place(
        &mut self,
        block: BoxId,
        cursor: &mut LineCursor,
        node: NodeId,
        kind: BoxKind,
        font: Arc<Font>,
        width: f32,
    ) {
        let available = self.tree.get(block).width();
        let mut previous = self.tree.children(cursor.line).last().copied();
        let mut space = previous.map_or(0.0, |p| self.tree.get(p).space_width());

        if previous.is_some() && cursor.x + space + width > available {
            cursor.line = self.new_line(block);
            cursor.x = 0.0;
            previous = None;
            space = 0.0;
        }

        let leaf = self
            .tree
            .push(kind, BoxSource::Node(node), Some(cursor.line), previous);
        self.tree.get_mut(leaf).font = Some(font);
        cursor.x += space + width;
    }

    /// Vertical alignment of a leaf, falling back to its parent element
    /// because text nodes do not inherit `vertical-align`.
    fn vertical_align(&self, leaf: BoxId) -> VerticalAlign {
        let node = self.tree.style_node(leaf);
        let value = self.dom.style_value(node, "vertical-align").or_else(|| {
            self.dom
                .parent(node)
                .and_then(|parent| self.dom.style_value(parent, "vertical-align"))
        });
        VerticalAlign::from_css(value)
    }

    /// Width, ascent and descent of a leaf.
    fn leaf_metrics(&self, leaf: BoxId) -> (f32, f32, f32) {
        let b = self.tree.get(leaf);
        let (ascent, descent) = b.font.as_ref().map_or((0.0, 0.0), |f| (f.ascent, f.descent));
        match &b.kind {
            BoxKind::TextRun { word } => {
                let width = b.font.as_ref().map_or(0.0, |f| f.measure(word));
                (width, ascent, descent)
            }
            BoxKind::Input => (self.config.input_width, ascent, descent),
            BoxKind::Image { width, height, .. } => (*width, *height, 0.0),
            BoxKind::Document | BoxKind::Block | BoxKind::Line => (0.0, 0.0, 0.0),
        }
    }

    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
    ///
    /// Place the leaves of a line horizontally, then align them vertically
    /// against a shared baseline and size the line.
    pub(super) fn layout_line(&mut self, line: BoxId) {
        let (parent, previous) = {
            let b = self.tree.get(line);
            (b.parent, b.previous)
        };
        let (x, parent_y, width) = match parent {
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
        {
            let b = self.tree.get_mut(line);
            b.x = Some(x);
            b.y = Some(y);
            b.width = Some(width);
        }

        let leaves = self.tree.children(line).to_vec();
        if leaves.is_empty() {
            self.tree.get_mut(line).height = Some(0.0);
            return;
        }

        // STEP 1: horizontal placement, each leaf after the previous one and
        // its trailing space.
        let mut metrics = Vec::with_capacity(leaves.len());
        for &leaf in &leaves {
            let (leaf_width, ascent, descent) = self.leaf_metrics(leaf);
            let leaf_x = match self.tree.get(leaf).previous {
                Some(prev) => {
                    let prev = self.tree.get(prev);
                    prev.x() + prev.space_width() + prev.width()
                }
                None => x,
            };
            let b = self.tree.get_mut(leaf);
            b.x = Some(leaf_x);
            b.width = Some(leaf_width);
            b.height = Some(ascent + descent);
            metrics.push((ascent, descent));
        }

        // STEP 2: baseline.
        let max_ascent = metrics.iter().map(|m| m.0).fold(0.0_f32, f32::max);
        let max_descent = metrics.iter().map(|m| m.1).fold(0.0_f32, f32::max);
        let baseline = y + self.config.leading_factor * max_ascent;

        // STEP 3: vertical alignment.
        for (&leaf, &(ascent, descent)) in leaves.iter().zip(&metrics) {
            let leaf_y = match self.vertical_align(leaf) {
                VerticalAlign::Baseline => baseline - ascent,
                VerticalAlign::Super => baseline - max_ascent,
                VerticalAlign::Sub => baseline + max_descent - (ascent + descent),
            };
            self.tree.get_mut(leaf).y = Some(leaf_y);
        }

        self.tree.get_mut(line).height =
            Some(self.config.line_height_factor * (max_ascent + max_descent));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_attribute() {
        assert_eq!(dimension_attribute(Some("120")), Some(120.0));
        assert_eq!(dimension_attribute(Some(" 64px ")), Some(64.0));
        assert_eq!(dimension_attribute(Some("50%")), None);
        assert_eq!(dimension_attribute(Some("-3")), None);
        assert_eq!(dimension_attribute(None), None);
    }
}
