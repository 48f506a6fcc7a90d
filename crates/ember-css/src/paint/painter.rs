//! Painter - generates display list from layout tree
//!
//! [CSS 2.1 Appendix E.2 Painting order](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
//!
//! The painter walks the box tree in pre-order, so a block's background is
//! emitted before anything it contains.

use ember_common::warning::warn_once;
use ember_dom::{DomTree, NodeId, StyleMap};

use crate::backgrounds::{background_color, border_radius};
use crate::layout::{BoxId, BoxKind, BoxSource, LayoutTree, Rect};
use crate::style::Color;

use super::{DisplayList, DrawCommand, InteractionTag};

/// Thickness of input outlines and the text caret.
const STROKE_WIDTH: f32 = 1.0;

/// Painter that generates a display list from a layout tree.
pub struct Painter<'a> {
    dom: &'a DomTree,
    layout: &'a LayoutTree,
}

impl<'a> Painter<'a> {
    /// Create a painter over a laid-out tree and the document it came from.
    #[must_use]
    pub const fn new(dom: &'a DomTree, layout: &'a LayoutTree) -> Self {
        Self { dom, layout }
    }

    /// Paint every box and return the display list.
    #[must_use]
    pub fn paint(&self) -> DisplayList {
        let mut display_list = DisplayList::new();
        if self.layout.is_empty() {
            return display_list;
        }
        for id in self.layout.descendants(self.layout.root()) {
            if self.should_paint(id) {
                self.paint_box(id, &mut display_list);
            }
        }
        display_list
    }

    /// Block boxes generated directly for an `input` or `button` do not
    /// paint; the input box inside them does.
    fn should_paint(&self, id: BoxId) -> bool {
        let layout_box = self.layout.get(id);
        match (&layout_box.kind, layout_box.source) {
            (BoxKind::Block, BoxSource::Node(node)) => {
                !matches!(self.dom.tag_name(node), Some("input" | "button"))
            }
            _ => true,
        }
    }

    fn paint_box(&self, id: BoxId, display_list: &mut DisplayList) {
        let layout_box = self.layout.get(id);
        let style = self.layout.style(self.dom, id);
        match &layout_box.kind {
            BoxKind::Document | BoxKind::Line => {}
            BoxKind::Block => paint_background(style, layout_box.rect(), display_list),
            BoxKind::TextRun { word } => {
                if let Some(command) = self.text_command(id, word.clone()) {
                    display_list.push(command);
                }
            }
            BoxKind::Input => self.paint_input(id, display_list),
            BoxKind::Image { src, .. } => display_list.push(DrawCommand::Image {
                rect: layout_box.rect(),
                src: src.clone(),
                tag: interaction_tag(style),
            }),
        }
    }

    /// A `Text` command for `text` drawn in the box's font and color.
    fn text_command(&self, id: BoxId, text: String) -> Option<DrawCommand> {
        let layout_box = self.layout.get(id);
        let font = layout_box.font.as_ref()?;
        let style = self.layout.style(self.dom, id);
        Some(DrawCommand::Text {
            rect: Rect::new(
                layout_box.x(),
                layout_box.y(),
                font.measure(&text),
                font.linespace(),
            ),
            text,
            font: font.descriptor.clone(),
            color: text_color(style),
            tag: interaction_tag(style),
        })
    }

    /// [§ 4.10.5 The input element](https://html.spec.whatwg.org/multipage/input.html#the-input-element)
    ///
    /// Background, outline, caret when focused, then the value.
    fn paint_input(&self, id: BoxId, display_list: &mut DisplayList) {
        let layout_box = self.layout.get(id);
        let node = self.layout.style_node(id);
        let style = self.dom.style(node);
        let rect = layout_box.rect();

        paint_background(style, rect, display_list);
        display_list.push(DrawCommand::Outline {
            rect,
            color: text_color(style),
            thickness: STROKE_WIDTH,
        });

        let text = self.input_text(node);
        let is_focused = self.dom.as_element(node).is_some_and(|e| e.is_focused);
        if is_focused && self.dom.is_element_named(node, "input") {
            let caret_x = rect.x + layout_box.font.as_ref().map_or(0.0, |f| f.measure(&text));
            display_list.push(DrawCommand::Line {
                x1: caret_x,
                y1: rect.y,
                x2: caret_x,
                y2: rect.bottom(),
                color: Color::BLACK,
                thickness: STROKE_WIDTH,
            });
        }

        if let Some(command) = self.text_command(id, text) {
            display_list.push(command);
        }
    }

    /// The text an input or button displays.
    fn input_text(&self, node: NodeId) -> String {
        if self.dom.is_element_named(node, "button") {
            return match self.dom.children(node) {
                [only] => self.dom.as_text(*only).unwrap_or_default().to_string(),
                [] => String::new(),
                _ => {
                    warn_once("Paint", "ignoring HTML contents inside button");
                    String::new()
                }
            };
        }
        let value = self.dom.attribute(node, "value").unwrap_or_default();
        if self.dom.attribute(node, "type") == Some("password") {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        }
    }
}

/// Paint the display list for a laid-out document.
#[must_use]
pub fn paint(layout: &LayoutTree, dom: &DomTree) -> DisplayList {
    Painter::new(dom, layout).paint()
}

/// [CSS 2.1 Appendix E.2 Step 2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
/// "the background color of the element"
fn paint_background(style: &StyleMap, rect: Rect, display_list: &mut DisplayList) {
    let Some(color) = background_color(style) else {
        return;
    };
    let radius = border_radius(style);
    if radius > 0.0 {
        display_list.push(DrawCommand::RoundedRect {
            rect,
            color,
            radius,
        });
    } else {
        display_list.push(DrawCommand::Rect { rect, color });
    }
}

/// The resolved `color`, black when missing or unparseable.
fn text_color(style: &StyleMap) -> Color {
    match style.get("color") {
        Some(value) => Color::parse(value).unwrap_or_else(|| {
            warn_once("Paint", &format!("could not parse color '{value}', using black"));
            Color::BLACK
        }),
        None => Color::BLACK,
    }
}

fn interaction_tag(style: &StyleMap) -> Option<InteractionTag> {
    (style.get("cursor").map(String::as_str) == Some("pointer"))
        .then_some(InteractionTag::PointerHover)
}
