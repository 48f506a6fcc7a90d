//! Display List - a sequence of drawing commands
//!
//! [CSS 2.1 Appendix E](https://www.w3.org/TR/CSS2/zindex.html)
//!
//! The display list is the output of the painting phase. Every command
//! carries its bounding rectangle in document coordinates so a presentation
//! backend can cull against the scroll window.

use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::layout::{FontDescriptor, Rect};
use crate::style::Color;

/// Hint attached to commands drawn for interactive content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum InteractionTag {
    /// The content was styled with `cursor: pointer`.
    PointerHover,
}

/// A single drawing command.
///
/// Commands are stored in painting order (back to front).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DrawCommand {
    /// Fill a rectangle with a solid color.
    Rect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: Color,
    },

    /// [§ 5 'border-radius'](https://www.w3.org/TR/css-backgrounds-3/#border-radius)
    ///
    /// Fill a rectangle with equally rounded corners.
    RoundedRect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius in pixels.
        radius: f32,
    },

    /// Stroke the border of a rectangle.
    Outline {
        /// Rectangle to stroke.
        rect: Rect,
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        thickness: f32,
    },

    /// A straight line segment.
    Line {
        /// Start x.
        x1: f32,
        /// Start y.
        y1: f32,
        /// End x.
        x2: f32,
        /// End y.
        y2: f32,
        /// Stroke color.
        color: Color,
        /// Stroke width in pixels.
        thickness: f32,
    },

    /// Draw text with its top-left corner at the rectangle origin.
    Text {
        /// Measured extent of the text.
        rect: Rect,
        /// The text to draw.
        text: String,
        /// Font to draw with.
        font: FontDescriptor,
        /// Text color.
        color: Color,
        /// Interaction hint, if any.
        tag: Option<InteractionTag>,
    },

    /// [CSS 2.1 Appendix E.2](https://www.w3.org/TR/CSS2/zindex.html#painting-order)
    /// Step 5: "the replaced content of replaced inline-level elements"
    Image {
        /// Placeholder area.
        rect: Rect,
        /// The `src` attribute, used by the backend to look up image data.
        src: String,
        /// Interaction hint, if any.
        tag: Option<InteractionTag>,
    },
}

impl DrawCommand {
    /// The command's bounding rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        match self {
            Self::Rect { rect, .. }
            | Self::RoundedRect { rect, .. }
            | Self::Outline { rect, .. }
            | Self::Text { rect, .. }
            | Self::Image { rect, .. } => *rect,
            Self::Line { x1, y1, x2, y2, .. } => Rect::from_corners(*x1, *y1, *x2, *y2),
        }
    }
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the commands in painting order.
    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// Commands that overlap the window `[scroll, scroll + viewport_height]`.
    ///
    /// Commands entirely above or below the window are skipped.
    pub fn visible(&self, scroll: f32, viewport_height: f32) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |command| command.rect().intersects_band(scroll, viewport_height))
    }
}

impl<'a> IntoIterator for &'a DisplayList {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}
