//! The rendering contract.
//!
//! The core does not own buffering or diffing: it calls into a
//! [`RenderBackend`] collaborator to report what to draw and where. A
//! [`Render`] wraps the backend with one component's global rect so widgets
//! paint in their own coordinate space and writes are clipped to their
//! area.

use crate::{
    error::Result,
    geom::{Expanse, Line, Point, Rect},
};

/// Text attributes applied to backend output.
///
/// Theming and color resolution live outside the core; this is the minimal
/// attribute set widgets need to mark focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Style {
    /// Swap foreground and background.
    pub reverse: bool,
    /// Bold text.
    pub bold: bool,
    /// Underlined text.
    pub underline: bool,
}

impl Style {
    /// The reverse-video style.
    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Self::default()
        }
    }
}

/// The trait implemented by rendering sinks.
pub trait RenderBackend {
    /// Current drawable extent.
    fn size(&self) -> Expanse;
    /// Fill a rectangle with a character.
    fn fill(&mut self, rect: Rect, c: char, style: Style) -> Result<()>;
    /// Draw a styled string at a global position.
    fn text(&mut self, loc: Point, txt: &str, style: Style) -> Result<()>;
    /// Flush output to the terminal.
    fn flush(&mut self) -> Result<()>;
}

/// A renderer scoped to one component's rect within the backend.
pub struct Render<'a> {
    /// The backend to draw into.
    backend: &'a mut dyn RenderBackend,
    /// The component's rect in global coordinates.
    rect: Rect,
    /// Whether the component being painted holds focus.
    focused: bool,
}

impl<'a> Render<'a> {
    /// Construct a renderer for the given global rect.
    pub(crate) fn new(backend: &'a mut dyn RenderBackend, rect: Rect, focused: bool) -> Self {
        Self {
            backend,
            rect,
            focused,
        }
    }

    /// The component's extent.
    pub fn size(&self) -> Expanse {
        self.rect.expanse()
    }

    /// The component's width. Widgets that scroll horizontally read this
    /// during paint and use it on the next key event.
    pub fn width(&self) -> u32 {
        self.rect.w
    }

    /// Does the component being painted hold focus?
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Fill the whole component area with a character.
    pub fn fill(&mut self, c: char, style: Style) -> Result<()> {
        self.backend.fill(self.rect, c, style)
    }

    /// Print text on a line in local coordinates. Text wider than the
    /// component is truncated; writes outside the component are clipped.
    pub fn text(&mut self, line: Line, txt: &str, style: Style) -> Result<()> {
        if line.tl.y >= self.rect.h || line.tl.x >= self.rect.w {
            return Ok(());
        }
        let avail = (self.rect.w - line.tl.x).min(line.w) as usize;
        let clipped: String = txt.chars().take(avail).collect();
        let loc = Point {
            x: self.rect.tl.x + line.tl.x,
            y: self.rect.tl.y + line.tl.y,
        };
        self.backend.text(loc, &clipped, style)
    }
}
