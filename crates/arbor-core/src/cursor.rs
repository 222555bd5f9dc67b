//! Cursor hotspot types.

use crate::geom;

/// Cursor glyph shape variants.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CursorShape {
    /// Underscore cursor.
    Underscore,
    /// Vertical bar cursor.
    Line,
    /// Block cursor.
    Block,
}

/// Cursor position, shape, and blink behavior.
///
/// A widget reports its cursor relative to (0, 0) in its own rect; the
/// window translates it through every ancestor offset to a global position.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Cursor {
    /// Location of the cursor in the widget's local coordinate space.
    pub location: geom::Point,
    /// Shape of the cursor.
    pub shape: CursorShape,
    /// Should the cursor blink?
    pub blink: bool,
}
