//! The core primitive representing a decoded logical keypress.

/// A decoded logical keypress.
///
/// Only [`Key::Char`] carries a codepoint, so "a character is present
/// exactly for normal keys" holds by construction. Match exhaustively:
/// adding a variant should force every handler to take a position on it.
#[derive(Debug, PartialOrd, PartialEq, Hash, Eq, Clone, Copy)]
pub enum Key {
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Tab key.
    Tab,
    /// Shift + Tab key.
    BackTab,
    /// Enter/return key.
    Enter,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up key.
    PageUp,
    /// Page down key.
    PageDown,
    /// Insert key.
    Insert,
    /// Delete key.
    Delete,
    /// Backspace key.
    Backspace,
    /// A literal character.
    Char(char),
    /// Input that decoded to nothing recognizable.
    Unknown,
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}
