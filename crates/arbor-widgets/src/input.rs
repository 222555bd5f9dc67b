//! Single-line text input.

use arbor_core::{
    Cursor, CursorShape, Expanse, KeyOutcome, Point, Rect, Render, Result, Style, Widget,
    event::Key,
    widget::FocusDirection,
};

/// A text buffer that exposes edit functionality for a single line. It also
/// keeps track of a display viewport that slides within the line,
/// responding naturally to cursor movements.
///
/// Invariants, preserved by every operation: the edit position stays within
/// `[0, len]` and the viewport's left edge within `[0, edit position]`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct TextBuf {
    /// Line content.
    value: Vec<char>,
    /// Cursor position in characters within the value.
    edit_pos: u32,
    /// Leftmost visible character of the viewport.
    window_off: u32,
    /// Viewport width recorded by the most recent paint pass. This is the
    /// only state borrowed from the rendering collaborator.
    width: u32,
}

impl TextBuf {
    /// Construct a buffer with initial content and the cursor at its end.
    pub fn new(start: &str) -> Self {
        let value: Vec<char> = start.chars().collect();
        let edit_pos = value.len() as u32;
        Self {
            value,
            edit_pos,
            window_off: 0,
            width: 0,
        }
    }

    /// The current line content.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the content, moving the cursor to the end.
    pub fn set_value(&mut self, text: &str) {
        self.value = text.chars().collect();
        self.edit_pos = self.value.len() as u32;
        self.clamp();
    }

    /// The cursor position in characters.
    pub fn edit_pos(&self) -> u32 {
        self.edit_pos
    }

    /// The leftmost visible character position.
    pub fn window_off(&self) -> u32 {
        self.window_off
    }

    /// The cursor's x offset within the viewport.
    pub fn cursor_display(&self) -> u32 {
        self.edit_pos - self.window_off
    }

    /// Record the viewport width observed during paint.
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// The visible slice of the line, truncated to the viewport.
    pub fn visible(&self) -> String {
        self.value
            .iter()
            .skip(self.window_off as usize)
            .take(self.width as usize)
            .collect()
    }

    /// Keep the viewport's left edge within `[0, edit_pos]`.
    fn clamp(&mut self) {
        self.window_off = self.window_off.min(self.edit_pos);
    }

    /// Insert a character at the cursor, scrolling the viewport right by
    /// one if the cursor would fall off its edge. Control characters are
    /// rejected.
    pub fn insert(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        self.value.insert(self.edit_pos as usize, c);
        self.edit_pos += 1;
        // Before the first paint the width is unknown; skip scrolling.
        if self.width > 0 && self.edit_pos - self.window_off >= self.width {
            self.window_off += 1;
        }
        self.clamp();
        true
    }

    /// Delete the character at the cursor. No-op at the end of the line.
    pub fn delete(&mut self) -> bool {
        if self.edit_pos as usize == self.value.len() {
            return false;
        }
        self.value.remove(self.edit_pos as usize);
        true
    }

    /// Delete the character before the cursor. No-op at the start.
    pub fn backspace(&mut self) -> bool {
        if self.edit_pos == 0 {
            return false;
        }
        self.edit_pos -= 1;
        if self.edit_pos < self.window_off {
            self.window_off -= 1;
        }
        self.value.remove(self.edit_pos as usize);
        true
    }

    /// Move the cursor left by one character.
    pub fn left(&mut self) -> bool {
        if self.edit_pos == 0 {
            return false;
        }
        self.edit_pos -= 1;
        if self.edit_pos < self.window_off {
            self.window_off -= 1;
        }
        true
    }

    /// Move the cursor right by one character.
    pub fn right(&mut self) -> bool {
        if self.edit_pos as usize == self.value.len() {
            return false;
        }
        self.edit_pos += 1;
        if self.width > 0 && self.edit_pos - self.window_off >= self.width {
            self.window_off += 1;
        }
        self.clamp();
        true
    }

    /// Move the cursor to the start of the line.
    pub fn home(&mut self) {
        self.edit_pos = 0;
        self.window_off = 0;
    }

    /// Move the cursor to the end of the line, recomputing the viewport
    /// directly.
    pub fn end(&mut self) {
        self.edit_pos = self.value.len() as u32;
        if self.width > 0 {
            self.window_off = (self.edit_pos + 1).saturating_sub(self.width);
        }
        self.clamp();
    }
}

/// A single input line, one character high.
pub struct Input {
    /// Text buffer for the input.
    textbuf: TextBuf,
    /// Fixed preferred width, if any; otherwise sized to the content.
    force_width: Option<u32>,
}

impl Input {
    /// Construct an input with initial text.
    pub fn new(text: &str) -> Self {
        Self {
            textbuf: TextBuf::new(text),
            force_width: None,
        }
    }

    /// Construct an input with a fixed preferred width.
    pub fn with_width(text: &str, width: u32) -> Self {
        Self {
            textbuf: TextBuf::new(text),
            force_width: Some(width),
        }
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.textbuf.value()
    }

    /// Replace the text, moving the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.textbuf.set_value(text);
    }

    /// The underlying buffer.
    pub fn textbuf(&self) -> &TextBuf {
        &self.textbuf
    }
}

impl Widget for Input {
    fn accept_focus(&self) -> bool {
        true
    }

    fn on_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Char(c) => {
                self.textbuf.insert(c);
                KeyOutcome::Handle
            }
            Key::Left => {
                self.textbuf.left();
                KeyOutcome::Handle
            }
            Key::Right => {
                self.textbuf.right();
                KeyOutcome::Handle
            }
            Key::Home => {
                self.textbuf.home();
                KeyOutcome::Handle
            }
            Key::End => {
                self.textbuf.end();
                KeyOutcome::Handle
            }
            Key::Delete => {
                self.textbuf.delete();
                KeyOutcome::Handle
            }
            Key::Backspace => {
                self.textbuf.backspace();
                KeyOutcome::Handle
            }
            Key::Tab | Key::Enter | Key::Down => KeyOutcome::FocusNext,
            Key::BackTab | Key::Up => KeyOutcome::FocusPrev,
            Key::PageUp | Key::PageDown | Key::Insert | Key::Unknown => KeyOutcome::Handle,
        }
    }

    fn on_focus_gained(&mut self, dir: Option<FocusDirection>) {
        // Entering while moving forward places the cursor at the start of
        // the content; moving backward, at the end.
        match dir {
            Some(FocusDirection::Forward) => self.textbuf.home(),
            Some(FocusDirection::Backward) => self.textbuf.end(),
            None => {}
        }
    }

    fn cursor(&self) -> Option<Cursor> {
        Some(Cursor {
            location: Point {
                x: self.textbuf.cursor_display(),
                y: 0,
            },
            shape: CursorShape::Block,
            blink: true,
        })
    }

    fn measure(&self, _children: &[Expanse]) -> Expanse {
        let w = self
            .force_width
            .unwrap_or(self.textbuf.value.len() as u32 + 1);
        Expanse::new(w, 1)
    }

    fn render(&mut self, r: &mut Render) -> Result<()> {
        self.textbuf.set_width(r.width());
        let style = if r.is_focused() {
            Style::reverse()
        } else {
            Style::default()
        };
        r.fill(' ', style)?;
        let visible = self.textbuf.visible();
        let line = Rect::new(0, 0, r.width(), 1).line(0);
        r.text(line, &visible, style)
    }
}
