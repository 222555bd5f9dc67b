//! Test utilities: an in-memory render backend and simple probe widgets.
//!
//! These are exported so downstream crates can drive windows in their own
//! tests without a terminal.

use crate::{
    cursor::{Cursor, CursorShape},
    error::Result,
    event::Key,
    geom::{Expanse, Point, Rect},
    render::{Render, RenderBackend, Style},
    widget::{FocusDirection, KeyOutcome, Widget},
};

/// An in-memory character-grid backend.
pub struct TestBuf {
    /// Drawable extent.
    size: Expanse,
    /// Cell contents, row-major.
    cells: Vec<char>,
}

impl TestBuf {
    /// Construct a buffer of the given size, filled with spaces.
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            size: Expanse::new(w, h),
            cells: vec![' '; (w * h) as usize],
        }
    }

    /// The contents of row `y` as a string.
    pub fn line(&self, y: u32) -> String {
        let start = (y * self.size.w) as usize;
        self.cells[start..start + self.size.w as usize]
            .iter()
            .collect()
    }

    /// All rows as strings.
    pub fn lines(&self) -> Vec<String> {
        (0..self.size.h).map(|y| self.line(y)).collect()
    }

    /// Write one cell, ignoring out-of-bounds coordinates.
    fn put(&mut self, x: u32, y: u32, c: char) {
        if x < self.size.w && y < self.size.h {
            self.cells[(y * self.size.w + x) as usize] = c;
        }
    }
}

impl RenderBackend for TestBuf {
    fn size(&self) -> Expanse {
        self.size
    }

    fn fill(&mut self, rect: Rect, c: char, _style: Style) -> Result<()> {
        for y in rect.tl.y..rect.tl.y + rect.h {
            for x in rect.tl.x..rect.tl.x + rect.w {
                self.put(x, y, c);
            }
        }
        Ok(())
    }

    fn text(&mut self, loc: Point, txt: &str, _style: Style) -> Result<()> {
        for (i, c) in txt.chars().enumerate() {
            self.put(loc.x + i as u32, loc.y, c);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A plain, non-focusable container node.
pub struct TestPane;

impl TestPane {
    /// Construct a pane.
    pub fn new() -> Self {
        Self
    }
}

impl Widget for TestPane {}

/// A focusable probe widget that records keys and focus events.
pub struct TestField {
    /// Accumulated character input.
    text: String,
    /// Focus event log, e.g. `gained:forward`.
    events: Vec<String>,
}

impl TestField {
    /// Construct a field with initial text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            events: Vec::new(),
        }
    }

    /// The field's current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Recorded focus events.
    pub fn events(&self) -> Vec<String> {
        self.events.clone()
    }
}

/// Render a focus direction tag for the event log.
fn dir_tag(dir: Option<FocusDirection>) -> &'static str {
    match dir {
        Some(FocusDirection::Forward) => "forward",
        Some(FocusDirection::Backward) => "backward",
        None => "none",
    }
}

impl Widget for TestField {
    fn accept_focus(&self) -> bool {
        true
    }

    fn on_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Char(c) => {
                self.text.push(c);
                KeyOutcome::Handle
            }
            Key::Tab | Key::Enter | Key::Down => KeyOutcome::FocusNext,
            Key::BackTab | Key::Up => KeyOutcome::FocusPrev,
            Key::Left
            | Key::Right
            | Key::Home
            | Key::End
            | Key::PageUp
            | Key::PageDown
            | Key::Insert
            | Key::Delete
            | Key::Backspace
            | Key::Unknown => KeyOutcome::Handle,
        }
    }

    fn on_focus_gained(&mut self, dir: Option<FocusDirection>) {
        self.events.push(format!("gained:{}", dir_tag(dir)));
    }

    fn on_focus_lost(&mut self, dir: Option<FocusDirection>) {
        self.events.push(format!("lost:{}", dir_tag(dir)));
    }

    fn cursor(&self) -> Option<Cursor> {
        Some(Cursor {
            location: Point {
                x: self.text.chars().count() as u32,
                y: 0,
            },
            shape: CursorShape::Block,
            blink: true,
        })
    }

    fn measure(&self, _children: &[Expanse]) -> Expanse {
        Expanse::new(self.text.chars().count() as u32 + 1, 1)
    }

    fn render(&mut self, r: &mut Render) -> Result<()> {
        let line = Rect::new(0, 0, r.width(), 1).line(0);
        r.text(line, &self.text, Style::default())
    }
}
