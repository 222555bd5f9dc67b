//! A static text line.

use arbor_core::{Expanse, Rect, Render, Result, Style, Widget};

/// A non-interactable single line of text.
pub struct Label {
    text: String,
}

impl Label {
    /// Construct a label.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. The owning window must be invalidated for the
    /// change to appear.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }
}

impl Widget for Label {
    fn measure(&self, _children: &[Expanse]) -> Expanse {
        Expanse::new(self.text.chars().count() as u32, 1)
    }

    fn render(&mut self, r: &mut Render) -> Result<()> {
        let line = Rect::new(0, 0, r.width(), 1).line(0);
        r.text(line, &self.text, Style::default())
    }
}
