//! A push button.

use arbor_core::{Expanse, KeyOutcome, Rect, Render, Result, Style, Widget, event::Key};

/// An interactable button that fires a callback when activated with Enter.
pub struct Button {
    label: String,
    action: Option<Box<dyn FnMut() + Send>>,
}

impl Button {
    /// Construct a button with no action.
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            action: None,
        }
    }

    /// Construct a button that runs `action` when activated.
    pub fn with_action(label: &str, action: impl FnMut() + Send + 'static) -> Self {
        Self {
            label: label.to_string(),
            action: Some(Box::new(action)),
        }
    }

    /// The button's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    fn activate(&mut self) {
        tracing::debug!(label = %self.label, "button activated");
        if let Some(action) = &mut self.action {
            action();
        }
    }
}

impl Widget for Button {
    fn accept_focus(&self) -> bool {
        true
    }

    fn on_key(&mut self, key: Key) -> KeyOutcome {
        match key {
            Key::Enter | Key::Char(' ') => {
                self.activate();
                KeyOutcome::Handle
            }
            Key::Tab | Key::Down | Key::Right => KeyOutcome::FocusNext,
            Key::BackTab | Key::Up | Key::Left => KeyOutcome::FocusPrev,
            _ => KeyOutcome::Handle,
        }
    }

    fn measure(&self, _children: &[Expanse]) -> Expanse {
        // "< label >"
        Expanse::new(self.label.chars().count() as u32 + 4, 1)
    }

    fn render(&mut self, r: &mut Render) -> Result<()> {
        let style = if r.is_focused() {
            Style::reverse()
        } else {
            Style::default()
        };
        let line = Rect::new(0, 0, r.width(), 1).line(0);
        let text = format!("< {} >", self.label);
        r.text(line, &text, style)
    }
}
