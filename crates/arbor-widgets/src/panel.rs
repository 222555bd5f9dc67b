//! A stacking container.

use arbor_core::{
    Expanse, Rect, Widget,
    widget::{stack_arrange, stack_measure},
};

/// The axis a [`Panel`] stacks its children along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Children stack top to bottom.
    Vertical,
    /// Children stack left to right.
    Horizontal,
}

/// A container that stacks its children along one axis at their preferred
/// sizes. It paints nothing itself and never takes focus.
pub struct Panel {
    orientation: Orientation,
}

impl Panel {
    /// A vertical panel.
    pub fn vertical() -> Self {
        Self {
            orientation: Orientation::Vertical,
        }
    }

    /// A horizontal panel.
    pub fn horizontal() -> Self {
        Self {
            orientation: Orientation::Horizontal,
        }
    }

    /// The panel's stacking axis.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
}

impl Widget for Panel {
    fn measure(&self, children: &[Expanse]) -> Expanse {
        stack_measure(children, self.orientation == Orientation::Horizontal)
    }

    fn arrange(&self, area: Expanse, children: &[Expanse]) -> Vec<Rect> {
        stack_arrange(area, children, self.orientation == Orientation::Horizontal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_panel_stacks_down() {
        let p = Panel::vertical();
        let kids = [Expanse::new(4, 1), Expanse::new(2, 1)];
        assert_eq!(p.measure(&kids), Expanse::new(4, 2));
        let rects = p.arrange(Expanse::new(10, 10), &kids);
        assert_eq!(rects[0], Rect::new(0, 0, 4, 1));
        assert_eq!(rects[1], Rect::new(0, 1, 2, 1));
    }

    #[test]
    fn horizontal_panel_stacks_across() {
        let p = Panel::horizontal();
        let kids = [Expanse::new(4, 1), Expanse::new(2, 1)];
        assert_eq!(p.measure(&kids), Expanse::new(6, 1));
        let rects = p.arrange(Expanse::new(10, 10), &kids);
        assert_eq!(rects[1], Rect::new(4, 0, 2, 1));
    }
}
