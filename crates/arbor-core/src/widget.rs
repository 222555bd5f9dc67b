//! The widget capability trait and event outcome types.

use std::any::Any;

use crate::{
    cursor::Cursor,
    error::Result,
    event::Key,
    geom::{Expanse, Point, Rect},
    render::Render,
};

/// What a focused widget did with a key.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum KeyOutcome {
    /// The key was consumed (or deliberately ignored) by the widget.
    Handle,
    /// The widget asks the window to move focus forward.
    FocusNext,
    /// The widget asks the window to move focus backward.
    FocusPrev,
}

/// Which way focus was travelling when it arrived at or left a widget.
///
/// Lets a widget choose, for example, which end of its content to place the
/// cursor at on entry. Programmatic focus changes carry no direction.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FocusDirection {
    /// Down/right traversal.
    Forward,
    /// Up/left traversal.
    Backward,
}

/// Widgets are the behavior attached to nodes in the window's arena.
///
/// A widget that returns `true` from [`Widget::accept_focus`] is an
/// interactable: it can hold focus, react to keys, and report a cursor
/// hotspot. Widgets with children act as containers and control placement
/// through [`Widget::arrange`].
pub trait Widget: Any + Send {
    /// Can this widget hold focus?
    fn accept_focus(&self) -> bool {
        false
    }

    /// React to a key while focused.
    fn on_key(&mut self, _key: Key) -> KeyOutcome {
        KeyOutcome::Handle
    }

    /// Focus arrived at this widget.
    fn on_focus_gained(&mut self, _dir: Option<FocusDirection>) {}

    /// Focus left this widget.
    fn on_focus_lost(&mut self, _dir: Option<FocusDirection>) {}

    /// Cursor hotspot in the widget's local coordinate space.
    fn cursor(&self) -> Option<Cursor> {
        None
    }

    /// Preferred size given the preferred sizes of enabled children.
    ///
    /// The default stacks children vertically: as wide as the widest child,
    /// as tall as all children together.
    fn measure(&self, children: &[Expanse]) -> Expanse {
        stack_measure(children, false)
    }

    /// Place enabled children within this widget's content area.
    ///
    /// Rects are relative to this widget's origin. The default stacks
    /// children top to bottom at their preferred heights.
    fn arrange(&self, area: Expanse, children: &[Expanse]) -> Vec<Rect> {
        stack_arrange(area, children, false)
    }

    /// Paint this widget's own content. Children paint themselves.
    fn render(&mut self, _r: &mut Render) -> Result<()> {
        Ok(())
    }
}

/// Stack child extents along one axis for measurement.
pub fn stack_measure(children: &[Expanse], horizontal: bool) -> Expanse {
    let mut out = Expanse::zero();
    for child in children {
        if horizontal {
            out.w += child.w;
            out.h = out.h.max(child.h);
        } else {
            out.w = out.w.max(child.w);
            out.h += child.h;
        }
    }
    out
}

/// Place child extents along one axis, clipped to the available area.
pub fn stack_arrange(area: Expanse, children: &[Expanse], horizontal: bool) -> Vec<Rect> {
    let mut out = Vec::with_capacity(children.len());
    let mut offset = 0u32;
    for child in children {
        let tl = if horizontal {
            Point { x: offset, y: 0 }
        } else {
            Point { x: 0, y: offset }
        };
        let (w, h) = if horizontal {
            (
                child.w.min(area.w.saturating_sub(offset)),
                child.h.min(area.h),
            )
        } else {
            (
                child.w.min(area.w),
                child.h.min(area.h.saturating_sub(offset)),
            )
        };
        out.push(Rect { tl, w, h });
        offset += if horizontal { child.w } else { child.h };
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_stack() {
        let kids = [Expanse::new(5, 1), Expanse::new(3, 2)];
        assert_eq!(stack_measure(&kids, false), Expanse::new(5, 3));
        let rects = stack_arrange(Expanse::new(10, 10), &kids, false);
        assert_eq!(rects[0], Rect::new(0, 0, 5, 1));
        assert_eq!(rects[1], Rect::new(0, 1, 3, 2));
    }

    #[test]
    fn horizontal_stack() {
        let kids = [Expanse::new(5, 1), Expanse::new(3, 2)];
        assert_eq!(stack_measure(&kids, true), Expanse::new(8, 2));
        let rects = stack_arrange(Expanse::new(10, 10), &kids, true);
        assert_eq!(rects[0], Rect::new(0, 0, 5, 1));
        assert_eq!(rects[1], Rect::new(5, 0, 3, 2));
    }

    #[test]
    fn arrange_clips_to_area() {
        let kids = [Expanse::new(5, 5), Expanse::new(5, 5)];
        let rects = stack_arrange(Expanse::new(4, 7), &kids, false);
        assert_eq!(rects[0], Rect::new(0, 0, 4, 5));
        assert_eq!(rects[1], Rect::new(0, 5, 4, 2));
    }
}
