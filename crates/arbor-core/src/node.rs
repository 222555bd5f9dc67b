//! Arena node storage.
//!
//! Parent back-references are lookup-only handles: ownership flows strictly
//! downward through the `children` lists, and removal never traverses
//! upward links.

use slotmap::new_key_type;

use crate::{geom::Rect, widget::Widget};

new_key_type! {
    /// Opaque identifier for a node stored in the window's arena.
    pub struct NodeId;
}

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state.
    pub(crate) widget: Box<dyn Widget>,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children, in focus-traversal order.
    pub(crate) children: Vec<NodeId>,

    /// Disabled nodes (and their subtrees) are skipped by traversal,
    /// layout, and painting.
    pub(crate) enabled: bool,
    /// Rect relative to the parent's origin, set by the layout pass.
    pub(crate) rect: Rect,
}

impl Node {
    /// Wrap a widget for insertion into the arena.
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        Self {
            widget,
            parent: None,
            children: Vec::new(),
            enabled: true,
            rect: Rect::default(),
        }
    }

    /// The node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The node's children in traversal order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Is the node enabled?
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// The node's rect relative to its parent, from the last layout pass.
    pub fn rect(&self) -> Rect {
        self.rect
    }
}
