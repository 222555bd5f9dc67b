//! The window: a top-level container plus the authoritative focus pointer.
//!
//! A window owns its component tree as an arena of nodes addressed by
//! stable [`NodeId`] handles. Ownership flows strictly downward; parent
//! links are lookup-only. At most one widget in a window holds focus at
//! any time, and every structural mutation repairs the focus pointer
//! before it completes so it can never dangle on a removed node.

use std::any::Any;

use slotmap::{SecondaryMap, SlotMap};
use tracing::{debug, trace};

use crate::{
    actions::UiHandle,
    cursor::Cursor,
    error::{Error, Result},
    event::Key,
    focus::{focus_order, in_subtree, next_in, preorder, prev_in},
    geom::{Expanse, Point},
    node::{Node, NodeId},
    observers::{ObserverId, Observers},
    render::{Render, RenderBackend},
    widget::{FocusDirection, KeyOutcome, Widget},
};

/// Window lifecycle and repaint notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The window became visible.
    Shown,
    /// The window was closed.
    Closed,
    /// Visual state changed somewhere in the tree; a repaint is needed.
    Invalidated,
}

/// A top-level container, the focus pointer, and the observer registries.
pub struct Window {
    /// Node storage arena.
    nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    root: NodeId,
    /// Currently focused node.
    focus: Option<NodeId>,
    /// Focus generation counter.
    focus_gen: u64,
    /// Set by any invalidation, cleared by a render pass.
    needs_repaint: bool,
    /// Window-level lifecycle observers.
    window_observers: Observers<WindowEvent>,
    /// Per-node invalidation observers, torn down with their node.
    node_observers: SecondaryMap<NodeId, Observers<NodeId>>,
    /// Handle to the UI thread's action queue, once owned.
    owner: Option<UiHandle>,
}

impl Window {
    /// Construct a window around a root widget.
    pub fn new(root_widget: impl Widget + 'static) -> Self {
        let mut nodes: SlotMap<NodeId, Node> = SlotMap::with_key();
        let root = nodes.insert(Node::new(Box::new(root_widget)));
        Self {
            nodes,
            root,
            focus: None,
            focus_gen: 0,
            needs_repaint: true,
            window_observers: Observers::new(),
            node_observers: SecondaryMap::new(),
            owner: None,
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// A node's children in traversal order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        self.nodes
            .get(id)
            .map(|n| n.children())
            .ok_or(Error::NodeNotFound)
    }

    // ------------------------------------------------------------------
    // Structure

    /// Attach a widget as the last child of `parent`.
    ///
    /// If nothing holds focus yet and the new subtree makes an
    /// interactable available, focus moves to the first one in traversal
    /// order.
    pub fn add_child(&mut self, parent: NodeId, widget: impl Widget + 'static) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(Error::NodeNotFound);
        }
        let id = self.nodes.insert(Node::new(Box::new(widget)));
        self.nodes[id].parent = Some(parent);
        self.nodes[parent].children.push(id);
        trace!(?id, ?parent, "node attached");

        if self.focus.is_none() {
            let order = focus_order(&self.nodes, self.root);
            if let Some(first) = order.first().copied() {
                self.transition(Some(first), None);
            }
        }
        self.invalidate(id);
        Ok(id)
    }

    /// Remove a node and its whole subtree.
    ///
    /// If the subtree owns focus, focus is reassigned before removal
    /// completes: forward from the focused item to the next interactable
    /// outside the subtree, or cleared if none exists. Every observer
    /// registered for a removed node is deregistered.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if !self.nodes.contains_key(id) {
            return Err(Error::NodeNotFound);
        }
        if id == self.root {
            return Err(Error::Invalid("cannot remove the root".into()));
        }

        if let Some(focused) = self.focus
            && in_subtree(&self.nodes, focused, id)
        {
            let order = focus_order(&self.nodes, self.root);
            let start = order.iter().position(|&n| n == focused).map_or(0, |i| i + 1);
            let next = order[start..]
                .iter()
                .copied()
                .find(|&n| !in_subtree(&self.nodes, n, id));
            self.transition(next, None);
        }

        let parent = self.nodes[id].parent;
        if let Some(parent) = parent
            && let Some(parent_node) = self.nodes.get_mut(parent)
        {
            parent_node.children.retain(|&c| c != id);
        }

        let mut stack = vec![id];
        while let Some(nid) = stack.pop() {
            if let Some(node) = self.nodes.remove(nid) {
                stack.extend(node.children);
                self.node_observers.remove(nid);
            }
        }
        debug!(?id, "subtree removed");
        self.invalidate_window();
        Ok(())
    }

    /// Enable or disable a node. Disabled subtrees are skipped by focus
    /// traversal, layout, and painting; disabling the focused subtree
    /// reassigns focus.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound)?;
        if node.enabled == enabled {
            return Ok(());
        }
        node.enabled = enabled;
        self.ensure_focus();
        self.invalidate(id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Widget access

    /// Borrow a widget by concrete type.
    pub fn widget<T: Widget>(&self, id: NodeId) -> Option<&T> {
        let node = self.nodes.get(id)?;
        let any: &dyn Any = &*node.widget;
        any.downcast_ref::<T>()
    }

    /// Mutate a widget by concrete type, then invalidate its node.
    pub fn update<T: Widget>(&mut self, id: NodeId, f: impl FnOnce(&mut T)) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound)?;
        let any: &mut dyn Any = &mut *node.widget;
        let widget = any
            .downcast_mut::<T>()
            .ok_or_else(|| Error::Invalid("widget type mismatch".into()))?;
        f(widget);
        self.invalidate(id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Focus

    /// The currently focused node, if any.
    pub fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    /// The interactable after `from` in traversal order, without wrapping.
    /// `from = None`, or a reference not present in the tree, restarts the
    /// sequence.
    pub fn next_focus(&self, from: Option<NodeId>) -> Option<NodeId> {
        let order = focus_order(&self.nodes, self.root);
        next_in(&order, from)
    }

    /// The interactable before `from` in traversal order, without
    /// wrapping. `from = None` means the end of the sequence.
    pub fn prev_focus(&self, from: Option<NodeId>) -> Option<NodeId> {
        let order = focus_order(&self.nodes, self.root);
        prev_in(&order, from)
    }

    /// Set focus programmatically. No traversal direction is implied.
    pub fn set_focus(&mut self, target: Option<NodeId>) -> Result<()> {
        if let Some(id) = target
            && !self.nodes.contains_key(id)
        {
            return Err(Error::NodeNotFound);
        }
        self.transition(target, None);
        Ok(())
    }

    /// Move focus to the next interactable, wrapping at the end.
    pub fn focus_next(&mut self) {
        let target = self
            .next_focus(self.focus)
            .or_else(|| self.next_focus(None));
        self.transition(target, Some(FocusDirection::Forward));
    }

    /// Move focus to the previous interactable, wrapping at the start.
    pub fn focus_prev(&mut self) {
        let target = self
            .prev_focus(self.focus)
            .or_else(|| self.prev_focus(None));
        self.transition(target, Some(FocusDirection::Backward));
    }

    /// Leave-notify the old holder, move the pointer, enter-notify the new
    /// holder, then trigger one invalidation.
    fn transition(&mut self, target: Option<NodeId>, dir: Option<FocusDirection>) {
        if let Some(old) = self.focus
            && let Some(node) = self.nodes.get_mut(old)
        {
            node.widget.on_focus_lost(dir);
        }
        self.focus = target;
        self.focus_gen = self.focus_gen.saturating_add(1);
        if let Some(id) = target
            && let Some(node) = self.nodes.get_mut(id)
        {
            node.widget.on_focus_gained(dir);
        }
        debug!(?target, ?dir, "focus transition");
        self.invalidate_window();
    }

    /// Repair the focus pointer after a node stopped being a candidate
    /// (e.g. it was disabled): forward from its structural position, then
    /// from the start, else cleared.
    fn ensure_focus(&mut self) {
        let Some(focused) = self.focus else {
            return;
        };
        if self.is_candidate(focused) {
            return;
        }
        let order = focus_order(&self.nodes, self.root);
        let all = preorder(&self.nodes, self.root);
        let start = all.iter().position(|&n| n == focused).map_or(0, |i| i + 1);
        let target = all[start..]
            .iter()
            .copied()
            .find(|id| order.contains(id))
            .or_else(|| order.first().copied());
        self.transition(target, None);
    }

    /// Is the node currently eligible to hold focus?
    fn is_candidate(&self, id: NodeId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if !node.widget.accept_focus() {
            return false;
        }
        let mut current = Some(id);
        while let Some(nid) = current {
            let Some(n) = self.nodes.get(nid) else {
                return false;
            };
            if !n.enabled {
                return false;
            }
            current = n.parent;
        }
        true
    }

    // ------------------------------------------------------------------
    // Key dispatch

    /// Dispatch a decoded key to the focused interactable.
    ///
    /// With no focus holder the key is dropped. Traversal directives from
    /// the widget move focus with the matching direction tag.
    pub fn on_key(&mut self, key: Key) {
        let Some(id) = self.focus else {
            trace!(?key, "key dropped: no focus");
            return;
        };
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let outcome = node.widget.on_key(key);
        self.invalidate(id);
        match outcome {
            KeyOutcome::Handle => {}
            KeyOutcome::FocusNext => self.focus_next(),
            KeyOutcome::FocusPrev => self.focus_prev(),
        }
    }

    // ------------------------------------------------------------------
    // Hotspot

    /// The focused widget's cursor, translated through every ancestor
    /// offset to global coordinates. `None` when nothing is focused or
    /// the focused widget reports no cursor.
    pub fn cursor(&self) -> Option<Cursor> {
        let id = self.focus?;
        let mut cursor = self.nodes.get(id)?.widget.cursor()?;
        let mut current = Some(id);
        while let Some(nid) = current {
            let node = self.nodes.get(nid)?;
            cursor.location = cursor.location + node.rect.tl;
            current = node.parent;
        }
        Some(cursor)
    }

    /// The global hotspot position, if any.
    pub fn hotspot(&self) -> Option<Point> {
        self.cursor().map(|c| c.location)
    }

    // ------------------------------------------------------------------
    // Observers

    /// Register a window lifecycle observer.
    pub fn observe(&mut self, callback: impl FnMut(&WindowEvent) + Send + 'static) -> ObserverId {
        self.window_observers.add(callback)
    }

    /// Deregister a window lifecycle observer.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        self.window_observers.remove(id)
    }

    /// Register an invalidation observer for one node.
    pub fn observe_node(
        &mut self,
        id: NodeId,
        callback: impl FnMut(&NodeId) + Send + 'static,
    ) -> Result<ObserverId> {
        if !self.nodes.contains_key(id) {
            return Err(Error::NodeNotFound);
        }
        let observers = self
            .node_observers
            .entry(id)
            .ok_or(Error::NodeNotFound)?
            .or_insert_with(Observers::new);
        Ok(observers.add(callback))
    }

    /// Deregister an invalidation observer from a node.
    pub fn unobserve_node(&mut self, id: NodeId, observer: ObserverId) -> bool {
        self.node_observers
            .get_mut(id)
            .is_some_and(|obs| obs.remove(observer))
    }

    /// Total registered node observers. Zero after a subtree holding
    /// registrations has been torn down.
    pub fn observer_count(&self) -> usize {
        self.node_observers.values().map(Observers::len).sum()
    }

    /// Mark a node's visual state changed: notify its observers, then the
    /// window, and flag a repaint.
    pub fn invalidate(&mut self, id: NodeId) {
        self.needs_repaint = true;
        if let Some(observers) = self.node_observers.get_mut(id) {
            observers.notify(&id);
        }
        self.window_observers.notify(&WindowEvent::Invalidated);
    }

    /// Mark the whole window needing repaint.
    pub fn invalidate_window(&mut self) {
        self.needs_repaint = true;
        self.window_observers.notify(&WindowEvent::Invalidated);
    }

    /// Has anything been invalidated since the last render pass?
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    // ------------------------------------------------------------------
    // Owner

    /// Attach the UI-thread handle this window marshals actions through.
    pub fn set_owner(&mut self, owner: UiHandle) {
        self.owner = Some(owner);
    }

    /// The owner handle, if the window has one yet.
    pub fn owner(&self) -> Option<UiHandle> {
        self.owner.clone()
    }

    /// Notify observers the window became visible.
    pub fn show(&mut self) {
        self.window_observers.notify(&WindowEvent::Shown);
        self.invalidate_window();
    }

    /// Notify observers the window was closed.
    pub fn close(&mut self) {
        self.window_observers.notify(&WindowEvent::Closed);
    }

    // ------------------------------------------------------------------
    // Layout and paint

    /// Lay out the tree to the backend's size and paint every enabled
    /// node, then clear the repaint flag.
    pub fn render(&mut self, backend: &mut dyn RenderBackend) -> Result<()> {
        let area = backend.size();
        self.nodes[self.root].rect = area.rect();
        self.layout_children(self.root);
        self.paint(backend, self.root, Point::zero())?;
        backend.flush()?;
        self.needs_repaint = false;
        Ok(())
    }

    /// A node's preferred size: its widget's measurement over the
    /// preferred sizes of its enabled children.
    fn preferred(&self, id: NodeId) -> Expanse {
        let node = &self.nodes[id];
        let child_sizes: Vec<Expanse> = node
            .children
            .iter()
            .filter(|&&c| self.nodes.get(c).is_some_and(|n| n.enabled))
            .map(|&c| self.preferred(c))
            .collect();
        node.widget.measure(&child_sizes)
    }

    /// Recursively place enabled children via the widget's arrangement.
    fn layout_children(&mut self, id: NodeId) {
        let enabled: Vec<NodeId> = self.nodes[id]
            .children
            .iter()
            .copied()
            .filter(|&c| self.nodes.get(c).is_some_and(|n| n.enabled))
            .collect();
        if enabled.is_empty() {
            return;
        }
        let sizes: Vec<Expanse> = enabled.iter().map(|&c| self.preferred(c)).collect();
        let area = self.nodes[id].rect.expanse();
        let rects = self.nodes[id].widget.arrange(area, &sizes);
        for (&child, rect) in enabled.iter().zip(rects) {
            self.nodes[child].rect = rect;
            self.layout_children(child);
        }
    }

    /// Paint one node and recurse into its children.
    fn paint(&mut self, backend: &mut dyn RenderBackend, id: NodeId, origin: Point) -> Result<()> {
        let (rect, children, enabled) = {
            let node = self.nodes.get(id).ok_or(Error::NodeNotFound)?;
            (node.rect, node.children.clone(), node.enabled)
        };
        if !enabled || rect.is_zero() {
            return Ok(());
        }
        let global = rect.shift(origin);
        let focused = self.focus == Some(id);
        {
            let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound)?;
            let mut render = Render::new(backend, global, focused);
            node.widget.render(&mut render)?;
        }
        for child in children {
            self.paint(backend, child, global.tl)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::tutils::{TestBuf, TestField, TestPane};

    /// A window with three fields A, B, C under the root.
    fn three_fields() -> (Window, NodeId, NodeId, NodeId) {
        let mut w = Window::new(TestPane::new());
        let root = w.root();
        let a = w.add_child(root, TestField::new("a")).unwrap();
        let b = w.add_child(root, TestField::new("b")).unwrap();
        let c = w.add_child(root, TestField::new("c")).unwrap();
        (w, a, b, c)
    }

    #[test]
    fn first_interactable_gains_focus_on_attach() {
        let (w, a, _, _) = three_fields();
        assert_eq!(w.focused(), Some(a));
    }

    #[test]
    fn traversal_is_a_total_cycle() {
        let (mut w, a, b, c) = three_fields();

        assert_eq!(w.next_focus(Some(a)), Some(b));
        assert_eq!(w.next_focus(Some(b)), Some(c));
        // No wrap at the query level.
        assert_eq!(w.next_focus(Some(c)), None);
        assert_eq!(w.prev_focus(Some(a)), None);
        // None means start (next) or end (prev) of the sequence.
        assert_eq!(w.next_focus(None), Some(a));
        assert_eq!(w.prev_focus(None), Some(c));

        // The window wraps.
        w.set_focus(Some(c)).unwrap();
        w.focus_next();
        assert_eq!(w.focused(), Some(a));
        w.focus_prev();
        assert_eq!(w.focused(), Some(c));
    }

    #[test]
    fn stale_reference_restarts_sequence() {
        let (mut w, a, b, _) = three_fields();
        w.remove(b).unwrap();
        // A reference no longer in the tree behaves like None.
        assert_eq!(w.next_focus(Some(b)), Some(a));
    }

    #[test]
    fn removing_focused_node_moves_focus_forward() {
        let (mut w, _, b, c) = three_fields();
        w.set_focus(Some(b)).unwrap();
        w.remove(b).unwrap();
        assert_eq!(w.focused(), Some(c));
    }

    #[test]
    fn removing_subtree_containing_focus_repairs_focus() {
        let mut w = Window::new(TestPane::new());
        let root = w.root();
        let pane = w.add_child(root, TestPane::new()).unwrap();
        let inner = w.add_child(pane, TestField::new("inner")).unwrap();
        let after = w.add_child(root, TestField::new("after")).unwrap();

        w.set_focus(Some(inner)).unwrap();
        w.remove(pane).unwrap();
        assert_eq!(w.focused(), Some(after));
        assert!(w.node(inner).is_none());
    }

    #[test]
    fn removing_only_interactable_clears_focus_and_drops_keys() {
        let mut w = Window::new(TestPane::new());
        let root = w.root();
        let only = w.add_child(root, TestField::new("only")).unwrap();
        assert_eq!(w.focused(), Some(only));

        w.remove(only).unwrap();
        assert_eq!(w.focused(), None);
        // Keys are dropped without effect.
        w.on_key(Key::Char('x'));
        assert_eq!(w.focused(), None);
    }

    #[test]
    fn disabled_nodes_are_skipped() {
        let (mut w, a, b, c) = three_fields();
        w.set_enabled(b, false).unwrap();
        assert_eq!(w.next_focus(Some(a)), Some(c));
        // Disabling the focused node repairs focus.
        w.set_focus(Some(c)).unwrap();
        w.set_enabled(c, false).unwrap();
        assert_eq!(w.focused(), Some(a));
    }

    #[test]
    fn dispatch_routes_to_focused_widget() {
        let (mut w, a, b, _) = three_fields();
        w.on_key(Key::Char('x'));
        assert_eq!(w.widget::<TestField>(a).unwrap().text(), "ax");
        assert_eq!(w.widget::<TestField>(b).unwrap().text(), "b");
    }

    #[test]
    fn traversal_directives_move_focus_with_direction() {
        let (mut w, a, b, _) = three_fields();
        w.on_key(Key::Tab);
        assert_eq!(w.focused(), Some(b));

        let log = w.widget::<TestField>(a).unwrap().events();
        assert_eq!(log.last().unwrap(), "lost:forward");
        let log = w.widget::<TestField>(b).unwrap().events();
        assert_eq!(log.last().unwrap(), "gained:forward");

        w.on_key(Key::BackTab);
        assert_eq!(w.focused(), Some(a));
        let log = w.widget::<TestField>(a).unwrap().events();
        assert_eq!(log.last().unwrap(), "gained:backward");
    }

    #[test]
    fn observers_torn_down_with_their_node() {
        let (mut w, a, b, _) = three_fields();
        let hits = Arc::new(AtomicUsize::new(0));

        let inner = hits.clone();
        w.observe_node(a, move |_| {
            inner.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        w.observe_node(b, |_| {}).unwrap();
        assert_eq!(w.observer_count(), 2);

        w.invalidate(a);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        w.remove(a).unwrap();
        w.remove(b).unwrap();
        assert_eq!(w.observer_count(), 0);
        // No further notifications for the removed node.
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn window_invalidation_notifies_and_flags() {
        let mut w = Window::new(TestPane::new());
        let hits = Arc::new(AtomicUsize::new(0));
        let inner = hits.clone();
        let id = w.observe(move |e| {
            if *e == WindowEvent::Invalidated {
                inner.fetch_add(1, Ordering::SeqCst);
            }
        });

        let mut buf = TestBuf::new(10, 3);
        w.render(&mut buf).unwrap();
        assert!(!w.needs_repaint());

        w.invalidate_window();
        assert!(w.needs_repaint());
        assert!(hits.load(Ordering::SeqCst) > 0);
        assert!(w.unobserve(id));
    }

    #[test]
    fn hotspot_translates_through_ancestors() {
        let mut w = Window::new(TestPane::new());
        let root = w.root();
        let pane = w.add_child(root, TestPane::new()).unwrap();
        let field = w.add_child(pane, TestField::new("ab")).unwrap();
        w.set_focus(Some(field)).unwrap();

        let mut buf = TestBuf::new(20, 5);
        w.render(&mut buf).unwrap();
        // The field's cursor sits after its text, offset by its ancestors.
        let field_rect = w.node(field).unwrap().rect();
        let pane_rect = w.node(pane).unwrap().rect();
        let hotspot = w.hotspot().unwrap();
        assert_eq!(hotspot.x, pane_rect.tl.x + field_rect.tl.x + 2);
        assert_eq!(hotspot.y, pane_rect.tl.y + field_rect.tl.y);
    }

    #[test]
    fn no_focus_means_no_hotspot() {
        let mut w = Window::new(TestPane::new());
        let root = w.root();
        let _ = w.add_child(root, TestPane::new()).unwrap();
        assert_eq!(w.focused(), None);
        assert_eq!(w.hotspot(), None);
    }

    #[test]
    fn render_paints_fields_in_order() {
        let (mut w, _, _, _) = three_fields();
        let mut buf = TestBuf::new(10, 5);
        w.render(&mut buf).unwrap();
        assert_eq!(buf.line(0).trim_end(), "a");
        assert_eq!(buf.line(1).trim_end(), "b");
        assert_eq!(buf.line(2).trim_end(), "c");
    }

    #[test]
    fn lifecycle_notifications() {
        let mut w = Window::new(TestPane::new());
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let inner = log.clone();
        w.observe(move |e| {
            if *e != WindowEvent::Invalidated {
                inner.lock().unwrap().push(*e);
            }
        });
        w.show();
        w.close();
        assert_eq!(
            *log.lock().unwrap(),
            vec![WindowEvent::Shown, WindowEvent::Closed]
        );
    }
}
