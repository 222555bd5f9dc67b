//! Focus traversal helpers.
//!
//! Traversal order is a deterministic left-to-right, depth-first walk of
//! the component tree, visiting only enabled widgets that accept focus.
//! Disabled subtrees are skipped wholesale.

use slotmap::SlotMap;

use crate::node::{Node, NodeId};

/// Collect focus candidates under `root` in pre-order.
pub(crate) fn focus_order(nodes: &SlotMap<NodeId, Node>, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = nodes.get(id) else {
            continue;
        };
        if !node.enabled {
            continue;
        }
        if node.widget.accept_focus() {
            out.push(id);
        }
        for child in node.children.iter().rev() {
            stack.push(*child);
        }
    }
    out
}

/// Collect every node under `root` in pre-order, enabled or not.
pub(crate) fn preorder(nodes: &SlotMap<NodeId, Node>, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = nodes.get(id) else {
            continue;
        };
        out.push(id);
        for child in node.children.iter().rev() {
            stack.push(*child);
        }
    }
    out
}

/// The candidate after `from` in traversal order, without wrapping.
///
/// `from = None` means "start of sequence"; a `from` not present in the
/// order is treated the same way rather than failing.
pub(crate) fn next_in(order: &[NodeId], from: Option<NodeId>) -> Option<NodeId> {
    match from.and_then(|f| order.iter().position(|&id| id == f)) {
        Some(i) => order.get(i + 1).copied(),
        None => order.first().copied(),
    }
}

/// The candidate before `from` in traversal order, without wrapping.
///
/// `from = None` (or a `from` not present in the order) means "end of
/// sequence".
pub(crate) fn prev_in(order: &[NodeId], from: Option<NodeId>) -> Option<NodeId> {
    match from.and_then(|f| order.iter().position(|&id| id == f)) {
        Some(0) => None,
        Some(i) => order.get(i - 1).copied(),
        None => order.last().copied(),
    }
}

/// Is `id` inside the subtree rooted at `ancestor`?
pub(crate) fn in_subtree(nodes: &SlotMap<NodeId, Node>, id: NodeId, ancestor: NodeId) -> bool {
    let mut current = Some(id);
    while let Some(nid) = current {
        if nid == ancestor {
            return true;
        }
        current = nodes.get(nid).and_then(|n| n.parent);
    }
    false
}
