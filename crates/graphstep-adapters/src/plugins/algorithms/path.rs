//! Path reconstruction from back-pointers.

use graphstep_common::types::NodeId;

/// Walks back-pointers from `end` and returns the route from its root to
/// `end`, inclusive.
///
/// `prev[i]` is the node from which node `i` was first reached, `None` for
/// the root. The walk stops after `prev.len()` hops, so a malformed
/// back-pointer cycle cannot loop forever.
#[must_use]
pub fn reconstruct_path(prev: &[Option<NodeId>], end: NodeId) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut node = end;
    while let Some(parent) = prev.get(node.index()).copied().flatten() {
        if path.len() > prev.len() {
            break;
        }
        path.push(parent);
        node = parent;
    }
    path.reverse();
    path
}
