use crate::autograd::{NodeId, Variable};
use crate::error::MinigradError;
use std::collections::HashSet;

/// One level of the explicit DFS stack: a node and the parents still to explore.
struct Frame<V> {
    node: V,
    parents: std::vec::IntoIter<V>,
}

impl<V: Variable> Frame<V> {
    fn new(node: V) -> Self {
        let parents = node.parents().into_iter();
        Frame { node, parents }
    }
}

/// Computes the topological order of the computation graph ending at `variable`.
///
/// Returns every non-constant node reachable from `variable` (itself included)
/// exactly once, output first and leaves last: each node precedes all of its
/// ancestors. This is the order in which the backward pass consumes nodes.
///
/// The traversal is a depth-first post-order walk driven by an explicit stack,
/// so graph depth is not limited by the call stack. A node is marked visited
/// the first time it is discovered, before its parents are explored; later
/// encounters through other paths (shared sub-expressions) are skipped.
/// Constant nodes are pruned on sight.
///
/// # Errors
/// [`MinigradError::CycleDetected`] if a node is reached again while its own
/// exploration is still in progress.
pub fn topological_sort<V: Variable>(variable: &V) -> Result<Vec<V>, MinigradError> {
    let mut post_order: Vec<V> = Vec::new();

    if variable.is_constant() {
        log::debug!(
            "topological_sort: terminal node {} is constant, nothing to sort",
            variable.unique_id()
        );
        return Ok(post_order);
    }

    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut in_progress: HashSet<NodeId> = HashSet::new();
    let mut stack: Vec<Frame<V>> = Vec::new();

    visited.insert(variable.unique_id());
    in_progress.insert(variable.unique_id());
    stack.push(Frame::new(variable.clone()));

    loop {
        let next_parent = match stack.last_mut() {
            Some(frame) => frame.parents.next(),
            None => break,
        };

        match next_parent {
            Some(parent) => {
                let parent_id = parent.unique_id();
                if parent.is_constant() {
                    log::trace!("topological_sort: pruning constant node {}", parent_id);
                    continue;
                }
                if in_progress.contains(&parent_id) {
                    return Err(MinigradError::CycleDetected { node: parent_id });
                }
                if !visited.insert(parent_id) {
                    continue;
                }
                in_progress.insert(parent_id);
                stack.push(Frame::new(parent));
            }
            None => {
                // All parents explored: emit the node in post-order.
                if let Some(frame) = stack.pop() {
                    in_progress.remove(&frame.node.unique_id());
                    post_order.push(frame.node);
                }
            }
        }
    }

    post_order.reverse();
    log::debug!(
        "topological_sort: {} nodes reachable from {}",
        post_order.len(),
        variable.unique_id()
    );
    Ok(post_order)
}
