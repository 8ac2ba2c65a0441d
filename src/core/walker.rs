//! Depth-first thread traversal.
//!
//! [`walk`] emits a thread in pre-order: the root at depth 0, then each child
//! subtree, oldest child first. It uses an explicit stack, so arbitrarily deep
//! reply chains cannot overflow the call stack. A visited set bounds the walk
//! even when malformed headers create cycles; a message met a second time is
//! skipped because it already appears earlier in the output.

use std::collections::HashSet;

use super::graph::ThreadGraph;
use super::index::MessageIndex;
use super::models::ThreadEntry;
use super::roots::date_order;
use crate::message::Message;

/// Walks the thread rooted at `root_id`.
///
/// Returns an empty sequence if `root_id` is not indexed.
pub fn walk(root_id: &str, index: &MessageIndex, graph: &ThreadGraph) -> Vec<ThreadEntry> {
    let mut entries = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&str, usize)> = vec![(root_id, 0)];

    while let Some((id, depth)) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(message) = index.get(id) else {
            continue;
        };

        entries.push(ThreadEntry::from_message(message, depth));

        let mut children: Vec<&Message> = graph
            .children(id)
            .iter()
            .filter(|child| !visited.contains(child.as_str()))
            .filter_map(|child| index.get(child))
            .collect();
        children.sort_by(|a, b| date_order(a, b));

        // Reversed so the oldest child is popped first
        stack.extend(children.into_iter().rev().map(|m| (m.id.as_str(), depth + 1)));
    }

    entries
}

/// Walks every root, returning one sequence per root in the same order.
#[cfg(not(feature = "parallel"))]
pub fn walk_all(roots: &[String], index: &MessageIndex, graph: &ThreadGraph) -> Vec<Vec<ThreadEntry>> {
    roots.iter().map(|root| walk(root, index, graph)).collect()
}

/// Walks every root on the rayon pool, returning one sequence per root in the
/// same order.
#[cfg(feature = "parallel")]
pub fn walk_all(roots: &[String], index: &MessageIndex, graph: &ThreadGraph) -> Vec<Vec<ThreadEntry>> {
    use rayon::prelude::*;

    roots.par_iter().map(|root| walk(root, index, graph)).collect()
}
