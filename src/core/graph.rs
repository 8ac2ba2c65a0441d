//! Parent → children edges.
//!
//! Every message claims at most one parent (see
//! [`resolve_parent`](super::headers::resolve_parent)). An edge exists only
//! when that parent is indexed; a dangling parent makes the message a root
//! candidate instead.
//!
//! Cycles are not rejected here. Malformed headers can make `A` reply to `B`
//! and `B` reply to `A`; the walker's visited set is what keeps traversal
//! finite, and the root selector picks an entry point for such loops.

use std::collections::HashMap;

use log::debug;

use super::headers::resolve_parent;
use super::index::MessageIndex;

/// Reply structure of an indexed archive.
#[derive(Debug, Clone, Default)]
pub struct ThreadGraph {
    children: HashMap<String, Vec<String>>,
    parents: HashMap<String, String>,
    dangling_parents: usize,
}

impl ThreadGraph {
    /// Children of `id` in index order. Empty for leaves and unknown ids.
    pub fn children(&self, id: &str) -> &[String] {
        self.children.get(id).map_or(&[], Vec::as_slice)
    }

    /// The indexed parent of `id`, if it has one.
    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.parents.get(id).map(String::as_str)
    }

    /// Returns `true` if `id` appears in some parent's child list.
    pub fn is_child(&self, id: &str) -> bool {
        self.parents.contains_key(id)
    }

    /// Number of parent → child edges.
    pub fn edge_count(&self) -> usize {
        self.parents.len()
    }

    /// Messages whose claimed parent is not indexed.
    pub fn dangling_parents(&self) -> usize {
        self.dangling_parents
    }

    /// Number of parent entries, one per indexed message.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Derives the reply graph from an index.
///
/// Every indexed message gets an entry, so `children` of a leaf is an empty
/// slice rather than a missing key.
pub fn build_graph(index: &MessageIndex) -> ThreadGraph {
    let mut graph = ThreadGraph {
        children: index.iter().map(|m| (m.id.clone(), Vec::new())).collect(),
        ..ThreadGraph::default()
    };

    for message in index {
        let in_reply_to = non_empty(&message.in_reply_to_raw);
        let references = non_empty(&message.references_raw);

        let Some(parent) = resolve_parent(in_reply_to, references) else {
            continue;
        };

        match graph.children.get_mut(&parent) {
            Some(kids) => {
                kids.push(message.id.clone());
                graph.parents.insert(message.id.clone(), parent);
            }
            None => {
                graph.dangling_parents += 1;
                debug!("<{}> replies to unknown <{}>", message.id, parent);
            }
        }
    }

    graph
}

fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
