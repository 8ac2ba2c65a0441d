//! Root selection and chronological ordering.
//!
//! A message is a root when it is nobody's child. Roots are ordered by parsed
//! date, oldest first, with undated roots after every dated one. Ties keep
//! index order. That order defines the 1-based thread numbers.
//!
//! A reply cycle (`A → B → A`, or a message replying to itself) has no
//! message that is nobody's child. Each such cycle contributes one root, its
//! member with the lexicographically smallest identifier, so every indexed
//! message still lands in exactly one thread.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use log::info;

use super::graph::ThreadGraph;
use super::index::MessageIndex;
use crate::message::Message;

/// Orders messages by parsed date, undated last.
///
/// Equal dates (and two undated messages) compare equal so a stable sort
/// keeps their existing order.
pub fn date_order(a: &Message, b: &Message) -> Ordering {
    match (a.date_parsed, b.date_parsed) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns the identifiers of all thread roots in thread order.
pub fn select_roots(index: &MessageIndex, graph: &ThreadGraph) -> Vec<String> {
    let cycle_roots = cycle_roots(index, graph);

    let mut roots: Vec<&Message> = index
        .iter()
        .filter(|m| !graph.is_child(&m.id) || cycle_roots.contains(m.id.as_str()))
        .collect();

    roots.sort_by(|a, b| date_order(a, b));
    roots.into_iter().map(|m| m.id.clone()).collect()
}

/// Finds one entry point per reply cycle.
///
/// Each message has at most one parent, so following parent links from any
/// message either ends at a natural root or runs into a loop. Every message
/// is followed at most once across the whole scan.
pub fn cycle_roots<'a>(index: &'a MessageIndex, graph: &'a ThreadGraph) -> HashSet<&'a str> {
    let mut settled: HashSet<&str> = HashSet::with_capacity(index.len());
    let mut roots = HashSet::new();

    for message in index {
        let mut path: Vec<&str> = Vec::new();
        let mut on_path: HashMap<&str, usize> = HashMap::new();
        let mut current = Some(message.id.as_str());

        while let Some(id) = current {
            if settled.contains(id) {
                break;
            }
            if let Some(&start) = on_path.get(id) {
                if let Some(&smallest) = path[start..].iter().min() {
                    info!(
                        "reply cycle of {} message(s); threading from <{}>",
                        path.len() - start,
                        smallest
                    );
                    roots.insert(smallest);
                }
                break;
            }
            on_path.insert(id, path.len());
            path.push(id);
            current = graph.parent_of(id);
        }

        settled.extend(path);
    }

    roots
}
