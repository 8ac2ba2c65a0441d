//! End-to-end threading pipeline.
//!
//! raw messages → index → graph → roots → walks → [`ThreadSet`].
//!
//! # Example
//!
//! ```
//! use threadpack::RawMessage;
//! use threadpack::core::processor::reconstruct_threads;
//!
//! let set = reconstruct_threads(vec![
//!     RawMessage::new().with_message_id("<1>").with_subject("Hello").with_date("2025-01-01"),
//!     RawMessage::new().with_message_id("<2>").with_in_reply_to("<1>").with_date("2025-01-02"),
//! ]);
//!
//! assert_eq!(set.threads.len(), 1);
//! assert_eq!(set.threads[0].message_count, 2);
//! assert_eq!(set.stats.indexed, 2);
//! ```

use log::info;
use serde::{Deserialize, Serialize};

use super::graph::{ThreadGraph, build_graph};
use super::index::{MessageIndex, build_index};
use super::models::Thread;
use super::roots::{cycle_roots, select_roots};
use super::walker::walk_all;
use crate::message::RawMessage;

/// Statistics about one threading run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadingStats {
    /// Raw records read from the archive.
    pub total_read: usize,
    /// Messages that made it into the index.
    pub indexed: usize,
    /// Records dropped for lack of a `Message-ID`.
    pub skipped_missing_id: usize,
    /// Records that replaced an earlier record with the same identifier.
    pub duplicate_ids: usize,
    /// Indexed messages without a parseable date.
    pub unparsed_dates: usize,
    /// Messages whose parent is not in the archive (they start threads).
    pub dangling_parents: usize,
    /// Reply cycles broken by choosing an entry point.
    pub cycles_broken: usize,
    /// Threads produced.
    pub threads: usize,
}

impl ThreadingStats {
    /// Average number of messages per thread.
    pub fn average_thread_size(&self) -> f64 {
        if self.threads == 0 {
            return 0.0;
        }
        self.indexed as f64 / self.threads as f64
    }

    /// Percentage of indexed messages that are replies (0.0 - 100.0).
    pub fn reply_ratio(&self) -> f64 {
        if self.indexed == 0 {
            return 0.0;
        }
        (1.0 - (self.threads as f64 / self.indexed as f64)) * 100.0
    }
}

/// Every thread of an archive, in thread order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThreadSet {
    /// Archive the threads came from, reported in JSON metadata.
    pub source_file: Option<String>,
    pub threads: Vec<Thread>,
    pub stats: ThreadingStats,
}

impl ThreadSet {
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_file = Some(source.into());
        self
    }

    /// Total messages across all threads.
    pub fn message_count(&self) -> usize {
        self.threads.iter().map(|t| t.message_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

/// Assembles threads from an already-built index and graph.
pub fn assemble_threads(index: &MessageIndex, graph: &ThreadGraph) -> Vec<Thread> {
    let roots = select_roots(index, graph);
    let walks = walk_all(&roots, index, graph);

    roots
        .iter()
        .zip(walks)
        .enumerate()
        .filter_map(|(i, (root_id, entries))| {
            index.get(root_id).map(|root| Thread::new(i + 1, root, entries))
        })
        .collect()
}

/// Runs the whole pipeline over raw archive records.
pub fn reconstruct_threads<I>(messages: I) -> ThreadSet
where
    I: IntoIterator<Item = RawMessage>,
{
    let index = build_index(messages);
    let graph = build_graph(&index);
    let threads = assemble_threads(&index, &graph);

    let index_stats = index.stats();
    let stats = ThreadingStats {
        total_read: index_stats.total_read,
        indexed: index.len(),
        skipped_missing_id: index_stats.skipped_missing_id,
        duplicate_ids: index_stats.duplicate_ids,
        unparsed_dates: index_stats.unparsed_dates,
        dangling_parents: graph.dangling_parents(),
        cycles_broken: cycle_roots(&index, &graph).len(),
        threads: threads.len(),
    };

    info!(
        "threaded {} message(s) into {} thread(s), {} skipped",
        stats.indexed, stats.threads, stats.skipped_missing_id
    );

    ThreadSet {
        source_file: None,
        threads,
        stats,
    }
}
