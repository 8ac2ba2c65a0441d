//! Thread reconstruction engine.
//!
//! This module contains, leaves first:
//! - [`headers`] - Identifier, reference, date and subject normalization
//! - [`index`] - Identifier → message index
//! - [`graph`] - Parent → children edges
//! - [`roots`] - Root selection and chronological ordering
//! - [`walker`] - Depth-first thread traversal
//! - [`models`] - Thread records and output configuration
//! - [`processor`] - The whole pipeline plus statistics
//! - [`output`] - Format writers (JSON, JSONL, CSV, text)
//!
//! Nothing in here performs I/O except [`output`], and nothing except
//! [`output`] can fail.
//!
//! # Quick Start
//!
//! ```rust
//! use threadpack::core::{reconstruct_threads, Thread};
//! use threadpack::RawMessage;
//!
//! let set = reconstruct_threads(vec![
//!     RawMessage::new().with_message_id("<a>").with_subject("Plan"),
//!     RawMessage::new().with_message_id("<b>").with_subject("Re: Plan").with_in_reply_to("<a>"),
//! ]);
//!
//! let thread: &Thread = &set.threads[0];
//! assert_eq!(thread.subject, "Plan");
//! assert_eq!(thread.messages[1].depth, 1);
//! ```

pub mod graph;
pub mod headers;
pub mod index;
pub mod models;
pub mod output;
pub mod processor;
pub mod roots;
pub mod walker;

// Re-export main types for convenience
pub use graph::{ThreadGraph, build_graph};
pub use headers::{extract_references, normalize_id, normalize_subject, parse_date, resolve_parent};
pub use index::{IndexStats, MessageIndex, build_index};
pub use models::{OutputConfig, Thread, ThreadEntry};
pub use processor::{ThreadSet, ThreadingStats, assemble_threads, reconstruct_threads};
pub use roots::select_roots;
pub use walker::{walk, walk_all};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
pub use output::{render_thread_text, write_text};
