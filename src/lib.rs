//! # threadpack
//!
//! A Rust library for reconstructing conversation threads from flat email
//! archives.
//!
//! ## Overview
//!
//! Mailing-list dumps store messages in arrival order. threadpack rebuilds
//! the reply trees from `Message-ID`, `In-Reply-To` and `References`, orders
//! threads and replies by date, and writes the result as JSON, JSON Lines,
//! CSV or indented text.
//!
//! Real archives are messy, and none of the following stops a run:
//! - messages without a `Message-ID` are skipped and counted
//! - replies to messages that are not in the archive start their own thread
//! - reply cycles get a deterministic entry point and still terminate
//! - unparseable dates sort after every dated message
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use threadpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let records = read_mbox("list.mbox", MboxConfig::default())?;
//!     let set = reconstruct_threads(records).with_source("list.mbox");
//!
//!     write_json(&set, "threads.json", &OutputConfig::new())?;
//!     write_text(&set, "threads/", &OutputConfig::new())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Threading In-Memory Records
//!
//! The core never touches the filesystem, so records can come from anywhere:
//!
//! ```rust
//! use threadpack::RawMessage;
//! use threadpack::core::reconstruct_threads;
//!
//! let set = reconstruct_threads(vec![
//!     RawMessage::new().with_message_id("<a@x>").with_subject("Plan").with_date("2025-01-01"),
//!     RawMessage::new().with_message_id("<b@x>").with_references("<a@x>").with_date("2025-01-02"),
//!     RawMessage::new().with_message_id("<c@x>").with_in_reply_to("<gone@x>"),
//! ]);
//!
//! assert_eq!(set.threads.len(), 2);
//! assert_eq!(set.threads[0].message_count, 2);
//! assert_eq!(set.threads[1].root_message_id, "c@x");
//! ```
//!
//! ## Module Structure
//!
//! - [`core`] - The threading engine
//!   - [`core::headers`] - [`normalize_id`](core::headers::normalize_id), [`resolve_parent`](core::headers::resolve_parent), dates and subjects
//!   - [`core::index`], [`core::graph`], [`core::roots`], [`core::walker`] - pipeline stages
//!   - [`core::processor`] - [`reconstruct_threads`](core::processor::reconstruct_threads), [`ThreadSet`](core::processor::ThreadSet)
//!   - [`core::output`] - JSON, JSONL, CSV and text writers
//! - [`archive`] - [`MboxReader`](archive::MboxReader), [`read_mbox`](archive::read_mbox), separator cleanup
//! - [`config`] - [`MboxConfig`](config::MboxConfig)
//! - [`format`] - [`OutputFormat`](format::OutputFormat) and format dispatch
//! - [`message`] - [`RawMessage`] and [`Message`]
//! - [`error`] - [`ThreadpackError`] and [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;

// Re-export the main types at the crate root for convenience
pub use error::{Result, ThreadpackError};
pub use message::{Message, RawMessage};

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use threadpack::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::{Message, RawMessage};

    // Error types
    pub use crate::error::{Result, ThreadpackError};

    // Reading
    pub use crate::archive::{MboxReader, RecordIterator, read_mbox};
    pub use crate::config::MboxConfig;

    // Threading
    pub use crate::core::models::{OutputConfig, Thread, ThreadEntry};
    pub use crate::core::processor::{ThreadSet, ThreadingStats, reconstruct_threads};

    // Output
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::core::output::write_text;
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
