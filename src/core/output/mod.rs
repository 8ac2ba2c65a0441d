//! Output format writers.
//!
//! This module provides writers for different output formats:
//! - [`write_json`] / [`to_json`] - JSON document with run metadata - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one thread per line - requires `json-output` feature
//! - [`write_csv`] / [`to_csv`] - one row per message, semicolon delimiter - requires `csv-output` feature
//! - [`write_text`] / [`render_thread_text`] - indented subjects, one file per thread
//!
//! # Choosing a Format
//!
//! | Format | Use Case |
//! |--------|----------|
//! | JSON | Full thread structure for APIs and tooling |
//! | JSONL | Streaming threads into indexing or RAG pipelines |
//! | CSV | Spreadsheets, quick filtering by depth or sender |
//! | Text | Reading threads by eye |
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> threadpack::Result<()> {
//! use threadpack::core::output::{write_csv, write_json, write_text, to_jsonl};
//! use threadpack::core::models::OutputConfig;
//! use threadpack::core::processor::reconstruct_threads;
//! use threadpack::RawMessage;
//!
//! let set = reconstruct_threads(vec![
//!     RawMessage::new().with_message_id("<1@x>").with_subject("Hello"),
//!     RawMessage::new().with_message_id("<2@x>").with_in_reply_to("<1@x>"),
//! ]);
//!
//! let config = OutputConfig::new();
//!
//! write_json(&set, "threads.json", &config)?;
//! write_csv(&set, "threads.csv")?;
//! write_text(&set, "threads/", &config)?;
//!
//! let jsonl = to_jsonl(&set)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
pub use text_writer::{render_thread_text, thread_filename, to_text, write_text};
