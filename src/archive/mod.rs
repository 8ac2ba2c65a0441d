//! Archive readers.
//!
//! Readers turn an on-disk archive into a stream of
//! [`RawMessage`](crate::RawMessage) records for the threading core.
//!
//! - [`MboxReader`] - streams an mbox one message at a time
//! - [`read_mbox`] - collects a whole archive
//! - [`clean_from_lines`] - strips non-ASCII bytes from `From ` separator lines
//!
//! # Example
//!
//! ```rust,no_run
//! use threadpack::archive::read_mbox;
//! use threadpack::config::MboxConfig;
//! use threadpack::core::reconstruct_threads;
//!
//! let records = read_mbox("list.mbox", MboxConfig::default())?;
//! let set = reconstruct_threads(records).with_source("list.mbox");
//! println!("{} threads", set.threads.len());
//! # Ok::<(), threadpack::ThreadpackError>(())
//! ```

mod clean;
mod mbox;

pub use clean::{CleanStats, clean_from_lines, clean_mbox_file};
pub use mbox::{MboxReader, read_mbox};

use crate::RawMessage;
use crate::error::Result;

/// Iterator over archive records with progress tracking.
///
/// Useful for progress bars and logging on multi-gigabyte archives.
pub trait RecordIterator: Iterator<Item = Result<RawMessage>> {
    /// Returns approximate progress as a percentage (0.0 to 100.0).
    ///
    /// Returns `None` if progress cannot be determined (e.g., unknown file size).
    fn progress(&self) -> Option<f64> {
        None
    }

    /// Returns the number of bytes processed so far.
    fn bytes_processed(&self) -> u64;

    /// Returns the total input size in bytes, if known.
    fn total_bytes(&self) -> Option<u64> {
        None
    }
}
