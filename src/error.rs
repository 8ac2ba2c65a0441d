//! Unified error types for threadpack.
//!
//! This module provides a single [`ThreadpackError`] enum covering every error
//! the library can return. The threading core itself never fails: malformed
//! headers, missing identifiers, dangling parents and reply cycles are all
//! recovered locally. Errors come from the edges, that is reading the archive
//! and writing output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for threadpack operations.
///
/// # Example
///
/// ```rust
/// use threadpack::error::Result;
/// use threadpack::RawMessage;
///
/// fn load() -> Result<Vec<RawMessage>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ThreadpackError>;

/// The error type for all threadpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThreadpackError {
    /// Reading the archive or writing output failed.
    ///
    /// Missing input files, unwritable output directories and full disks all
    /// end up here.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// `mailparse` rejected a message's header block.
    #[error("Failed to parse {what}{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// Which part of the archive was being read
        what: &'static str,
        #[source]
        source: mailparse::MailParseError,
        /// Archive path, when reading from disk
        path: Option<PathBuf>,
    },

    /// A requested output format or path is unusable.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        format: &'static str,
        message: String,
    },

    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendered output was not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        context: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A single archive message exceeded [`MboxConfig::max_message_size`](crate::config::MboxConfig).
    #[error("Message too large: {actual_size} bytes (maximum: {max_size} bytes)")]
    BufferOverflow { max_size: usize, actual_size: usize },
}

impl From<std::string::FromUtf8Error> for ThreadpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ThreadpackError::Utf8 {
            context: "rendered output".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ThreadpackError {
    /// Creates a parse error for an mbox header block.
    pub fn mbox_parse(source: mailparse::MailParseError, path: Option<PathBuf>) -> Self {
        ThreadpackError::Parse {
            what: "mbox headers",
            source,
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ThreadpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a buffer overflow error.
    pub fn buffer_overflow(max_size: usize, actual_size: usize) -> Self {
        ThreadpackError::BufferOverflow {
            max_size,
            actual_size,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ThreadpackError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ThreadpackError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ThreadpackError::InvalidFormat { .. })
    }

    /// Returns `true` if a message exceeded the size limit.
    pub fn is_buffer_overflow(&self) -> bool {
        matches!(self, ThreadpackError::BufferOverflow { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
