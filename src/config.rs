//! Configuration types for archive reading.
//!
//! Plain structs with builder methods and no CLI framework dependencies.
//! Output settings live next to the writers, in
//! [`OutputConfig`](crate::core::models::OutputConfig).
//!
//! # Example
//!
//! ```rust
//! use threadpack::config::MboxConfig;
//!
//! let config = MboxConfig::new()
//!     .with_buffer_size(256 * 1024)
//!     .with_skip_invalid(false);
//!
//! assert_eq!(config.buffer_size, 256 * 1024);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for reading mbox archives.
///
/// Mailing-list dumps can run to gigabytes, so the reader streams them one
/// message at a time. These settings bound memory per message and decide
/// what happens to a message whose header block won't parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MboxConfig {
    /// Read buffer size (default: 64KB)
    pub buffer_size: usize,

    /// Largest single message accepted, headers and body (default: 32MB)
    pub max_message_size: usize,

    /// Skip messages with unparseable headers instead of returning errors (default: true)
    pub skip_invalid: bool,
}

impl Default for MboxConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024,             // 64KB
            max_message_size: 32 * 1024 * 1024, // 32MB
            skip_invalid: true,
        }
    }
}

impl MboxConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for very large archives: bigger read buffer.
    pub fn streaming() -> Self {
        Self {
            buffer_size: 256 * 1024,
            ..Self::default()
        }
    }

    /// Sets the read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Sets the maximum message size.
    #[must_use]
    pub fn with_max_message_size(mut self, size: usize) -> Self {
        self.max_message_size = size;
        self
    }

    /// Sets whether to skip invalid messages.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}
