//! Message records consumed by the threading engine.
//!
//! Two types live here:
//!
//! - [`RawMessage`] is what an archive reader produces: the six header fields
//!   threading cares about, as decoded text, each possibly absent.
//! - [`Message`] is the indexed form: a canonical identifier, the raw header
//!   text kept verbatim, and a parsed date when one could be recovered.
//!
//! # Examples
//!
//! ```
//! use threadpack::RawMessage;
//!
//! let raw = RawMessage::new()
//!     .with_message_id("<2@example.org>")
//!     .with_subject("Re: Hello")
//!     .with_in_reply_to("<1@example.org>");
//!
//! assert_eq!(raw.message_id(), Some("<2@example.org>"));
//! assert!(raw.has_reply_headers());
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Header fields of one archived email, before normalization.
///
/// Every field is optional because every one of them is missing from some
/// real archive. Values are expected to be decoded already (no RFC 2047
/// encoded words) and unfolded onto a single line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    /// `Message-ID` header, with or without angle brackets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// `Subject` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// `From` header, kept as written (display name and address).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// `Date` header as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// `In-Reply-To` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<String>,

    /// `References` header: a whitespace-separated list of `<id>` tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub references: Option<String>,
}

impl RawMessage {
    /// Creates a record with every header absent.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_message_id(mut self, value: impl Into<String>) -> Self {
        self.message_id = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_subject(mut self, value: impl Into<String>) -> Self {
        self.subject = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_from(mut self, value: impl Into<String>) -> Self {
        self.from = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_date(mut self, value: impl Into<String>) -> Self {
        self.date = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_in_reply_to(mut self, value: impl Into<String>) -> Self {
        self.in_reply_to = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_references(mut self, value: impl Into<String>) -> Self {
        self.references = Some(value.into());
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    pub fn message_id(&self) -> Option<&str> {
        self.message_id.as_deref()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn in_reply_to(&self) -> Option<&str> {
        self.in_reply_to.as_deref()
    }

    pub fn references(&self) -> Option<&str> {
        self.references.as_deref()
    }

    /// Returns `true` if either reply header carries non-blank text.
    pub fn has_reply_headers(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.in_reply_to) || present(&self.references)
    }
}

/// An indexed message.
///
/// Built once by [`build_index`](crate::core::index::build_index) and never
/// mutated afterwards. `date_raw`, `in_reply_to_raw` and `references_raw` are
/// empty strings when the header was missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Canonical identifier (angle brackets stripped). Unique within an index.
    pub id: String,

    /// Subject as written, possibly empty.
    pub subject: String,

    /// Sender as written.
    pub from: String,

    /// `Date` header as written, possibly empty or unparseable.
    pub date_raw: String,

    /// Parsed date, keeping the sender's UTC offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_parsed: Option<DateTime<FixedOffset>>,

    /// `In-Reply-To` header as written.
    pub in_reply_to_raw: String,

    /// `References` header as written.
    pub references_raw: String,
}

impl Message {
    /// Creates a message with only an identifier; every other field is empty.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject: String::new(),
            from: String::new(),
            date_raw: String::new(),
            date_parsed: None,
            in_reply_to_raw: String::new(),
            references_raw: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn date_raw(&self) -> &str {
        &self.date_raw
    }

    pub fn date_parsed(&self) -> Option<DateTime<FixedOffset>> {
        self.date_parsed
    }
}
