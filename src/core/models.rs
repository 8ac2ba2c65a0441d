//! Thread records handed to the emitters.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::headers::normalize_subject;
use crate::message::Message;

/// One message inside a thread, at its depth below the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEntry {
    pub message_id: String,
    pub subject: String,
    pub from: String,
    /// `Date` header as written.
    pub date: String,
    pub date_parsed: Option<DateTime<FixedOffset>>,
    /// Edge count from the thread root.
    pub depth: usize,
}

impl ThreadEntry {
    pub fn from_message(message: &Message, depth: usize) -> Self {
        Self {
            message_id: message.id.clone(),
            subject: message.subject.clone(),
            from: message.from.clone(),
            date: message.date_raw.clone(),
            date_parsed: message.date_parsed,
            depth,
        }
    }
}

/// A reconstructed conversation.
///
/// `subject`, `start_date` and `starter_from` describe the root message.
/// `messages` is the depth-first walk, root first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// 1-based position in chronological root order.
    pub thread_id: usize,
    pub root_message_id: String,
    /// Root subject with reply markers stripped and whitespace collapsed.
    pub subject: String,
    pub subject_raw: String,
    pub start_date: Option<DateTime<FixedOffset>>,
    pub start_date_raw: String,
    pub starter_from: String,
    pub message_count: usize,
    pub messages: Vec<ThreadEntry>,
}

impl Thread {
    /// Builds a thread from its root and the walk that starts there.
    pub fn new(thread_id: usize, root: &Message, messages: Vec<ThreadEntry>) -> Self {
        Self {
            thread_id,
            root_message_id: root.id.clone(),
            subject: normalize_subject(&root.subject),
            subject_raw: root.subject.clone(),
            start_date: root.date_parsed,
            start_date_raw: root.date_raw.clone(),
            starter_from: root.from.clone(),
            message_count: messages.len(),
            messages,
        }
    }

    /// Deepest reply level in the thread (0 for a lone message).
    pub fn max_depth(&self) -> usize {
        self.messages.iter().map(|m| m.depth).max().unwrap_or(0)
    }

    /// Returns `true` if nobody replied to the root.
    pub fn is_single(&self) -> bool {
        self.message_count <= 1
    }
}

/// Configuration for output format.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Wrap JSON output in a `metadata` + `threads` document (default: true)
    pub include_metadata: bool,
    /// Pretty-print JSON (default: true)
    pub pretty: bool,
    /// Indentation per depth level in text output (default: two spaces)
    pub indent: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_metadata: true,
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line JSON.
    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Emit a bare array of threads instead of the metadata document.
    #[must_use]
    pub fn without_metadata(mut self) -> Self {
        self.include_metadata = false;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::headers::parse_date;

    fn root() -> Message {
        let mut m = Message::new("root@x");
        m.subject = "Re:  Weekly   sync".into();
        m.from = "Alice <alice@x>".into();
        m.date_raw = "2025-01-01".into();
        m.date_parsed = parse_date("2025-01-01");
        m
    }

    #[test]
    fn test_thread_new_describes_root() {
        let r = root();
        let thread = Thread::new(7, &r, vec![ThreadEntry::from_message(&r, 0)]);
        assert_eq!(thread.thread_id, 7);
        assert_eq!(thread.root_message_id, "root@x");
        assert_eq!(thread.subject, "Weekly sync");
        assert_eq!(thread.subject_raw, "Re:  Weekly   sync");
        assert_eq!(thread.start_date_raw, "2025-01-01");
        assert!(thread.start_date.is_some());
        assert_eq!(thread.starter_from, "Alice <alice@x>");
        assert_eq!(thread.message_count, 1);
        assert!(thread.is_single());
        assert_eq!(thread.max_depth(), 0);
    }

    #[test]
    fn test_thread_entry_from_message() {
        let entry = ThreadEntry::from_message(&root(), 3);
        assert_eq!(entry.message_id, "root@x");
        assert_eq!(entry.date, "2025-01-01");
        assert_eq!(entry.depth, 3);
    }

    #[test]
    fn test_output_config_builders() {
        let config = OutputConfig::new().compact().without_metadata().with_indent("\t");
        assert!(!config.pretty);
        assert!(!config.include_metadata);
        assert_eq!(config.indent, "\t");
        assert!(OutputConfig::default().pretty);
    }
}
