//! In-memory message index.
//!
//! [`build_index`] normalizes every [`RawMessage`] once and keys it by its
//! canonical identifier. Afterwards the index is read-only.
//!
//! Iteration follows first-insertion order. When an archive repeats an
//! identifier the newer record replaces the older one in place, so a
//! duplicate never moves a message and the order stays deterministic.

use std::collections::HashMap;

use log::{debug, warn};

use super::headers::{normalize_id, parse_date};
use crate::message::{Message, RawMessage};

/// Counters collected while building an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Raw records seen.
    pub total_read: usize,
    /// Records without a usable `Message-ID`; they cannot be threaded.
    pub skipped_missing_id: usize,
    /// Records whose identifier was already indexed (last write wins).
    pub duplicate_ids: usize,
    /// Indexed messages whose `Date` could not be parsed.
    pub unparsed_dates: usize,
}

/// Identifier → [`Message`] mapping with stable iteration order.
#[derive(Debug, Clone, Default)]
pub struct MessageIndex {
    messages: Vec<Message>,
    positions: HashMap<String, usize>,
    stats: IndexStats,
}

impl MessageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a message, replacing any message with the same identifier.
    ///
    /// Returns the replaced message.
    pub fn insert(&mut self, message: Message) -> Option<Message> {
        match self.positions.get(&message.id) {
            Some(&pos) => Some(std::mem::replace(&mut self.messages[pos], message)),
            None => {
                self.positions.insert(message.id.clone(), self.messages.len());
                self.messages.push(message);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.positions.get(id).map(|&pos| &self.messages[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }
}

impl<'a> IntoIterator for &'a MessageIndex {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Converts a raw record into an indexable message.
///
/// Returns `None` when the record has no usable identifier.
pub fn to_message(raw: RawMessage) -> Option<Message> {
    let id = normalize_id(raw.message_id.as_deref())?;
    let date_raw = raw.date.unwrap_or_default();
    let date_parsed = parse_date(&date_raw);

    Some(Message {
        id,
        subject: raw.subject.unwrap_or_default(),
        from: raw.from.unwrap_or_default(),
        date_raw,
        date_parsed,
        in_reply_to_raw: raw.in_reply_to.unwrap_or_default(),
        references_raw: raw.references.unwrap_or_default(),
    })
}

/// Builds the index for one run.
///
/// Messages without an identifier are dropped and counted. Repeated
/// identifiers keep the last record. An unparseable date leaves
/// `date_parsed` empty but keeps the message.
pub fn build_index<I>(messages: I) -> MessageIndex
where
    I: IntoIterator<Item = RawMessage>,
{
    let mut index = MessageIndex::new();

    for raw in messages {
        index.stats.total_read += 1;

        let Some(message) = to_message(raw) else {
            index.stats.skipped_missing_id += 1;
            debug!("skipping message #{} without Message-ID", index.stats.total_read);
            continue;
        };

        if message.date_parsed.is_none() {
            index.stats.unparsed_dates += 1;
            if !message.date_raw.is_empty() {
                debug!("unparseable Date '{}' on <{}>", message.date_raw, message.id);
            }
        }

        let id = message.id.clone();
        if let Some(previous) = index.insert(message) {
            index.stats.duplicate_ids += 1;
            if previous.date_parsed.is_none() {
                index.stats.unparsed_dates -= 1;
            }
            warn!("duplicate Message-ID <{}>, keeping the later copy", id);
        }
    }

    index
}
