//! Streaming mbox reader.
//!
//! An mbox file is a concatenation of RFC 5322 messages, each introduced by a
//! separator line starting with `From ` (`From alice@example.org Wed Jan  1
//! 10:00:00 2025`). The reader splits on those lines and hands each message's
//! header block to `mailparse`. Bodies are never decoded.
//!
//! Memory use is bounded by the largest single message, not by the archive.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::mem;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use mailparse::{MailHeaderMap, parse_headers};

use super::RecordIterator;
use crate::config::MboxConfig;
use crate::error::{Result, ThreadpackError};
use crate::message::RawMessage;

const SEPARATOR: &[u8] = b"From ";

/// Iterator over the header records of an mbox archive.
///
/// # Example
///
/// ```rust,no_run
/// use threadpack::archive::{MboxReader, RecordIterator};
/// use threadpack::config::MboxConfig;
///
/// let mut reader = MboxReader::open("list.mbox", MboxConfig::default())?;
///
/// for record in reader.by_ref() {
///     let raw = record?;
///     println!("{:?}", raw.subject());
/// }
/// println!("read {} bytes", reader.bytes_processed());
/// # Ok::<(), threadpack::ThreadpackError>(())
/// ```
pub struct MboxReader<R: BufRead> {
    reader: R,
    path: Option<PathBuf>,
    total_bytes: Option<u64>,
    bytes_read: u64,
    config: MboxConfig,
    line: Vec<u8>,
    pending: Vec<u8>,
    /// Size of the current message once it has exceeded the limit.
    oversized: Option<usize>,
    finished: bool,
}

impl MboxReader<BufReader<File>> {
    /// Opens an archive on disk.
    pub fn open(path: impl AsRef<Path>, config: MboxConfig) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        let reader = BufReader::with_capacity(config.buffer_size, file);
        let mut mbox = Self::from_reader(reader, Some(file_size), config);
        mbox.path = Some(path.to_path_buf());
        Ok(mbox)
    }
}

impl<R: BufRead> MboxReader<R> {
    /// Wraps any buffered reader. `total_bytes` enables [`progress`](RecordIterator::progress).
    pub fn from_reader(reader: R, total_bytes: Option<u64>, config: MboxConfig) -> Self {
        Self {
            reader,
            path: None,
            total_bytes,
            bytes_read: 0,
            config,
            line: Vec::new(),
            pending: Vec::new(),
            oversized: None,
            finished: false,
        }
    }

    /// Reads raw bytes up to the next separator.
    ///
    /// Returns `Ok(None)` at end of input. Text before the first separator
    /// counts as a message only if it is not blank.
    fn next_block(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            self.line.clear();
            let bytes = self.reader.read_until(b'\n', &mut self.line)?;

            if bytes == 0 {
                self.finished = true;
                return self.take_block();
            }
            self.bytes_read += bytes as u64;

            if self.line.starts_with(SEPARATOR) {
                if let Some(block) = self.take_block()? {
                    return Ok(Some(block));
                }
                continue;
            }

            if let Some(size) = self.oversized.as_mut() {
                *size += bytes;
                continue;
            }

            self.pending.extend_from_slice(&self.line);
            if self.pending.len() > self.config.max_message_size {
                self.oversized = Some(self.pending.len());
                self.pending = Vec::new();
            }
        }
    }

    /// Hands out the message collected so far, if any.
    fn take_block(&mut self) -> Result<Option<Vec<u8>>> {
        if let Some(actual_size) = self.oversized.take() {
            return Err(ThreadpackError::buffer_overflow(self.config.max_message_size, actual_size));
        }

        let block = mem::take(&mut self.pending);
        if block.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(block))
    }

    fn parse_block(&self, block: &[u8]) -> Result<RawMessage> {
        let (headers, _body_offset) =
            parse_headers(block).map_err(|e| ThreadpackError::mbox_parse(e, self.path.clone()))?;

        Ok(RawMessage {
            message_id: headers.get_first_value("Message-ID"),
            subject: headers.get_first_value("Subject"),
            from: headers.get_first_value("From"),
            date: headers.get_first_value("Date"),
            in_reply_to: headers.get_first_value("In-Reply-To"),
            references: headers.get_first_value("References"),
        })
    }
}

impl<R: BufRead> RecordIterator for MboxReader<R> {
    fn progress(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) | None => None,
            Some(total) => Some((self.bytes_read as f64 / total as f64) * 100.0),
        }
    }

    fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}

impl<R: BufRead> Iterator for MboxReader<R> {
    type Item = Result<RawMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            let block = match self.next_block() {
                Ok(Some(block)) => block,
                Ok(None) => return None,
                Err(e) if e.is_io() => {
                    self.finished = true;
                    return Some(Err(e));
                }
                Err(e) if self.config.skip_invalid => {
                    warn!("skipping message: {}", e);
                    continue;
                }
                Err(e) => return Some(Err(e)),
            };

            match self.parse_block(&block) {
                Ok(raw) => return Some(Ok(raw)),
                Err(e) if self.config.skip_invalid => {
                    debug!("skipping message with unreadable headers: {}", e);
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Reads every header record of an archive into memory.
pub fn read_mbox(path: impl AsRef<Path>, config: MboxConfig) -> Result<Vec<RawMessage>> {
    MboxReader::open(path, config)?.collect()
}
