//! Indented plain-text output, one file per thread.
//!
//! ```text
//! Thread started on 2025-01-01 10:00:00+01:00:
//! Weekly sync
//!   Re: Weekly sync
//!     Re: Re: Weekly sync
//!   Re: Weekly sync
//! ```
//!
//! Lines show the subject as written, indented by depth. Files are named
//! `{thread_id:03}_{safe_subject}.txt` so a directory listing follows thread
//! order.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::core::headers::NO_SUBJECT;
use crate::core::models::{OutputConfig, Thread};
use crate::core::processor::ThreadSet;
use crate::error::Result;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("filename pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Byte budget for the subject part of a file name. Most filesystems cap a
/// name at 255 bytes.
const MAX_SUBJECT_BYTES: usize = 200;

fn display_subject(subject: &str) -> &str {
    if subject.is_empty() { NO_SUBJECT } else { subject }
}

/// Renders one thread as indented text.
pub fn render_thread_text(thread: &Thread, config: &OutputConfig) -> String {
    let mut out = match thread.start_date {
        Some(date) => format!("Thread started on {}:\n", date.format("%Y-%m-%d %H:%M:%S%:z")),
        None => "Thread started on unknown date:\n".to_string(),
    };

    for entry in &thread.messages {
        out.push_str(&config.indent.repeat(entry.depth));
        out.push_str(display_subject(&entry.subject));
        out.push('\n');
    }

    out
}

/// File name for a thread: zero-padded id plus a filesystem-safe subject.
///
/// Punctuation is dropped and every whitespace run becomes one underscore.
/// Letters outside ASCII are kept. Long subjects are cut on a character
/// boundary; the id prefix keeps truncated names distinct.
pub fn thread_filename(thread: &Thread) -> String {
    let subject = display_subject(&thread.subject_raw);
    let cleaned = UNSAFE_FILENAME_CHARS.replace_all(subject, "");
    let safe = WHITESPACE_RUN.replace_all(cleaned.trim(), "_");

    let mut end = safe.len().min(MAX_SUBJECT_BYTES);
    while !safe.is_char_boundary(end) {
        end -= 1;
    }
    let safe = safe[..end].trim_end_matches('_');

    if safe.is_empty() {
        format!("{:03}_No_Subject.txt", thread.thread_id)
    } else {
        format!("{:03}_{}.txt", thread.thread_id, safe)
    }
}

/// Writes every thread to its own file under `output_dir`.
///
/// Creates the directory if needed and returns the written paths in thread
/// order.
pub fn write_text(set: &ThreadSet, output_dir: impl AsRef<Path>, config: &OutputConfig) -> Result<Vec<PathBuf>> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(set.threads.len());
    for thread in &set.threads {
        let path = output_dir.join(thread_filename(thread));
        let mut writer = BufWriter::new(File::create(&path)?);
        writer.write_all(render_thread_text(thread, config).as_bytes())?;
        writer.flush()?;
        debug!("wrote thread {} to {}", thread.thread_id, path.display());
        written.push(path);
    }

    Ok(written)
}

/// Renders every thread into one string, separated by blank lines.
pub fn to_text(set: &ThreadSet, config: &OutputConfig) -> String {
    set.threads
        .iter()
        .map(|t| render_thread_text(t, config))
        .collect::<Vec<_>>()
        .join("\n")
}
