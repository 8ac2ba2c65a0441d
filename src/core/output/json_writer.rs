//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};

use chrono::Utc;
use serde::Serialize;

use crate::core::models::{OutputConfig, Thread};
use crate::core::processor::ThreadSet;
use crate::error::Result;

/// Run-level header written above the threads.
#[derive(Serialize)]
struct JsonMetadata<'a> {
    extracted_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source_file: Option<&'a str>,
    total_messages: usize,
    total_threads: usize,
    skipped_messages: usize,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    metadata: JsonMetadata<'a>,
    threads: &'a [Thread],
}

impl<'a> JsonDocument<'a> {
    fn new(set: &'a ThreadSet) -> Self {
        Self {
            metadata: JsonMetadata {
                extracted_at: Utc::now().to_rfc3339(),
                source_file: set.source_file.as_deref(),
                total_messages: set.message_count(),
                total_threads: set.threads.len(),
                skipped_messages: set.stats.skipped_missing_id,
            },
            threads: &set.threads,
        }
    }
}

/// Writes threads to a JSON file.
///
/// # Format
/// ```json
/// {
///   "metadata": {"extracted_at": "...", "total_messages": 3, "total_threads": 1, ...},
///   "threads": [
///     {"thread_id": 1, "root_message_id": "a@x", "subject": "Hello", "messages": [...]}
///   ]
/// }
/// ```
///
/// With `include_metadata` off the document is the bare `threads` array.
pub fn write_json(set: &ThreadSet, output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(set, config)?;
    let mut file = BufWriter::new(File::create(output_path)?);
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}

/// Converts threads to a JSON string.
///
/// Same format as `write_json`, but returns a String instead of writing to file.
pub fn to_json(set: &ThreadSet, config: &OutputConfig) -> Result<String> {
    let json = match (config.include_metadata, config.pretty) {
        (true, true) => serde_json::to_string_pretty(&JsonDocument::new(set))?,
        (true, false) => serde_json::to_string(&JsonDocument::new(set))?,
        (false, true) => serde_json::to_string_pretty(&set.threads)?,
        (false, false) => serde_json::to_string(&set.threads)?,
    };
    Ok(json)
}
