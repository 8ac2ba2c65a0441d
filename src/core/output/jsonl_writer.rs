//! JSON Lines (JSONL) output writer.
//!
//! One thread per line, no metadata header. Handy for feeding threads one at
//! a time into indexing or RAG pipelines.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::core::processor::ThreadSet;
use crate::error::Result;

/// Writes threads to JSONL (JSON Lines) format.
///
/// Each line is a complete thread object:
/// ```jsonl
/// {"thread_id":1,"root_message_id":"a@x","subject":"Hello",...}
/// {"thread_id":2,"root_message_id":"c@x","subject":"Other",...}
/// ```
pub fn write_jsonl(set: &ThreadSet, output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for thread in &set.threads {
        serde_json::to_writer(&mut writer, thread)?;
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts threads to a JSONL string.
pub fn to_jsonl(set: &ThreadSet) -> Result<String> {
    let mut output = String::new();

    for thread in &set.threads {
        output.push_str(&serde_json::to_string(thread)?);
        output.push('\n');
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::processor::reconstruct_threads;
    use crate::message::RawMessage;
    use tempfile::NamedTempFile;

    fn sample() -> ThreadSet {
        reconstruct_threads(vec![
            RawMessage::new().with_message_id("<a>").with_date("2025-01-01"),
            RawMessage::new().with_message_id("<b>").with_date("2025-01-02"),
            RawMessage::new().with_message_id("<c>").with_in_reply_to("<b>"),
        ])
    }

    #[test]
    fn test_to_jsonl_one_thread_per_line() {
        let jsonl = to_jsonl(&sample()).unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["thread_id"], 2);
        assert_eq!(second["message_count"], 2);
    }

    #[test]
    fn test_to_jsonl_empty() {
        assert!(to_jsonl(&ThreadSet::default()).unwrap().is_empty());
    }

    #[test]
    fn test_write_jsonl() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_jsonl(&sample(), path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, to_jsonl(&sample()).unwrap());
    }
}
