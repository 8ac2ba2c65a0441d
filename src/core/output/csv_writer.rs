//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::core::processor::ThreadSet;
use crate::error::Result;

const HEADER: [&str; 6] = ["thread_id", "depth", "message_id", "date", "from", "subject"];

/// Writes threads to CSV with semicolon delimiter, one row per message.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `thread_id`, `depth`, `message_id`, `date`, `from`, `subject`
/// - Rows follow thread order, then walk order inside each thread
/// - `date` is the header text as written
/// - Encoding: UTF-8
pub fn write_csv(set: &ThreadSet, output_path: &str) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(set, file)
}

/// Converts threads to a CSV string.
pub fn to_csv(set: &ThreadSet) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(set, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(set: &ThreadSet, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(HEADER)?;

    for thread in &set.threads {
        let thread_id = thread.thread_id.to_string();
        for entry in &thread.messages {
            let depth = entry.depth.to_string();
            writer.write_record([
                thread_id.as_str(),
                depth.as_str(),
                entry.message_id.as_str(),
                entry.date.as_str(),
                entry.from.as_str(),
                entry.subject.as_str(),
            ])?;
        }
    }

    writer.flush()?;
    Ok(())
}
