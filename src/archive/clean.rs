//! Separator-line cleanup.
//!
//! Some list archivers write sender names with raw 8-bit bytes into the
//! `From ` separator lines, which trips up strict mbox readers. Cleaning
//! removes every non-ASCII byte from those lines and copies all other lines
//! untouched.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Counters from one cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub lines: usize,
    /// Separator lines that contained at least one non-ASCII byte.
    pub lines_cleaned: usize,
    pub bytes_removed: usize,
}

/// Copies an mbox stream, stripping non-ASCII bytes from `From ` lines.
pub fn clean_from_lines<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> Result<CleanStats> {
    let mut stats = CleanStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        stats.lines += 1;

        if line.starts_with(b"From ") && !line.is_ascii() {
            let before = line.len();
            line.retain(u8::is_ascii);
            stats.lines_cleaned += 1;
            stats.bytes_removed += before - line.len();
        }

        writer.write_all(&line)?;
    }

    writer.flush()?;
    Ok(stats)
}

/// Cleans `input` into a new file at `output`.
pub fn clean_mbox_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<CleanStats> {
    let reader = BufReader::new(File::open(input)?);
    let writer = BufWriter::new(File::create(output)?);
    clean_from_lines(reader, writer)
}
