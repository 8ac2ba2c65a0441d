//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - arguments of the `threadpack` binary
//! - [`CleanArgs`] - arguments of the `mbox_clean` binary
//! - [`OutputFormat`] - `--format` values, convertible to
//!   [`format::OutputFormat`](crate::format::OutputFormat)
//!
//! # Example
//!
//! ```rust
//! use clap::Parser;
//! use threadpack::cli::{Args, OutputFormat};
//!
//! let args = Args::parse_from(["threadpack", "list.mbox", "-f", "csv"]);
//! assert_eq!(args.format, OutputFormat::Csv);
//! assert_eq!(args.output_path(), "threads.csv");
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

/// Output path used when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "threads.json";

/// Output directory used for text output when `-o` is not given.
pub const DEFAULT_TEXT_DIR: &str = "threads/";

/// Reconstruct conversation threads from an mbox archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "threadpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    threadpack list.mbox
    threadpack list.mbox -o threads.jsonl -f jsonl
    threadpack list.mbox -f csv --strict
    threadpack list.mbox -f text -o out/threads/")]
pub struct Args {
    /// Path to the mbox archive
    pub input: String,

    /// Output file (or directory for text output)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Write a bare JSON array of threads without the metadata header
    #[arg(long)]
    pub no_metadata: bool,

    /// Fail on unreadable or oversized messages instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Largest single message to accept, in MiB
    #[arg(long, value_name = "MIB", default_value_t = 32)]
    pub max_message_mb: usize,

    /// Log skipped messages, duplicates and cycles
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Output path with the extension adjusted to the format when the default
    /// was kept.
    pub fn output_path(&self) -> String {
        if self.output != DEFAULT_OUTPUT {
            return self.output.clone();
        }

        match self.format {
            OutputFormat::Text => DEFAULT_TEXT_DIR.to_string(),
            other => {
                let lib_format: crate::format::OutputFormat = other.into();
                format!("threads.{}", lib_format.extension())
            }
        }
    }

    /// Log filter for `env_logger` when `RUST_LOG` is unset.
    /// `--max-message-mb` in bytes, saturating instead of overflowing.
    pub fn max_message_bytes(&self) -> usize {
        self.max_message_mb.saturating_mul(1024 * 1024)
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}

/// Strip non-ASCII bytes from mbox `From ` separator lines.
#[derive(Parser, Debug, Clone)]
#[command(name = "mbox_clean")]
#[command(version, about, long_about = None)]
pub struct CleanArgs {
    /// Archive to clean
    pub input: String,

    /// Where to write the cleaned archive
    pub output: String,
}

/// Output format options.
///
/// - [`Json`](OutputFormat::Json) - one document with metadata (default)
/// - [`Jsonl`](OutputFormat::Jsonl) - one thread per line
/// - [`Csv`](OutputFormat::Csv) - one row per message
/// - [`Text`](OutputFormat::Text) - one indented `.txt` file per thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,

    #[value(alias = "ndjson")]
    Jsonl,

    Csv,

    #[value(alias = "txt")]
    Text,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Text => crate::format::OutputFormat::Text,
        }
    }
}
