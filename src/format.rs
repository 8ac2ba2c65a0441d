//! Output format types for the threadpack library.
//!
//! These types don't depend on CLI frameworks, so library users can pick a
//! format without pulling in `clap`.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> threadpack::Result<()> {
//! use threadpack::format::{OutputFormat, write_to_format};
//! use threadpack::core::{OutputConfig, reconstruct_threads};
//! use threadpack::RawMessage;
//!
//! let set = reconstruct_threads(vec![RawMessage::new().with_message_id("<1@x>")]);
//!
//! // Write using format enum
//! write_to_format(&set, "threads.csv", OutputFormat::Csv, &OutputConfig::new())?;
//!
//! // Or use format detection from extension
//! let format = OutputFormat::from_path("threads.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::models::OutputConfig;
use crate::core::processor::ThreadSet;
use crate::error::{Result, ThreadpackError};

/// Output format for reconstructed threads.
///
/// - [`Json`](OutputFormat::Json) - One document with metadata and nested threads
/// - [`Jsonl`](OutputFormat::Jsonl) - One thread object per line
/// - [`Csv`](OutputFormat::Csv) - One row per message, semicolon-delimited
/// - [`Text`](OutputFormat::Text) - A directory of indented `.txt` files
///
/// # Example
///
/// ```rust
/// use threadpack::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// JSON document (default)
    #[default]
    Json,

    /// JSON Lines, also known as NDJSON
    Jsonl,

    /// CSV with semicolon delimiter
    Csv,

    /// Indented text, one file per thread
    ///
    /// The output path names a directory rather than a file.
    Text,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// For [`Text`](OutputFormat::Text) this is the extension of each
    /// per-thread file.
    ///
    /// # Example
    ///
    /// ```rust
    /// use threadpack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Csv.extension(), "csv");
    /// assert_eq!(OutputFormat::Json.extension(), "json");
    /// assert_eq!(OutputFormat::Text.extension(), "txt");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["json", "jsonl", "ndjson", "csv", "text", "txt"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Json, OutputFormat::Jsonl, OutputFormat::Csv, OutputFormat::Text]
    }

    /// Returns `true` if the output path is a directory.
    pub fn writes_directory(&self) -> bool {
        matches!(self, OutputFormat::Text)
    }

    /// Detects format from a file path based on extension.
    ///
    /// A path ending in `/` means a text output directory.
    ///
    /// # Example
    ///
    /// ```rust
    /// use threadpack::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out.jsonl").unwrap(), OutputFormat::Jsonl);
    /// assert_eq!(OutputFormat::from_path("threads/").unwrap(), OutputFormat::Text);
    /// ```
    pub fn from_path(path: &str) -> Result<Self> {
        if path.ends_with('/') {
            return Ok(OutputFormat::Text);
        }

        let ext = path.rsplit('.').next().unwrap_or("").to_lowercase();

        match ext.as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            "txt" => Ok(OutputFormat::Text),
            _ => Err(ThreadpackError::invalid_format(
                "output",
                format!("Unknown file extension: '.{}'. Expected one of: json, jsonl, csv, txt", ext),
            )),
        }
    }

    fn required_feature(self) -> Option<&'static str> {
        match self {
            OutputFormat::Json | OutputFormat::Jsonl => Some("json-output"),
            OutputFormat::Csv => Some("csv-output"),
            OutputFormat::Text => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Text => write!(f, "Text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            "csv" => Ok(OutputFormat::Csv),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn missing_feature(format: OutputFormat) -> ThreadpackError {
    ThreadpackError::invalid_format(
        "output",
        format!(
            "Output format {:?} requires the '{}' feature to be enabled",
            format,
            format.required_feature().unwrap_or("default")
        ),
    )
}

/// Writes threads to `path` in the specified format.
///
/// For [`OutputFormat::Text`], `path` is a directory that receives one file
/// per thread.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The file or directory cannot be written
#[allow(unused_variables)]
pub fn write_to_format(set: &ThreadSet, path: &str, format: OutputFormat, config: &OutputConfig) -> Result<()> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(set, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(set, path),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(set, path),
        OutputFormat::Text => crate::core::output::write_text(set, path, config).map(|_| ()),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Converts threads to a string in the specified format.
///
/// [`OutputFormat::Text`] renders every thread into one string, separated
/// by blank lines.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "csv-output")]
/// # fn example() -> threadpack::Result<()> {
/// use threadpack::format::{OutputFormat, to_format_string};
/// use threadpack::core::{OutputConfig, reconstruct_threads};
/// use threadpack::RawMessage;
///
/// let set = reconstruct_threads(vec![RawMessage::new().with_message_id("<1@x>")]);
/// let csv = to_format_string(&set, OutputFormat::Csv, &OutputConfig::new())?;
/// assert!(csv.starts_with("thread_id;depth"));
/// # Ok(())
/// # }
/// ```
#[allow(unused_variables)]
pub fn to_format_string(set: &ThreadSet, format: OutputFormat, config: &OutputConfig) -> Result<String> {
    match format {
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(set, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(set),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(set),
        OutputFormat::Text => Ok(crate::core::output::to_text(set, config)),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_str("CSV").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("txt").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(OutputFormat::Jsonl.to_string(), "JSONL");
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!(OutputFormat::Text.to_string(), "Text");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("out.json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path("out.NDJSON").unwrap(), OutputFormat::Jsonl);
        assert_eq!(OutputFormat::from_path("/tmp/x.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("threads/").unwrap(), OutputFormat::Text);
        let err = OutputFormat::from_path("out.xml").unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_format_default_is_json() {
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
        assert!(OutputFormat::Text.writes_directory());
        assert!(!OutputFormat::Json.writes_directory());
        assert_eq!(OutputFormat::all().len(), 4);
    }

    #[test]
    fn test_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Text).unwrap();
        assert_eq!(json, "\"text\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[test]
    fn test_to_format_string_text() {
        let set = crate::core::reconstruct_threads(vec![crate::RawMessage::new().with_message_id("<1>")]);
        let text = to_format_string(&set, OutputFormat::Text, &OutputConfig::new()).unwrap();
        assert_eq!(text, "Thread started on unknown date:\nNo Subject\n");
    }
}
