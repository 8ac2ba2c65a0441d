//! Header normalization.
//!
//! Turns raw header text into the canonical values threading works with:
//! identifiers without their angle brackets, the ordered list of
//! `References`, a resolved parent, a parsed date and a display subject.
//!
//! # Identifier forms
//!
//! Real archives contain both `<id@host>` and bare `id@host`. Both normalize
//! to `id@host`:
//!
//! ```
//! use threadpack::core::headers::normalize_id;
//!
//! assert_eq!(normalize_id(Some("<abc@example.org>")), Some("abc@example.org".into()));
//! assert_eq!(normalize_id(Some("  abc@example.org ")), Some("abc@example.org".into()));
//! assert_eq!(normalize_id(Some("   ")), None);
//! assert_eq!(normalize_id(None), None);
//! ```
//!
//! # Parent resolution
//!
//! `In-Reply-To` wins. Without it, the last `References` entry is the most
//! recent ancestor:
//!
//! ```
//! use threadpack::core::headers::resolve_parent;
//!
//! assert_eq!(resolve_parent(Some("<2>"), Some("<0> <1>")), Some("2".into()));
//! assert_eq!(resolve_parent(None, Some("<0> <1>")), Some("1".into()));
//! assert_eq!(resolve_parent(Some(""), None), None);
//! ```

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use regex::Regex;

/// Placeholder used when a subject is empty after normalization.
pub const NO_SUBJECT: &str = "No Subject";

static BRACKETED_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([^>]+)>").expect("bracketed id pattern is valid"));

static REPLY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:re|fwd|fw|aw):\s*").expect("reply prefix pattern is valid")
});

static TRAILING_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)\s*$").expect("comment pattern is valid"));

/// A day number followed by an English month name, as in `1 Jan 2025`.
static LOOSE_DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d{1,2}\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{2,4}\b")
        .expect("loose date pattern is valid")
});

/// Naive layouts read as UTC when no zone is given.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

/// Extracts a canonical identifier from a `Message-ID` or `In-Reply-To` value.
///
/// Returns the content of the first `<...>` token when there is one, else the
/// trimmed text with stray brackets removed. Blank input yields `None`.
pub fn normalize_id(raw: Option<&str>) -> Option<String> {
    let raw = raw?;

    let candidate = match BRACKETED_ID.captures(raw) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).trim(),
        None => raw.trim().trim_matches(&['<', '>'][..]).trim(),
    };

    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}

/// Returns every `<...>`-delimited identifier in a `References` value, left to right.
///
/// Bare words between tokens are ignored.
pub fn extract_references(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    BRACKETED_ID
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Picks the parent identifier a message claims.
///
/// Prefers the normalized `In-Reply-To`; falls back to the last `References`
/// entry. Whether the parent is actually indexed is the graph builder's call.
pub fn resolve_parent(in_reply_to: Option<&str>, references: Option<&str>) -> Option<String> {
    normalize_id(in_reply_to).or_else(|| extract_references(references).pop())
}

/// Parses a `Date` header, keeping the sender's UTC offset.
///
/// Tried in order:
/// 1. RFC 2822 (`Wed, 01 Jan 2025 10:00:00 +0100`), after dropping a trailing
///    `(CET)`-style comment
/// 2. RFC 3339 (`2025-01-01T10:00:00+01:00`)
/// 3. `YYYY-MM-DD HH:MM:SS` and friends, read as UTC
/// 4. `YYYY-MM-DD`, read as midnight UTC
/// 5. `mailparse`'s lenient parser, read as UTC
///
/// Anything else is `None`. A bad date never drops the message.
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let uncommented = TRAILING_COMMENT.replace(trimmed, "");
    let value = uncommented.trim();

    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return Some(naive.and_utc().fixed_offset());
    }

    // dateparse is lenient enough to accept text with no date in it
    if !LOOSE_DATE_SHAPE.is_match(value) {
        return None;
    }
    mailparse::dateparse(value)
        .ok()
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.fixed_offset())
}

/// Produces the display subject of a thread.
///
/// Collapses whitespace runs to one space, then strips leading `Re:`, `Fwd:`,
/// `Fw:` and `AW:` markers (any case, repeated) until none remain. An empty
/// result becomes [`NO_SUBJECT`]. Applying it twice changes nothing.
///
/// ```
/// use threadpack::core::headers::normalize_subject;
///
/// assert_eq!(normalize_subject("Re: RE: Fwd:  Meeting\tnotes "), "Meeting notes");
/// assert_eq!(normalize_subject("AW: Termin"), "Termin");
/// assert_eq!(normalize_subject("Re:"), "No Subject");
/// ```
pub fn normalize_subject(raw: &str) -> String {
    let mut subject = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    loop {
        let stripped = REPLY_PREFIX.replace(&subject, "");
        if stripped.len() == subject.len() {
            break;
        }
        subject = stripped.into_owned();
    }

    if subject.is_empty() {
        NO_SUBJECT.to_string()
    } else {
        subject
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_normalize_id_forms() {
        assert_eq!(normalize_id(Some("<a@b>")), Some("a@b".into()));
        assert_eq!(normalize_id(Some("a@b")), Some("a@b".into()));
        assert_eq!(normalize_id(Some("  <a@b>  ")), Some("a@b".into()));
        assert_eq!(normalize_id(Some("Alice's message <a@b>")), Some("a@b".into()));
        assert_eq!(normalize_id(Some("<>")), None);
        assert_eq!(normalize_id(Some("")), None);
        assert_eq!(normalize_id(None), None);
    }

    #[test]
    fn test_normalize_id_takes_first_token() {
        assert_eq!(normalize_id(Some("<1@x> <2@x>")), Some("1@x".into()));
    }

    #[test]
    fn test_extract_references_order() {
        let refs = extract_references(Some("<1@x>\n <2@x>\t<3@x>"));
        assert_eq!(refs, vec!["1@x", "2@x", "3@x"]);
    }

    #[test]
    fn test_extract_references_ignores_bare_words() {
        assert!(extract_references(Some("1@x 2@x")).is_empty());
        assert_eq!(extract_references(Some("junk <1@x> junk")), vec!["1@x"]);
        assert!(extract_references(None).is_empty());
        assert!(extract_references(Some("")).is_empty());
    }

    #[test]
    fn test_resolve_parent_prefers_in_reply_to() {
        assert_eq!(resolve_parent(Some("<p>"), Some("<a> <b>")), Some("p".into()));
    }

    #[test]
    fn test_resolve_parent_falls_back_to_last_reference() {
        assert_eq!(resolve_parent(None, Some("<a> <b>")), Some("b".into()));
        assert_eq!(resolve_parent(Some("  "), Some("<a> <b>")), Some("b".into()));
    }

    #[test]
    fn test_resolve_parent_none() {
        assert_eq!(resolve_parent(None, None), None);
        assert_eq!(resolve_parent(Some(""), Some("no tokens here")), None);
    }

    #[test]
    fn test_parse_date_rfc2822() {
        let dt = parse_date("Wed, 1 Jan 2025 10:00:00 +0100").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 3600);
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_with_comment() {
        let dt = parse_date("Tue, 1 Jul 2003 10:52:37 +0200 (CEST)").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2003, 7, 1, 8, 52, 37).unwrap());
    }

    #[test]
    fn test_parse_date_iso_forms() {
        let midnight = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(parse_date("2025-01-02").unwrap(), midnight);
        assert_eq!(parse_date("2025-01-02 00:00:00").unwrap(), midnight);
        assert_eq!(parse_date("2025-01-02T01:00:00+01:00").unwrap(), midnight);
    }

    #[test]
    fn test_parse_date_without_zone_is_utc() {
        let dt = parse_date("Wed, 1 Jan 2025 10:00:00").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_lenient_fallback() {
        // chrono rejects both of these; only the lenient parser accepts them
        let expected = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        assert!(DateTime::parse_from_rfc2822("Wed, 1 January 2025 10:00:00 +0000").is_err());
        assert_eq!(parse_date("Wed, 1 January 2025 10:00:00 +0000").unwrap(), expected);
        assert!(DateTime::parse_from_rfc2822("Wed, 1 Jan 2025 10:00:00 +0000 garbage").is_err());
        assert_eq!(parse_date("Wed, 1 Jan 2025 10:00:00 +0000 garbage").unwrap(), expected);
    }

    #[test]
    fn test_parse_date_lenient_fallback_is_utc() {
        let dt = parse_date("Wed, 1 January 2025 10:00:00 +0200").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 0);
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_date_shape_gate_rejects_dateless_text() {
        // No "day month year" run, so the lenient parser is never consulted
        assert!(!LOOSE_DATE_SHAPE.is_match("Meeting at 10:00 on Wednesday"));
        assert!(parse_date("Meeting at 10:00 on Wednesday").is_none());
        assert!(parse_date("12 monkeys, 2025 edition").is_none());
        assert!(LOOSE_DATE_SHAPE.is_match("1 January 2025"));
    }

    #[test]
    fn test_parse_date_failure() {
        assert!(parse_date("").is_none());
        assert!(parse_date("   ").is_none());
        assert!(parse_date("definitely not a date").is_none());
    }

    #[test]
    fn test_normalize_subject_prefixes() {
        assert_eq!(normalize_subject("Re: Hello"), "Hello");
        assert_eq!(normalize_subject("RE: Hello"), "Hello");
        assert_eq!(normalize_subject("fwd: Hello"), "Hello");
        assert_eq!(normalize_subject("Fw: Hello"), "Hello");
        assert_eq!(normalize_subject("Aw: Hello"), "Hello");
        assert_eq!(normalize_subject("Re: Re: Re: Hello"), "Hello");
    }

    #[test]
    fn test_normalize_subject_keeps_inner_markers() {
        assert_eq!(normalize_subject("Hello Re: world"), "Hello Re: world");
        assert_eq!(normalize_subject("Regarding: budget"), "Regarding: budget");
    }

    #[test]
    fn test_normalize_subject_whitespace() {
        assert_eq!(normalize_subject("  lots   of\n\tspace  "), "lots of space");
    }

    #[test]
    fn test_normalize_subject_empty() {
        assert_eq!(normalize_subject(""), NO_SUBJECT);
        assert_eq!(normalize_subject("   "), NO_SUBJECT);
        assert_eq!(normalize_subject("Re:  "), NO_SUBJECT);
    }

    #[test]
    fn test_normalize_subject_idempotent() {
        for raw in ["Re: Fwd:  x", "  y ", "", "Re:Re:z", "AW: re: Fw: w  v"] {
            let once = normalize_subject(raw);
            assert_eq!(normalize_subject(&once), once);
        }
    }
}
