//! End-to-end CLI tests for threadpack.
//!
//! These tests run the actual binaries against temporary mbox archives and
//! check what lands on disk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const LIST: &str = "\
From a@example.org Wed Jan  1 10:00:00 2025
Message-ID: <A@example.org>
Subject: Weekly sync
From: Alice <a@example.org>
Date: Wed, 1 Jan 2025 10:00:00 +0000

Agenda.

From b@example.org Thu Jan  2 10:00:00 2025
Message-ID: <B@example.org>
Subject: Re: Weekly sync
From: Bob <b@example.org>
Date: Thu, 2 Jan 2025 10:00:00 +0000
In-Reply-To: <A@example.org>

Ok.

From z@example.org Fri Jan  3 10:00:00 2025
Subject: Who am I
From: Nobody <z@example.org>

Lost.
";

/// Creates a temporary directory with test archives.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    fs::write(dir.path().join("list.mbox"), LIST).unwrap();
    fs::write(dir.path().join("empty.mbox"), "").unwrap();
    fs::write(
        dir.path().join("dirty.mbox"),
        "From j\u{f6}rg@example.org Mon Jan  6 09:00:00 2025\nMessage-ID: <j@x>\n\nK\u{e4}se\n",
    )
    .unwrap();

    dir
}

fn threadpack_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_threadpack"));
    Command::from_std(cmd)
}

fn mbox_clean_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_mbox_clean"));
    Command::from_std(cmd)
}

fn input_path(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_string_lossy().into_owned()
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Basic functionality
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_json_default() {
        let dir = setup_fixtures();
        let output = output_path(&dir, "out.json");

        threadpack_cmd()
            .arg(input_path(&dir, "list.mbox"))
            .args(["-o", output.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done!"))
            .stdout(predicate::str::contains("Skipped:   1"));

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["metadata"]["total_threads"], 1);
        assert_eq!(value["metadata"]["total_messages"], 2);
        assert_eq!(value["threads"][0]["subject"], "Weekly sync");
        assert_eq!(value["threads"][0]["messages"][1]["depth"], 1);
    }

    #[test]
    fn test_default_output_name_follows_format() {
        let dir = setup_fixtures();

        threadpack_cmd()
            .current_dir(dir.path())
            .args(["list.mbox", "-f", "jsonl"])
            .assert()
            .success();

        assert!(dir.path().join("threads.jsonl").exists());
        assert!(!dir.path().join("threads.json").exists());
    }

    #[test]
    fn test_empty_archive() {
        let dir = setup_fixtures();
        let output = output_path(&dir, "out.json");

        threadpack_cmd()
            .arg(input_path(&dir, "empty.mbox"))
            .args(["-o", output.to_str().unwrap()])
            .assert()
            .success();

        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["metadata"]["total_threads"], 0);
        assert_eq!(value["threads"], serde_json::json!([]));
    }
}

// ============================================================================
// Output formats
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_csv() {
        let dir = setup_fixtures();
        let output = output_path(&dir, "out.csv");

        threadpack_cmd()
            .arg(input_path(&dir, "list.mbox"))
            .args(["-o", output.to_str().unwrap(), "-f", "csv"])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("thread_id;depth;message_id;date;from;subject"));
        assert!(content.contains("1;1;B@example.org;"));
    }

    #[test]
    fn test_jsonl() {
        let dir = setup_fixtures();
        let output = output_path(&dir, "out.jsonl");

        threadpack_cmd()
            .arg(input_path(&dir, "list.mbox"))
            .args(["-o", output.to_str().unwrap(), "-f", "jsonl"])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_text_directory() {
        let dir = setup_fixtures();
        let output = output_path(&dir, "threads");

        threadpack_cmd()
            .arg(input_path(&dir, "list.mbox"))
            .args(["-o", output.to_str().unwrap(), "-f", "text"])
            .assert()
            .success();

        let file = output.join("001_Weekly_sync.txt");
        let content = fs::read_to_string(file).unwrap();
        assert_eq!(
            content,
            "Thread started on 2025-01-01 10:00:00+00:00:\nWeekly sync\n  Re: Weekly sync\n"
        );
    }

    #[test]
    fn test_compact_without_metadata() {
        let dir = setup_fixtures();
        let output = output_path(&dir, "out.json");

        threadpack_cmd()
            .arg(input_path(&dir, "list.mbox"))
            .args([
                "-o",
                output.to_str().unwrap(),
                "--compact",
                "--no-metadata",
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("[{"));
        assert_eq!(content.trim_end().lines().count(), 1);
    }
}

// ============================================================================
// Error handling
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_input() {
        let dir = setup_fixtures();
        threadpack_cmd()
            .arg(input_path(&dir, "nope.mbox"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_no_arguments() {
        threadpack_cmd().assert().failure();
    }

    #[test]
    fn test_unknown_format() {
        let dir = setup_fixtures();
        threadpack_cmd()
            .arg(input_path(&dir, "list.mbox"))
            .args(["-f", "xml"])
            .assert()
            .failure();
    }

    #[test]
    fn test_strict_rejects_oversized_message() {
        let dir = setup_fixtures();
        let big = format!("From a\nMessage-ID: <big@x>\n\n{}\n", "x".repeat(2 * 1024 * 1024));
        fs::write(dir.path().join("big.mbox"), big).unwrap();

        threadpack_cmd()
            .arg(input_path(&dir, "big.mbox"))
            .args([
                "-o",
                output_path(&dir, "out.json").to_str().unwrap(),
                "--strict",
                "--max-message-mb",
                "1",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("too large"));
    }
}

// ============================================================================
// mbox_clean
// ============================================================================

mod mbox_clean {
    use super::*;

    #[test]
    fn test_clean_strips_separator_bytes() {
        let dir = setup_fixtures();
        let output = output_path(&dir, "clean.mbox");

        mbox_clean_cmd()
            .arg(input_path(&dir, "dirty.mbox"))
            .args([output.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done!"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("From jrg@example.org"));
        assert!(content.contains("K\u{e4}se"));
    }
}

// ============================================================================
// Help and version
// ============================================================================

mod help_and_version {
    use super::*;

    #[test]
    fn test_help() {
        threadpack_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("mbox"));
    }

    #[test]
    fn test_version() {
        threadpack_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
