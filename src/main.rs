//! # threadpack CLI
//!
//! Command-line interface for the threadpack library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use env_logger::Env;

use threadpack::ThreadpackError;
use threadpack::archive::{MboxReader, RecordIterator};
use threadpack::cli::Args;
use threadpack::config::MboxConfig;
use threadpack::core::{OutputConfig, reconstruct_threads};
use threadpack::format::{OutputFormat, write_to_format};

fn main() {
    let args = <Args as ClapParser>::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level())).init();

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ThreadpackError> {
    let total_start = Instant::now();

    let output_path = args.output_path();
    let lib_format: OutputFormat = args.format.into();

    // Print header
    println!("📦 threadpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", lib_format);
    if args.strict {
        println!("🛑 Mode:    Strict");
    }
    println!();

    // Step 1: Read the archive
    let mbox_config = MboxConfig::new()
        .with_skip_invalid(!args.strict)
        .with_max_message_size(args.max_message_bytes());

    println!("⏳ Reading mbox...");
    let read_start = Instant::now();
    let mut reader = MboxReader::open(&args.input, mbox_config)?;
    let records = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
    println!(
        "   Found {} messages, {:.1} MB ({:.2}s)",
        records.len(),
        reader.bytes_processed() as f64 / (1024.0 * 1024.0),
        read_start.elapsed().as_secs_f64()
    );

    // Step 2: Thread
    println!("🧵 Reconstructing threads...");
    let thread_start = Instant::now();
    let set = reconstruct_threads(records).with_source(args.input.clone());
    let stats = set.stats;
    println!(
        "   {} threads from {} messages ({:.2}s)",
        stats.threads,
        stats.indexed,
        thread_start.elapsed().as_secs_f64()
    );

    // Step 3: Write output in selected format
    let mut output_config = OutputConfig::new();
    if args.compact {
        output_config = output_config.compact();
    }
    if args.no_metadata {
        output_config = output_config.without_metadata();
    }

    println!("💾 Writing {}...", lib_format);
    let write_start = Instant::now();
    write_to_format(&set, &output_path, lib_format, &output_config)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    let total_time = total_start.elapsed();

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Messages:  {}", stats.total_read);
    println!("   Threaded:  {}", stats.indexed);
    if stats.skipped_missing_id > 0 {
        println!("   Skipped:   {} (no Message-ID)", stats.skipped_missing_id);
    }
    if stats.duplicate_ids > 0 {
        println!("   Duplicates: {}", stats.duplicate_ids);
    }
    if stats.cycles_broken > 0 {
        println!("   Cycles:    {}", stats.cycles_broken);
    }
    println!("   Threads:   {}", stats.threads);
    println!("   Avg size:  {:.1} messages", stats.average_thread_size());
    println!("   Replies:   {:.1}%", stats.reply_ratio());

    // Performance stats
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = stats.total_read as f64 / total_time.as_secs_f64();
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}
