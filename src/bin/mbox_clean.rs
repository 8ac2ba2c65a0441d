//! Strips non-ASCII bytes from mbox `From ` separator lines.
//!
//! Usage: mbox_clean <input> <output>

use std::process;

use clap::Parser as ClapParser;
use env_logger::Env;

use threadpack::archive::clean_mbox_file;
use threadpack::cli::CleanArgs;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = <CleanArgs as ClapParser>::parse();

    match clean_mbox_file(&args.input, &args.output) {
        Ok(stats) => {
            println!("🧹 Cleaned {} of {} lines ({} bytes removed)", stats.lines_cleaned, stats.lines, stats.bytes_removed);
            println!("✅ Done! Cleaned mbox written to {}", args.output);
        }
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}
