//! Count Reversi move sequences from the opening (no transposition merging).
//!
//! A sequence that ends early, because the game is over, counts once.
//! Forced passes count as plies.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use duel_core::{count_paths, Reversi};
use log::{warn, LevelFilter};
use simple_logger::SimpleLogger;

#[derive(Debug, Parser)]
#[command(about)]
struct Args {
    /// Deepest ply to count
    #[arg(short, long, default_value_t = 8)]
    depth: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
        .context("failed to initialize logging")?;

    // Finish the current depth, then stop
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping after this depth...");
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl-C handler")?;

    println!("Reversi 6x6 Tree Count");
    println!("======================");

    let start = Instant::now();
    let opening = Reversi::new();
    for depth in 1..=args.depth {
        if !running.load(Ordering::SeqCst) {
            warn!("interrupted before depth {depth}");
            break;
        }
        let level = Instant::now();
        let paths = count_paths(&opening, depth);
        println!(
            "depth {:>2}: {:>16} ({:.2}s)",
            depth,
            paths,
            level.elapsed().as_secs_f64()
        );
    }

    println!("Total time: {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
