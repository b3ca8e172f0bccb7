//! Check that every reachable position survives an encode/decode round trip.
//!
//! Tic-tac-toe is walked in full (5478 positions). Reversi is walked to a
//! fixed depth, since its full tree is far too large.

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use duel_core::{Game, Reversi, TicTacToe, Verification, Verifier};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

const TICTACTOE_STATES: usize = 5478;
const TICTACTOE_TERMINAL: usize = 958;

#[derive(Debug, Parser)]
#[command(about)]
struct Args {
    /// Plies of Reversi to walk from the opening
    #[arg(short, long, default_value_t = 6)]
    depth: usize,
}

fn run<G: Game>(name: &str, verifier: Verifier, root: G) -> Result<Verification> {
    info!("verifying {name} with {verifier:?}");
    let start = Instant::now();
    let report = verifier
        .verify(root)
        .with_context(|| format!("{name} round trip failed"))?;

    println!(
        "{name}: {} positions, {} terminal, max depth {} ({:.2}s)",
        report.states,
        report.terminal,
        report.max_depth,
        start.elapsed().as_secs_f64()
    );
    Ok(report)
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
        .context("failed to initialize logging")?;

    let report = run("tic-tac-toe", Verifier::exhaustive(), TicTacToe::new())?;
    if report.states != TICTACTOE_STATES || report.terminal != TICTACTOE_TERMINAL {
        bail!(
            "tic-tac-toe: expected {TICTACTOE_STATES}/{TICTACTOE_TERMINAL} positions, found {}/{}",
            report.states,
            report.terminal
        );
    }

    run("reversi", Verifier::to_depth(args.depth), Reversi::new())?;

    println!("All encodings round-trip.");
    Ok(())
}
