//! Duel Trainer
//!
//! Learns move weights for tic-tac-toe or 6x6 Reversi by self-play, against
//! a random opponent, or against a person at the terminal.

mod checkpoint;
mod config;
mod error;
mod player;
mod policy;
mod session;
mod stats;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use duel_core::{Color, Game, Reversi, TicTacToe, Verdict};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;

use crate::config::TrainConfig;
use crate::player::{HumanPlayer, Player, RandomPlayer, WeightedPlayer};
use crate::policy::PolicyTable;
use crate::stats::TrainingStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameKind {
    Tictactoe,
    Reversi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Weighted player against itself
    SelfPlay,
    /// Weighted player (X) against a random player (O)
    VsRandom,
    /// You (X) against the weighted player (O)
    Human,
}

#[derive(Debug, Parser)]
#[command(author, about, version)]
struct Args {
    /// Game to play
    #[arg(long, value_enum, default_value_t = GameKind::Tictactoe)]
    game: GameKind,

    /// Who plays whom
    #[arg(short, long, value_enum, default_value_t = Mode::SelfPlay)]
    mode: Mode,

    /// Number of games (default from config; one game in human mode)
    #[arg(short = 'n', long)]
    games: Option<usize>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Weights file to load and save
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// Seed for the players
    #[arg(long)]
    seed: Option<u64>,

    /// Show a progress bar
    #[arg(short, long)]
    progress: bool,

    /// Write run statistics as JSON
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
        .context("failed to initialize logging")?;

    let mut config = match &args.config {
        Some(path) => TrainConfig::load_or_default(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TrainConfig::default(),
    };
    if let Some(games) = args.games {
        config.games = games;
    } else if args.mode == Mode::Human {
        config.games = 1;
    }
    if let Some(weights) = &args.weights {
        config.weights = weights.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let mut table = checkpoint::load_or_empty(&config.weights)
        .with_context(|| format!("failed to load weights {}", config.weights.display()))?;
    info!("loaded {} positions from {}", table.len(), config.weights.display());

    // Stop after the current game on SIGINT
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, finishing the current game...");
        r.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl-C handler")?;

    let outcome = match args.game {
        GameKind::Tictactoe => train(
            TicTacToe::new(),
            args.mode,
            args.progress,
            &config,
            &mut table,
            &running,
        ),
        GameKind::Reversi => train(
            Reversi::new(),
            args.mode,
            args.progress,
            &config,
            &mut table,
            &running,
        ),
    };

    // Weights are saved even when a game failed part way.
    let saved = checkpoint::save(&config.weights, &table)
        .with_context(|| format!("failed to save weights {}", config.weights.display()))?;
    info!("saved {} positions to {}", saved, config.weights.display());

    let stats = outcome?;
    println!();
    stats.print_summary();

    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(file, &stats)?;
    }
    Ok(())
}

fn train<G: Game + 'static>(
    start: G,
    mode: Mode,
    progress: bool,
    config: &TrainConfig,
    table: &mut PolicyTable,
    running: &AtomicBool,
) -> Result<TrainingStats> {
    let learner_seed = config.seed;
    let opponent_seed = config.seed.map(|s| s.wrapping_add(1));

    let (mut x, mut o): (Box<dyn Player<G>>, Box<dyn Player<G>>) = match mode {
        Mode::SelfPlay => (
            Box::new(WeightedPlayer::new(learner_seed)),
            Box::new(WeightedPlayer::new(opponent_seed)),
        ),
        Mode::VsRandom => (
            Box::new(WeightedPlayer::new(learner_seed)),
            Box::new(RandomPlayer::new(opponent_seed)),
        ),
        Mode::Human => (
            Box::new(HumanPlayer::new(io::stdin().lock(), io::stdout())),
            Box::new(WeightedPlayer::new(learner_seed)),
        ),
    };
    info!("{} (X) vs {} (O), {} games", x.name(), o.name(), config.games);

    let bar = if progress && mode != Mode::Human {
        let bar = ProgressBar::new(config.games as u64);
        bar.set_message("Draw rate: 0%");
        bar.set_style(ProgressStyle::default_bar().template("{msg} {wide_bar} {pos}/{len}")?);
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut stats = TrainingStats::new();
    for played in 0..config.games {
        if !running.load(Ordering::SeqCst) {
            warn!("interrupted after {played} of {} games", config.games);
            break;
        }

        let record = session::play(start, x.as_mut(), o.as_mut(), table)?;
        table.reinforce(&record.history, record.status.winner(), config.factor);
        stats.record(&record);

        if mode == Mode::Human {
            println!("{}", record.last);
            match record.status.for_player(Color::X) {
                Verdict::Won => println!("Game over: you won"),
                Verdict::Lost => println!("Game over: you lost"),
                _ => println!("Game over: draw"),
            }
        }

        bar.inc(1);
        if (played + 1) % config.report_every == 0 {
            bar.set_message(format!("Draw rate: {:.1}%", 100.0 * stats.recent_draw_rate()));
            stats.log_progress(table.len());
        }
    }
    bar.finish();
    stats.finish();
    Ok(stats)
}
