//! Training statistics tracking.

use std::time::Instant;

use duel_core::{Color, Status};
use log::info;
use serde::Serialize;

use crate::session::Record;

/// Counters collected over a training run.
#[derive(Debug, Default, Serialize)]
pub struct TrainingStats {
    pub games: u64,
    pub x_wins: u64,
    pub o_wins: u64,
    pub draws: u64,
    /// Forced passes across all games
    pub passes: u64,
    /// Moves across all games, passes excluded
    pub plies: u64,
    /// Set by `finish`
    pub elapsed_secs: f64,

    #[serde(skip)]
    start_time: Option<Instant>,
    #[serde(skip)]
    window: Window,
}

/// Results since the last progress report.
#[derive(Debug, Default)]
struct Window {
    games: u64,
    draws: u64,
}

impl TrainingStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Add a finished game.
    pub fn record<G>(&mut self, record: &Record<G>) {
        self.games += 1;
        self.window.games += 1;
        self.passes += record.passes as u64;
        self.plies += record.plies as u64;
        match record.status {
            Status::Won(Color::X) => self.x_wins += 1,
            Status::Won(Color::O) => self.o_wins += 1,
            Status::Draw => {
                self.draws += 1;
                self.window.draws += 1;
            }
            Status::Playing => {}
        }
    }

    /// Fraction of all games drawn.
    pub fn draw_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.draws as f64 / self.games as f64
        }
    }

    /// Fraction of games drawn since the last report.
    pub fn recent_draw_rate(&self) -> f64 {
        if self.window.games == 0 {
            0.0
        } else {
            self.window.draws as f64 / self.window.games as f64
        }
    }

    /// Log progress and start a new reporting window.
    pub fn log_progress(&mut self, table_size: usize) {
        let elapsed = self.start_time.map(|s| s.elapsed().as_secs()).unwrap_or(0);
        info!(
            "[{:02}:{:02}:{:02}] games={} x={} o={} draws={} recent_draw_rate={:.1}% positions={}",
            elapsed / 3600,
            (elapsed % 3600) / 60,
            elapsed % 60,
            self.games,
            self.x_wins,
            self.o_wins,
            self.draws,
            100.0 * self.recent_draw_rate(),
            table_size,
        );
        self.window = Window::default();
    }

    /// Stop the clock.
    pub fn finish(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed_secs = start.elapsed().as_secs_f64();
        }
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Games played: {}", self.games);
        println!("  - X wins: {}", self.x_wins);
        println!("  - O wins: {}", self.o_wins);
        println!("  - Draws: {}", self.draws);
        println!("Draw rate: {:.2}%", 100.0 * self.draw_rate());
        println!("Moves: {}", self.plies);
        println!("Passes: {}", self.passes);

        if self.elapsed_secs > 0.0 {
            println!(
                "Average rate: {:.0} games/sec",
                self.games as f64 / self.elapsed_secs
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: Status, plies: usize, passes: usize) -> Record<()> {
        Record {
            status,
            history: Vec::new(),
            plies,
            passes,
            last: (),
        }
    }

    #[test]
    fn test_record_counts() {
        let mut stats = TrainingStats::new();
        stats.record(&record(Status::Won(Color::X), 5, 0));
        stats.record(&record(Status::Draw, 9, 0));
        stats.record(&record(Status::Won(Color::O), 30, 2));
        stats.record(&record(Status::Draw, 9, 0));

        assert_eq!(stats.games, 4);
        assert_eq!((stats.x_wins, stats.o_wins, stats.draws), (1, 1, 2));
        assert_eq!(stats.plies, 53);
        assert_eq!(stats.passes, 2);
        assert_eq!(stats.draw_rate(), 0.5);
    }

    #[test]
    fn test_window_resets_after_report() {
        let mut stats = TrainingStats::new();
        stats.record(&record(Status::Draw, 9, 0));
        assert_eq!(stats.recent_draw_rate(), 1.0);

        stats.log_progress(0);
        stats.record(&record(Status::Won(Color::X), 5, 0));
        assert_eq!(stats.recent_draw_rate(), 0.0);
        assert_eq!(stats.draw_rate(), 0.5);
    }

    #[test]
    fn test_empty_rates() {
        let stats = TrainingStats::default();
        assert_eq!(stats.draw_rate(), 0.0);
        assert_eq!(stats.recent_draw_rate(), 0.0);
    }

    #[test]
    fn test_summary_json() {
        let mut stats = TrainingStats::new();
        stats.record(&record(Status::Won(Color::O), 12, 1));
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["games"], 1);
        assert_eq!(json["o_wins"], 1);
        assert_eq!(json["passes"], 1);
        assert!(json.get("start_time").is_none());
    }
}
