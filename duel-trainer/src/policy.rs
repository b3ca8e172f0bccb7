//! Per-position move weights learned from self-play.
//!
//! Each position (by `Game::key()`) maps to one weight per successor, in
//! successor order. Weights start uniform and are nudged after every decided
//! game: the winner's choices go up, the loser's go down, with the effect
//! decaying geometrically from the last move backwards.

use std::collections::HashMap;

use duel_core::{Color, Game};
use log::{trace, warn};

/// Floor for any weight, so no move ever becomes impossible to pick.
pub const MIN_WEIGHT: f64 = 1e-6;

/// One decision made during a game.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Key of the position the move was made from
    pub key: String,
    /// Index into the position's successors
    pub choice: usize,
    /// Number of successors the position had
    pub moves: usize,
    /// Side that made the move
    pub mover: Color,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicyTable {
    weights: HashMap<String, Vec<f64>>,
}

impl PolicyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.weights.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.weights
            .iter()
            .map(|(key, weights)| (key.as_str(), weights.as_slice()))
    }

    /// Weights for `game`, inserting uniform `1/n` weights on first sight.
    ///
    /// A stored entry whose length no longer matches the successor count is
    /// replaced.
    pub fn weights<G: Game>(&mut self, game: &G) -> &[f64] {
        let moves = game.move_count();
        let entry = self.weights.entry(game.key()).or_default();
        if entry.len() != moves {
            if !entry.is_empty() {
                warn!(
                    "resetting weights for {:?}: stored {} moves, position has {}",
                    game.key(),
                    entry.len(),
                    moves
                );
            }
            *entry = uniform(moves);
        }
        entry
    }

    /// Adjust the weights of every step in `history` toward the outcome.
    ///
    /// Walking backwards, each move by `winner` is scaled by `1 + change` and
    /// each move by the other side by `1 - change`. Each side's `change`
    /// starts at `factor` and is multiplied by `factor` after every one of
    /// that side's moves. A draw (`None`) changes nothing.
    pub fn reinforce(&mut self, history: &[Step], winner: Option<Color>, factor: f64) {
        let Some(winner) = winner else {
            return;
        };

        let mut win_change = factor;
        let mut lose_change = factor;

        for step in history.iter().rev() {
            let weights = self
                .weights
                .entry(step.key.clone())
                .or_insert_with(|| uniform(step.moves));
            let Some(weight) = weights.get_mut(step.choice) else {
                warn!("step {} out of range for {:?}", step.choice, step.key);
                continue;
            };

            let before = *weight;
            if step.mover == winner {
                *weight = (*weight * (1.0 + win_change)).clamp(MIN_WEIGHT, 1.0);
                win_change *= factor;
            } else {
                *weight = (*weight * (1.0 - lose_change)).clamp(MIN_WEIGHT, 1.0);
                lose_change *= factor;
            }
            trace!("{:?} move {}: {} -> {}", step.key, step.choice, before, weight);
        }
    }
}

impl From<HashMap<String, Vec<f64>>> for PolicyTable {
    fn from(weights: HashMap<String, Vec<f64>>) -> Self {
        PolicyTable { weights }
    }
}

fn uniform(moves: usize) -> Vec<f64> {
    vec![1.0 / moves as f64; moves]
}

#[cfg(test)]
mod tests {
    use super::*;
    use duel_core::{Reversi, TicTacToe};

    fn step(key: &str, choice: usize, moves: usize, mover: Color) -> Step {
        Step {
            key: key.to_string(),
            choice,
            moves,
            mover,
        }
    }

    #[test]
    fn test_weights_start_uniform() {
        let mut table = PolicyTable::new();
        let weights = table.weights(&TicTacToe::new()).to_vec();

        assert_eq!(weights.len(), 9);
        assert!(weights.iter().all(|&w| (w - 1.0 / 9.0).abs() < 1e-12));
        assert_eq!(table.len(), 1);

        let opening = table.weights(&Reversi::new()).to_vec();
        assert_eq!(opening, vec![0.25; 4]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_weights_reset_on_length_mismatch() {
        let game = TicTacToe::new();
        let mut table = PolicyTable::from(HashMap::from([(game.key(), vec![0.5; 3])]));
        assert_eq!(table.weights(&game).len(), 9);
    }

    #[test]
    fn test_weights_empty_for_finished_game() {
        let mut table = PolicyTable::new();
        let game: TicTacToe = "XXXOO    ".parse().unwrap();
        assert!(table.weights(&game).is_empty());
    }

    #[test]
    fn test_reinforce_rewards_winner() {
        let mut table = PolicyTable::new();
        let history = vec![
            step("a", 0, 4, Color::X),
            step("b", 1, 4, Color::O),
            step("c", 2, 4, Color::X),
        ];
        table.reinforce(&history, Some(Color::X), 0.5);

        // Last X move gets the full factor, the earlier one half of it.
        assert!((table.get("c").unwrap()[2] - 0.25 * 1.5).abs() < 1e-12);
        assert!((table.get("a").unwrap()[0] - 0.25 * 1.25).abs() < 1e-12);
        assert!((table.get("b").unwrap()[1] - 0.25 * 0.5).abs() < 1e-12);

        // Untouched moves keep their uniform weight.
        assert_eq!(table.get("c").unwrap()[0], 0.25);
    }

    #[test]
    fn test_reinforce_clamps() {
        let mut table = PolicyTable::from(HashMap::from([
            ("win".to_string(), vec![0.9, 0.1]),
            ("lose".to_string(), vec![MIN_WEIGHT, 1.0]),
        ]));
        let history = vec![step("lose", 0, 2, Color::O), step("win", 0, 2, Color::X)];
        table.reinforce(&history, Some(Color::X), 0.9);

        assert_eq!(table.get("win").unwrap()[0], 1.0);
        assert_eq!(table.get("lose").unwrap()[0], MIN_WEIGHT);
    }

    #[test]
    fn test_reinforce_draw_is_noop() {
        let mut table = PolicyTable::new();
        table.weights(&TicTacToe::new());
        let before = table.clone();

        let history = vec![step(&TicTacToe::new().key(), 4, 9, Color::X)];
        table.reinforce(&history, None, 0.75);
        assert_eq!(table, before);
    }

    #[test]
    fn test_reinforce_skips_out_of_range_choice() {
        let mut table = PolicyTable::new();
        table.reinforce(&[step("a", 5, 2, Color::X)], Some(Color::X), 0.5);
        assert_eq!(table.get("a"), Some(&[0.5, 0.5][..]));
    }
}
