//! Move selection: random, weighted by the policy table, or typed by a person.

use std::io::{BufRead, Write};

use duel_core::Game;
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::PlayError;
use crate::policy::PolicyTable;

/// Picks one of a position's successors.
pub trait Player<G: Game> {
    fn name(&self) -> &str;

    /// Index into `game.successors()` of the chosen move. Only called on
    /// positions that are still playing and have at least one move.
    fn choose(&mut self, game: &G, table: &mut PolicyTable) -> Result<usize, PlayError>;
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Uniform choice among the legal moves.
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        RandomPlayer { rng: seeded(seed) }
    }
}

impl<G: Game> Player<G> for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn choose(&mut self, game: &G, _table: &mut PolicyTable) -> Result<usize, PlayError> {
        let moves = game.move_count();
        if moves == 0 {
            return Err(PlayError::NoMoves);
        }
        Ok(self.rng.random_range(0..moves))
    }
}

/// Samples moves in proportion to the table's weights for the position.
pub struct WeightedPlayer {
    rng: StdRng,
}

impl WeightedPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        WeightedPlayer { rng: seeded(seed) }
    }
}

impl<G: Game> Player<G> for WeightedPlayer {
    fn name(&self) -> &str {
        "Weighted"
    }

    fn choose(&mut self, game: &G, table: &mut PolicyTable) -> Result<usize, PlayError> {
        let weights = table.weights(game);
        if weights.is_empty() {
            return Err(PlayError::NoMoves);
        }
        let dist = WeightedIndex::new(weights).map_err(|e| PlayError::Weights {
            key: game.key(),
            reason: e.to_string(),
        })?;
        Ok(dist.sample(&mut self.rng))
    }
}

/// Reads cell numbers from `input`, prompting on `output`.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanPlayer { input, output }
    }

    /// Map a typed cell number to a successor index.
    fn parse_choice<G: Game>(game: &G, line: &str) -> Result<usize, PlayError> {
        let text = line.trim();
        let cell: usize = text
            .parse()
            .map_err(|_| PlayError::InvalidMove(format!("{text:?} is not a cell number")))?;
        game.successors()
            .position(|(played, _)| played == cell)
            .ok_or_else(|| PlayError::InvalidMove(format!("cell {cell} is not a legal move")))
    }
}

impl<G: Game, R: BufRead, W: Write> Player<G> for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        "Human"
    }

    fn choose(&mut self, game: &G, _table: &mut PolicyTable) -> Result<usize, PlayError> {
        loop {
            writeln!(self.output, "{game}")?;
            write!(self.output, "{}'s move: ", game.next_to_move().symbol())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PlayError::InputClosed);
            }

            match Self::parse_choice(game, &line) {
                Ok(choice) => return Ok(choice),
                Err(PlayError::InvalidMove(reason)) => {
                    writeln!(self.output, "Invalid move! {reason}")?
                }
                Err(e) => return Err(e),
            }
        }
    }
}
