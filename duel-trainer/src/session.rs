//! Drives one game between two players.

use duel_core::{Color, Game, Status};
use log::debug;

use crate::error::PlayError;
use crate::player::Player;
use crate::policy::{PolicyTable, Step};

/// Outcome of a finished game.
#[derive(Clone, Debug)]
pub struct Record<G> {
    pub status: Status,
    /// Every move made, in order. Passes are not recorded.
    pub history: Vec<Step>,
    pub plies: usize,
    pub passes: usize,
    /// Final position
    pub last: G,
}

/// Play `start` to completion, X moving through `x` and O through `o`.
///
/// A side with no legal move passes when its opponent can still move.
pub fn play<G: Game>(
    start: G,
    x: &mut dyn Player<G>,
    o: &mut dyn Player<G>,
    table: &mut PolicyTable,
) -> Result<Record<G>, PlayError> {
    let mut game = start;
    let mut history = Vec::new();
    let mut passes = 0;

    loop {
        let status = game.status();
        if status.is_over() {
            debug!("game over after {} plies: {:?}", history.len(), status);
            return Ok(Record {
                status,
                plies: history.len(),
                history,
                passes,
                last: game,
            });
        }

        let moves = game.move_count();
        if moves == 0 {
            game = game.forced_pass().ok_or(PlayError::NoMoves)?;
            passes += 1;
            debug!("{} passes", game.next_to_move().opponent().symbol());
            continue;
        }

        let mover = game.next_to_move();
        let player: &mut dyn Player<G> = match mover {
            Color::X => &mut *x,
            Color::O => &mut *o,
        };
        let choice = player.choose(&game, table)?;
        let (cell, next) = game.successors().nth(choice).ok_or_else(|| {
            PlayError::InvalidMove(format!("{} chose move {choice} of {moves}", player.name()))
        })?;
        debug!("{} ({}) plays {}", mover.symbol(), player.name(), cell);

        history.push(Step {
            key: game.key(),
            choice,
            moves,
            mover,
        });
        game = next;
    }
}
