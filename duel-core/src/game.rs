//! The contract both games implement. Players and tools outside this crate
//! only see positions through [`Game`].

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::bitboard::Color;
use crate::error::FormatError;

/// Game result from a neutral point of view.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Draw,
    Won(Color),
}

/// Game result from one side's point of view.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Verdict {
    Playing,
    Draw,
    Won,
    Lost,
}

impl Status {
    #[inline]
    pub fn is_over(self) -> bool {
        !matches!(self, Status::Playing)
    }

    #[inline]
    pub fn winner(self) -> Option<Color> {
        match self {
            Status::Won(color) => Some(color),
            _ => None,
        }
    }

    /// View this result as seen by `side`.
    pub fn for_player(self, side: Color) -> Verdict {
        match self {
            Status::Playing => Verdict::Playing,
            Status::Draw => Verdict::Draw,
            Status::Won(winner) if winner == side => Verdict::Won,
            Status::Won(_) => Verdict::Lost,
        }
    }
}

/// An immutable game position.
///
/// Every transition returns a new value; nothing here mutates `self`.
pub trait Game: Copy + Eq + Hash + fmt::Debug + fmt::Display + Sized {
    /// Canonical integer encoding of a position.
    type Code: Copy + Eq + Hash + fmt::Debug + fmt::LowerHex;

    /// Current result. Pure and idempotent.
    fn status(&self) -> Status;

    /// Side whose turn it is.
    fn next_to_move(&self) -> Color;

    /// Positions reachable in one move, paired with the cell played, in
    /// ascending cell order. Empty once the game is over or when the side to
    /// move has no legal move. Each call enumerates afresh.
    fn successors(&self) -> impl Iterator<Item = (usize, Self)> + '_;

    /// Number of legal moves for the side to move.
    fn move_count(&self) -> usize {
        self.successors().count()
    }

    fn encode(&self) -> Self::Code;

    fn decode(code: Self::Code) -> Result<Self, FormatError>;

    /// The position after a forced pass, when the side to move has no move
    /// but the game goes on.
    fn forced_pass(&self) -> Option<Self> {
        None
    }

    /// Compact textual form, stable across runs; used as a persistence key.
    fn key(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_for_player() {
        assert_eq!(Status::Won(Color::X).for_player(Color::X), Verdict::Won);
        assert_eq!(Status::Won(Color::X).for_player(Color::O), Verdict::Lost);
        assert_eq!(Status::Draw.for_player(Color::O), Verdict::Draw);
        assert_eq!(Status::Playing.for_player(Color::X), Verdict::Playing);
    }

    #[test]
    fn test_status_winner() {
        assert_eq!(Status::Won(Color::O).winner(), Some(Color::O));
        assert_eq!(Status::Draw.winner(), None);
        assert!(Status::Draw.is_over());
        assert!(!Status::Playing.is_over());
    }

    #[test]
    fn test_status_json() {
        let json = serde_json::to_string(&Status::Won(Color::X)).unwrap();
        assert_eq!(json, r#"{"Won":"X"}"#);
        assert_eq!(serde_json::from_str::<Status>(r#""Draw""#).unwrap(), Status::Draw);
    }
}
