//! 6x6 Reversi.
//!
//! A move places a piece on an empty cell that closes at least one run of
//! opposing pieces against one of the mover's own pieces; every closed run
//! changes color. A side with no such cell passes. The game ends when
//! neither side can move, and the side with more pieces wins.
//!
//! ```text
//! Starting position      Opening moves for X (*)
//!   ------                 ------
//!   ------                 ---*--
//!   --XO--                 --XO*-
//!   --OX--                 -*OX--
//!   ------                 --*---
//!   ------                 ------
//! ```

use std::fmt;

use crate::bitboard::{Color, Grid6};
use crate::codec::PlaneLayout;
use crate::error::{FormatError, IndexError, MoveError};
use crate::game::{Game, Status};
use crate::walker::{walk, Direction};

/// Symbol for an empty cell in literals.
pub const EMPTY: char = '-';

/// The standard starting layout.
pub const START: &str = "--------------XO----OX--------------";

/// Set of directions in which a move captures, one bit per [`Direction`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Witness(u8);

impl Witness {
    pub const NONE: Witness = Witness(0);

    #[inline]
    pub const fn from_bits(bits: u8) -> Witness {
        Witness(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    #[inline]
    pub const fn with(self, direction: Direction) -> Witness {
        Witness(self.0 | direction.bit())
    }

    /// Flagged directions in declaration order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl fmt::Debug for Witness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.directions()).finish()
    }
}

/// A legal placement together with the directions it captures in.
///
/// The witness describes the position it was generated from and is only
/// meaningful when applied to that same position.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct CaptureMove {
    pub cell: usize,
    pub witness: Witness,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Reversi {
    board: Grid6,
    next: Color,
}

impl Reversi {
    /// The starting position with X to move.
    pub fn new() -> Reversi {
        const X: u64 = 1 << 14 | 1 << 21;
        const O: u64 = 1 << 15 | 1 << 20;
        Reversi {
            board: Grid6::from_planes(X | O, X),
            next: Color::X,
        }
    }

    /// Parse a 36-character literal over `{'-', 'X', 'O'}`.
    pub fn from_string(board: &str, next: Color) -> Result<Reversi, FormatError> {
        Ok(Reversi {
            board: Grid6::parse(board, EMPTY)?,
            next,
        })
    }

    #[inline]
    pub fn from_board(board: Grid6, next: Color) -> Reversi {
        Reversi { board, next }
    }

    #[inline]
    pub fn board(&self) -> &Grid6 {
        &self.board
    }

    /// Directions in which the side to move would capture from `cell`.
    /// Empty for occupied cells.
    pub fn witness(&self, cell: usize) -> Result<Witness, IndexError> {
        if self.board.occupied(cell)? {
            return Ok(Witness::NONE);
        }
        Ok(self.witness_for(cell, self.next))
    }

    fn witness_for(&self, cell: usize, mover: Color) -> Witness {
        Direction::ALL
            .into_iter()
            .filter(|&d| walk(&self.board, cell, d, mover).is_some())
            .fold(Witness::NONE, Witness::with)
    }

    fn moves_for(&self, mover: Color) -> impl Iterator<Item = CaptureMove> + '_ {
        (0..Grid6::CELLS)
            .filter(move |&cell| self.board.cell(cell).is_none())
            .map(move |cell| CaptureMove {
                cell,
                witness: self.witness_for(cell, mover),
            })
            .filter(|mv| !mv.witness.is_empty())
    }

    /// Legal moves for the side to move, ascending by cell. Empty when the
    /// side must pass.
    pub fn legal_moves(&self) -> Vec<CaptureMove> {
        self.moves_for(self.next).collect()
    }

    /// Check if `color` has any legal move in this position.
    pub fn has_move(&self, color: Color) -> bool {
        self.moves_for(color).next().is_some()
    }

    /// Play a generated move. Every direction in the witness is walked on
    /// this (pre-move) board, and the run it finds changes color up to, not
    /// including, the anchor.
    pub fn apply(&self, mv: CaptureMove) -> Result<Reversi, MoveError> {
        let mut board = self.board.with_placed(mv.cell, self.next)?;
        if mv.witness.is_empty() {
            return Err(MoveError::NoCapture(mv.cell));
        }

        for direction in mv.witness.directions() {
            let run = walk(&self.board, mv.cell, direction, self.next)
                .ok_or(MoveError::NoCapture(mv.cell))?;
            for cell in run.captured::<6, 6>() {
                board = board.with_flipped(cell, self.next)?;
            }
        }

        Ok(Reversi {
            board,
            next: self.next.opponent(),
        })
    }

    /// Hand the turn to the other side without moving.
    #[inline]
    pub fn pass(&self) -> Reversi {
        Reversi {
            board: self.board,
            next: self.next.opponent(),
        }
    }

    /// Piece difference, X minus O.
    #[inline]
    pub fn score(&self) -> i32 {
        self.board.count(Color::X) as i32 - self.board.count(Color::O) as i32
    }
}

impl Default for Reversi {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Reversi {
    type Code = u128;

    fn status(&self) -> Status {
        if self.has_move(self.next) || self.has_move(self.next.opponent()) {
            return Status::Playing;
        }
        match self.score() {
            s if s > 0 => Status::Won(Color::X),
            s if s < 0 => Status::Won(Color::O),
            _ => Status::Draw,
        }
    }

    #[inline]
    fn next_to_move(&self) -> Color {
        self.next
    }

    fn successors(&self) -> impl Iterator<Item = (usize, Self)> + '_ {
        self.moves_for(self.next)
            .filter_map(move |mv| self.apply(mv).ok().map(|next| (mv.cell, next)))
    }

    fn move_count(&self) -> usize {
        self.moves_for(self.next).count()
    }

    fn encode(&self) -> u128 {
        PlaneLayout::REVERSI.pack(&self.board, self.next)
    }

    fn decode(code: u128) -> Result<Self, FormatError> {
        let (board, next) = PlaneLayout::REVERSI.unpack(code)?;
        Ok(Reversi { board, next })
    }

    fn forced_pass(&self) -> Option<Self> {
        (!self.has_move(self.next) && self.has_move(self.next.opponent())).then(|| self.pass())
    }

    fn key(&self) -> String {
        format!("{}/{}", self.board.to_compact(EMPTY), self.next.symbol())
    }
}

impl fmt::Display for Reversi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compact = self.board.to_compact(EMPTY);
        for row in 0..6 {
            writeln!(f, "{}", &compact[row * 6..row * 6 + 6])?;
        }
        writeln!(f, "{} to move", self.next.symbol())
    }
}
