//! Two-plane bitboard shared by both games.
//!
//! # Layout
//!
//! ```text
//! occupancy: bit i set  => cell i holds a piece
//! color:     bit i set  => the piece on cell i is X (only where occupied)
//!
//! Cells are row-major, W cells per row:
//!   0      1      ...  W-1
//!   W      W+1    ...  2W-1
//!   ...
//! ```
//!
//! Color bits outside the occupancy plane are always cleared, so two boards
//! holding the same pieces compare and hash equal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, IndexError, MoveError};

/// Side identifier. X always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Color {
    X,
    O,
}

impl Color {
    /// Get the other side.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::X => Color::O,
            Color::O => Color::X,
        }
    }

    /// Symbol used in textual board literals.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Color::X => 'X',
            Color::O => 'O',
        }
    }

    /// Parse a literal symbol. Returns None for anything but `X` or `O`.
    #[inline]
    pub fn from_symbol(symbol: char) -> Option<Color> {
        match symbol {
            'X' => Some(Color::X),
            'O' => Some(Color::O),
            _ => None,
        }
    }

    #[inline]
    pub(crate) fn from_bit(bit: bool) -> Color {
        if bit {
            Color::X
        } else {
            Color::O
        }
    }
}

/// Board of `W × H` cells (at most 64) packed into two `u64` planes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BitBoard<const W: usize, const H: usize> {
    occupancy: u64,
    color: u64,
}

/// The 3x3 tic-tac-toe board.
pub type Grid3 = BitBoard<3, 3>;

/// The 6x6 reversi board.
pub type Grid6 = BitBoard<6, 6>;

impl<const W: usize, const H: usize> BitBoard<W, H> {
    /// Cells per row.
    pub const WIDTH: usize = W;
    /// Total number of cells.
    pub const CELLS: usize = W * H;
    /// Mask of the bits that map to real cells.
    const MASK: u64 = if W * H == 64 {
        u64::MAX
    } else {
        (1u64 << (W * H)) - 1
    };

    /// Create a board with no pieces.
    #[inline]
    pub const fn empty() -> Self {
        BitBoard {
            occupancy: 0,
            color: 0,
        }
    }

    /// Build a board from raw planes. Bits beyond the board and color bits on
    /// empty cells are dropped.
    #[inline]
    pub fn from_planes(occupancy: u64, color: u64) -> Self {
        let occupancy = occupancy & Self::MASK;
        BitBoard {
            occupancy,
            color: color & occupancy,
        }
    }

    /// Raw occupancy plane.
    #[inline]
    pub const fn occupancy(&self) -> u64 {
        self.occupancy
    }

    /// Raw color plane (zero wherever the cell is empty).
    #[inline]
    pub const fn colors(&self) -> u64 {
        self.color
    }

    #[inline]
    fn check(index: usize) -> Result<usize, IndexError> {
        if index < Self::CELLS {
            Ok(index)
        } else {
            Err(IndexError {
                index,
                len: Self::CELLS,
            })
        }
    }

    /// Check whether a cell holds a piece.
    pub fn occupied(&self, index: usize) -> Result<bool, IndexError> {
        let index = Self::check(index)?;
        Ok(self.occupancy & (1 << index) != 0)
    }

    /// Get the piece on a cell, or None if the cell is empty.
    pub fn color_at(&self, index: usize) -> Result<Option<Color>, IndexError> {
        let index = Self::check(index)?;
        Ok(self.cell(index))
    }

    /// Unchecked read for callers that already bounded `index`.
    #[inline]
    pub(crate) fn cell(&self, index: usize) -> Option<Color> {
        debug_assert!(index < Self::CELLS);
        let bit = 1u64 << index;
        if self.occupancy & bit == 0 {
            None
        } else {
            Some(Color::from_bit(self.color & bit != 0))
        }
    }

    /// Return a copy with a new piece on an empty cell.
    pub fn with_placed(&self, index: usize, color: Color) -> Result<Self, MoveError> {
        let index = Self::check(index)?;
        let bit = 1u64 << index;
        if self.occupancy & bit != 0 {
            return Err(MoveError::Occupied(index));
        }
        Ok(Self::set(self.occupancy | bit, self.color, bit, color))
    }

    /// Return a copy with an existing piece recolored.
    pub fn with_flipped(&self, index: usize, color: Color) -> Result<Self, MoveError> {
        let index = Self::check(index)?;
        let bit = 1u64 << index;
        if self.occupancy & bit == 0 {
            return Err(MoveError::Empty(index));
        }
        Ok(Self::set(self.occupancy, self.color, bit, color))
    }

    #[inline]
    fn set(occupancy: u64, color: u64, bit: u64, piece: Color) -> Self {
        let color = match piece {
            Color::X => color | bit,
            Color::O => color & !bit,
        };
        BitBoard { occupancy, color }
    }

    /// Row of a cell (0-based).
    #[inline]
    pub const fn row_of(index: usize) -> usize {
        index / W
    }

    /// Column of a cell (0-based).
    #[inline]
    pub const fn col_of(index: usize) -> usize {
        index % W
    }

    /// Number of pieces of one color.
    #[inline]
    pub fn count(&self, color: Color) -> u32 {
        match color {
            Color::X => self.color.count_ones(),
            Color::O => (self.occupancy & !self.color).count_ones(),
        }
    }

    /// Number of empty cells.
    #[inline]
    pub fn empty_count(&self) -> u32 {
        Self::CELLS as u32 - self.occupancy.count_ones()
    }

    /// Check if every cell is filled.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupancy == Self::MASK
    }

    /// Iterate over all cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = Option<Color>> + '_ {
        (0..Self::CELLS).map(move |i| self.cell(i))
    }

    /// Parse a row-major literal over `{empty, 'X', 'O'}`.
    pub fn parse(text: &str, empty: char) -> Result<Self, FormatError> {
        let found = text.chars().count();
        if found != Self::CELLS {
            return Err(FormatError::WrongLength {
                expected: Self::CELLS,
                found,
            });
        }

        let mut board = Self::empty();
        for (index, symbol) in text.chars().enumerate() {
            if symbol == empty {
                continue;
            }
            let color =
                Color::from_symbol(symbol).ok_or(FormatError::IllegalSymbol { symbol, index })?;
            board = Self::set(board.occupancy | (1 << index), board.color, 1 << index, color);
        }
        Ok(board)
    }

    /// Row-major literal, the inverse of [`BitBoard::parse`].
    pub fn to_compact(&self, empty: char) -> String {
        self.cells()
            .map(|cell| cell.map_or(empty, Color::symbol))
            .collect()
    }
}

impl<const W: usize, const H: usize> Default for BitBoard<W, H> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<const W: usize, const H: usize> fmt::Display for BitBoard<W, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compact = self.to_compact('.');
        let chars: Vec<char> = compact.chars().collect();
        for row in chars.chunks(W) {
            writeln!(f, "{}", row.iter().collect::<String>())?;
        }
        Ok(())
    }
}
