//! Tic-tac-toe: place a mark on any empty cell, three in a line wins.
//!
//! Cell indices (row-major order):
//!
//! ```text
//!   0 1 2
//!   3 4 5
//!   6 7 8
//! ```

use std::fmt;
use std::str::FromStr;

use crate::bitboard::{Color, Grid3};
use crate::codec::PlaneLayout;
use crate::error::{FormatError, MoveError};
use crate::game::{Game, Status};

/// Bitmasks for the 8 winning lines.
const WIN_MASKS: [u64; 8] = [
    0b000_000_111, // Row 0: cells 0,1,2
    0b000_111_000, // Row 1: cells 3,4,5
    0b111_000_000, // Row 2: cells 6,7,8
    0b001_001_001, // Col 0: cells 0,3,6
    0b010_010_010, // Col 1: cells 1,4,7
    0b100_100_100, // Col 2: cells 2,5,8
    0b100_010_001, // Main diagonal: cells 0,4,8
    0b001_010_100, // Anti-diagonal: cells 2,4,6
];

/// Symbol for an empty cell in literals.
pub const EMPTY: char = ' ';

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TicTacToe {
    board: Grid3,
    next: Color,
}

impl TicTacToe {
    /// Empty board, X to move.
    pub fn new() -> TicTacToe {
        TicTacToe {
            board: Grid3::empty(),
            next: Color::X,
        }
    }

    /// Wrap a board without checking piece counts. X moves when both sides
    /// have the same number of pieces, O otherwise.
    pub fn from_board(board: Grid3) -> TicTacToe {
        let next = if board.count(Color::X) == board.count(Color::O) {
            Color::X
        } else {
            Color::O
        };
        TicTacToe { board, next }
    }

    /// Wrap a board, requiring X to have the same number of pieces as O or
    /// one more.
    fn checked(board: Grid3) -> Result<TicTacToe, FormatError> {
        let difference = board.count(Color::X) as i32 - board.count(Color::O) as i32;
        if !(0..=1).contains(&difference) {
            return Err(FormatError::Parity { difference });
        }
        Ok(TicTacToe::from_board(board))
    }

    #[inline]
    pub fn board(&self) -> &Grid3 {
        &self.board
    }

    /// Check if `color` has three in a line.
    pub fn has_won(&self, color: Color) -> bool {
        let plane = match color {
            Color::X => self.board.colors(),
            Color::O => self.board.occupancy() & !self.board.colors(),
        };
        WIN_MASKS.iter().any(|&mask| plane & mask == mask)
    }

    /// Mark `cell` for the side to move.
    pub fn apply(&self, cell: usize) -> Result<TicTacToe, MoveError> {
        if self.status().is_over() {
            return Err(MoveError::GameOver);
        }
        Ok(TicTacToe {
            board: self.board.with_placed(cell, self.next)?,
            next: self.next.opponent(),
        })
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for TicTacToe {
    type Err = FormatError;

    /// Parse a 9-character literal over `{' ', 'X', 'O'}`. X must have the
    /// same number of pieces as O or one more.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        TicTacToe::checked(Grid3::parse(text, EMPTY)?)
    }
}

impl Game for TicTacToe {
    type Code = u32;

    fn status(&self) -> Status {
        if self.has_won(Color::X) {
            Status::Won(Color::X)
        } else if self.has_won(Color::O) {
            Status::Won(Color::O)
        } else if self.board.is_full() {
            Status::Draw
        } else {
            Status::Playing
        }
    }

    #[inline]
    fn next_to_move(&self) -> Color {
        self.next
    }

    fn successors(&self) -> impl Iterator<Item = (usize, Self)> + '_ {
        let open = if self.status().is_over() { 0 } else { Grid3::CELLS };
        (0..open).filter_map(move |cell| {
            let board = self.board.with_placed(cell, self.next).ok()?;
            Some((
                cell,
                TicTacToe {
                    board,
                    next: self.next.opponent(),
                },
            ))
        })
    }

    fn move_count(&self) -> usize {
        if self.status().is_over() {
            0
        } else {
            self.board.empty_count() as usize
        }
    }

    fn encode(&self) -> u32 {
        // 24 bits, always fits.
        PlaneLayout::TICTACTOE.pack(&self.board, self.next) as u32
    }

    /// Inverse of `encode` for positions reachable by alternating moves.
    /// Rejects broken parity and a side-to-move bit that disagrees with the
    /// piece counts.
    fn decode(code: u32) -> Result<Self, FormatError> {
        let (board, next) = PlaneLayout::TICTACTOE.unpack(u128::from(code))?;
        let game = TicTacToe::checked(board)?;
        if game.next != next {
            return Err(FormatError::BadEncoding {
                code: u128::from(code),
                reason: "side to move disagrees with piece counts",
            });
        }
        Ok(game)
    }

    fn key(&self) -> String {
        self.board.to_compact(EMPTY)
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self
            .board
            .cells()
            .enumerate()
            .map(|(i, cell)| cell.map_or(i.to_string(), |c| c.symbol().to_string()))
            .collect();

        for (row, chunk) in cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "---|---|---")?;
            }
            writeln!(f, " {} | {} | {} ", chunk[0], chunk[1], chunk[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(text: &str) -> TicTacToe {
        text.parse().unwrap()
    }

    #[test]
    fn test_new_board() {
        let board = TicTacToe::new();
        assert_eq!(board.next_to_move(), Color::X);
        assert_eq!(board.status(), Status::Playing);
        assert_eq!(board.move_count(), 9);
    }

    #[test]
    fn test_parse_derives_next() {
        assert_eq!(game("X        ").next_to_move(), Color::O);
        assert_eq!(game("XO       ").next_to_move(), Color::X);
    }

    #[test]
    fn test_parse_rejects_parity() {
        assert_eq!(
            "XXX      ".parse::<TicTacToe>(),
            Err(FormatError::Parity { difference: 3 })
        );
        assert_eq!(
            "O        ".parse::<TicTacToe>(),
            Err(FormatError::Parity { difference: -1 })
        );
    }

    #[test]
    fn test_parse_rejects_bad_literals() {
        assert_eq!(
            "XO".parse::<TicTacToe>(),
            Err(FormatError::WrongLength { expected: 9, found: 2 })
        );
        assert_eq!(
            "X-O      ".parse::<TicTacToe>(),
            Err(FormatError::IllegalSymbol { symbol: '-', index: 1 })
        );
    }

    #[test]
    fn test_top_row_win() {
        let board = TicTacToe::from_board(Grid3::parse("XXX      ", EMPTY).unwrap());
        assert_eq!(board.status(), Status::Won(Color::X));
        assert_eq!(game("XXXOO    ").status(), Status::Won(Color::X));
    }

    #[test]
    fn test_all_winning_lines() {
        for mask in WIN_MASKS {
            let mut board = Grid3::empty();
            for cell in 0..9 {
                if mask & (1 << cell) != 0 {
                    board = board.with_placed(cell, Color::O).unwrap();
                }
            }
            let game = TicTacToe::from_board(board);
            assert_eq!(game.status(), Status::Won(Color::O), "mask {mask:#011b}");
        }
    }

    #[test]
    fn test_draw() {
        let board = game("XOXXOOOXX");
        assert_eq!(board.status(), Status::Draw);
        assert_eq!(board.move_count(), 0);
        assert_eq!(board.successors().count(), 0);
    }

    #[test]
    fn test_checkerboard_is_a_win() {
        // Corners and center belong to X: both diagonals are complete.
        assert_eq!(game("XOXOXOXOX").status(), Status::Won(Color::X));
    }

    #[test]
    fn test_status_is_idempotent() {
        let board = game("XO X O   ");
        let first = board.status();
        assert_eq!(board.status(), first);
        assert_eq!(board, game("XO X O   "));
    }

    #[test]
    fn test_successors_ascending_and_restartable() {
        let board = game("X   O    ");
        let cells: Vec<usize> = board.successors().map(|(cell, _)| cell).collect();
        assert_eq!(cells, vec![1, 2, 3, 5, 6, 7, 8]);

        let again: Vec<usize> = board.successors().map(|(cell, _)| cell).collect();
        assert_eq!(cells, again);

        for (cell, next) in board.successors() {
            assert_eq!(next.board().color_at(cell), Ok(Some(Color::X)));
            assert_eq!(next.next_to_move(), Color::O);
        }
    }

    #[test]
    fn test_no_successors_after_win() {
        let board = game("XXXOO    ");
        assert_eq!(board.successors().count(), 0);
        assert_eq!(board.move_count(), 0);
        assert_eq!(board.apply(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_apply_occupied() {
        let board = game("X        ");
        assert_eq!(board.apply(0), Err(MoveError::Occupied(0)));
        assert!(matches!(board.apply(9), Err(MoveError::Index(_))));
    }

    #[test]
    fn test_encode_decode_two_marks() {
        let board = game("X   O    ");
        let decoded = TicTacToe::decode(board.encode()).unwrap();

        assert_eq!(decoded, board);
        assert_eq!(decoded.key(), "X   O    ");
        assert_eq!(decoded.next_to_move(), Color::X);
    }

    #[test]
    fn test_decode_rejects_parity() {
        // Unreachable by alternating play, so not the image of any state.
        let two_x = TicTacToe::from_board(Grid3::parse("XX       ", EMPTY).unwrap());
        assert_eq!(two_x.next_to_move(), Color::O);
        assert_eq!(
            TicTacToe::decode(two_x.encode()),
            Err(FormatError::Parity { difference: 2 })
        );

        // Two O marks on cells 0 and 1, O to move.
        let two_o = 0b11 | 7 << 19;
        assert_eq!(
            TicTacToe::decode(two_o),
            Err(FormatError::Parity { difference: -2 })
        );
    }

    #[test]
    fn test_decode_rejects_wrong_side_to_move() {
        // X on cell 0 with X to move again.
        let code = 0b1 | 0b1 << 9 | 1 << 18 | 8 << 19;
        assert!(matches!(
            TicTacToe::decode(code),
            Err(FormatError::BadEncoding { reason, .. })
                if reason == "side to move disagrees with piece counts"
        ));

        // Same board with O to move is fine.
        let fixed = code & !(1 << 18);
        assert_eq!(TicTacToe::decode(fixed), Ok(game("X        ")));
    }

    #[test]
    fn test_encoding_layout() {
        // O | _ | X  /  X | _ | O  /  X | O | X, O to move, 2 empty.
        let board = game("O XX OXOX");
        let code = board.encode();

        assert_eq!(code & 0x1FF, 0b111_101_101);
        assert_eq!((code >> 9) & 0x1FF, 0b101_001_100);
        assert_eq!((code >> 18) & 1, 0);
        assert_eq!(code >> 19, 2);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(TicTacToe::decode(u32::MAX).is_err());
        assert!(TicTacToe::decode(0).is_err()); // empty count 0 but board empty
    }

    #[test]
    fn test_display() {
        let board = game("X   O    ");
        let expected = " X | 1 | 2 \n---|---|---\n 3 | O | 5 \n---|---|---\n 6 | 7 | 8 \n";
        assert_eq!(board.to_string(), expected);
    }
}
