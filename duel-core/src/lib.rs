//! Tic-tac-toe and 6x6 Reversi on a two-plane bitboard.
//!
//! # Board (two planes)
//!
//! ```text
//! occupancy: bit i = cell i holds a piece
//! color:     bit i = piece on cell i is X (zero where empty)
//!
//! Cell indices (row-major order), tic-tac-toe:
//!   0 1 2
//!   3 4 5
//!   6 7 8
//!
//! Reversi uses the same scheme on a 6x6 grid (cells 0-35).
//! ```
//!
//! # State Encoding
//!
//! ```text
//! Tic-tac-toe (24 bits)          Reversi (79 bits)
//!   bits 0-8:   occupancy          bits 0-35:  occupancy
//!   bits 9-17:  color (1 = X)      bits 36-71: color (1 = X)
//!   bit 18:     next (1 = X)       bit 72:     next (1 = X)
//!   bits 19-23: empty cells        bits 73-78: empty cells
//! ```
//!
//! # Capture witness (8 bits)
//!
//! ```text
//! bit 0: NW  bit 1: N  bit 2: NE  bit 3: E
//! bit 4: SE  bit 5: S  bit 6: SW  bit 7: W
//! ```
//!
//! Positions are immutable values: every move returns a new position, so
//! independent searches can share a parent without coordination.

pub mod bitboard;
pub mod codec;
pub mod error;
pub mod game;
pub mod reversi;
pub mod tictactoe;
pub mod walker;

pub use bitboard::{BitBoard, Color, Grid3, Grid6};
pub use codec::{count_paths, Verification, Verifier};
pub use error::{FormatError, IndexError, MoveError, VerifyError};
pub use game::{Game, Status, Verdict};
pub use reversi::{CaptureMove, Reversi, Witness};
pub use tictactoe::TicTacToe;
pub use walker::{walk, Direction, Ray, Run};
