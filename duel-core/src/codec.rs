//! Integer state encodings and the exhaustive round-trip verifier.
//!
//! # Plane layout
//!
//! ```text
//! bits [0, N)            occupancy, cell i at bit i
//! bits [N, 2N)           color, 1 = X (zero on empty cells)
//! bit  2N                side to move, 1 = X
//! bits [2N+1, 2N+1+C)    number of empty cells
//! ```
//!
//! Tic-tac-toe uses N = 9, C = 5 (24 bits); reversi uses N = 36, C = 6
//! (79 bits). The empty count is redundant with the occupancy plane and is
//! checked on decode.

use std::collections::HashMap;

use crate::bitboard::{BitBoard, Color};
use crate::error::{FormatError, VerifyError};
use crate::game::Game;

/// Bit layout for an N-cell board with a C-bit empty counter.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlaneLayout {
    cells: u32,
    count_bits: u32,
}

impl PlaneLayout {
    pub(crate) const TICTACTOE: PlaneLayout = PlaneLayout {
        cells: 9,
        count_bits: 5,
    };

    pub(crate) const REVERSI: PlaneLayout = PlaneLayout {
        cells: 36,
        count_bits: 6,
    };

    /// Total bits used.
    pub(crate) const fn width(self) -> u32 {
        2 * self.cells + 1 + self.count_bits
    }

    #[inline]
    const fn plane_mask(self) -> u128 {
        (1u128 << self.cells) - 1
    }

    pub(crate) fn pack<const W: usize, const H: usize>(
        self,
        board: &BitBoard<W, H>,
        next: Color,
    ) -> u128 {
        debug_assert_eq!(self.cells as usize, W * H);
        let next_bit = u128::from(next == Color::X);
        u128::from(board.occupancy())
            | u128::from(board.colors()) << self.cells
            | next_bit << (2 * self.cells)
            | u128::from(board.empty_count()) << (2 * self.cells + 1)
    }

    pub(crate) fn unpack<const W: usize, const H: usize>(
        self,
        code: u128,
    ) -> Result<(BitBoard<W, H>, Color), FormatError> {
        debug_assert_eq!(self.cells as usize, W * H);
        let bad = |reason| FormatError::BadEncoding { code, reason };

        if code >> self.width() != 0 {
            return Err(bad("bits set beyond the layout"));
        }

        let occupancy = (code & self.plane_mask()) as u64;
        let color = ((code >> self.cells) & self.plane_mask()) as u64;
        if color & !occupancy != 0 {
            return Err(bad("color bit set on an empty cell"));
        }

        let next = Color::from_bit((code >> (2 * self.cells)) & 1 == 1);
        let empty = (code >> (2 * self.cells + 1)) as u32;
        if empty != self.cells - occupancy.count_ones() {
            return Err(bad("empty count disagrees with occupancy"));
        }

        Ok((BitBoard::from_planes(occupancy, color), next))
    }
}

/// Counters collected by [`Verifier::verify`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Verification {
    /// Distinct positions checked.
    pub states: usize,
    /// Checked positions where the game is over.
    pub terminal: usize,
    /// Deepest ply at which a new position was found.
    pub max_depth: usize,
}

/// Walks every position reachable from a root and checks that
/// `decode(encode(s)) == s` for each one.
///
/// Positions are keyed by their encoding, so a position reached through
/// several move orders is checked once.
#[derive(Clone, Copy, Debug)]
pub struct Verifier {
    max_depth: Option<usize>,
}

impl Verifier {
    /// Visit the whole reachable space.
    pub fn exhaustive() -> Self {
        Verifier { max_depth: None }
    }

    /// Visit positions at most `depth` plies (passes included) from the root.
    pub fn to_depth(depth: usize) -> Self {
        Verifier {
            max_depth: Some(depth),
        }
    }

    /// Run the check, stopping at the first failure.
    pub fn verify<G: Game>(&self, root: G) -> Result<Verification, VerifyError> {
        // Shallowest depth each position was reached at. With a depth bound,
        // a position first found deep is expanded again if a shorter path
        // turns up later.
        let mut seen: HashMap<G::Code, usize> = HashMap::new();
        let mut stack = vec![(root, 0usize)];
        let mut report = Verification::default();

        while let Some((state, depth)) = stack.pop() {
            let code = state.encode();
            match seen.get(&code) {
                Some(&known) if known <= depth || self.max_depth.is_none() => continue,
                Some(_) => {}
                None => {
                    check_round_trip(&state, code)?;
                    report.states += 1;
                    report.max_depth = report.max_depth.max(depth);
                    if state.status().is_over() {
                        report.terminal += 1;
                    }
                }
            }
            seen.insert(code, depth);

            if state.status().is_over() || self.max_depth.is_some_and(|max| depth >= max) {
                continue;
            }

            let before = stack.len();
            stack.extend(state.successors().map(|(_, next)| (next, depth + 1)));
            if stack.len() == before {
                if let Some(passed) = state.forced_pass() {
                    stack.push((passed, depth + 1));
                }
            }
        }

        Ok(report)
    }
}

fn check_round_trip<G: Game>(state: &G, code: G::Code) -> Result<(), VerifyError> {
    let decoded = G::decode(code).map_err(|source| VerifyError::Decode {
        state: state.key(),
        source,
    })?;
    if decoded != *state {
        return Err(VerifyError::RoundTrip {
            state: state.key(),
            code: format!("{code:#x}"),
            decoded: decoded.key(),
        });
    }
    Ok(())
}

/// Count move sequences of `depth` plies from `state`, without merging
/// transpositions. A sequence that ends early (game over, or neither side
/// can move) counts once. Forced passes count as plies.
pub fn count_paths<G: Game>(state: &G, depth: usize) -> u64 {
    if depth == 0 || state.status().is_over() {
        return 1;
    }

    let mut total = 0;
    let mut any = false;
    for (_, next) in state.successors() {
        any = true;
        total += count_paths(&next, depth - 1);
    }

    if any {
        total
    } else if let Some(passed) = state.forced_pass() {
        count_paths(&passed, depth - 1)
    } else {
        1
    }
}
