//! Directional walks over a [`BitBoard`].
//!
//! A ray steps from a cell by a fixed index offset. Row-major indices wrap
//! from the last column of one row into the first column of the next, so
//! every step checks that the column moved by at most one; a larger jump
//! ends the ray.

use crate::bitboard::{BitBoard, Color};

/// The 8 compass directions, clockwise from top-left.
///
/// The declaration order fixes each direction's bit in a capture witness.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Direction {
    NorthWest = 0,
    North = 1,
    NorthEast = 2,
    East = 3,
    SouthEast = 4,
    South = 5,
    SouthWest = 6,
    West = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
    ];

    /// Bit for this direction in a witness mask.
    #[inline]
    pub const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Index offset of one step on a board `width` cells wide.
    #[inline]
    pub const fn offset(self, width: usize) -> isize {
        let w = width as isize;
        match self {
            Direction::NorthWest => -w - 1,
            Direction::North => -w,
            Direction::NorthEast => -w + 1,
            Direction::East => 1,
            Direction::SouthEast => w + 1,
            Direction::South => w,
            Direction::SouthWest => w - 1,
            Direction::West => -1,
        }
    }
}

/// Cells visited walking away from an origin, origin excluded.
#[derive(Clone, Debug)]
pub struct Ray<const W: usize, const H: usize> {
    current: usize,
    step: isize,
    done: bool,
}

impl<const W: usize, const H: usize> Ray<W, H> {
    pub fn new(origin: usize, direction: Direction) -> Self {
        debug_assert!(origin < W * H);
        Ray {
            current: origin,
            step: direction.offset(W),
            done: false,
        }
    }
}

impl<const W: usize, const H: usize> Iterator for Ray<W, H> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }

        let next = match self.current.checked_add_signed(self.step) {
            Some(next) if next < W * H => next,
            _ => {
                self.done = true;
                return None;
            }
        };

        // Row-boundary guard.
        if (self.current % W).abs_diff(next % W) > 1 {
            self.done = true;
            return None;
        }

        self.current = next;
        Some(next)
    }
}

impl<const W: usize, const H: usize> BitBoard<W, H> {
    /// Walk from `origin` in `direction` without crossing a row seam.
    #[inline]
    pub fn ray(&self, origin: usize, direction: Direction) -> Ray<W, H> {
        Ray::new(origin, direction)
    }
}

/// A capture run: `len` opposing pieces from `origin`, closed by the mover's
/// piece at `anchor`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Run {
    pub origin: usize,
    pub direction: Direction,
    pub anchor: usize,
    pub len: usize,
}

impl Run {
    /// Cells that change color when the run is captured (anchor excluded).
    pub fn captured<const W: usize, const H: usize>(&self) -> impl Iterator<Item = usize> {
        Ray::<W, H>::new(self.origin, self.direction).take(self.len)
    }
}

/// Look for a capture run for `mover` starting next to `origin`.
///
/// Returns None when the ray hits an empty cell, the board edge, or a row
/// seam first, or when the mover's own piece is directly adjacent.
pub fn walk<const W: usize, const H: usize>(
    board: &BitBoard<W, H>,
    origin: usize,
    direction: Direction,
    mover: Color,
) -> Option<Run> {
    let mut len = 0;
    for cell in board.ray(origin, direction) {
        match board.cell(cell) {
            None => return None,
            Some(color) if color == mover => {
                return (len > 0).then_some(Run {
                    origin,
                    direction,
                    anchor: cell,
                    len,
                });
            }
            Some(_) => len += 1,
        }
    }
    None
}
