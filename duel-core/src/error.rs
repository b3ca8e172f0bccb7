//! Error types shared by both games.

/// A cell index outside `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell {index} is outside a board of {len} cells")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Malformed textual literal or state encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("expected {expected} cells, got {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("illegal symbol {symbol:?} at cell {index}")]
    IllegalSymbol { symbol: char, index: usize },

    #[error("piece count difference must be 0 or 1, got {difference}")]
    Parity { difference: i32 },

    #[error("code {code:#x} is not a valid state: {reason}")]
    BadEncoding { code: u128, reason: &'static str },
}

/// A move that cannot be applied to the current position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is already occupied")]
    Occupied(usize),

    #[error("cell {0} is empty")]
    Empty(usize),

    #[error("move at cell {0} captures nothing")]
    NoCapture(usize),

    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    Index(#[from] IndexError),
}

/// Failure of the exhaustive encode/decode check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("round trip of {state:?} through {code} produced {decoded:?}")]
    RoundTrip {
        state: String,
        code: String,
        decoded: String,
    },

    #[error("decoding {state:?} failed: {source}")]
    Decode {
        state: String,
        #[source]
        source: FormatError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_display() {
        let err = FormatError::WrongLength { expected: 9, found: 4 };
        assert_eq!(err.to_string(), "expected 9 cells, got 4");

        let err = FormatError::Parity { difference: 2 };
        assert_eq!(err.to_string(), "piece count difference must be 0 or 1, got 2");
    }

    #[test]
    fn test_move_error_wraps_index_error() {
        let err: MoveError = IndexError { index: 40, len: 36 }.into();
        assert_eq!(err.to_string(), "cell 40 is outside a board of 36 cells");
    }
}
