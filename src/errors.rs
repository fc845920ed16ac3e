//! Errors used throughout the engine.
//!
//! `EngineError` is the single error type returned by board construction,
//! move parsing, checked move application and the transport session. All of
//! these are recoverable: malformed input from the server is reported to the
//! caller and never aborts the process.

use thiserror::Error;

use crate::game_state::board_types::Coord;
use crate::game_state::line_move::Move;

/// Unified error type for the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Board text did not contain exactly 64 tokens.
    #[error("board text has {found} squares, expected 64")]
    InvalidBoardLength { found: usize },

    /// A board token was not one of `0`, `2` or `4`.
    #[error("invalid board token '{token}' at square {index}")]
    InvalidBoardToken { index: usize, token: String },

    /// Move text could not be parsed.
    #[error("invalid move text '{0}'")]
    InvalidMoveText(String),

    /// A row or column index outside `0..=7`.
    #[error("coordinate out of range: row {row}, column {col}")]
    CoordOutOfRange { row: i32, col: i32 },

    /// Attempted to move from an empty square.
    #[error("no pawn on origin square {square}")]
    EmptyOrigin { square: Coord },

    /// The move is not in the mover's legal move list.
    #[error("illegal move {mv}")]
    IllegalMove { mv: Move },

    /// The side to move has no legal moves.
    #[error("no legal moves available")]
    NoLegalMoves,

    /// A message arrived with an unknown leading tag byte.
    #[error("unknown message tag 0x{0:02x}")]
    UnknownMessageTag(u8),

    /// A zero-length message arrived.
    #[error("empty message")]
    EmptyMessage,

    /// A move message arrived before any game-start message.
    #[error("no game in progress")]
    NoGameInProgress,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
