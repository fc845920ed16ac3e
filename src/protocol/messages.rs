//! Messages sent by the game server.
//!
//! Each message is one read from the socket: a single ASCII tag byte followed
//! by an optional payload.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_state::BoardState;
use crate::game_state::line_move::Move;
use crate::utils::board_text::parse_board;
use crate::utils::move_text::parse_move;

const START_AS_WHITE_TAG: u8 = b'1';
const START_AS_BLACK_TAG: u8 = b'2';
const OPPONENT_MOVE_TAG: u8 = b'3';
const INVALID_MOVE_TAG: u8 = b'4';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// New game, the engine plays white and moves first.
    StartAsWhite(BoardState),
    /// New game, the engine plays black and waits for white.
    StartAsBlack(BoardState),
    /// The opponent's move; the engine must answer.
    OpponentMove(Move),
    /// The server rejected the engine's last move.
    InvalidMove,
}

impl ServerMessage {
    pub fn decode(bytes: &[u8]) -> EngineResult<Self> {
        let (&tag, payload) = bytes.split_first().ok_or(EngineError::EmptyMessage)?;
        let payload = String::from_utf8_lossy(payload);
        let payload = payload.trim_matches(|ch: char| ch.is_whitespace() || ch == '\0');

        match tag {
            START_AS_WHITE_TAG => Ok(Self::StartAsWhite(parse_board(payload)?)),
            START_AS_BLACK_TAG => Ok(Self::StartAsBlack(parse_board(payload)?)),
            OPPONENT_MOVE_TAG => Ok(Self::OpponentMove(parse_move(payload)?)),
            INVALID_MOVE_TAG => Ok(Self::InvalidMove),
            other => Err(EngineError::UnknownMessageTag(other)),
        }
    }
}
