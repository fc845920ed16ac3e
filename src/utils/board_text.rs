//! Board text as sent by the game server, and a console rendering for logs.
//!
//! The server sends 64 whitespace-separated digits, row-major starting from
//! row 0 (rank 1): `0` empty, `2` black, `4` white.

use std::str::FromStr;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_state::{cell_from_code, BoardState};
use crate::game_state::board_types::{Coord, Grid, BOARD_SIZE, SQUARE_COUNT};

pub fn parse_board(text: &str) -> EngineResult<BoardState> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != SQUARE_COUNT {
        return Err(EngineError::InvalidBoardLength {
            found: tokens.len(),
        });
    }

    let mut grid = Grid::default();
    for (index, token) in tokens.into_iter().enumerate() {
        let cell = match token.as_bytes() {
            [digit @ b'0'..=b'9'] => cell_from_code(digit - b'0'),
            _ => None,
        }
        .ok_or_else(|| EngineError::InvalidBoardToken {
            index,
            token: token.to_owned(),
        })?;
        grid[index / BOARD_SIZE][index % BOARD_SIZE] = cell;
    }

    Ok(BoardState::from_grid(grid))
}

impl FromStr for BoardState {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_board(s)
    }
}

/// Inverse of [`parse_board`].
pub fn board_to_text(board: &BoardState) -> String {
    Coord::all()
        .map(|square| board.cell(square).code().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Framed grid with rank 8 on top, one digit per square.
pub fn render_board(board: &BoardState) -> String {
    let border = "*".repeat(BOARD_SIZE * 2 + 3);
    let mut out = String::with_capacity((BOARD_SIZE + 2) * (border.len() + 1));

    out.push_str(&border);
    out.push('\n');
    for row in (0..BOARD_SIZE).rev() {
        out.push_str("* ");
        for col in 0..BOARD_SIZE {
            let square = Coord::new(row as u8, col as u8);
            out.push(char::from(b'0' + board.cell(square).code()));
            out.push(' ');
        }
        out.push_str("*\n");
    }
    out.push_str(&border);

    out
}
