//! Move text: column letter and rank digit for the origin, then for the
//! destination, e.g. `B1B3`.
//!
//! Input is either that compact form or the server's `"B1 - B3"`, with
//! surrounding whitespace allowed. Columns are upper-case letters. Output is
//! always the compact form.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_types::Coord;
use crate::game_state::line_move::Move;

pub fn parse_move(text: &str) -> EngineResult<Move> {
    let chars: Vec<char> = text.trim().chars().collect();

    let (from_col, from_row, to_col, to_row) = match chars.as_slice() {
        &[from_col, from_row, to_col, to_row]
        | &[from_col, from_row, ' ', '-', ' ', to_col, to_row] => {
            (from_col, from_row, to_col, to_row)
        }
        _ => return Err(EngineError::InvalidMoveText(text.to_owned())),
    };

    let from = parse_square(from_col, from_row, text)?;
    let to = parse_square(to_col, to_row, text)?;
    Ok(Move::new(from, to))
}

pub fn move_to_text(mv: &Move) -> String {
    format!("{}{}", mv.from, mv.to)
}

fn parse_square(col: char, row: char, text: &str) -> EngineResult<Coord> {
    if !col.is_ascii_alphabetic() || !row.is_ascii_digit() {
        return Err(EngineError::InvalidMoveText(text.to_owned()));
    }

    let col = i32::from(col as u8) - i32::from(b'A');
    let row = i32::from(row as u8) - i32::from(b'1');
    Coord::try_new(row, col).ok_or(EngineError::CoordOutOfRange { row, col })
}
