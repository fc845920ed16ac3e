//! Line-of-action move generation.
//!
//! A pawn travels along a row, column or diagonal exactly as many squares as
//! there are pawns (either color) on that whole line. It may jump friendly
//! pawns but not enemy ones, may not land on a friendly pawn, and captures by
//! landing on an enemy pawn.

use crate::game_state::board_state::BoardState;
use crate::game_state::board_types::{Axis, Color, Coord};
use crate::game_state::line_move::Move;

/// Destinations per pawn: two directions on each of four axes.
pub const MAX_MOVES_PER_PAWN: usize = 8;

/// All legal moves for `color`, origins in row-major order and, per origin,
/// row, column, rising diagonal then falling diagonal.
pub fn generate_moves(board: &BoardState, color: Color) -> Vec<Move> {
    let mut moves =
        Vec::with_capacity(usize::from(board.pawn_count(color)) * MAX_MOVES_PER_PAWN);
    generate_moves_into(board, color, &mut moves);
    moves
}

/// Appends the legal moves for `color` to `moves`.
pub fn generate_moves_into(board: &BoardState, color: Color, moves: &mut Vec<Move>) {
    for from in board.pawns(color) {
        for axis in Axis::ALL {
            let distance = i32::from(board.line_count(from, axis));
            for (d_row, d_col) in axis.steps() {
                if let Some(to) = line_destination(board, color, from, d_row, d_col, distance) {
                    moves.push(Move {
                        from,
                        to,
                        mover: color.into(),
                        captured: board.cell(to),
                    });
                }
            }
        }
    }
}

/// Number of legal moves for `color` without collecting them.
pub fn count_moves(board: &BoardState, color: Color) -> usize {
    let mut count = 0;
    for from in board.pawns(color) {
        for axis in Axis::ALL {
            let distance = i32::from(board.line_count(from, axis));
            for (d_row, d_col) in axis.steps() {
                if line_destination(board, color, from, d_row, d_col, distance).is_some() {
                    count += 1;
                }
            }
        }
    }
    count
}

#[inline]
fn line_destination(
    board: &BoardState,
    color: Color,
    from: Coord,
    d_row: i32,
    d_col: i32,
    distance: i32,
) -> Option<Coord> {
    let to = from.offset(d_row * distance, d_col * distance)?;
    if board.cell(to).is(color) {
        return None;
    }

    let enemy = color.opposite();
    for step in 1..distance {
        let between = from.offset(d_row * step, d_col * step)?;
        if board.cell(between).is(enemy) {
            return None;
        }
    }

    Some(to)
}
