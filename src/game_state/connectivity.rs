//! Win detection: a side wins once all of its pawns form one 8-connected group.

use std::collections::VecDeque;

use crate::game_state::board_state::BoardState;
use crate::game_state::board_types::{Color, Coord, BOARD_SIZE};

const NEIGHBOURS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Flood fill from the first pawn of `color`; true when the fill reaches
/// every live pawn of that color.
///
/// A color without pawns has nothing to disconnect and reports `true`.
/// Callers that need a winner must skip such a color, see [`has_won`].
pub fn is_fully_connected(board: &BoardState, color: Color) -> bool {
    let live = usize::from(board.pawn_count(color));
    let Some(seed) = board.pawns(color).next() else {
        return true;
    };

    let mut visited = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut queue = VecDeque::with_capacity(live);
    visited[seed.row as usize][seed.col as usize] = true;
    queue.push_back(seed);

    let mut reached = 0usize;
    while let Some(square) = queue.pop_front() {
        reached += 1;
        for (d_row, d_col) in NEIGHBOURS {
            let Some(next) = square.offset(d_row, d_col) else {
                continue;
            };
            let seen = &mut visited[next.row as usize][next.col as usize];
            if !*seen && board.cell(next).is(color) {
                *seen = true;
                queue.push_back(next);
            }
        }
    }

    reached == live
}

/// True when `color` has pawns left and they are all connected.
///
/// The grouping score of a single group never exceeds 1, so larger scores
/// skip the flood fill.
pub fn has_won(board: &BoardState, color: Color) -> bool {
    board.pawn_count(color) > 0
        && board.grouping().value(color) <= 1.0
        && is_fully_connected(board, color)
}

/// The winning color, if any. Black is examined first, so a move that
/// connects both sides at once counts as a black win.
pub fn winner(board: &BoardState) -> Option<Color> {
    Color::ALL.into_iter().find(|&color| has_won(board, color))
}

/// Number of separate groups `color` forms; used by diagnostics.
pub fn group_count(board: &BoardState, color: Color) -> usize {
    let mut visited = [[false; BOARD_SIZE]; BOARD_SIZE];
    let mut groups = 0;

    for start in board.pawns(color) {
        if visited[start.row as usize][start.col as usize] {
            continue;
        }
        groups += 1;
        visited[start.row as usize][start.col as usize] = true;
        let mut stack: Vec<Coord> = vec![start];
        while let Some(square) = stack.pop() {
            for (d_row, d_col) in NEIGHBOURS {
                if let Some(next) = square.offset(d_row, d_col) {
                    let seen = &mut visited[next.row as usize][next.col as usize];
                    if !*seen && board.cell(next).is(color) {
                        *seen = true;
                        stack.push(next);
                    }
                }
            }
        }
    }

    groups
}
