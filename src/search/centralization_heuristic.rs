//! Centralization score: sum of per-pawn distance-from-edge weights.

use crate::game_state::board_types::{Color, Coord, Grid, BOARD_SIZE};
use crate::game_state::line_move::Move;

/// Distance of `i` to the nearest edge along one axis.
#[inline]
const fn edge_distance(i: u8) -> i32 {
    let last = (BOARD_SIZE - 1) as u8;
    let d = if i < last - i { i } else { last - i };
    d as i32
}

/// `0` on the border, `3` on the central four squares.
#[inline]
pub const fn weight(square: Coord) -> i32 {
    let r = edge_distance(square.row);
    let c = edge_distance(square.col);
    if r < c {
        r
    } else {
        c
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CentralizationHeuristic {
    scores: [i32; 2],
}

impl CentralizationHeuristic {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut scores = [0i32; 2];
        for square in Coord::all() {
            if let Some(color) = grid[square.row as usize][square.col as usize].color() {
                scores[color.index()] += weight(square);
            }
        }
        Self { scores }
    }

    #[inline]
    pub fn value(&self, color: Color) -> i32 {
        self.scores[color.index()]
    }

    /// Accounts for `mv` having been applied. `mv` must carry the recorded
    /// mover and captured squares.
    pub fn apply(&mut self, mv: &Move) {
        self.shift(mv, 1);
    }

    /// Exact inverse of [`Self::apply`].
    pub fn undo(&mut self, mv: &Move) {
        self.shift(mv, -1);
    }

    fn shift(&mut self, mv: &Move, sign: i32) {
        let Some(mover) = mv.mover.color() else {
            return;
        };
        let from = weight(mv.from);
        let to = weight(mv.to);

        self.scores[mover.index()] += sign * (to - from);
        if let Some(captured) = mv.captured.color() {
            self.scores[captured.index()] -= sign * to;
        }
    }
}
