use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::board_types::{Cell, Coord};

/// A pawn move from `from` to `to`.
///
/// `mover` and `captured` record what stood on the origin and destination
/// squares when the move was applied; `BoardState::undo` uses them to restore
/// the position. Two moves are equal when origin and destination match, the
/// recorded squares do not take part in identity.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub mover: Cell,
    pub captured: Cell,
}

impl Move {
    #[inline]
    pub const fn new(from: Coord, to: Coord) -> Self {
        Self {
            from,
            to,
            mover: Cell::Empty,
            captured: Cell::Empty,
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }

    #[inline]
    pub fn same_squares(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.same_squares(other)
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
