//! Core board vocabulary shared by the board, the heuristics and the search.
//!
//! Row 0 is the row printed at the bottom of the board (rank `1` in move
//! text), column 0 is column `A`.

use std::fmt;

pub const BOARD_SIZE: usize = 8;
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
pub const DIAGONAL_COUNT: usize = 2 * BOARD_SIZE - 1;

/// Square contents indexed `[row][col]`.
pub type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Color of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Digit used for this color in board text.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Color::Black => 2,
            Color::White => 4,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// Content of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Color::Black),
            Cell::White => Some(Color::White),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    pub fn is(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// Digit used for this square in board text (`0` when empty).
    #[inline]
    pub const fn code(self) -> u8 {
        match self.color() {
            Some(color) => color.code(),
            None => 0,
        }
    }
}

impl From<Color> for Cell {
    #[inline]
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Cell::Black,
            Color::White => Cell::White,
        }
    }
}

/// The four lines a pawn can travel along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
    /// Lines where row and column grow together.
    RisingDiagonal,
    /// Lines where row grows while column shrinks.
    FallingDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Row,
        Axis::Column,
        Axis::RisingDiagonal,
        Axis::FallingDiagonal,
    ];

    /// The two opposite `(d_row, d_col)` unit steps along this axis.
    #[inline]
    pub const fn steps(self) -> [(i32, i32); 2] {
        match self {
            Axis::Row => [(0, -1), (0, 1)],
            Axis::Column => [(-1, 0), (1, 0)],
            Axis::RisingDiagonal => [(-1, -1), (1, 1)],
            Axis::FallingDiagonal => [(1, -1), (-1, 1)],
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!((row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE);
        Self { row, col }
    }

    /// Builds a coordinate from signed indices, `None` when off the board.
    #[inline]
    pub fn try_new(row: i32, col: i32) -> Option<Self> {
        let range = 0..BOARD_SIZE as i32;
        if range.contains(&row) && range.contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        Self::try_new(i32::from(self.row) + d_row, i32::from(self.col) + d_col)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub const fn is_on_outer_ring(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        self.row == 0 || self.row == last || self.col == 0 || self.col == last
    }

    #[inline]
    pub const fn rising_diagonal(self) -> usize {
        self.col as usize + (BOARD_SIZE - 1) - self.row as usize
    }

    #[inline]
    pub const fn falling_diagonal(self) -> usize {
        self.row as usize + self.col as usize
    }

    /// Iterates every square in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..SQUARE_COUNT).map(Coord::from_index)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'A' + self.col) as char, self.row + 1)
    }
}
