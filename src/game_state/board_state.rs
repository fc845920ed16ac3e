//! Core incremental board representation.
//!
//! `BoardState` stores the 8x8 grid together with caches that search reads
//! at every node: per-line occupancy counts for the four move axes, live pawn
//! counts and both positional heuristics. `apply` and `undo` are the only
//! operations that mutate the grid and keep every cache in lock-step, so the
//! search can walk the whole tree on one board without copying it.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::board_types::{
    Axis, Cell, Color, Coord, Grid, BOARD_SIZE, DIAGONAL_COUNT,
};
use crate::game_state::line_move::Move;
use crate::move_generation::line_move_generator::generate_moves;
use crate::search::centralization_heuristic::CentralizationHeuristic;
use crate::search::grouping_heuristic::{GroupingHeuristic, WindowSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    grid: Grid,

    // Occupancy caches, either color.
    row_counts: [u8; BOARD_SIZE],
    column_counts: [u8; BOARD_SIZE],
    rising_counts: [u8; DIAGONAL_COUNT],
    falling_counts: [u8; DIAGONAL_COUNT],

    pawn_counts: [u8; 2],

    grouping: GroupingHeuristic,
    centralization: CentralizationHeuristic,
}

impl BoardState {
    /// Builds a board and computes every cache from scratch.
    pub fn from_grid(grid: Grid) -> Self {
        let mut board = Self {
            grid,
            row_counts: [0; BOARD_SIZE],
            column_counts: [0; BOARD_SIZE],
            rising_counts: [0; DIAGONAL_COUNT],
            falling_counts: [0; DIAGONAL_COUNT],
            pawn_counts: [0; 2],
            grouping: GroupingHeuristic::from_grid(&grid),
            centralization: CentralizationHeuristic::from_grid(&grid),
        };

        for square in Coord::all() {
            if let Some(color) = board.cell(square).color() {
                board.add_to_lines(square);
                board.pawn_counts[color.index()] += 1;
            }
        }

        board
    }

    /// Builds a board from rows of text digits (`0` empty, `2` black,
    /// `4` white), row 0 first.
    pub fn from_codes(rows: &[[u8; BOARD_SIZE]; BOARD_SIZE]) -> EngineResult<Self> {
        let mut grid = Grid::default();
        for (row, codes) in rows.iter().enumerate() {
            for (col, &code) in codes.iter().enumerate() {
                grid[row][col] = cell_from_code(code).ok_or_else(|| {
                    EngineError::InvalidBoardToken {
                        index: row * BOARD_SIZE + col,
                        token: code.to_string(),
                    }
                })?;
            }
        }
        Ok(Self::from_grid(grid))
    }

    /// Standard start position: black on the first and last rows, white on
    /// the first and last columns, corners empty.
    pub fn standard() -> Self {
        let mut grid = Grid::default();
        let last = BOARD_SIZE - 1;
        for i in 1..last {
            grid[0][i] = Cell::Black;
            grid[last][i] = Cell::Black;
            grid[i][0] = Cell::White;
            grid[i][last] = Cell::White;
        }
        Self::from_grid(grid)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn cell(&self, square: Coord) -> Cell {
        self.grid[square.row as usize][square.col as usize]
    }

    /// Number of occupied squares on the line through `square` along `axis`.
    #[inline]
    pub fn line_count(&self, square: Coord, axis: Axis) -> u8 {
        match axis {
            Axis::Row => self.row_counts[square.row as usize],
            Axis::Column => self.column_counts[square.col as usize],
            Axis::RisingDiagonal => self.rising_counts[square.rising_diagonal()],
            Axis::FallingDiagonal => self.falling_counts[square.falling_diagonal()],
        }
    }

    #[inline]
    pub fn pawn_count(&self, color: Color) -> u8 {
        self.pawn_counts[color.index()]
    }

    #[inline]
    pub fn grouping(&self) -> &GroupingHeuristic {
        &self.grouping
    }

    #[inline]
    pub fn centralization(&self) -> &CentralizationHeuristic {
        &self.centralization
    }

    /// Squares occupied by `color`, row-major.
    pub fn pawns(&self, color: Color) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |&square| self.cell(square).is(color))
    }

    /// Plays `mv` and records the origin and destination contents into it.
    ///
    /// No legality check is made; the caller pairs every `apply` with an
    /// `undo` of the same move in reverse order.
    pub fn apply(&mut self, mv: &mut Move) {
        mv.mover = self.cell(mv.from);
        mv.captured = self.cell(mv.to);
        debug_assert!(!mv.mover.is_empty(), "apply from empty square {}", mv.from);

        let windows = WindowSet::around(mv.from, mv.to);
        let before = windows.measure(&self.grid);

        self.set_cell(mv.to, mv.mover);
        self.set_cell(mv.from, Cell::Empty);

        self.remove_from_lines(mv.from);
        match mv.captured.color() {
            Some(captured) => self.pawn_counts[captured.index()] -= 1,
            None => self.add_to_lines(mv.to),
        }

        self.grouping.update(&self.grid, &windows, before);
        self.centralization.apply(mv);

        debug_assert!(self.is_consistent(), "caches diverged after {mv}");
    }

    /// Exact inverse of [`Self::apply`] for the same, already applied move.
    pub fn undo(&mut self, mv: &Move) {
        let windows = WindowSet::around(mv.from, mv.to);
        let before = windows.measure(&self.grid);

        self.set_cell(mv.from, mv.mover);
        self.set_cell(mv.to, mv.captured);

        self.add_to_lines(mv.from);
        match mv.captured.color() {
            Some(captured) => self.pawn_counts[captured.index()] += 1,
            None => self.remove_from_lines(mv.to),
        }

        self.grouping.update(&self.grid, &windows, before);
        self.centralization.undo(mv);

        debug_assert!(self.is_consistent(), "caches diverged undoing {mv}");
    }

    /// Applies a move received from outside the engine after checking that
    /// it is legal for the pawn standing on its origin.
    pub fn apply_checked(&mut self, mv: Move) -> EngineResult<Move> {
        let Some(color) = self.cell(mv.from).color() else {
            return Err(EngineError::EmptyOrigin { square: mv.from });
        };

        let Some(mut legal) = generate_moves(self, color)
            .into_iter()
            .find(|candidate| candidate.same_squares(&mv))
        else {
            return Err(EngineError::IllegalMove { mv });
        };

        self.apply(&mut legal);
        Ok(legal)
    }

    /// True when every cache equals a recomputation from the grid.
    pub fn is_consistent(&self) -> bool {
        *self == Self::from_grid(self.grid)
    }

    #[inline]
    fn set_cell(&mut self, square: Coord, cell: Cell) {
        self.grid[square.row as usize][square.col as usize] = cell;
    }

    #[inline]
    fn add_to_lines(&mut self, square: Coord) {
        self.row_counts[square.row as usize] += 1;
        self.column_counts[square.col as usize] += 1;
        self.rising_counts[square.rising_diagonal()] += 1;
        self.falling_counts[square.falling_diagonal()] += 1;
    }

    #[inline]
    fn remove_from_lines(&mut self, square: Coord) {
        self.row_counts[square.row as usize] -= 1;
        self.column_counts[square.col as usize] -= 1;
        self.rising_counts[square.rising_diagonal()] -= 1;
        self.falling_counts[square.falling_diagonal()] -= 1;
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::standard()
    }
}

/// Maps a board-text digit to a square.
#[inline]
pub fn cell_from_code(code: u8) -> Option<Cell> {
    match code {
        0 => Some(Cell::Empty),
        2 => Some(Cell::Black),
        4 => Some(Cell::White),
        _ => None,
    }
}
