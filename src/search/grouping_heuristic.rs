//! Euler-number estimate of how many separate groups each color forms.
//!
//! A 2x2 window is slid over the board padded by one empty ring, giving 81
//! windows. For each color a window scores (in quarters):
//! one own cell `+1`, two diagonal own cells `-2`, three own cells `-1`,
//! anything else `0`. The sum divided by four tends to 1 as the color's pawns
//! merge into a single 8-connected group, and can never exceed 1 for a
//! connected group.
//!
//! Scores are kept in integer quarters so incremental updates are exact. The
//! heuristic owns no board: every update receives a read-only view of the
//! grid together with the set of windows the move touched.

use crate::game_state::board_types::{Cell, Color, Coord, Grid, BOARD_SIZE};

/// Windows per side of the padded board.
const WINDOW_SPAN: usize = BOARD_SIZE + 1;

/// Windows covering the origin and destination of one move.
///
/// Window `(r, c)` covers rows `r - 1..=r` and columns `c - 1..=c`, so a
/// square touches four windows and two squares at most eight.
#[derive(Debug, Clone, Copy)]
pub struct WindowSet {
    windows: [(u8, u8); 8],
    len: usize,
}

impl WindowSet {
    pub fn around(a: Coord, b: Coord) -> Self {
        let mut set = Self {
            windows: [(0, 0); 8],
            len: 0,
        };
        for square in [a, b] {
            for d_row in 0..2u8 {
                for d_col in 0..2u8 {
                    set.insert((square.row + d_row, square.col + d_col));
                }
            }
        }
        set
    }

    fn insert(&mut self, window: (u8, u8)) {
        if !self.windows[..self.len].contains(&window) {
            self.windows[self.len] = window;
            self.len += 1;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Per-color quarter sums over the windows in this set.
    pub fn measure(&self, grid: &Grid) -> [i32; 2] {
        let mut sums = [0i32; 2];
        for &(row, col) in &self.windows[..self.len] {
            for color in Color::ALL {
                sums[color.index()] += window_quarters(grid, row as usize, col as usize, color);
            }
        }
        sums
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupingHeuristic {
    quarters: [i32; 2],
}

impl GroupingHeuristic {
    /// Full scan over all 81 windows.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut quarters = [0i32; 2];
        for row in 0..WINDOW_SPAN {
            for col in 0..WINDOW_SPAN {
                for color in Color::ALL {
                    quarters[color.index()] += window_quarters(grid, row, col, color);
                }
            }
        }
        Self { quarters }
    }

    /// Grouping score of `color`.
    #[inline]
    pub fn value(&self, color: Color) -> f64 {
        f64::from(self.quarters[color.index()]) / 4.0
    }

    #[inline]
    pub fn quarters(&self, color: Color) -> i32 {
        self.quarters[color.index()]
    }

    /// Folds in the change of the touched windows. `before` is the
    /// `WindowSet::measure` taken before the grid changed, `grid` is the
    /// grid after the change.
    #[inline]
    pub fn update(&mut self, grid: &Grid, windows: &WindowSet, before: [i32; 2]) {
        let after = windows.measure(grid);
        for color in Color::ALL {
            let i = color.index();
            self.quarters[i] += after[i] - before[i];
        }
    }
}

#[inline]
fn cell_at(grid: &Grid, row: usize, col: usize) -> Cell {
    // Row/column indices are shifted by one: index 0 is the virtual padding.
    if row == 0 || col == 0 || row > BOARD_SIZE || col > BOARD_SIZE {
        Cell::Empty
    } else {
        grid[row - 1][col - 1]
    }
}

/// Quarter score of window `(row, col)` for `color`.
fn window_quarters(grid: &Grid, row: usize, col: usize, color: Color) -> i32 {
    // Padded coordinates: window (row, col) covers padded rows row..=row+1.
    let top_left = cell_at(grid, row, col).is(color);
    let top_right = cell_at(grid, row, col + 1).is(color);
    let bottom_left = cell_at(grid, row + 1, col).is(color);
    let bottom_right = cell_at(grid, row + 1, col + 1).is(color);

    let count = [top_left, top_right, bottom_left, bottom_right]
        .iter()
        .filter(|&&own| own)
        .count();

    match count {
        1 => 1,
        2 if (top_left && bottom_right) || (top_right && bottom_left) => -2,
        3 => -1,
        _ => 0,
    }
}
