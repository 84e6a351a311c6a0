//! Bounded 2D grid with 8-connected (king-move) neighbourhood.

use crate::cell::Cell;
use crate::config::ConfigError;
use smallvec::SmallVec;

/// Neighbour list of a single cell. Never spills: a cell has at most 8.
pub type Neighbours = SmallVec<[Cell; 8]>;

/// All 8 offsets `(dx, dy)`, column-major: W column, centre column, E column.
const OFFSETS_8: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A two-dimensional square grid with absorbing edges.
///
/// Valid cells are `[0, cols) × [0, rows)`. Neighbours include the four
/// cardinal directions plus four diagonals; out-of-bounds neighbours are
/// omitted, so corners have 3 neighbours and non-corner edge cells have 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
}

impl Grid {
    /// Coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Smallest accepted size per axis. Every cell of such a grid has at
    /// least one neighbour.
    pub const MIN_DIM: u32 = 2;

    /// Create a `cols × rows` grid.
    ///
    /// Returns `Err(ConfigError::GridTooSmall)` if either axis is below
    /// [`MIN_DIM`](Self::MIN_DIM), `Err(ConfigError::DimensionTooLarge)` if
    /// either exceeds `i32::MAX`, and `Err(ConfigError::CellCountOverflow)`
    /// if `cols * rows` does not fit in `usize`.
    pub fn new(cols: u32, rows: u32) -> Result<Self, ConfigError> {
        if cols < Self::MIN_DIM || rows < Self::MIN_DIM {
            return Err(ConfigError::GridTooSmall { cols, rows });
        }
        if cols > Self::MAX_DIM {
            return Err(ConfigError::DimensionTooLarge {
                name: "cols",
                value: cols,
                max: Self::MAX_DIM,
            });
        }
        if rows > Self::MAX_DIM {
            return Err(ConfigError::DimensionTooLarge {
                name: "rows",
                value: rows,
                max: Self::MAX_DIM,
            });
        }
        (cols as usize)
            .checked_mul(rows as usize)
            .ok_or(ConfigError::CellCountOverflow { cols, rows })?;
        Ok(Self { cols, rows })
    }

    /// Number of columns (valid `x` is `0..cols`).
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows (valid `y` is `0..rows`).
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Whether `cell` lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.cols && (cell.y as u32) < self.rows
    }

    /// Row-major index of `cell`, or `None` if it is out of bounds.
    pub fn index(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.y as usize * self.cols as usize + cell.x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index`](Self::index).
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index >= self.cell_count() {
            return None;
        }
        let cols = self.cols as usize;
        Some(Cell::new((index % cols) as i32, (index / cols) as i32))
    }

    /// The in-bounds king-move neighbours of `cell`.
    ///
    /// Order follows the fixed offset table; callers that need an unbiased
    /// order must shuffle.
    pub fn neighbours(&self, cell: Cell) -> Neighbours {
        OFFSETS_8
            .iter()
            .map(|&(dx, dy)| cell.offset(dx, dy))
            .filter(|&n| self.contains(n))
            .collect()
    }
}
