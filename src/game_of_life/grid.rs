//! Toroidal grid representation for Game of Life

use crate::error::{LifeError, Result};
use itertools::iproduct;
use serde::Serialize;

/// A single grid position and its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell {
    x: usize,
    y: usize,
    pub living: bool,
}

impl Cell {
    fn dead(x: usize, y: usize) -> Self {
        Self { x, y, living: false }
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }
}

/// A state transition reported by [`Grid::set_living`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellChange {
    pub x: usize,
    pub y: usize,
    pub living: bool,
}

/// Fixed-size grid whose edges wrap around in both directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell dead. Width and height must be at least 1.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width >= 1 && height >= 1, "grid dimensions must be positive");

        let cells = iproduct!(0..height, 0..width)
            .map(|(y, x)| Cell::dead(x, y))
            .collect();

        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major index; coordinates must already be in bounds
    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn check_bounds(&self, x: i64, y: i64) -> Result<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Err(LifeError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((x as usize, y as usize))
    }

    /// Whether `(x, y)` lies inside the grid without wrapping
    pub fn contains(&self, x: i64, y: i64) -> bool {
        self.check_bounds(x, y).is_ok()
    }

    /// Normalize arbitrary coordinates onto the torus
    pub fn wrap(&self, x: i64, y: i64) -> (usize, usize) {
        (
            x.rem_euclid(self.width as i64) as usize,
            y.rem_euclid(self.height as i64) as usize,
        )
    }

    /// Cell at `(x, y)`. Coordinates are not normalized; use [`Grid::wrap`] first
    /// for toroidal lookups.
    pub fn cell_at(&self, x: usize, y: usize) -> Result<&Cell> {
        let (x, y) = self.check_bounds(x as i64, y as i64)?;
        Ok(&self.cells[self.index(x, y)])
    }

    /// Living state at `(x, y)`, or `false` outside the grid
    pub fn is_living(&self, x: usize, y: usize) -> bool {
        self.cell_at(x, y).map(|cell| cell.living).unwrap_or(false)
    }

    /// Count living cells among the 8 wrapped neighbors of `(x, y)`
    pub fn living_neighbor_count(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;

        for (dy, dx) in iproduct!([-1isize, 0, 1], [-1isize, 0, 1]) {
            if dx == 0 && dy == 0 {
                continue;
            }

            // (coord + delta + size) % size keeps the result non-negative
            let nx = (x as isize + dx + self.width as isize) as usize % self.width;
            let ny = (y as isize + dy + self.height as isize) as usize % self.height;

            if self.cells[self.index(nx, ny)].living {
                count += 1;
            }
        }

        count
    }

    /// Set the state of a cell. Returns the change when the state actually
    /// flipped and `None` for a same-state set.
    pub fn set_living(&mut self, x: usize, y: usize, alive: bool) -> Result<Option<CellChange>> {
        let (x, y) = self.check_bounds(x as i64, y as i64)?;
        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];

        if cell.living == alive {
            return Ok(None);
        }

        cell.living = alive;
        Ok(Some(CellChange { x, y, living: alive }))
    }

    /// Apply a transition computed from this grid. Returns whether the cell flipped.
    pub(crate) fn apply_change(&mut self, change: &CellChange) -> bool {
        let idx = self.index(change.x, change.y);
        let cell = &mut self.cells[idx];
        let flipped = cell.living != change.living;
        cell.living = change.living;
        flipped
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Visit every cell in row-major order
    pub fn for_each_cell<F: FnMut(&Cell)>(&self, mut f: F) {
        for cell in &self.cells {
            f(cell);
        }
    }

    /// Coordinates of all living cells in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .filter(|cell| cell.living)
            .map(Cell::position)
            .collect()
    }

    /// Count total living cells by full scan
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.living).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.living)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().count(), 12);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_row_major_order() {
        let grid = Grid::new(3, 2);
        let positions: Vec<_> = grid.cells().map(Cell::position).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let grid = Grid::new(3, 3);
        assert!(grid.cell_at(2, 2).is_ok());
        assert_eq!(
            grid.cell_at(3, 0),
            Err(LifeError::OutOfRange { x: 3, y: 0, width: 3, height: 3 })
        );
        assert!(grid.cell_at(0, 7).is_err());
    }

    #[test]
    fn test_set_living_is_idempotent() {
        let mut grid = Grid::new(3, 3);

        let change = grid.set_living(1, 2, true).unwrap();
        assert_eq!(change, Some(CellChange { x: 1, y: 2, living: true }));

        // Same state again reports nothing
        assert_eq!(grid.set_living(1, 2, true).unwrap(), None);
        assert!(grid.cell_at(1, 2).unwrap().living);

        assert!(grid.set_living(1, 2, false).unwrap().is_some());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_neighbor_counting() {
        let mut grid = Grid::new(5, 5);
        for (x, y) in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)] {
            grid.set_living(x, y, true).unwrap();
        }

        assert_eq!(grid.living_neighbor_count(2, 2), 8);
        assert_eq!(grid.living_neighbor_count(0, 0), 1);
        assert_eq!(grid.living_neighbor_count(1, 1), 2);
    }

    #[test]
    fn test_neighbor_wraparound() {
        let mut grid = Grid::new(6, 4);
        grid.set_living(0, 0, true).unwrap();

        assert_eq!(grid.living_neighbor_count(5, 0), 1);
        assert_eq!(grid.living_neighbor_count(0, 3), 1);
        assert_eq!(grid.living_neighbor_count(5, 3), 1);
        assert_eq!(grid.living_neighbor_count(3, 2), 0);
        // A cell is never its own neighbor
        assert_eq!(grid.living_neighbor_count(0, 0), 0);
    }

    #[test]
    fn test_wrap_normalizes_negative_coordinates() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.wrap(-1, -1), (3, 2));
        assert_eq!(grid.wrap(9, 3), (1, 0));
        assert!(grid.contains(3, 2));
        assert!(!grid.contains(-1, 0));
    }

    #[test]
    fn test_living_cells() {
        let mut grid = Grid::new(3, 3);
        grid.set_living(2, 0, true).unwrap();
        grid.set_living(0, 1, true).unwrap();

        assert_eq!(grid.living_cells(), vec![(2, 0), (0, 1)]);
        assert_eq!(grid.living_count(), 2);

        let mut visited = 0;
        grid.for_each_cell(|_| visited += 1);
        assert_eq!(visited, 9);
    }
}
