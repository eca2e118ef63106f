//! The pathfinding grid.
//!
//! A grid owns its cells in row-major order. It carries only static layout
//! (walls, start, end) and display state (visited, path). Search bookkeeping
//! such as distances and predecessors belongs to the adapters' working copy.

use serde::{Deserialize, Serialize};

use crate::coord::{Coord, Direction};
use crate::error::{Error, Result};

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub is_wall: bool,
    pub is_start: bool,
    pub is_end: bool,
    pub is_visited: bool,
    pub is_path: bool,
}

/// A `width x height` cell matrix with at most one start and one end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Option<Coord>,
    end: Option<Coord>,
}

impl Grid {
    /// Create an empty grid with no walls, start or end.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(Error::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); len],
            start: None,
            end: None,
        })
    }

    /// Create an empty `size x size` grid.
    pub fn square(size: usize) -> Result<Self> {
        Self::new(size, size)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check whether a coordinate lies inside the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Row-major index of a coordinate.
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.y * self.width + coord.x)
    }

    /// Coordinate of a row-major index.
    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    /// Get a cell.
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index_of(coord).map(|i| &self.cells[i])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.cells.len()).map(|i| self.coord_of(i))
    }

    /// Out-of-bounds coordinates count as walls.
    pub fn is_wall(&self, coord: Coord) -> bool {
        self.cell(coord).map_or(true, |c| c.is_wall)
    }

    pub fn start(&self) -> Option<Coord> {
        self.start
    }

    pub fn end(&self) -> Option<Coord> {
        self.end
    }

    /// In-bounds neighbors of a cell, in the shared up/right/down/left order.
    ///
    /// Walls are included; callers filter them.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ORDER
            .into_iter()
            .filter_map(move |dir| coord.step(dir))
            .filter(move |n| self.contains(*n))
    }

    /// Move the start marker to `coord`.
    ///
    /// A wall under the new start is removed. If `coord` held the end, the
    /// end marker is cleared.
    pub fn set_start(&mut self, coord: Coord) -> Result<()> {
        let index = self.checked_index(coord)?;
        if let Some(old) = self.start.take() {
            let old_index = self.index_unchecked(old);
            self.cells[old_index].is_start = false;
        }
        if self.end == Some(coord) {
            self.end = None;
        }
        let cell = &mut self.cells[index];
        cell.is_start = true;
        cell.is_end = false;
        cell.is_wall = false;
        self.start = Some(coord);
        Ok(())
    }

    /// Move the end marker to `coord`, mirroring [`Grid::set_start`].
    pub fn set_end(&mut self, coord: Coord) -> Result<()> {
        let index = self.checked_index(coord)?;
        if let Some(old) = self.end.take() {
            let old_index = self.index_unchecked(old);
            self.cells[old_index].is_end = false;
        }
        if self.start == Some(coord) {
            self.start = None;
        }
        let cell = &mut self.cells[index];
        cell.is_end = true;
        cell.is_start = false;
        cell.is_wall = false;
        self.end = Some(coord);
        Ok(())
    }

    /// Remove both markers.
    pub fn clear_markers(&mut self) {
        for cell in &mut self.cells {
            cell.is_start = false;
            cell.is_end = false;
        }
        self.start = None;
        self.end = None;
    }

    /// Flip a wall. Start and end cells are left alone.
    ///
    /// Returns the wall state after the call.
    pub fn toggle_wall(&mut self, coord: Coord) -> Result<bool> {
        let index = self.checked_index(coord)?;
        let cell = &mut self.cells[index];
        if !cell.is_start && !cell.is_end {
            cell.is_wall = !cell.is_wall;
        }
        Ok(cell.is_wall)
    }

    /// Set or clear a wall. Start and end cells are left alone.
    pub fn set_wall(&mut self, coord: Coord, wall: bool) -> Result<()> {
        let index = self.checked_index(coord)?;
        let cell = &mut self.cells[index];
        if !cell.is_start && !cell.is_end {
            cell.is_wall = wall;
        }
        Ok(())
    }

    /// Display: mark a cell as explored.
    pub fn mark_visited(&mut self, coord: Coord) {
        if let Some(i) = self.index_of(coord) {
            self.cells[i].is_visited = true;
        }
    }

    /// Display: mark a cell as part of the final path.
    pub fn mark_path(&mut self, coord: Coord) {
        if let Some(i) = self.index_of(coord) {
            self.cells[i].is_path = true;
        }
    }

    /// Clear visited/path flags, keeping walls, start and end.
    pub fn clear_visualization(&mut self) {
        for cell in &mut self.cells {
            cell.is_visited = false;
            cell.is_path = false;
        }
    }

    fn checked_index(&self, coord: Coord) -> Result<usize> {
        self.index_of(coord).ok_or(Error::OutOfBounds {
            x: coord.x,
            y: coord.y,
            width: self.width,
            height: self.height,
        })
    }

    fn index_unchecked(&self, coord: Coord) -> usize {
        coord.y * self.width + coord.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(Error::InvalidDimensions { width: 0, height: 4 })
        );
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        let side = 1usize << (usize::BITS / 2 + 1);
        assert_eq!(
            Grid::square(side),
            Err(Error::InvalidDimensions {
                width: side,
                height: side
            })
        );
    }

    #[test]
    fn row_major_indexing() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.index_of(Coord::new(1, 2)), Some(9));
        assert_eq!(grid.coord_of(9), Coord::new(1, 2));
        assert_eq!(grid.index_of(Coord::new(4, 0)), None);
    }

    #[test]
    fn neighbors_follow_up_right_down_left() {
        let grid = Grid::square(3).unwrap();
        let n: Vec<_> = grid.neighbors(Coord::new(1, 1)).collect();
        assert_eq!(
            n,
            vec![Coord::new(1, 0), Coord::new(2, 1), Coord::new(1, 2), Coord::new(0, 1)]
        );

        let corner: Vec<_> = grid.neighbors(Coord::new(2, 2)).collect();
        assert_eq!(corner, vec![Coord::new(2, 1), Coord::new(1, 2)]);
    }

    #[test]
    fn start_and_end_are_unique() {
        let mut grid = Grid::square(5).unwrap();
        grid.set_start(Coord::new(0, 0)).unwrap();
        grid.set_start(Coord::new(1, 1)).unwrap();
        grid.set_end(Coord::new(4, 4)).unwrap();

        let starts = grid.cells().iter().filter(|c| c.is_start).count();
        let ends = grid.cells().iter().filter(|c| c.is_end).count();
        assert_eq!(starts, 1);
        assert_eq!(ends, 1);
        assert_eq!(grid.start(), Some(Coord::new(1, 1)));
    }

    #[test]
    fn start_over_end_clears_end() {
        let mut grid = Grid::square(3).unwrap();
        grid.set_end(Coord::new(2, 2)).unwrap();
        grid.set_start(Coord::new(2, 2)).unwrap();
        assert_eq!(grid.end(), None);
        assert!(!grid.cell(Coord::new(2, 2)).unwrap().is_end);
    }

    #[test]
    fn walls_never_cover_markers() {
        let mut grid = Grid::square(3).unwrap();
        grid.set_wall(Coord::new(1, 1), true).unwrap();
        grid.set_start(Coord::new(1, 1)).unwrap();
        assert!(!grid.is_wall(Coord::new(1, 1)));

        assert!(!grid.toggle_wall(Coord::new(1, 1)).unwrap());
        assert!(grid.toggle_wall(Coord::new(0, 1)).unwrap());
        assert!(!grid.toggle_wall(Coord::new(0, 1)).unwrap());
    }

    #[test]
    fn out_of_bounds_edit_fails() {
        let mut grid = Grid::square(3).unwrap();
        let err = grid.toggle_wall(Coord::new(3, 0)).unwrap_err();
        assert_eq!(
            err,
            Error::OutOfBounds { x: 3, y: 0, width: 3, height: 3 }
        );
        assert!(grid.is_wall(Coord::new(3, 0)));
    }

    #[test]
    fn clear_visualization_keeps_layout() {
        let mut grid = Grid::square(3).unwrap();
        grid.set_start(Coord::ORIGIN).unwrap();
        grid.set_wall(Coord::new(1, 0), true).unwrap();
        grid.mark_visited(Coord::new(2, 2));
        grid.mark_path(Coord::new(2, 1));

        grid.clear_visualization();

        assert!(grid.cells().iter().all(|c| !c.is_visited && !c.is_path));
        assert!(grid.is_wall(Coord::new(1, 0)));
        assert_eq!(grid.start(), Some(Coord::ORIGIN));
    }
}
