//! Grid coordinates and the fixed neighbor order.
//!
//! `x` is the column and `y` the row, with the origin in the top-left corner.
//! Rows grow downwards, so "up" decreases `y`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell position on the pathfinding grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

impl Coord {
    /// Top-left corner.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Create a new coordinate.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance, the A* heuristic.
    pub fn manhattan(&self, other: &Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True if the two cells share an edge.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        self.manhattan(other) == 1
    }

    /// Move one cell in `direction`, or `None` when that would leave the
    /// non-negative quadrant. Upper bounds are the grid's concern.
    pub fn step(&self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            Direction::Right => Some(Self::new(self.x + 1, self.y)),
            Direction::Down => Some(Self::new(self.x, self.y + 1)),
            Direction::Left => self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// One of the four orthogonal moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Neighbor generation order shared by every search.
    ///
    /// Traversal order (and, for DFS, which path is found) depends on it.
    pub const ORDER: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];
}
