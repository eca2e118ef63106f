//! Pathfinding step log.
//!
//! Unlike sorting, a pathfinding run is two ordered sequences: the cells in
//! the order they were explored, then the final path from source to
//! destination. Playback treats `visited ++ path` as one timeline.

use serde::{Deserialize, Serialize};

use crate::algorithm::PathAlgorithm;
use crate::coord::Coord;

/// A* bookkeeping for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstarScore {
    /// Cost from the start.
    pub g: usize,
    /// Manhattan estimate to the goal.
    pub h: usize,
    /// `g + h`.
    pub f: usize,
}

impl AstarScore {
    pub fn new(g: usize, h: usize) -> Self {
        Self { g, h, f: g + h }
    }
}

/// A cell as it was when the search logged it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub coord: Coord,
    /// Cost so far from the start. Depth for DFS, level for BFS.
    pub distance: usize,
    /// Only present for A*.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<AstarScore>,
}

/// The full output of one pathfinding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathLog {
    pub algorithm: PathAlgorithm,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
    pub visited: Vec<CellRecord>,
    /// Source first, destination last. Empty when unreachable.
    pub path: Vec<CellRecord>,
}

/// A position on the combined `visited ++ path` timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineEntry<'a> {
    Visit(&'a CellRecord),
    Path {
        /// Position within the path, starting at 0.
        index: usize,
        record: &'a CellRecord,
    },
}

impl PathLog {
    /// A log with nothing to animate.
    pub fn empty(algorithm: PathAlgorithm) -> Self {
        Self {
            algorithm,
            start: None,
            end: None,
            visited: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Length of the combined timeline.
    pub fn timeline_len(&self) -> usize {
        self.visited.len() + self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeline_len() == 0
    }

    /// Whether the destination was reached.
    pub fn found_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Resolve a timeline index.
    pub fn entry(&self, index: usize) -> Option<TimelineEntry<'_>> {
        match self.visited.get(index) {
            Some(record) => Some(TimelineEntry::Visit(record)),
            None => {
                let path_index = index - self.visited.len();
                self.path.get(path_index).map(|record| TimelineEntry::Path {
                    index: path_index,
                    record,
                })
            }
        }
    }

    /// Cost of the found path in steps.
    pub fn path_cost(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}
