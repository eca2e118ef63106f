//! Working copy for a single search.
//!
//! The caller's [`Grid`] is only read. Every piece of search bookkeeping
//! lives in per-cell vectors indexed by the grid's row-major index.

use algoviz_model::{AstarScore, CellRecord, Coord, Grid, PathAlgorithm, PathLog};

pub(crate) struct SearchState<'g> {
    grid: &'g Grid,
    /// Cost so far; `None` is unreached.
    distance: Vec<Option<usize>>,
    score: Vec<Option<AstarScore>>,
    parent: Vec<Option<usize>>,
    visited: Vec<bool>,
    /// A* open-set membership.
    queued: Vec<bool>,
    log: Vec<CellRecord>,
}

impl<'g> SearchState<'g> {
    pub(crate) fn new(grid: &'g Grid) -> Self {
        let len = grid.len();
        Self {
            grid,
            distance: vec![None; len],
            score: vec![None; len],
            parent: vec![None; len],
            visited: vec![false; len],
            queued: vec![false; len],
            log: Vec::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.grid.len()
    }

    /// Index of an in-bounds coordinate. Callers validate bounds up front.
    pub(crate) fn index(&self, coord: Coord) -> usize {
        coord.y * self.grid.width() + coord.x
    }

    pub(crate) fn coord(&self, index: usize) -> Coord {
        self.grid.coord_of(index)
    }

    pub(crate) fn is_wall(&self, index: usize) -> bool {
        self.grid.cells()[index].is_wall
    }

    /// The `nth` in-bounds neighbor in up/right/down/left order.
    pub(crate) fn neighbor(&self, index: usize, nth: usize) -> Option<usize> {
        self.grid
            .neighbors(self.coord(index))
            .nth(nth)
            .map(|c| self.index(c))
    }

    pub(crate) fn neighbors(&self, index: usize) -> Vec<usize> {
        self.grid
            .neighbors(self.coord(index))
            .map(|c| self.index(c))
            .collect()
    }

    /// Neighbors a search may still expand into.
    pub(crate) fn open_neighbors(&self, index: usize) -> Vec<usize> {
        self.neighbors(index)
            .into_iter()
            .filter(|&n| !self.visited[n] && !self.is_wall(n))
            .collect()
    }

    pub(crate) fn distance(&self, index: usize) -> Option<usize> {
        self.distance[index]
    }

    pub(crate) fn set_distance(&mut self, index: usize, distance: usize) {
        self.distance[index] = Some(distance);
    }

    pub(crate) fn score(&self, index: usize) -> Option<AstarScore> {
        self.score[index]
    }

    /// Record an A* score. `distance` follows `g`.
    pub(crate) fn set_score(&mut self, index: usize, score: AstarScore) {
        self.score[index] = Some(score);
        self.distance[index] = Some(score.g);
    }

    pub(crate) fn set_parent(&mut self, index: usize, parent: usize) {
        self.parent[index] = Some(parent);
    }

    pub(crate) fn is_visited(&self, index: usize) -> bool {
        self.visited[index]
    }

    pub(crate) fn is_queued(&self, index: usize) -> bool {
        self.queued[index]
    }

    pub(crate) fn set_queued(&mut self, index: usize, queued: bool) {
        self.queued[index] = queued;
    }

    /// Mark a cell visited and append it to the visit log as it is now.
    pub(crate) fn visit(&mut self, index: usize) {
        self.visited[index] = true;
        let record = self.record(index);
        self.log.push(record);
    }

    fn record(&self, index: usize) -> CellRecord {
        CellRecord {
            coord: self.coord(index),
            distance: self.distance[index].unwrap_or(0),
            score: self.score[index],
        }
    }

    /// Follow predecessor links back from `end`, source first.
    pub(crate) fn path_to(&self, end: usize) -> Vec<CellRecord> {
        let mut path = Vec::new();
        let mut current = Some(end);
        while let Some(index) = current {
            path.push(self.record(index));
            current = self.parent[index];
        }
        path.reverse();
        path
    }

    /// Close the search. `reached` is the end index when it was found.
    pub(crate) fn finish(
        self,
        algorithm: PathAlgorithm,
        start: Coord,
        end: Coord,
        reached: Option<usize>,
    ) -> PathLog {
        let path = reached.map(|i| self.path_to(i)).unwrap_or_default();
        PathLog {
            algorithm,
            start: Some(start),
            end: Some(end),
            visited: self.log,
            path,
        }
    }
}
