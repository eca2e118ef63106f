//! Algoviz Pathfinding
//!
//! Four grid searches that run to completion on a private working copy and
//! return a [`PathLog`]: the cells in the order they were explored, then the
//! path from source to destination (empty when the destination is
//! unreachable).
//!
//! All searches share the unit step cost, the 4-neighborhood and the
//! up/right/down/left neighbor order. They differ in frontier discipline:
//!
//! - **Dijkstra**: stable-sorted unvisited list keyed by distance
//! - **A\***: stable-sorted open list keyed by `f = g + h`, Manhattan `h`
//! - **BFS**: FIFO queue, cells logged on enqueue
//! - **DFS**: depth-first in neighbor order, first arrival wins
//!
//! # Example
//!
//! ```rust
//! use algoviz_model::{Coord, Grid, PathAlgorithm};
//! use algoviz_pathfinding::run_pathfinding;
//!
//! let grid = Grid::square(3).unwrap();
//! let log = run_pathfinding(
//!     PathAlgorithm::Bfs,
//!     &grid,
//!     Some(Coord::new(0, 0)),
//!     Some(Coord::new(2, 2)),
//! );
//! assert_eq!(log.path.len(), 5);
//! ```

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod state;

use algoviz_model::{Coord, Grid, PathAlgorithm, PathLog};

pub use astar::astar;
pub use bfs::bfs;
pub use dfs::dfs;
pub use dijkstra::dijkstra;

/// Run `algorithm` from `start` to `end` over `grid`.
///
/// A missing marker, a marker outside the grid or a marker on a wall yields
/// an empty log.
pub fn run_pathfinding(
    algorithm: PathAlgorithm,
    grid: &Grid,
    start: Option<Coord>,
    end: Option<Coord>,
) -> PathLog {
    let (Some(start), Some(end)) = (start, end) else {
        tracing::warn!(%algorithm, "start or end not set, nothing to search");
        return PathLog::empty(algorithm);
    };
    for marker in [start, end] {
        if grid.is_wall(marker) {
            tracing::warn!(%algorithm, %marker, "marker is outside the grid or on a wall");
            return PathLog::empty(algorithm);
        }
    }

    let log = match algorithm {
        PathAlgorithm::Dijkstra => dijkstra(grid, start, end),
        PathAlgorithm::Astar => astar(grid, start, end),
        PathAlgorithm::Bfs => bfs(grid, start, end),
        PathAlgorithm::Dfs => dfs(grid, start, end),
    };
    tracing::debug!(
        %algorithm,
        visited = log.visited.len(),
        path = log.path.len(),
        "pathfinding log generated"
    );
    log
}

/// Run `algorithm` between the grid's own start and end markers.
pub fn run_on_markers(algorithm: PathAlgorithm, grid: &Grid) -> PathLog {
    run_pathfinding(algorithm, grid, grid.start(), grid.end())
}
