//! Dijkstra's algorithm on a unit-cost grid.

use algoviz_model::{Coord, Grid, PathAlgorithm, PathLog};

use crate::state::SearchState;

/// Settle cells in order of distance until the end is settled or every
/// remaining cell is unreachable.
///
/// The unvisited list starts as every cell in row-major order and is
/// stable-sorted by distance before each pop, so ties resolve by the order
/// the list already had.
pub fn dijkstra(grid: &Grid, start: Coord, end: Coord) -> PathLog {
    let mut state = SearchState::new(grid);
    let (source, target) = (state.index(start), state.index(end));
    state.set_distance(source, 0);

    let mut unvisited: Vec<usize> = (0..state.len()).collect();
    let mut reached = None;

    while !unvisited.is_empty() {
        unvisited.sort_by_key(|&i| state.distance(i).unwrap_or(usize::MAX));
        let closest = unvisited.remove(0);

        if state.is_wall(closest) {
            continue;
        }
        let Some(distance) = state.distance(closest) else {
            // Everything left is unreachable.
            break;
        };

        state.visit(closest);
        if closest == target {
            reached = Some(closest);
            break;
        }

        for neighbor in state.open_neighbors(closest) {
            let candidate = distance + 1;
            if state.distance(neighbor).map_or(true, |d| candidate < d) {
                state.set_distance(neighbor, candidate);
                state.set_parent(neighbor, closest);
            }
        }
    }

    state.finish(PathAlgorithm::Dijkstra, start, end, reached)
}
