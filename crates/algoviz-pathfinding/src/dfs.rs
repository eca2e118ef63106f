//! Depth-first search.

use algoviz_model::{Coord, Grid, PathAlgorithm, PathLog};

use crate::state::SearchState;

/// Depth-first descent in neighbor order that stops at the first arrival at
/// the end.
///
/// Runs on an explicit stack of `(cell, next neighbor slot)` frames, which
/// visits cells in exactly the order the recursive formulation would, without
/// being bounded by the call stack on large open grids.
pub fn dfs(grid: &Grid, start: Coord, end: Coord) -> PathLog {
    let mut state = SearchState::new(grid);
    let (source, target) = (state.index(start), state.index(end));

    state.set_distance(source, 0);
    state.visit(source);
    if source == target {
        return state.finish(PathAlgorithm::Dfs, start, end, Some(target));
    }

    let mut stack = vec![(source, 0usize)];
    let mut reached = None;

    while let Some(frame) = stack.last_mut() {
        let (node, slot) = *frame;
        let Some(neighbor) = state.neighbor(node, slot) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        if state.is_visited(neighbor) || state.is_wall(neighbor) {
            continue;
        }

        let depth = state.distance(node).unwrap_or(0) + 1;
        state.set_parent(neighbor, node);
        state.set_distance(neighbor, depth);
        state.visit(neighbor);

        if neighbor == target {
            reached = Some(neighbor);
            break;
        }
        stack.push((neighbor, 0));
    }

    state.finish(PathAlgorithm::Dfs, start, end, reached)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dives_up_then_right_first() {
        let grid = Grid::square(3).unwrap();
        let log = dfs(&grid, Coord::new(0, 2), Coord::new(2, 2));
        let order: Vec<_> = log.visited.iter().map(|r| r.coord).collect();
        // Up to the top row, right along it, then down the right column.
        assert_eq!(
            order,
            vec![
                Coord::new(0, 2),
                Coord::new(0, 1),
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(2, 0),
                Coord::new(2, 1),
                Coord::new(2, 2),
            ]
        );
        assert_eq!(log.path.len(), 7);
    }

    #[test]
    fn backtracks_out_of_dead_ends() {
        // . # .
        // . # .
        // . . .
        let mut grid = Grid::square(3).unwrap();
        grid.set_wall(Coord::new(1, 0), true).unwrap();
        grid.set_wall(Coord::new(1, 1), true).unwrap();
        let log = dfs(&grid, Coord::new(0, 1), Coord::new(2, 0));

        let order: Vec<_> = log.visited.iter().map(|r| r.coord).collect();
        assert_eq!(
            order,
            vec![
                Coord::new(0, 1),
                Coord::new(0, 0),
                Coord::new(0, 2),
                Coord::new(1, 2),
                Coord::new(2, 2),
                Coord::new(2, 1),
                Coord::new(2, 0),
            ]
        );
        // (0,0) was a dead end and is not on the path.
        assert!(log.path.iter().all(|r| r.coord != Coord::new(0, 0)));
        assert_eq!(log.path.last().unwrap().distance, 5);
    }

    #[test]
    fn depth_is_recorded() {
        let grid = Grid::square(2).unwrap();
        let log = dfs(&grid, Coord::new(0, 0), Coord::new(0, 1));
        let depths: Vec<_> = log.visited.iter().map(|r| r.distance).collect();
        assert_eq!(depths, vec![0, 1, 2, 3]);
    }
}
