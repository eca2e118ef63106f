//! Breadth-first search.

use std::collections::VecDeque;

use algoviz_model::{Coord, Grid, PathAlgorithm, PathLog};

use crate::state::SearchState;

/// Level-order search. Cells are logged when they are enqueued, so the
/// visit log is ordered by level; the end test happens on dequeue.
pub fn bfs(grid: &Grid, start: Coord, end: Coord) -> PathLog {
    let mut state = SearchState::new(grid);
    let (source, target) = (state.index(start), state.index(end));

    state.set_distance(source, 0);
    state.visit(source);
    let mut queue = VecDeque::from([source]);
    let mut reached = None;

    while let Some(current) = queue.pop_front() {
        if current == target {
            reached = Some(current);
            break;
        }

        let level = state.distance(current).unwrap_or(0) + 1;
        for neighbor in state.open_neighbors(current) {
            state.set_distance(neighbor, level);
            state.set_parent(neighbor, current);
            state.visit(neighbor);
            queue.push_back(neighbor);
        }
    }

    state.finish(PathAlgorithm::Bfs, start, end, reached)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_by_three_corner_to_corner() {
        let grid = Grid::square(3).unwrap();
        let log = bfs(&grid, Coord::new(0, 0), Coord::new(2, 2));

        assert_eq!(log.path.len(), 5);
        let distances: Vec<_> = log.path.iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![0, 1, 2, 3, 4]);
        assert_eq!(log.path[0].coord, Coord::new(0, 0));
        assert_eq!(log.path[4].coord, Coord::new(2, 2));
    }

    #[test]
    fn first_level_follows_neighbor_order() {
        let grid = Grid::square(3).unwrap();
        let log = bfs(&grid, Coord::new(1, 1), Coord::new(0, 0));
        let level_one: Vec<_> = log.visited[1..5].iter().map(|r| r.coord).collect();
        assert_eq!(
            level_one,
            vec![
                Coord::new(1, 0),
                Coord::new(2, 1),
                Coord::new(1, 2),
                Coord::new(0, 1),
            ]
        );
    }

    #[test]
    fn enqueued_cells_are_logged_before_end_is_dequeued() {
        let grid = Grid::square(2).unwrap();
        let log = bfs(&grid, Coord::new(0, 0), Coord::new(1, 0));
        // (1,0) and (0,1) are both logged while expanding the start.
        assert_eq!(log.visited.len(), 3);
        assert_eq!(log.path_cost(), Some(1));
    }

    #[test]
    fn start_equal_to_end() {
        let grid = Grid::square(2).unwrap();
        let log = bfs(&grid, Coord::new(1, 1), Coord::new(1, 1));
        assert_eq!(log.visited.len(), 1);
        assert_eq!(log.path.len(), 1);
    }
}
