//! A* with unit costs and the Manhattan heuristic.

use algoviz_model::{AstarScore, Coord, Grid, PathAlgorithm, PathLog};

use crate::state::SearchState;

/// Expand the open cell with the lowest `f = g + h` until the end is
/// expanded or the open list runs dry.
///
/// A cell sits in the open list at most once; a better `g` updates it in
/// place. The list is stable-sorted by `f` before every pop.
pub fn astar(grid: &Grid, start: Coord, end: Coord) -> PathLog {
    let mut state = SearchState::new(grid);
    let (source, target) = (state.index(start), state.index(end));
    state.set_score(source, AstarScore::new(0, start.manhattan(&end)));

    let mut open = vec![source];
    state.set_queued(source, true);
    let mut reached = None;

    while !open.is_empty() {
        open.sort_by_key(|&i| state.score(i).map_or(usize::MAX, |s| s.f));
        let current = open.remove(0);
        state.set_queued(current, false);

        if state.is_wall(current) {
            continue;
        }

        state.visit(current);
        if current == target {
            reached = Some(current);
            break;
        }

        let g = state.score(current).map_or(0, |s| s.g);
        for neighbor in state.open_neighbors(current) {
            let tentative = g + 1;
            if state.score(neighbor).map_or(true, |s| tentative < s.g) {
                let h = state.coord(neighbor).manhattan(&end);
                state.set_parent(neighbor, current);
                state.set_score(neighbor, AstarScore::new(tentative, h));
                if !state.is_queued(neighbor) {
                    state.set_queued(neighbor, true);
                    open.push(neighbor);
                }
            }
        }
    }

    state.finish(PathAlgorithm::Astar, start, end, reached)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_straight_for_goal_on_open_grid() {
        let grid = Grid::square(5).unwrap();
        let log = astar(&grid, Coord::new(0, 2), Coord::new(4, 2));
        assert_eq!(log.path_cost(), Some(4));
        // Only cells on the straight line are expanded.
        assert_eq!(log.visited.len(), 5);
    }

    #[test]
    fn scores_add_up() {
        let mut grid = Grid::square(5).unwrap();
        for y in 0..4 {
            grid.set_wall(Coord::new(2, y), true).unwrap();
        }
        let log = astar(&grid, Coord::new(0, 0), Coord::new(4, 0));
        assert!(log.found_path());
        for record in log.visited.iter().chain(&log.path) {
            let score = record.score.unwrap();
            assert_eq!(score.f, score.g + score.h);
            assert_eq!(record.distance, score.g);
            assert_eq!(score.h, record.coord.manhattan(&Coord::new(4, 0)));
        }
    }

    #[test]
    fn start_record_has_heuristic_only() {
        let grid = Grid::square(3).unwrap();
        let log = astar(&grid, Coord::new(0, 0), Coord::new(2, 2));
        let first = log.visited[0];
        assert_eq!(first.score, Some(AstarScore { g: 0, h: 4, f: 4 }));
    }

    #[test]
    fn unreachable_goal_exhausts_open_list() {
        let mut grid = Grid::square(3).unwrap();
        grid.set_wall(Coord::new(0, 1), true).unwrap();
        grid.set_wall(Coord::new(1, 0), true).unwrap();
        let log = astar(&grid, Coord::new(0, 0), Coord::new(2, 2));
        assert_eq!(log.visited.len(), 1);
        assert!(log.path.is_empty());
    }
}
