//! Pathfinding scene: replays a [`PathLog`] onto the display grid.

use algoviz_model::{
    place_random_markers, random_grid, CellRecord, Coord, Grid, PathAlgorithm, PathLog,
    TimelineEntry,
};
use algoviz_pathfinding::run_on_markers;
use algoviz_playback::Scene;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::render::{GridFrame, GridRenderer};
use crate::theme::Theme;

/// Live pathfinding statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathCounters {
    pub visited_nodes: u64,
    pub path_length: u64,
}

/// The editable grid plus everything needed to draw it.
///
/// Searches run on the walls and markers of this grid; the visited and path
/// flags are display state written by playback and wiped before each run.
pub struct PathfindingScene {
    algorithm: PathAlgorithm,
    grid: Grid,
    rng: StdRng,
    theme: Theme,
    renderer: Box<dyn GridRenderer + Send>,
}

impl PathfindingScene {
    /// Create a scene with an empty `size x size` grid and random markers.
    pub fn new(
        algorithm: PathAlgorithm,
        size: usize,
        mut rng: StdRng,
        theme: Theme,
        renderer: Box<dyn GridRenderer + Send>,
    ) -> algoviz_model::Result<Self> {
        let grid = random_grid(&mut rng, size)?;
        Ok(Self {
            algorithm,
            grid,
            rng,
            theme,
            renderer,
        })
    }

    pub fn algorithm(&self) -> PathAlgorithm {
        self.algorithm
    }

    /// Switch algorithm and wipe the previous run's overlay.
    pub fn set_algorithm(&mut self, algorithm: PathAlgorithm) {
        self.algorithm = algorithm;
        self.grid.clear_visualization();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    /// Fresh empty grid of the same size with new random markers.
    pub fn regenerate(&mut self) -> algoviz_model::Result<()> {
        self.resize(self.grid.width())
    }

    /// Fresh empty `size x size` grid with new random markers.
    pub fn resize(&mut self, size: usize) -> algoviz_model::Result<()> {
        self.grid = random_grid(&mut self.rng, size)?;
        Ok(())
    }

    /// Move start and end to new random cells, keeping the walls.
    pub fn shuffle_markers(&mut self) -> algoviz_model::Result<()> {
        self.grid.clear_visualization();
        place_random_markers(&mut self.rng, &mut self.grid)
    }

    /// Flip a wall. Returns whether the cell is now a wall.
    pub fn toggle_wall(&mut self, coord: Coord) -> algoviz_model::Result<bool> {
        self.grid.clear_visualization();
        self.grid.toggle_wall(coord)
    }

    pub fn set_wall(&mut self, coord: Coord, wall: bool) -> algoviz_model::Result<()> {
        self.grid.clear_visualization();
        self.grid.set_wall(coord, wall)
    }

    pub fn set_start(&mut self, coord: Coord) -> algoviz_model::Result<()> {
        self.grid.clear_visualization();
        self.grid.set_start(coord)
    }

    pub fn set_end(&mut self, coord: Coord) -> algoviz_model::Result<()> {
        self.grid.clear_visualization();
        self.grid.set_end(coord)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Draw the grid as it stands.
    pub fn redraw(&mut self) {
        let frame = GridFrame {
            algorithm: self.algorithm,
            grid: &self.grid,
            current: None,
            message: "",
        };
        self.renderer.render_grid(&frame, self.theme);
    }

    fn draw(&mut self, algorithm: PathAlgorithm, current: &CellRecord, message: &str) {
        let frame = GridFrame {
            algorithm,
            grid: &self.grid,
            current: Some(current),
            message,
        };
        self.renderer.render_grid(&frame, self.theme);
    }
}

/// Status line for a visited cell.
fn visit_message(log: &PathLog, record: &CellRecord) -> String {
    let coord = record.coord;
    if log.start == Some(coord) {
        return "Starting from source node".to_owned();
    }
    if log.end == Some(coord) {
        return "Destination reached!".to_owned();
    }
    match (log.algorithm, record.score) {
        (PathAlgorithm::Dfs, _) => {
            format!("Exploring node {coord} - depth: {}", record.distance)
        }
        (PathAlgorithm::Bfs, _) => {
            format!("Exploring node {coord} - level: {}", record.distance)
        }
        (PathAlgorithm::Astar, Some(score)) => format!(
            "Visiting node {coord} - g={} h={} f={}",
            score.g, score.h, score.f
        ),
        _ => format!(
            "Visiting node {coord} with distance {} from start",
            record.distance
        ),
    }
}

impl Scene for PathfindingScene {
    type Log = PathLog;
    type Counters = PathCounters;

    fn generate(&mut self) -> PathLog {
        tracing::info!(
            algorithm = %self.algorithm,
            width = self.grid.width(),
            height = self.grid.height(),
            "pathfinding run"
        );
        run_on_markers(self.algorithm, &self.grid)
    }

    fn timeline_len(log: &PathLog) -> usize {
        log.timeline_len()
    }

    fn prepare(&mut self, _log: &PathLog) {
        self.grid.clear_visualization();
    }

    fn apply(&mut self, log: &PathLog, index: usize, counters: &mut PathCounters) {
        match log.entry(index) {
            Some(TimelineEntry::Visit(record)) => {
                counters.visited_nodes += 1;
                self.grid.mark_visited(record.coord);
                let message = visit_message(log, record);
                self.draw(log.algorithm, record, &message);
            }
            Some(TimelineEntry::Path { index, record }) => {
                counters.path_length += 1;
                self.grid.mark_path(record.coord);
                let message = if index == 0 {
                    "Building path from destination to source".to_owned()
                } else {
                    format!("Building path - step {} of {}", index + 1, log.path.len())
                };
                self.draw(log.algorithm, record, &message);
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use algoviz_playback::Playback;
    use rand::SeedableRng;

    use super::*;
    use crate::render::RenderFrame;

    #[derive(Clone, Default)]
    struct Recording(Arc<Mutex<Vec<RenderFrame>>>);

    impl GridRenderer for Recording {
        fn render_grid(&mut self, frame: &GridFrame<'_>, theme: Theme) {
            self.0.lock().unwrap().push(RenderFrame::from_grid(frame, theme));
        }
    }

    /// 3x3 open grid, start top-left, end bottom-right.
    fn open_scene(algorithm: PathAlgorithm) -> (PathfindingScene, Recording) {
        let recording = Recording::default();
        let mut scene = PathfindingScene::new(
            algorithm,
            3,
            StdRng::seed_from_u64(3),
            Theme::Light,
            Box::new(recording.clone()),
        )
        .unwrap();
        let mut grid = Grid::square(3).unwrap();
        grid.set_start(Coord::new(0, 0)).unwrap();
        grid.set_end(Coord::new(2, 2)).unwrap();
        scene.set_grid(grid);
        (scene, recording)
    }

    fn play_to_end(playback: &mut Playback<PathfindingScene>, log: PathLog) {
        let mut next = playback.play(log);
        while let Some(scheduled) = next {
            next = playback.fire(scheduled.token);
        }
    }

    fn messages(recording: &Recording) -> Vec<String> {
        recording
            .0
            .lock()
            .unwrap()
            .iter()
            .map(|f| f.message().to_owned())
            .collect()
    }

    #[test]
    fn counters_split_visits_and_path() {
        let (mut scene, _) = open_scene(PathAlgorithm::Bfs);
        let log = scene.generate();
        let (visits, path) = (log.visited.len() as u64, log.path.len() as u64);

        let mut playback = Playback::new(scene);
        play_to_end(&mut playback, log);

        assert_eq!(playback.counters().visited_nodes, visits);
        assert_eq!(playback.counters().path_length, path);
        assert_eq!(path, 5);
    }

    #[test]
    fn bfs_messages_name_levels_and_path_steps() {
        let (mut scene, recording) = open_scene(PathAlgorithm::Bfs);
        let log = scene.generate();
        let mut playback = Playback::new(scene);
        play_to_end(&mut playback, log);

        let messages = messages(&recording);
        assert_eq!(messages[0], "Starting from source node");
        assert_eq!(messages[1], "Exploring node (1,0) - level: 1");
        assert!(messages.contains(&"Destination reached!".to_owned()));

        let path: Vec<_> = messages.iter().rev().take(5).rev().collect();
        assert_eq!(path[0], "Building path from destination to source");
        assert_eq!(path[1], "Building path - step 2 of 5");
        assert_eq!(path[4], "Building path - step 5 of 5");
    }

    #[test]
    fn astar_messages_carry_scores() {
        let (mut scene, recording) = open_scene(PathAlgorithm::Astar);
        let log = scene.generate();
        let mut playback = Playback::new(scene);
        play_to_end(&mut playback, log);

        let messages = messages(&recording);
        assert_eq!(messages[0], "Starting from source node");
        assert!(messages[1].starts_with("Visiting node ("));
        assert!(messages[1].contains(" - g=1 h=3 f=4"));
    }

    #[test]
    fn dijkstra_and_dfs_wording() {
        let (mut scene, recording) = open_scene(PathAlgorithm::Dijkstra);
        let log = scene.generate();
        let mut playback = Playback::new(scene);
        play_to_end(&mut playback, log);
        assert!(messages(&recording)[1].ends_with("with distance 1 from start"));

        let (mut scene, recording) = open_scene(PathAlgorithm::Dfs);
        let log = scene.generate();
        let mut playback = Playback::new(scene);
        play_to_end(&mut playback, log);
        assert_eq!(messages(&recording)[1], "Exploring node (1,0) - depth: 1");
    }

    #[test]
    fn display_flags_follow_playback_and_reset_on_next_run() {
        let (mut scene, _) = open_scene(PathAlgorithm::Bfs);
        let log = scene.generate();
        let mut playback = Playback::new(scene);
        play_to_end(&mut playback, log);

        let grid = playback.scene().grid();
        assert!(grid.cell(Coord::new(2, 2)).unwrap().is_path);
        assert!(grid.cell(Coord::new(1, 1)).unwrap().is_visited);

        let log = playback.scene_mut().generate();
        assert!(playback.play(log).is_some());
        let grid = playback.scene().grid();
        let flagged = grid.cells().iter().filter(|c| c.is_visited || c.is_path).count();
        assert_eq!(flagged, 1);
    }

    #[test]
    fn edits_clear_the_overlay() {
        let (mut scene, _) = open_scene(PathAlgorithm::Bfs);
        scene.grid.mark_visited(Coord::new(1, 0));
        assert!(scene.toggle_wall(Coord::new(1, 1)).unwrap());
        assert!(!scene.grid().cell(Coord::new(1, 0)).unwrap().is_visited);
        assert!(scene.grid().is_wall(Coord::new(1, 1)));
    }

    #[test]
    fn edits_reject_out_of_bounds() {
        let (mut scene, _) = open_scene(PathAlgorithm::Bfs);
        assert!(scene.set_start(Coord::new(3, 0)).is_err());
        assert!(scene.toggle_wall(Coord::new(0, 9)).is_err());
    }

    #[test]
    fn missing_markers_give_nothing_to_animate() {
        let (mut scene, _) = open_scene(PathAlgorithm::Dijkstra);
        let mut grid = Grid::square(3).unwrap();
        grid.set_start(Coord::new(0, 0)).unwrap();
        scene.set_grid(grid);
        assert_eq!(PathfindingScene::timeline_len(&scene.generate()), 0);
    }

    #[test]
    fn regenerate_keeps_the_size() {
        let (mut scene, _) = open_scene(PathAlgorithm::Bfs);
        scene.toggle_wall(Coord::new(1, 1)).unwrap();
        scene.regenerate().unwrap();
        assert_eq!(scene.grid().width(), 3);
        assert!(!scene.grid().is_wall(Coord::new(1, 1)));
        assert!(scene.grid().start().is_some());
        assert!(scene.grid().end().is_some());
    }
}
