//! Both visualizations behind one handle.
//!
//! The workbench owns a sorting driver and a pathfinding driver and is the
//! only thing the server and the CLI talk to. Each domain runs on its own
//! clock; commands for one never touch the other.

use std::fmt;
use std::str::FromStr;

use algoviz_model::{
    check_array_size, check_grid_size, AlgorithmFamily, AlgorithmInfo, Coord, PathAlgorithm,
    SortAlgorithm, SpeedLevel,
};
use algoviz_playback::{Playback, PlaybackDriver, PlaybackState, PlaybackStatus, Scene};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pathfinding::{PathCounters, PathfindingScene};
use crate::preferences::Preferences;
use crate::render::{GridRenderer, SortRenderer};
use crate::sorting::{SortCounters, SortingScene};

/// Playback controls accepted for either domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Resume when paused, otherwise start a fresh run.
    Play,
    Pause,
    Resume,
    Step,
    Stop,
    /// New random data of the current size. Only while stopped.
    Regenerate,
    /// Stop, clear the counters and regenerate.
    Reset,
}

impl Command {
    pub fn name(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Step => "step",
            Self::Stop => "stop",
            Self::Regenerate => "regenerate",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a command name that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "play" => Ok(Self::Play),
            "pause" => Ok(Self::Pause),
            "resume" => Ok(Self::Resume),
            "step" => Ok(Self::Step),
            "stop" => Ok(Self::Stop),
            "regenerate" => Ok(Self::Regenerate),
            "reset" => Ok(Self::Reset),
            other => Err(UnknownCommand(other.to_owned())),
        }
    }
}

/// Status of one domain, tagged with the domain name.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum DomainStatus {
    Sorting(PlaybackStatus<SortCounters>),
    Pathfinding(PlaybackStatus<PathCounters>),
}

impl DomainStatus {
    pub fn state(&self) -> PlaybackState {
        match self {
            Self::Sorting(status) => status.state,
            Self::Pathfinding(status) => status.state,
        }
    }
}

/// Summary of both domains.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub algorithm_type: AlgorithmFamily,
    pub sorting: SortingOverview,
    pub pathfinding: PathfindingOverview,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingOverview {
    pub algorithm: SortAlgorithm,
    pub array_size: usize,
    pub state: PlaybackState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathfindingOverview {
    pub algorithm: PathAlgorithm,
    pub grid_size: usize,
    pub state: PlaybackState,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
}

/// One selectable algorithm with its description.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmEntry {
    pub name: &'static str,
    #[serde(flatten)]
    pub info: AlgorithmInfo,
}

/// Every selectable algorithm, grouped by domain.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmCatalog {
    pub sorting: Vec<AlgorithmEntry>,
    pub pathfinding: Vec<AlgorithmEntry>,
}

impl AlgorithmCatalog {
    pub fn new() -> Self {
        Self {
            sorting: SortAlgorithm::ALL
                .iter()
                .map(|a| AlgorithmEntry {
                    name: a.name(),
                    info: a.info(),
                })
                .collect(),
            pathfinding: PathAlgorithm::ALL
                .iter()
                .map(|a| AlgorithmEntry {
                    name: a.name(),
                    info: a.info(),
                })
                .collect(),
        }
    }
}

impl Default for AlgorithmCatalog {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Workbench {
    active: AlgorithmFamily,
    sorting: PlaybackDriver<SortingScene>,
    pathfinding: PlaybackDriver<PathfindingScene>,
}

impl Workbench {
    /// Build both scenes from `prefs`, drawing through the given renderers.
    ///
    /// With a seed, sorting data comes from `seed` and grid markers from
    /// `seed + 1`, so both are reproducible.
    pub fn new(
        prefs: &Preferences,
        sort_renderer: Box<dyn SortRenderer + Send>,
        grid_renderer: Box<dyn GridRenderer + Send>,
    ) -> Result<Self> {
        prefs.validate()?;
        let (sort_rng, grid_rng) = match prefs.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };
        let theme = prefs.theme();

        let sorting = SortingScene::new(
            prefs.sorting_algorithm,
            prefs.array_size,
            sort_rng,
            theme,
            sort_renderer,
        );
        let pathfinding = PathfindingScene::new(
            prefs.pathfinding_algorithm,
            prefs.grid_size,
            grid_rng,
            theme,
            grid_renderer,
        )?;

        tracing::info!(
            sorting = %prefs.sorting_algorithm,
            pathfinding = %prefs.pathfinding_algorithm,
            array_size = prefs.array_size,
            grid_size = prefs.grid_size,
            speed = prefs.speed.label(),
            "workbench ready"
        );

        Ok(Self {
            active: prefs.algorithm_type,
            sorting: PlaybackDriver::new(Playback::new(sorting).with_speed(prefs.speed)),
            pathfinding: PlaybackDriver::new(Playback::new(pathfinding).with_speed(prefs.speed)),
        })
    }

    /// The domain selected in the preferences.
    pub fn active(&self) -> AlgorithmFamily {
        self.active
    }

    pub fn sorting(&self) -> &PlaybackDriver<SortingScene> {
        &self.sorting
    }

    pub fn pathfinding(&self) -> &PlaybackDriver<PathfindingScene> {
        &self.pathfinding
    }

    /// Apply a playback command to one domain.
    pub async fn command(&self, family: AlgorithmFamily, command: Command) -> Result<()> {
        tracing::debug!(domain = family.name(), %command, "command");
        match (family, command) {
            (AlgorithmFamily::Sorting, Command::Regenerate) => {
                let mut engine = stopped(&self.sorting).await?;
                engine.stop();
                engine.scene_mut().regenerate();
                engine.scene_mut().redraw();
                Ok(())
            }
            (AlgorithmFamily::Sorting, Command::Reset) => {
                self.sorting.stop().await;
                let mut engine = self.sorting.lock().await;
                engine.reset_counters();
                engine.scene_mut().regenerate();
                engine.scene_mut().redraw();
                Ok(())
            }
            (AlgorithmFamily::Pathfinding, Command::Regenerate) => {
                let mut engine = stopped(&self.pathfinding).await?;
                engine.stop();
                engine.scene_mut().regenerate()?;
                engine.scene_mut().redraw();
                Ok(())
            }
            (AlgorithmFamily::Pathfinding, Command::Reset) => {
                self.pathfinding.stop().await;
                let mut engine = self.pathfinding.lock().await;
                engine.reset_counters();
                engine.scene_mut().regenerate()?;
                engine.scene_mut().redraw();
                Ok(())
            }
            (AlgorithmFamily::Sorting, command) => {
                control(&self.sorting, command).await;
                Ok(())
            }
            (AlgorithmFamily::Pathfinding, command) => {
                control(&self.pathfinding, command).await;
                Ok(())
            }
        }
    }

    pub async fn set_speed(&self, family: AlgorithmFamily, speed: SpeedLevel) {
        match family {
            AlgorithmFamily::Sorting => self.sorting.set_speed(speed).await,
            AlgorithmFamily::Pathfinding => self.pathfinding.set_speed(speed).await,
        }
    }

    /// Select an algorithm by name. Unknown names fall back to the family
    /// default.
    ///
    /// A sorting change takes effect at the next run. A pathfinding change
    /// clears the grid overlay and so requires the domain to be stopped.
    pub async fn set_algorithm(&self, family: AlgorithmFamily, name: &str) -> Result<()> {
        match family {
            AlgorithmFamily::Sorting => {
                let algorithm = SortAlgorithm::from_name(name);
                self.sorting.lock().await.scene_mut().set_algorithm(algorithm);
                tracing::info!(%algorithm, "sorting algorithm selected");
            }
            AlgorithmFamily::Pathfinding => {
                let algorithm = PathAlgorithm::from_name(name);
                let mut engine = stopped(&self.pathfinding).await?;
                engine.stop();
                engine.scene_mut().set_algorithm(algorithm);
                engine.scene_mut().redraw();
                tracing::info!(%algorithm, "pathfinding algorithm selected");
            }
        }
        Ok(())
    }

    /// Replace the sequence with `size` fresh values. Only while stopped.
    pub async fn resize_sequence(&self, size: usize) -> Result<()> {
        check_array_size(size)?;
        let mut engine = stopped(&self.sorting).await?;
        engine.stop();
        engine.scene_mut().resize(size);
        engine.scene_mut().redraw();
        Ok(())
    }

    /// Replace the grid with an empty `size x size` one. Only while stopped.
    pub async fn resize_grid(&self, size: usize) -> Result<()> {
        check_grid_size(size)?;
        self.edit_grid(|scene| scene.resize(size)).await
    }

    /// Flip a wall. Returns whether the cell is now a wall.
    pub async fn toggle_wall(&self, coord: Coord) -> Result<bool> {
        self.edit_grid(|scene| scene.toggle_wall(coord)).await
    }

    pub async fn set_start(&self, coord: Coord) -> Result<()> {
        self.edit_grid(|scene| scene.set_start(coord)).await
    }

    pub async fn set_end(&self, coord: Coord) -> Result<()> {
        self.edit_grid(|scene| scene.set_end(coord)).await
    }

    /// Move start and end to new random cells, keeping the walls.
    pub async fn shuffle_markers(&self) -> Result<()> {
        self.edit_grid(PathfindingScene::shuffle_markers).await
    }

    pub async fn status(&self, family: AlgorithmFamily) -> DomainStatus {
        match family {
            AlgorithmFamily::Sorting => DomainStatus::Sorting(self.sorting.status().await),
            AlgorithmFamily::Pathfinding => {
                DomainStatus::Pathfinding(self.pathfinding.status().await)
            }
        }
    }

    pub async fn overview(&self) -> Overview {
        let sorting = {
            let engine = self.sorting.lock().await;
            SortingOverview {
                algorithm: engine.scene().algorithm(),
                array_size: engine.scene().values().len(),
                state: engine.state(),
            }
        };
        let pathfinding = {
            let engine = self.pathfinding.lock().await;
            let grid = engine.scene().grid();
            PathfindingOverview {
                algorithm: engine.scene().algorithm(),
                grid_size: grid.width(),
                state: engine.state(),
                start: grid.start(),
                end: grid.end(),
            }
        };
        Overview {
            algorithm_type: self.active,
            sorting,
            pathfinding,
        }
    }

    /// Draw the current picture of one domain again.
    ///
    /// For sorting this is the last applied step if a log is loaded,
    /// otherwise the input sequence.
    pub async fn redraw(&self, family: AlgorithmFamily) {
        match family {
            AlgorithmFamily::Sorting => {
                let mut engine = self.sorting.lock().await;
                let cursor = engine.current_step_index();
                let (scene, log) = engine.parts_mut();
                match log {
                    Some(log) if cursor > 0 => scene.render_step(log, cursor - 1),
                    _ => scene.redraw(),
                }
            }
            AlgorithmFamily::Pathfinding => {
                self.pathfinding.lock().await.scene_mut().redraw();
            }
        }
    }

    /// Stop both domains.
    pub async fn shutdown(&self) {
        self.sorting.stop().await;
        self.pathfinding.stop().await;
    }

    async fn edit_grid<T>(
        &self,
        edit: impl FnOnce(&mut PathfindingScene) -> algoviz_model::Result<T>,
    ) -> Result<T> {
        let mut engine = stopped(&self.pathfinding).await?;
        engine.stop();
        let result = edit(engine.scene_mut())?;
        engine.scene_mut().redraw();
        Ok(result)
    }
}

/// Lock the engine, failing with [`Error::Busy`] unless it is stopped.
async fn stopped<S>(
    driver: &PlaybackDriver<S>,
) -> Result<tokio::sync::MutexGuard<'_, Playback<S>>>
where
    S: Scene + Send + 'static,
    S::Log: Send + 'static,
    S::Counters: Send + 'static,
{
    let engine = driver.lock().await;
    if engine.state() != PlaybackState::Stopped {
        return Err(Error::Busy);
    }
    Ok(engine)
}

/// The commands every domain handles the same way.
async fn control<S>(driver: &PlaybackDriver<S>, command: Command)
where
    S: Scene + Send + 'static,
    S::Log: Send + 'static,
    S::Counters: Send + 'static,
{
    match command {
        Command::Play => {
            let state = driver.lock().await.state();
            match state {
                PlaybackState::Paused => driver.resume().await,
                PlaybackState::Stopped => {
                    driver.run().await;
                }
                PlaybackState::Playing => {}
            }
        }
        Command::Pause => {
            driver.pause().await;
        }
        Command::Resume => driver.resume().await,
        Command::Step => {
            driver.step().await;
        }
        Command::Stop => driver.stop().await,
        Command::Regenerate | Command::Reset => {}
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::sink::FrameSink;

    fn workbench(prefs: Preferences) -> (Workbench, FrameSink) {
        let sink = FrameSink::new();
        let bench = Workbench::new(&prefs, Box::new(sink.clone()), Box::new(sink.clone())).unwrap();
        (bench, sink)
    }

    fn seeded() -> Preferences {
        Preferences::default()
            .with_seed(11)
            .with_array_size(8)
            .with_grid_size(6)
            .with_speed(SpeedLevel::VERY_FAST)
    }

    #[test]
    fn command_names_round_trip() {
        for command in [
            Command::Play,
            Command::Pause,
            Command::Resume,
            Command::Step,
            Command::Stop,
            Command::Regenerate,
            Command::Reset,
        ] {
            assert_eq!(command.name().parse::<Command>().unwrap(), command);
        }
        assert!("rewind".parse::<Command>().is_err());
    }

    #[test]
    fn zero_grid_size_is_rejected() {
        let sink = FrameSink::new();
        let prefs = Preferences::default().with_grid_size(0);
        let result = Workbench::new(&prefs, Box::new(sink.clone()), Box::new(sink));
        assert!(matches!(result, Err(Error::Model(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn play_runs_sorting_to_completion() {
        let (bench, _) = workbench(seeded());
        bench.command(AlgorithmFamily::Sorting, Command::Play).await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;

        let DomainStatus::Sorting(status) = bench.status(AlgorithmFamily::Sorting).await else {
            panic!("wrong domain");
        };
        assert_eq!(status.state, PlaybackState::Stopped);
        assert_eq!(status.current_step, status.total_steps);
        assert!(status.counters.comparisons > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn domains_run_independently() {
        let (bench, _) = workbench(seeded().with_speed(SpeedLevel::VERY_SLOW));
        bench.command(AlgorithmFamily::Sorting, Command::Play).await.unwrap();
        bench.command(AlgorithmFamily::Pathfinding, Command::Play).await.unwrap();
        bench.command(AlgorithmFamily::Sorting, Command::Pause).await.unwrap();

        tokio::time::sleep(Duration::from_millis(450)).await;
        assert_eq!(
            bench.status(AlgorithmFamily::Sorting).await.state(),
            PlaybackState::Paused
        );
        let DomainStatus::Pathfinding(path) = bench.status(AlgorithmFamily::Pathfinding).await
        else {
            panic!("wrong domain");
        };
        assert_eq!(path.state, PlaybackState::Playing);
        assert_eq!(path.current_step, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn play_while_paused_resumes() {
        let (bench, _) = workbench(seeded().with_speed(SpeedLevel::VERY_SLOW));
        bench.command(AlgorithmFamily::Sorting, Command::Play).await.unwrap();
        bench.command(AlgorithmFamily::Sorting, Command::Pause).await.unwrap();
        bench.command(AlgorithmFamily::Sorting, Command::Play).await.unwrap();

        tokio::time::sleep(Duration::from_millis(250)).await;
        let DomainStatus::Sorting(status) = bench.status(AlgorithmFamily::Sorting).await else {
            panic!("wrong domain");
        };
        assert_eq!(status.state, PlaybackState::Playing);
        assert_eq!(status.current_step, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn grid_edits_are_refused_mid_run() {
        let (bench, _) = workbench(seeded().with_speed(SpeedLevel::VERY_SLOW));
        bench.command(AlgorithmFamily::Pathfinding, Command::Play).await.unwrap();

        let busy = bench.toggle_wall(Coord::new(0, 0)).await;
        assert!(matches!(busy, Err(Error::Busy)));
        let busy = bench.set_algorithm(AlgorithmFamily::Pathfinding, "bfs").await;
        assert!(matches!(busy, Err(Error::Busy)));

        bench.command(AlgorithmFamily::Pathfinding, Command::Pause).await.unwrap();
        let busy = bench.command(AlgorithmFamily::Pathfinding, Command::Regenerate).await;
        assert!(matches!(busy, Err(Error::Busy)));

        bench.command(AlgorithmFamily::Pathfinding, Command::Stop).await.unwrap();
        bench.set_algorithm(AlgorithmFamily::Pathfinding, "bfs").await.unwrap();
        let overview = bench.overview().await;
        assert_eq!(overview.pathfinding.algorithm, PathAlgorithm::Bfs);
    }

    #[tokio::test]
    async fn sorting_algorithm_can_change_mid_run() {
        let (bench, _) = workbench(seeded().with_speed(SpeedLevel::VERY_SLOW));
        bench.command(AlgorithmFamily::Sorting, Command::Play).await.unwrap();
        bench.set_algorithm(AlgorithmFamily::Sorting, "merge").await.unwrap();
        assert_eq!(bench.overview().await.sorting.algorithm, SortAlgorithm::Merge);
        assert_eq!(
            bench.status(AlgorithmFamily::Sorting).await.state(),
            PlaybackState::Playing
        );
        bench.shutdown().await;
    }

    #[tokio::test]
    async fn wall_edits_report_bounds() {
        let (bench, _) = workbench(seeded());
        let err = bench.toggle_wall(Coord::new(6, 0)).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Model(algoviz_model::Error::OutOfBounds { .. })
        ));

        let start = bench.overview().await.pathfinding.start.unwrap();
        let free = Coord::new(0, 0);
        let target = if start == free { Coord::new(5, 5) } else { free };
        let end = bench.overview().await.pathfinding.end.unwrap();
        if target != end {
            assert!(bench.toggle_wall(target).await.unwrap());
            assert!(!bench.toggle_wall(target).await.unwrap());
        }
    }

    #[tokio::test]
    async fn oversized_resizes_leave_data_untouched() {
        let (bench, _) = workbench(seeded());
        let before = bench.overview().await;

        let err = bench.resize_grid(1usize << 33).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Model(algoviz_model::Error::SizeTooLarge { .. })
        ));
        let err = bench.resize_sequence(algoviz_model::MAX_ARRAY_SIZE + 1).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Model(algoviz_model::Error::SizeTooLarge { .. })
        ));

        let after = bench.overview().await;
        assert_eq!(after.sorting.array_size, before.sorting.array_size);
        assert_eq!(after.pathfinding.grid_size, before.pathfinding.grid_size);
        assert_eq!(after.pathfinding.start, before.pathfinding.start);
    }

    #[tokio::test]
    async fn regenerate_keeps_sizes_and_reset_clears_counters() {
        let (bench, _) = workbench(seeded());
        bench.command(AlgorithmFamily::Sorting, Command::Step).await.unwrap();
        let before = bench.sorting().lock().await.scene().values().to_vec();

        bench.command(AlgorithmFamily::Sorting, Command::Reset).await.unwrap();
        let engine = bench.sorting().lock().await;
        assert_eq!(engine.scene().values().len(), 8);
        assert_ne!(engine.scene().values(), before.as_slice());
        assert_eq!(engine.counters(), &SortCounters::default());
        assert_eq!(engine.total_steps(), 0);
    }

    #[tokio::test]
    async fn redraw_publishes_a_frame() {
        let (bench, sink) = workbench(seeded());
        let mut frames = sink.subscribe();
        bench.redraw(AlgorithmFamily::Pathfinding).await;
        let frame = frames.recv().await.unwrap();
        assert!(matches!(frame, crate::render::RenderFrame::Grid { width: 6, .. }));
    }

    #[test]
    fn catalog_lists_every_algorithm() {
        let catalog = AlgorithmCatalog::new();
        assert_eq!(catalog.sorting.len(), 5);
        assert_eq!(catalog.pathfinding.len(), 4);
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json["pathfinding"][1]["name"], "astar");
        assert!(json["sorting"][0]["complexity"].is_string());
    }
}
