//! Sorting scene: replays a [`SortLog`] onto a [`SortRenderer`].

use algoviz_model::{random_sequence, SortAlgorithm, SortLog, StepKind};
use algoviz_playback::Scene;
use algoviz_sorting::run_sorting;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::render::{SequenceFrame, SortRenderer};
use crate::theme::Theme;

/// Live sorting statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortCounters {
    pub comparisons: u64,
    pub swaps: u64,
}

/// The sequence being sorted plus everything needed to draw it.
pub struct SortingScene {
    algorithm: SortAlgorithm,
    values: Vec<i64>,
    rng: StdRng,
    theme: Theme,
    renderer: Box<dyn SortRenderer + Send>,
}

impl SortingScene {
    /// Create a scene with a random sequence of `size` values.
    pub fn new(
        algorithm: SortAlgorithm,
        size: usize,
        mut rng: StdRng,
        theme: Theme,
        renderer: Box<dyn SortRenderer + Send>,
    ) -> Self {
        let values = random_sequence(&mut rng, size);
        Self {
            algorithm,
            values,
            rng,
            theme,
            renderer,
        }
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    /// Takes effect at the next run.
    pub fn set_algorithm(&mut self, algorithm: SortAlgorithm) {
        self.algorithm = algorithm;
    }

    /// The input sequence. Runs sort a copy, so this never changes under
    /// playback.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn set_values(&mut self, values: Vec<i64>) {
        self.values = values;
    }

    /// Replace the sequence with fresh random values of the same length.
    pub fn regenerate(&mut self) {
        self.resize(self.values.len());
    }

    /// Replace the sequence with `size` fresh random values.
    pub fn resize(&mut self, size: usize) {
        self.values = random_sequence(&mut self.rng, size);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Draw the input sequence with nothing highlighted.
    pub fn redraw(&mut self) {
        let sorted = Default::default();
        let frame = SequenceFrame {
            algorithm: self.algorithm,
            values: &self.values,
            highlighted: &[],
            sorted: &sorted,
            partition_ranges: &[],
            merge_ranges: &[],
            message: "",
        };
        self.renderer.render_sequence(&frame, self.theme);
    }

    /// Draw the step at `index` without touching any counters.
    pub fn render_step(&mut self, log: &SortLog, index: usize) {
        let Some(step) = log.get(index) else {
            return;
        };
        let frame = SequenceFrame {
            algorithm: log.algorithm,
            values: &step.snapshot,
            highlighted: &step.indices,
            sorted: &step.sorted,
            partition_ranges: step.partition_ranges.as_deref().unwrap_or_default(),
            merge_ranges: step.merge_ranges.as_deref().unwrap_or_default(),
            message: &step.message,
        };
        self.renderer.render_sequence(&frame, self.theme);
    }
}

impl Scene for SortingScene {
    type Log = SortLog;
    type Counters = SortCounters;

    fn generate(&mut self) -> SortLog {
        tracing::info!(algorithm = %self.algorithm, len = self.values.len(), "sorting run");
        run_sorting(self.algorithm, &self.values)
    }

    fn timeline_len(log: &SortLog) -> usize {
        log.len()
    }

    fn apply(&mut self, log: &SortLog, index: usize, counters: &mut SortCounters) {
        let Some(step) = log.get(index) else {
            return;
        };
        if step.kind == StepKind::Unknown {
            tracing::warn!(index, "skipping step of unknown kind");
            return;
        }
        if step.kind.is_comparison() {
            counters.comparisons += 1;
        }
        if step.kind.is_swap() {
            counters.swaps += 1;
        }
        self.render_step(log, index);
    }
}
