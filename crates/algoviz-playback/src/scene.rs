//! The seam between the generic engine and a concrete visualization.

use serde::Serialize;

/// Domain hooks the engine calls while replaying a log.
///
/// A scene knows how to produce a log, how long its timeline is and how to
/// turn one timeline entry into renderer calls and counter updates. The
/// engine never looks inside a log itself.
pub trait Scene {
    /// The step log this scene replays.
    type Log;
    /// Live statistics shown next to the animation.
    type Counters: Clone + Default + Serialize;

    /// Run the scene's current algorithm over its current data.
    fn generate(&mut self) -> Self::Log;

    /// Number of timeline entries in `log`.
    fn timeline_len(log: &Self::Log) -> usize;

    /// Called once when a log is loaded, before its first step.
    fn prepare(&mut self, _log: &Self::Log) {}

    /// Apply the entry at `index` and update `counters`.
    fn apply(&mut self, log: &Self::Log, index: usize, counters: &mut Self::Counters);
}
