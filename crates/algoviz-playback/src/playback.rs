//! Playback controls for a step-log timeline.

use std::fmt;

use algoviz_model::SpeedLevel;
use serde::{Deserialize, Serialize};

use crate::scene::Scene;
use crate::timer::{Epoch, Scheduled, TimerToken};

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    /// Nothing is advancing. A finished log stays loaded for inspection.
    #[default]
    Stopped,
    /// Advancing on a timer
    Playing,
    /// Suspended mid-log; `resume` continues from the cursor
    Paused,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Playing => write!(f, "playing"),
            Self::Paused => write!(f, "paused"),
        }
    }
}

/// Playback controller for one scene.
///
/// The controller is a plain state machine: it never sleeps or spawns.
/// Transitions that start or continue automatic advancement return a
/// [`Scheduled`] request, and whoever owns the clock calls
/// [`fire`](Self::fire) with its token once the delay has passed.
pub struct Playback<S: Scene> {
    scene: S,
    log: Option<S::Log>,
    cursor: usize,
    state: PlaybackState,
    speed: SpeedLevel,
    counters: S::Counters,
    epoch: Epoch,
}

impl<S: Scene> Playback<S> {
    /// Create a stopped controller with no log loaded.
    pub fn new(scene: S) -> Self {
        Self {
            scene,
            log: None,
            cursor: 0,
            state: PlaybackState::Stopped,
            speed: SpeedLevel::default(),
            counters: S::Counters::default(),
            epoch: Epoch::default(),
        }
    }

    /// Set the initial speed.
    #[must_use]
    pub fn with_speed(mut self, speed: SpeedLevel) -> Self {
        self.speed = speed;
        self
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// The loaded log, if any.
    pub fn log(&self) -> Option<&S::Log> {
        self.log.as_ref()
    }

    /// The scene together with the loaded log, for redrawing the current
    /// step without advancing.
    pub fn parts_mut(&mut self) -> (&mut S, Option<&S::Log>) {
        (&mut self.scene, self.log.as_ref())
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    /// Index of the next step to apply.
    pub fn current_step_index(&self) -> usize {
        self.cursor
    }

    /// Length of the loaded timeline, 0 when nothing is loaded.
    pub fn total_steps(&self) -> usize {
        self.log.as_ref().map_or(0, S::timeline_len)
    }

    pub fn counters(&self) -> &S::Counters {
        &self.counters
    }

    pub fn speed(&self) -> SpeedLevel {
        self.speed
    }

    /// Change the speed. Takes effect at the next schedule.
    pub fn set_speed(&mut self, speed: SpeedLevel) {
        self.speed = speed;
    }

    pub fn reset_counters(&mut self) {
        self.counters = S::Counters::default();
    }

    /// Fraction of the timeline applied (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        let total = self.total_steps();
        if total == 0 {
            0.0
        } else {
            self.cursor as f64 / total as f64
        }
    }

    /// Load `log` and start playing it.
    ///
    /// Only valid while stopped. The first step is applied immediately; the
    /// returned request schedules the second.
    pub fn play(&mut self, log: S::Log) -> Option<Scheduled> {
        if self.state != PlaybackState::Stopped {
            tracing::debug!(state = %self.state, "play ignored");
            return None;
        }
        let total = S::timeline_len(&log);
        if total == 0 {
            tracing::warn!("play ignored, log has nothing to animate");
            return None;
        }

        tracing::info!(steps = total, "playback started");
        self.load(log);
        self.state = PlaybackState::Playing;
        self.advance()
    }

    /// Suspend automatic advancement.
    pub fn pause(&mut self) -> bool {
        if self.state != PlaybackState::Playing {
            tracing::debug!(state = %self.state, "pause ignored");
            return false;
        }
        self.epoch.cancel();
        self.state = PlaybackState::Paused;
        tracing::debug!(cursor = self.cursor, "playback paused");
        true
    }

    /// Continue from the cursor.
    pub fn resume(&mut self) -> Option<Scheduled> {
        if self.state != PlaybackState::Paused {
            tracing::debug!(state = %self.state, "resume ignored");
            return None;
        }
        if self.cursor >= self.total_steps() {
            // Manual stepping already reached the end.
            self.finish();
            return None;
        }
        self.state = PlaybackState::Playing;
        tracing::debug!(cursor = self.cursor, "playback resumed");
        Some(self.schedule())
    }

    /// Apply exactly one step without changing state.
    ///
    /// From `Stopped` with no log loaded, or with the loaded log exhausted,
    /// the scene generates a fresh log first and the counters reset. Ignored
    /// while playing.
    pub fn step(&mut self) -> bool {
        match self.state {
            PlaybackState::Playing => {
                tracing::debug!("step ignored while playing");
                return false;
            }
            PlaybackState::Stopped if self.cursor >= self.total_steps() => {
                let log = self.scene.generate();
                if S::timeline_len(&log) == 0 {
                    tracing::warn!("step ignored, generated log has nothing to animate");
                    return false;
                }
                self.reset_counters();
                self.load(log);
            }
            PlaybackState::Paused if self.cursor >= self.total_steps() => {
                tracing::debug!("step ignored, log exhausted");
                return false;
            }
            _ => {}
        }
        self.apply_next();
        true
    }

    /// Stop advancing, drop the log and rewind. Idempotent.
    pub fn stop(&mut self) {
        self.epoch.cancel();
        self.log = None;
        self.cursor = 0;
        if self.state != PlaybackState::Stopped {
            tracing::info!("playback stopped");
        }
        self.state = PlaybackState::Stopped;
    }

    /// Timer callback. Applies the step at the cursor if `token` is still
    /// live and returns the next request, if any.
    pub fn fire(&mut self, token: TimerToken) -> Option<Scheduled> {
        if self.state != PlaybackState::Playing || !self.epoch.is_current(token) {
            tracing::debug!(?token, "stale timer ignored");
            return None;
        }
        self.advance()
    }

    fn load(&mut self, log: S::Log) {
        self.epoch.cancel();
        self.scene.prepare(&log);
        self.log = Some(log);
        self.cursor = 0;
    }

    fn apply_next(&mut self) {
        if let Some(log) = self.log.as_ref() {
            self.scene.apply(log, self.cursor, &mut self.counters);
            self.cursor += 1;
        }
    }

    /// Apply one step, then either finish or schedule the next.
    fn advance(&mut self) -> Option<Scheduled> {
        self.apply_next();
        if self.cursor >= self.total_steps() {
            self.finish();
            None
        } else {
            Some(self.schedule())
        }
    }

    fn schedule(&mut self) -> Scheduled {
        let delay = self.speed.delay();
        tracing::trace!(cursor = self.cursor, ?delay, "next step scheduled");
        Scheduled {
            token: self.epoch.issue(),
            delay,
        }
    }

    fn finish(&mut self) {
        self.epoch.cancel();
        self.state = PlaybackState::Stopped;
        tracing::info!(steps = self.cursor, "playback finished");
    }
}

/// Playback status for sending to frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStatus<C> {
    pub state: PlaybackState,
    pub current_step: usize,
    pub total_steps: usize,
    pub progress: f64,
    pub speed: SpeedLevel,
    pub speed_label: &'static str,
    pub counters: C,
}

impl<S: Scene> From<&Playback<S>> for PlaybackStatus<S::Counters> {
    fn from(playback: &Playback<S>) -> Self {
        Self {
            state: playback.state,
            current_step: playback.cursor,
            total_steps: playback.total_steps(),
            progress: playback.progress(),
            speed: playback.speed,
            speed_label: playback.speed.label(),
            counters: playback.counters.clone(),
        }
    }
}
