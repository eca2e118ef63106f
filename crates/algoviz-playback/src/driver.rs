//! Tokio clock for a [`Playback`].
//!
//! The driver owns the engine behind a mutex and runs at most one timer task
//! for it. The task sleeps, locks the engine and fires its token; a step is
//! therefore always applied under the lock, and a pause or stop that wins the
//! lock first turns the task's token stale.

use std::sync::Arc;

use algoviz_model::SpeedLevel;
use tokio::sync::{Mutex, MutexGuard};
use tokio::task::JoinHandle;

use crate::playback::{Playback, PlaybackState, PlaybackStatus};
use crate::scene::Scene;
use crate::timer::Scheduled;

/// Shared handle that runs a [`Playback`] on the tokio clock.
pub struct PlaybackDriver<S: Scene> {
    engine: Arc<Mutex<Playback<S>>>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<S> PlaybackDriver<S>
where
    S: Scene + Send + 'static,
    S::Log: Send + 'static,
    S::Counters: Send + 'static,
{
    pub fn new(playback: Playback<S>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(playback)),
            timer: Mutex::new(None),
        }
    }

    /// Lock the engine for direct inspection or scene edits.
    pub async fn lock(&self) -> MutexGuard<'_, Playback<S>> {
        self.engine.lock().await
    }

    pub async fn status(&self) -> PlaybackStatus<S::Counters> {
        PlaybackStatus::from(&*self.engine.lock().await)
    }

    /// Generate a fresh log with the scene and play it from the top.
    ///
    /// Counters reset. Returns false when not stopped or when the scene has
    /// nothing to animate.
    pub async fn run(&self) -> bool {
        let mut timer = self.timer.lock().await;
        let scheduled = {
            let mut engine = self.engine.lock().await;
            if engine.state() != PlaybackState::Stopped {
                tracing::debug!(state = %engine.state(), "run ignored");
                return false;
            }
            let log = engine.scene_mut().generate();
            if S::timeline_len(&log) == 0 {
                tracing::warn!("run ignored, generated log has nothing to animate");
                return false;
            }
            engine.reset_counters();
            engine.play(log)
        };
        self.respawn(&mut timer, scheduled);
        true
    }

    /// Play a log produced elsewhere. Ignored unless stopped.
    pub async fn play(&self, log: S::Log) {
        let mut timer = self.timer.lock().await;
        let scheduled = self.engine.lock().await.play(log);
        if scheduled.is_some() {
            self.respawn(&mut timer, scheduled);
        }
    }

    pub async fn pause(&self) -> bool {
        let mut timer = self.timer.lock().await;
        let paused = self.engine.lock().await.pause();
        if paused {
            abort(&mut timer);
        }
        paused
    }

    pub async fn resume(&self) {
        let mut timer = self.timer.lock().await;
        let scheduled = self.engine.lock().await.resume();
        if scheduled.is_some() {
            self.respawn(&mut timer, scheduled);
        }
    }

    pub async fn step(&self) -> bool {
        self.engine.lock().await.step()
    }

    pub async fn stop(&self) {
        let mut timer = self.timer.lock().await;
        self.engine.lock().await.stop();
        abort(&mut timer);
    }

    pub async fn set_speed(&self, speed: SpeedLevel) {
        self.engine.lock().await.set_speed(speed);
    }

    /// Replace the timer task with one that follows `scheduled`.
    ///
    /// Callers hold the timer lock across the engine transition that
    /// produced `scheduled`, so the token is always the engine's latest.
    fn respawn(&self, timer: &mut Option<JoinHandle<()>>, scheduled: Option<Scheduled>) {
        abort(timer);
        let Some(first) = scheduled else {
            return;
        };

        let engine = Arc::clone(&self.engine);
        *timer = Some(tokio::spawn(async move {
            let mut next = Some(first);
            while let Some(Scheduled { token, delay }) = next {
                tokio::time::sleep(delay).await;
                next = engine.lock().await.fire(token);
            }
        }));
    }
}

/// Abort the running timer task, if any.
fn abort(timer: &mut Option<JoinHandle<()>>) {
    if let Some(handle) = timer.take() {
        handle.abort();
    }
}

impl<S: Scene> Drop for PlaybackDriver<S> {
    fn drop(&mut self) {
        if let Some(handle) = self.timer.get_mut().take() {
            handle.abort();
        }
    }
}
