//! Algoviz Playback
//!
//! A generic replay engine for step logs. The engine knows nothing about
//! sorting or grids: a [`Scene`] supplies the log, its length and what
//! applying one entry means, and the engine moves a cursor through it.
//!
//! # States
//!
//! ```text
//! Stopped --play--> Playing --pause--> Paused
//!    ^                 |  ^--resume-----'  |
//!    '---end of log----'                   |
//!    '-------------stop (any state)--------'
//! ```
//!
//! Automatic advancement is a cancellable deferred callback. [`Playback`]
//! hands out [`Scheduled`] requests carrying a [`TimerToken`]; a token is
//! invalidated by every transition that stops advancement, so firing it late
//! is harmless. [`PlaybackDriver`] runs those requests on the tokio clock.

mod driver;
mod playback;
mod scene;
mod timer;

pub use driver::PlaybackDriver;
pub use playback::{Playback, PlaybackState, PlaybackStatus};
pub use scene::Scene;
pub use timer::{Scheduled, TimerToken};
