//! Algoviz Visualization
//!
//! Scenes, renderers and the playback server for the sorting and
//! pathfinding visualizers.
//!
//! # Architecture
//!
//! - **Scenes**: [`SortingScene`] and [`PathfindingScene`] generate logs and
//!   apply one step at a time, updating counters and drawing a frame
//! - **Renderers**: [`ConsoleRenderer`] draws to a terminal, [`FrameSink`]
//!   broadcasts frames to WebSocket clients
//! - **Workbench**: one playback driver per domain, plus grid editing
//! - **Server**: REST API for controls, WebSocket for frames
//!
//! # Usage
//!
//! ```ignore
//! let prefs = Preferences::load("algoviz.json")?;
//! let server = VisServer::new(&prefs)?;
//! server.serve(3000).await?;
//! ```

mod console;
mod error;
mod pathfinding;
mod preferences;
mod render;
mod server;
mod sink;
mod sorting;
mod theme;
mod workbench;

pub use console::ConsoleRenderer;
pub use error::{Error, Result};
pub use pathfinding::{PathCounters, PathfindingScene};
pub use preferences::Preferences;
pub use render::{GridFrame, GridRenderer, RenderFrame, SequenceFrame, SortRenderer};
pub use server::VisServer;
pub use sink::{FrameSink, FRAME_CHANNEL_CAPACITY};
pub use sorting::{SortCounters, SortingScene};
pub use theme::{hex_to_rgb, Palette, Theme};
pub use workbench::{
    AlgorithmCatalog, AlgorithmEntry, Command, DomainStatus, Overview, PathfindingOverview,
    SortingOverview, UnknownCommand, Workbench,
};
