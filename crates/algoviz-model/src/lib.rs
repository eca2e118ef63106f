//! Algoviz Model
//!
//! Plain value types shared by the algorithm adapters and the playback engine.
//!
//! # Step logs
//!
//! Every algorithm runs to completion before anything is shown, and leaves
//! behind an immutable, serializable log:
//!
//! - **Sorting**: a flat list of [`Step`]s, each carrying a value copy of the
//!   whole sequence, the positions involved and the positions already sorted.
//! - **Pathfinding**: a [`PathLog`] with the cells in visitation order and the
//!   final path, replayed as one `visited ++ path` timeline.
//!
//! A player only needs the log to reproduce the animation; it never needs to
//! know which algorithm produced it.
//!
//! # Grid
//!
//! [`Grid`] holds walls, the start/end markers and display flags. Searches
//! keep their own bookkeeping and never write to the caller's grid.

mod algorithm;
mod coord;
mod error;
mod generate;
mod grid;
mod path;
mod speed;
mod step;

pub use algorithm::{AlgorithmFamily, AlgorithmInfo, PathAlgorithm, SortAlgorithm};
pub use coord::{Coord, Direction};
pub use error::{Error, Result};
pub use generate::{place_random_markers, random_grid, random_sequence, MAX_VALUE, MIN_VALUE};
pub use grid::{Cell, Grid};
pub use path::{AstarScore, CellRecord, PathLog, TimelineEntry};
pub use speed::{SpeedLevel, BASE_INTERVAL_MS, MIN_INTERVAL_MS};
pub use step::{MergeRange, PartitionRange, SortLog, Step, StepKind};

/// Default sequence length.
pub const DEFAULT_ARRAY_SIZE: usize = 50;

/// Default grid side length.
pub const DEFAULT_GRID_SIZE: usize = 15;

/// Longest sequence a run accepts.
pub const MAX_ARRAY_SIZE: usize = 200;

/// Largest grid side length a run accepts.
pub const MAX_GRID_SIZE: usize = 100;

/// Check a sequence length against [`MAX_ARRAY_SIZE`].
pub fn check_array_size(size: usize) -> Result<usize> {
    if size > MAX_ARRAY_SIZE {
        return Err(Error::SizeTooLarge {
            size,
            max: MAX_ARRAY_SIZE,
        });
    }
    Ok(size)
}

/// Check a grid side length against [`MAX_GRID_SIZE`].
pub fn check_grid_size(size: usize) -> Result<usize> {
    if size > MAX_GRID_SIZE {
        return Err(Error::SizeTooLarge {
            size,
            max: MAX_GRID_SIZE,
        });
    }
    Ok(size)
}
