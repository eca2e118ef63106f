//! Renderer interfaces.
//!
//! Scenes hand renderers a borrowed view of the state after each applied
//! step. Renderers only read: they receive shared references and cannot
//! reach back into the model.

use std::collections::BTreeSet;

use algoviz_model::{
    Cell, CellRecord, Grid, MergeRange, PartitionRange, PathAlgorithm, SortAlgorithm,
};
use serde::Serialize;

use crate::theme::Theme;

/// A sorting step as a renderer sees it.
#[derive(Debug, Clone, Copy)]
pub struct SequenceFrame<'a> {
    pub algorithm: SortAlgorithm,
    pub values: &'a [i64],
    pub highlighted: &'a [usize],
    pub sorted: &'a BTreeSet<usize>,
    pub partition_ranges: &'a [PartitionRange],
    pub merge_ranges: &'a [MergeRange],
    pub message: &'a str,
}

/// A pathfinding step as a renderer sees it.
#[derive(Debug, Clone, Copy)]
pub struct GridFrame<'a> {
    pub algorithm: PathAlgorithm,
    pub grid: &'a Grid,
    /// The cell the step is about, if any
    pub current: Option<&'a CellRecord>,
    pub message: &'a str,
}

/// Draws the sorting view.
pub trait SortRenderer {
    fn render_sequence(&mut self, frame: &SequenceFrame<'_>, theme: Theme);
}

/// Draws the pathfinding view.
pub trait GridRenderer {
    fn render_grid(&mut self, frame: &GridFrame<'_>, theme: Theme);
}

/// Owned, serializable copy of a frame for sending over the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RenderFrame {
    #[serde(rename_all = "camelCase")]
    Sequence {
        algorithm: SortAlgorithm,
        values: Vec<i64>,
        highlighted: Vec<usize>,
        sorted: BTreeSet<usize>,
        partition_ranges: Vec<PartitionRange>,
        merge_ranges: Vec<MergeRange>,
        message: String,
        theme: Theme,
    },
    #[serde(rename_all = "camelCase")]
    Grid {
        algorithm: PathAlgorithm,
        width: usize,
        height: usize,
        cells: Vec<Cell>,
        current: Option<CellRecord>,
        message: String,
        theme: Theme,
    },
}

impl RenderFrame {
    pub fn from_sequence(frame: &SequenceFrame<'_>, theme: Theme) -> Self {
        Self::Sequence {
            algorithm: frame.algorithm,
            values: frame.values.to_vec(),
            highlighted: frame.highlighted.to_vec(),
            sorted: frame.sorted.clone(),
            partition_ranges: frame.partition_ranges.to_vec(),
            merge_ranges: frame.merge_ranges.to_vec(),
            message: frame.message.to_owned(),
            theme,
        }
    }

    pub fn from_grid(frame: &GridFrame<'_>, theme: Theme) -> Self {
        Self::Grid {
            algorithm: frame.algorithm,
            width: frame.grid.width(),
            height: frame.grid.height(),
            cells: frame.grid.cells().to_vec(),
            current: frame.current.copied(),
            message: frame.message.to_owned(),
            theme,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Sequence { message, .. } | Self::Grid { message, .. } => message,
        }
    }
}
