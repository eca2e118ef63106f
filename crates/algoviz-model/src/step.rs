//! Sorting step log.
//!
//! A sorting adapter emits a flat, ordered list of [`Step`]s. Each step holds
//! a value copy of the whole sequence, so replaying step `i` always renders
//! the same picture no matter what came before.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::algorithm::SortAlgorithm;

/// What a step records.
///
/// Serialized tags are camelCase. Tags this build does not know about
/// deserialize to [`StepKind::Unknown`] so a player can skip them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepKind {
    Comparison,
    Swap,
    PassComplete,
    Complete,
    // Selection sort
    Select,
    UpdateMin,
    InPlace,
    ElementPlaced,
    // Quick sort
    Pivot,
    PivotPlaced,
    PartitionStart,
    Correct,
    PivotCorrect,
    SingleElement,
    // Insertion sort
    Initialize,
    SelectKey,
    Shift,
    Insert,
    AlreadySorted,
    ElementInserted,
    // Merge sort
    Divide,
    BeforeMerge,
    AfterMerge,
    MergeCopy,
    MergeCompare,
    MergePlacement,
    #[serde(other)]
    Unknown,
}

impl StepKind {
    /// Steps that count towards the comparison counter.
    pub fn is_comparison(self) -> bool {
        matches!(self, Self::Comparison | Self::MergeCompare)
    }

    /// Steps that count towards the swap counter.
    pub fn is_swap(self) -> bool {
        matches!(self, Self::Swap)
    }
}

/// An active quicksort partition, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRange {
    pub low: usize,
    pub high: usize,
}

impl PartitionRange {
    pub fn contains(&self, index: usize) -> bool {
        (self.low..=self.high).contains(&index)
    }
}

/// The mergesort range being worked on, inclusive, with its recursion depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRange {
    pub start: usize,
    pub end: usize,
    pub depth: usize,
}

impl MergeRange {
    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// One immutable entry of a sorting log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub kind: StepKind,
    /// Positions involved, in the order the message refers to them.
    pub indices: Vec<usize>,
    /// The whole sequence at this instant.
    pub snapshot: Vec<i64>,
    /// Values worth showing next to the message; may be empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current_values: Vec<i64>,
    pub message: String,
    /// Positions already in their final place.
    pub sorted: BTreeSet<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_ranges: Option<Vec<PartitionRange>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_ranges: Option<Vec<MergeRange>>,
}

/// The full output of one sorting run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortLog {
    pub algorithm: SortAlgorithm,
    pub steps: Vec<Step>,
}

impl SortLog {
    /// A log with nothing to animate.
    pub fn empty(algorithm: SortAlgorithm) -> Self {
        Self {
            algorithm,
            steps: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// The last step, whose snapshot is the sorted sequence.
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    /// Iterate over steps of one kind.
    pub fn steps_of(&self, kind: StepKind) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.kind == kind)
    }
}
