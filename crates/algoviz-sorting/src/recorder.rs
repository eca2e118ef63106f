//! Working copy plus the step log being built.

use std::collections::BTreeSet;

use algoviz_model::{MergeRange, PartitionRange, SortAlgorithm, SortLog, Step, StepKind};

/// Owns the adapter's private copy of the sequence and appends snapshots of
/// it to the log.
pub(crate) struct Recorder {
    pub(crate) values: Vec<i64>,
    sorted: BTreeSet<usize>,
    partitions: Option<Vec<PartitionRange>>,
    steps: Vec<Step>,
}

impl Recorder {
    pub(crate) fn new(input: &[i64]) -> Self {
        Self {
            values: input.to_vec(),
            sorted: BTreeSet::new(),
            partitions: None,
            steps: Vec::new(),
        }
    }

    /// Attach the active-partition overlay to every step (quicksort).
    pub(crate) fn tracking_partitions(mut self) -> Self {
        self.partitions = Some(Vec::new());
        self
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn mark_sorted(&mut self, index: usize) {
        self.sorted.insert(index);
    }

    pub(crate) fn mark_range_sorted(&mut self, start: usize, end: usize) {
        self.sorted.extend(start..=end);
    }

    pub(crate) fn push_partition(&mut self, low: usize, high: usize) {
        if let Some(ranges) = self.partitions.as_mut() {
            ranges.push(PartitionRange { low, high });
        }
    }

    pub(crate) fn remove_partition(&mut self, low: usize, high: usize) {
        if let Some(ranges) = self.partitions.as_mut() {
            if let Some(pos) = ranges.iter().position(|r| r.low == low && r.high == high) {
                ranges.remove(pos);
            }
        }
    }

    pub(crate) fn clear_partitions(&mut self) {
        if let Some(ranges) = self.partitions.as_mut() {
            ranges.clear();
        }
    }

    /// Log the current state.
    pub(crate) fn record(
        &mut self,
        kind: StepKind,
        indices: &[usize],
        current_values: &[i64],
        message: impl Into<String>,
    ) {
        self.push(kind, indices.to_vec(), current_values.to_vec(), message.into(), None);
    }

    /// Log the current state scoped to a merge range.
    pub(crate) fn record_merge(
        &mut self,
        kind: StepKind,
        indices: &[usize],
        current_values: &[i64],
        message: impl Into<String>,
        range: MergeRange,
    ) {
        self.push(
            kind,
            indices.to_vec(),
            current_values.to_vec(),
            message.into(),
            Some(vec![range]),
        );
    }

    /// Final step: every position sorted, overlays emptied.
    pub(crate) fn record_complete(&mut self, indices: &[usize], message: impl Into<String>) {
        self.mark_range_sorted(0, self.values.len().saturating_sub(1));
        self.clear_partitions();
        self.push(StepKind::Complete, indices.to_vec(), Vec::new(), message.into(), None);
    }

    /// Final merge sort step, which also carries an empty merge overlay.
    pub(crate) fn record_merge_complete(&mut self, message: impl Into<String>) {
        self.mark_range_sorted(0, self.values.len().saturating_sub(1));
        self.push(StepKind::Complete, Vec::new(), Vec::new(), message.into(), Some(Vec::new()));
    }

    pub(crate) fn finish(self, algorithm: SortAlgorithm) -> SortLog {
        SortLog {
            algorithm,
            steps: self.steps,
        }
    }

    fn push(
        &mut self,
        kind: StepKind,
        indices: Vec<usize>,
        current_values: Vec<i64>,
        message: String,
        merge_ranges: Option<Vec<MergeRange>>,
    ) {
        self.steps.push(Step {
            kind,
            indices,
            snapshot: self.values.clone(),
            current_values,
            message,
            sorted: self.sorted.clone(),
            partition_ranges: self.partitions.clone(),
            merge_ranges,
        });
    }
}
