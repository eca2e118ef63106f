//! Quick sort with Lomuto partitioning.
//!
//! The pivot is always the last element of the active range. Sub-ranges that
//! still need work are kept in the partition overlay while they are being
//! sorted, so a renderer can shade the current divide-and-conquer scope.

use algoviz_model::{SortAlgorithm, SortLog, StepKind};

use crate::recorder::Recorder;

pub fn quick_sort(input: &[i64]) -> SortLog {
    if input.is_empty() {
        return SortLog::empty(SortAlgorithm::Quick);
    }

    let mut rec = Recorder::new(input).tracking_partitions();
    let high = rec.len() - 1;
    sort_range(&mut rec, 0, high);

    rec.record_complete(&[], "Array sorting complete");
    rec.finish(SortAlgorithm::Quick)
}

/// Sort `low..=high`.
fn sort_range(rec: &mut Recorder, low: usize, high: usize) {
    if low == high {
        rec.mark_sorted(low);
        let value = rec.values[low];
        rec.record(
            StepKind::SingleElement,
            &[low],
            &[value],
            format!("Single element {value} at index {low} is already sorted"),
        );
        return;
    }

    let pivot_value = rec.values[high];
    rec.record(
        StepKind::Pivot,
        &[high],
        &[pivot_value],
        format!("Choosing pivot: {pivot_value} at index {high}"),
    );

    let pivot = partition(rec, low, high);

    rec.mark_sorted(pivot);
    let placed = rec.values[pivot];
    rec.record(
        StepKind::PivotPlaced,
        &[pivot],
        &[placed],
        format!("Pivot {placed} placed at its final position {pivot}"),
    );

    // Only ranges of two or more elements go into the overlay.
    let left = (low + 1 < pivot).then(|| (low, pivot - 1));
    let right = (pivot + 1 < high).then(|| (pivot + 1, high));
    for &(l, h) in left.iter().chain(right.iter()) {
        rec.push_partition(l, h);
    }

    if pivot > low {
        sort_range(rec, low, pivot - 1);
    }
    if pivot < high {
        sort_range(rec, pivot + 1, high);
    }

    for &(l, h) in left.iter().chain(right.iter()) {
        rec.remove_partition(l, h);
    }
}

/// Lomuto partition of `low..=high` around `values[high]`. Returns the
/// pivot's final index.
fn partition(rec: &mut Recorder, low: usize, high: usize) -> usize {
    let pivot = rec.values[high];
    rec.record(
        StepKind::PartitionStart,
        &[low, high],
        &[pivot],
        format!("Partitioning array from index {low} to {high} with pivot {pivot}"),
    );

    // Next slot of the "<= pivot" region.
    let mut boundary = low;
    for j in low..high {
        let value = rec.values[j];
        rec.record(
            StepKind::Comparison,
            &[j, high],
            &[value, pivot],
            format!("Comparing {value} with pivot value {pivot}"),
        );

        if value <= pivot {
            if boundary != j {
                rec.values.swap(boundary, j);
                let (moved, other) = (rec.values[boundary], rec.values[j]);
                rec.record(
                    StepKind::Swap,
                    &[boundary, j],
                    &[moved, other],
                    format!("Moving {moved} to left partition (≤ pivot)"),
                );
            } else {
                rec.record(
                    StepKind::Correct,
                    &[boundary],
                    &[value],
                    format!("{value} already in correct side of partition (≤ pivot)"),
                );
            }
            boundary += 1;
        }
    }

    if boundary != high {
        rec.values.swap(boundary, high);
        let (placed, displaced) = (rec.values[boundary], rec.values[high]);
        rec.record(
            StepKind::Swap,
            &[boundary, high],
            &[placed, displaced],
            format!("Placing pivot: Swapping {placed} with pivot {displaced}"),
        );
    } else {
        rec.record(
            StepKind::PivotCorrect,
            &[high],
            &[pivot],
            format!("Pivot {pivot} already in correct position"),
        );
    }

    boundary
}

#[cfg(test)]
mod tests {
    use super::*;
    use algoviz_model::PartitionRange;

    #[test]
    fn pivot_is_last_element() {
        let log = quick_sort(&[3, 7, 1, 5]);
        let first = &log.steps[0];
        assert_eq!(first.kind, StepKind::Pivot);
        assert_eq!(first.indices, vec![3]);
        assert_eq!(first.current_values, vec![5]);
    }

    #[test]
    fn lomuto_partition_places_pivot() {
        let log = quick_sort(&[3, 7, 1, 5]);
        let placed = log.steps_of(StepKind::PivotPlaced).next().unwrap();
        // 3 and 1 are <= 5, so the pivot lands at index 2.
        assert_eq!(placed.indices, vec![2]);
        assert_eq!(placed.snapshot, vec![3, 1, 5, 7]);
        assert!(placed.sorted.contains(&2));
    }

    #[test]
    fn overlay_holds_pending_ranges_and_empties() {
        let log = quick_sort(&[4, 8, 2, 6, 1, 5]);
        let after_first = log.steps_of(StepKind::Pivot).nth(1).unwrap();
        let ranges = after_first.partition_ranges.as_ref().unwrap();
        assert!(!ranges.is_empty());

        let last = log.last().unwrap();
        assert_eq!(last.partition_ranges.as_deref(), Some(&[][..]));
        assert_eq!(last.snapshot, vec![1, 2, 4, 5, 6, 8]);
    }

    #[test]
    fn overlay_never_holds_single_cells() {
        let log = quick_sort(&[9, 2, 7, 4, 6, 1, 8]);
        for step in &log.steps {
            for range in step.partition_ranges.iter().flatten() {
                let PartitionRange { low, high } = *range;
                assert!(low < high, "degenerate range {low}..={high}");
            }
        }
    }

    #[test]
    fn pivot_swap_names_pivot_first() {
        // [3, 7, 1, 5]: the pivot 5 trades places with 7.
        let log = quick_sort(&[3, 7, 1, 5]);
        let swap = log
            .steps_of(StepKind::Swap)
            .find(|s| s.message.starts_with("Placing pivot"))
            .unwrap();
        assert_eq!(swap.indices, vec![2, 3]);
        assert_eq!(swap.current_values, vec![5, 7]);
        assert_eq!(swap.message, "Placing pivot: Swapping 5 with pivot 7");
    }

    #[test]
    fn already_placed_pivot_is_logged() {
        let log = quick_sort(&[1, 2]);
        assert_eq!(log.steps_of(StepKind::PivotCorrect).count(), 1);
        assert_eq!(log.steps_of(StepKind::Correct).count(), 1);
    }
}
