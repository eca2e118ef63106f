//! Top-down merge sort.

use algoviz_model::{MergeRange, SortAlgorithm, SortLog, StepKind};

use crate::recorder::Recorder;

pub fn merge_sort(input: &[i64]) -> SortLog {
    if input.is_empty() {
        return SortLog::empty(SortAlgorithm::Merge);
    }

    let mut rec = Recorder::new(input);
    let end = rec.len() - 1;
    sort_range(&mut rec, 0, end, 0);

    rec.record_merge_complete("Array sorting complete");
    rec.finish(SortAlgorithm::Merge)
}

/// Sort `start..=end`; `depth` is the recursion level, 0 at the root.
fn sort_range(rec: &mut Recorder, start: usize, end: usize, depth: usize) {
    let range = MergeRange { start, end, depth };

    if start >= end {
        rec.mark_sorted(start);
        let value = rec.values[start];
        rec.record_merge(
            StepKind::SingleElement,
            &[start],
            &[value],
            format!("Subarray of size 1 at index {start} is already sorted"),
            range,
        );
        return;
    }

    let mid = start + (end - start) / 2;
    rec.record_merge(
        StepKind::Divide,
        &[start, mid, end],
        &[],
        format!("Dividing array from indices {start} to {end} at midpoint {mid}"),
        range,
    );

    sort_range(rec, start, mid, depth + 1);
    sort_range(rec, mid + 1, end, depth + 1);

    rec.record_merge(
        StepKind::BeforeMerge,
        &[start, mid, end],
        &[],
        format!(
            "Merging subarrays from indices {start} to {mid} and {} to {end}",
            mid + 1
        ),
        range,
    );

    merge(rec, start, mid, end, range);

    rec.mark_range_sorted(start, end);
    rec.record_merge(
        StepKind::AfterMerge,
        &[start, end],
        &[],
        format!("Merged subarray from indices {start} to {end} is now sorted"),
        range,
    );
}

fn merge(rec: &mut Recorder, start: usize, mid: usize, end: usize, range: MergeRange) {
    let left = rec.values[start..=mid].to_vec();
    let right = rec.values[mid + 1..=end].to_vec();

    rec.record_merge(
        StepKind::MergeCopy,
        &[start, mid, mid + 1, end],
        &[],
        format!(
            "Copying subarrays for merge: Left [{}], Right [{}]",
            join(&left),
            join(&right)
        ),
        range,
    );

    let (mut l, mut r) = (0, 0);
    let mut dest = start;

    while l < left.len() && r < right.len() {
        let (a, b) = (left[l], right[r]);
        rec.record_merge(
            StepKind::MergeCompare,
            &[start + l, mid + 1 + r],
            &[a, b],
            format!("Comparing {a} and {b}"),
            range,
        );

        // Ties go left, which keeps the sort stable.
        let (value, side) = if a <= b {
            l += 1;
            (a, "left")
        } else {
            r += 1;
            (b, "right")
        };
        rec.values[dest] = value;
        rec.record_merge(
            StepKind::MergePlacement,
            &[dest],
            &[value],
            format!("Placing {value} from {side} subarray at position {dest}"),
            range,
        );
        dest += 1;
    }

    for (rest, side) in [(&left[l..], "left"), (&right[r..], "right")] {
        for &value in rest {
            rec.values[dest] = value;
            rec.record_merge(
                StepKind::MergePlacement,
                &[dest],
                &[value],
                format!("Placing remaining {value} from {side} subarray at position {dest}"),
                range,
            );
            dest += 1;
        }
    }
}

fn join(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_at_midpoint() {
        let log = merge_sort(&[4, 1, 3, 2]);
        let first = &log.steps[0];
        assert_eq!(first.kind, StepKind::Divide);
        assert_eq!(first.indices, vec![0, 1, 3]);
        assert_eq!(
            first.merge_ranges.as_deref(),
            Some(&[MergeRange { start: 0, end: 3, depth: 0 }][..])
        );
    }

    #[test]
    fn copy_message_lists_both_halves() {
        let log = merge_sort(&[4, 1, 3, 2]);
        let copies: Vec<_> = log
            .steps_of(StepKind::MergeCopy)
            .map(|s| s.message.as_str())
            .collect();
        assert_eq!(
            copies.last().copied(),
            Some("Copying subarrays for merge: Left [1, 4], Right [2, 3]")
        );
    }

    #[test]
    fn depth_grows_with_recursion() {
        let log = merge_sort(&[8, 7, 6, 5, 4, 3, 2, 1]);
        let deepest = log
            .steps
            .iter()
            .filter_map(|s| s.merge_ranges.as_ref())
            .flatten()
            .map(|r| r.depth)
            .max();
        assert_eq!(deepest, Some(3));
    }

    #[test]
    fn leftover_elements_are_placed() {
        let log = merge_sort(&[1, 2, 3]);
        let remaining = log
            .steps_of(StepKind::MergePlacement)
            .filter(|s| s.message.starts_with("Placing remaining"))
            .count();
        assert!(remaining > 0);
        assert_eq!(log.last().unwrap().snapshot, vec![1, 2, 3]);
    }

    #[test]
    fn final_step_has_empty_overlay() {
        let log = merge_sort(&[2, 1]);
        let last = log.last().unwrap();
        assert_eq!(last.kind, StepKind::Complete);
        assert_eq!(last.merge_ranges.as_deref(), Some(&[][..]));
        assert_eq!(last.sorted, (0..2).collect());
    }
}
